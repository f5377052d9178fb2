//! C++ spelling of types and declaration names.
//!
//! Used for registry keys (`basic_string<char, char_traits<char>,
//! allocator<char>>`) and for native types written into emitted code
//! (`std::vector<int>`). Inline namespaces never appear in printed names.

use std::fmt::Write;

use crate::{Ast, DeclId, DeclKind, Qualifiers, TypeData, TypeId};

/// How declaration names are spelled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum NameStyle {
    /// `std::vector`
    #[default]
    Qualified,
    /// `vector`
    Unqualified,
}

/// Prints types in C++ syntax.
#[derive(Copy, Clone, Debug, Default)]
pub struct NativeTypePrinter {
    style: NameStyle,
}

impl NativeTypePrinter {
    pub const fn new(style: NameStyle) -> Self {
        Self { style }
    }

    pub const fn qualified() -> Self {
        Self::new(NameStyle::Qualified)
    }

    pub const fn unqualified() -> Self {
        Self::new(NameStyle::Unqualified)
    }

    pub fn print(&self, ast: &Ast, ty: TypeId) -> String {
        let mut out = String::new();
        self.write_type(ast, ty, &mut out);
        out
    }

    /// Print a declaration's name; specializations include their arguments.
    pub fn print_decl(&self, ast: &Ast, decl: DeclId) -> String {
        let mut out = String::new();
        self.write_decl(ast, decl, &mut out);
        out
    }

    /// Name of a declaration without template arguments.
    pub fn decl_name(&self, ast: &Ast, decl: DeclId) -> String {
        let decl = ast.templated_decl(decl);
        match self.style {
            NameStyle::Unqualified => ast.decl(decl).name.clone(),
            NameStyle::Qualified => {
                let mut scopes: Vec<&str> = ast
                    .enclosing_scopes(decl)
                    .map(|scope| ast.decl(scope))
                    .filter(|scope| {
                        !scope.is_translation_unit() && !scope.is_inline_namespace()
                    })
                    .map(|scope| scope.name.as_str())
                    .collect();
                scopes.reverse();
                scopes.push(ast.decl(decl).name.as_str());
                scopes.join("::")
            }
        }
    }

    fn write_decl(&self, ast: &Ast, decl: DeclId, out: &mut String) {
        out.push_str(&self.decl_name(ast, decl));
        if let DeclKind::Specialization { args, .. } = &ast.decl(decl).kind {
            self.write_args(ast, args, out);
        }
    }

    fn write_args(&self, ast: &Ast, args: &[TypeId], out: &mut String) {
        out.push('<');
        for (i, &arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(ast, arg, out);
        }
        out.push('>');
    }

    fn write_type(&self, ast: &Ast, ty: TypeId, out: &mut String) {
        match ast.ty(ty) {
            TypeData::Builtin(p) => out.push_str(p.spelling()),
            TypeData::Pointer { pointee, quals } => {
                write_quals(*quals, out);
                self.write_type(ast, *pointee, out);
                out.push('*');
            }
            TypeData::Reference { pointee, quals } => {
                write_quals(*quals, out);
                self.write_type(ast, *pointee, out);
                out.push('&');
            }
            TypeData::Array { element, size } => {
                self.write_type(ast, *element, out);
                match size {
                    Some(n) => {
                        let _ = write!(out, "[{n}]");
                    }
                    None => out.push_str("[]"),
                }
            }
            TypeData::Tag { decl } => self.write_decl(ast, *decl, out),
            TypeData::TemplateSpecialization { template, args, .. } => {
                out.push_str(&self.decl_name(ast, *template));
                self.write_args(ast, args, out);
            }
            TypeData::InjectedClassName { injected, .. } => self.write_type(ast, *injected, out),
            TypeData::Typedef { decl, .. } => out.push_str(&self.decl_name(ast, *decl)),
        }
    }
}

fn write_quals(quals: Qualifiers, out: &mut String) {
    if quals.contains(Qualifiers::CONST) {
        out.push_str("const ");
    }
    if quals.contains(Qualifiers::VOLATILE) {
        out.push_str("volatile ");
    }
}

#[cfg(test)]
mod tests;
