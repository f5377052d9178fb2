//! Host-language spelling of types.
//!
//! [`HostType`] covers the fixed host types mappings produce directly.
//! [`HostTypePrinter`] spells unmapped foreign types (primitives, user
//! classes, user templates) for the two surfaces; mapped types go through
//! their mapping's signature instead (see `mapping::host_type_of`).

use std::fmt;

use bind_ir::{Ast, DeclId, DeclKind, Primitive, TypeData, TypeId};

use crate::qualify::{qualified_foreign_name, qualified_host_name};
use crate::GeneratorTarget;

/// A host-runtime type with a fixed spelling per surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostType {
    /// Garbage-collected text.
    Text,
    /// Address-sized integer.
    IntPtr,
    /// Character output writer.
    TextWriter,
}

impl HostType {
    pub const fn render(self, target: GeneratorTarget) -> &'static str {
        match (self, target) {
            (Self::Text, GeneratorTarget::NativeAdjacent) => "System::String^",
            (Self::Text, GeneratorTarget::Managed) => "string",
            (Self::IntPtr, GeneratorTarget::NativeAdjacent) => "System::IntPtr",
            (Self::IntPtr, GeneratorTarget::Managed) => "global::System.IntPtr",
            (Self::TextWriter, GeneratorTarget::NativeAdjacent) => "System::IO::TextWriter^",
            (Self::TextWriter, GeneratorTarget::Managed) => "global::System.IO.TextWriter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeKind {
    /// `#include <file>`
    Angled,
    /// `#include "file"`
    Quoted,
}

/// A header the generated native-adjacent code must include.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Include {
    pub file: String,
    pub kind: IncludeKind,
}

impl Include {
    pub fn angled(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind: IncludeKind::Angled,
        }
    }

    pub fn quoted(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind: IncludeKind::Quoted,
        }
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IncludeKind::Angled => write!(f, "#include <{}>", self.file),
            IncludeKind::Quoted => write!(f, "#include \"{}\"", self.file),
        }
    }
}

/// Spells foreign types the way a host caller sees them.
#[derive(Clone, Copy, Debug)]
pub struct HostTypePrinter<'a> {
    ast: &'a Ast,
    target: GeneratorTarget,
}

impl<'a> HostTypePrinter<'a> {
    pub fn new(ast: &'a Ast, target: GeneratorTarget) -> Self {
        Self { ast, target }
    }

    pub fn print(&self, ty: TypeId) -> String {
        match self.ast.ty(ty) {
            TypeData::Builtin(p) => self.primitive(*p).to_owned(),
            TypeData::Pointer { pointee, .. } => {
                if self.is_record(*pointee) {
                    self.print(*pointee)
                } else {
                    HostType::IntPtr.render(self.target).to_owned()
                }
            }
            TypeData::Reference { pointee, .. } => self.print(*pointee),
            TypeData::Array { element, .. } => match self.target {
                GeneratorTarget::NativeAdjacent => format!("array<{}>^", self.print(*element)),
                GeneratorTarget::Managed => format!("{}[]", self.print(*element)),
            },
            TypeData::Tag { decl } => self.print_decl(*decl),
            TypeData::TemplateSpecialization { template, args, .. } => {
                self.print_named(*template, args)
            }
            TypeData::InjectedClassName { injected, .. } => self.print(*injected),
            TypeData::Typedef { target, .. } => self.print(*target),
        }
    }

    /// A record or specialization declaration, with host-spelled arguments.
    pub fn print_decl(&self, decl: DeclId) -> String {
        match &self.ast.decl(decl).kind {
            DeclKind::Specialization { template, args } => self.print_named(*template, args),
            _ => self.print_named(decl, &[]),
        }
    }

    fn print_named(&self, decl: DeclId, args: &[TypeId]) -> String {
        let mut out = match self.target {
            GeneratorTarget::NativeAdjacent => qualified_foreign_name(self.ast, decl),
            GeneratorTarget::Managed => qualified_host_name(self.ast, decl),
        };
        if !args.is_empty() {
            let args: Vec<String> = args.iter().map(|&arg| self.print(arg)).collect();
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        if self.target == GeneratorTarget::NativeAdjacent {
            out.push('^');
        }
        out
    }

    fn is_record(&self, ty: TypeId) -> bool {
        matches!(
            self.ast.ty(self.ast.desugar(ty)),
            TypeData::Tag { .. }
                | TypeData::TemplateSpecialization { .. }
                | TypeData::InjectedClassName { .. }
        )
    }

    fn primitive(&self, p: Primitive) -> &'static str {
        match self.target {
            GeneratorTarget::NativeAdjacent => match p {
                Primitive::WChar => "System::Char",
                Primitive::NullPtr => "System::IntPtr",
                _ => p.spelling(),
            },
            GeneratorTarget::Managed => match p {
                Primitive::Void => "void",
                Primitive::Bool => "bool",
                Primitive::Char | Primitive::SChar => "sbyte",
                Primitive::UChar => "byte",
                Primitive::WChar | Primitive::Char16 => "char",
                Primitive::Short => "short",
                Primitive::UShort => "ushort",
                Primitive::Int | Primitive::Long => "int",
                Primitive::UInt | Primitive::ULong | Primitive::Char32 => "uint",
                Primitive::LongLong => "long",
                Primitive::ULongLong => "ulong",
                Primitive::Float => "float",
                Primitive::Double => "double",
                Primitive::NullPtr => "global::System.IntPtr",
            },
        }
    }
}

#[cfg(test)]
mod tests;
