//! Fully qualified names of foreign declarations.
//!
//! Inline namespaces (`std::__1`) are an ABI versioning device and never
//! appear in generated names.

use bind_ir::{Ast, DeclId, NativeTypePrinter};

/// Scope names from the root down to `decl`, skipping the translation unit
/// and inline namespaces. Specializations resolve to their class template.
fn scope_path(ast: &Ast, decl: DeclId) -> Vec<&str> {
    let decl = ast.templated_decl(decl);
    let mut names: Vec<&str> = std::iter::once(decl)
        .chain(ast.enclosing_scopes(decl))
        .map(|id| ast.decl(id))
        .filter(|d| !d.is_translation_unit() && !d.is_inline_namespace())
        .map(|d| d.name.as_str())
        .collect();
    names.reverse();
    names
}

/// Host-side qualified name: `global::std.basic_string`.
pub fn qualified_host_name(ast: &Ast, decl: DeclId) -> String {
    format!("global::{}", scope_path(ast, decl).join("."))
}

/// Foreign-side qualified name without template arguments: `std::basic_string`.
pub fn qualified_foreign_name(ast: &Ast, decl: DeclId) -> String {
    NativeTypePrinter::qualified().decl_name(ast, decl)
}
