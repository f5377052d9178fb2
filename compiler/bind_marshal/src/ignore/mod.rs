//! Ignore Checker: is a foreign type usable on the generated surface?
//!
//! A type is ignored when it, or something it is built from, has no host
//! representation. Templates propagate the decision upward from their
//! arguments, so `vector<Secret>` is ignored whenever `Secret` is.
//!
//! Decisions are recomputed per query. The checker holds no state beyond
//! its borrowed inputs and never mutates the AST.

use bind_ir::{Ast, DeclId, NativeTypePrinter, TypeData, TypeId};

use crate::mapping::TypeMapping;
use crate::qualify::qualified_foreign_name;
use crate::registry::TypeMapRegistry;
use crate::stack::with_stack_guard;
use crate::GeneratorTarget;

#[derive(Clone, Copy, Debug)]
pub struct IgnoreChecker<'a> {
    ast: &'a Ast,
    registry: &'a TypeMapRegistry,
    target: GeneratorTarget,
}

impl<'a> IgnoreChecker<'a> {
    pub fn new(ast: &'a Ast, registry: &'a TypeMapRegistry, target: GeneratorTarget) -> Self {
        Self {
            ast,
            registry,
            target,
        }
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    /// Whether `ty` must be excluded from the generated surface.
    pub fn is_ignored(&self, ty: TypeId) -> bool {
        let ignored = with_stack_guard(|| self.check(ty));
        tracing::trace!(
            ty = %NativeTypePrinter::qualified().print(self.ast, ty),
            ignored,
            "ignore decision"
        );
        ignored
    }

    fn check(&self, ty: TypeId) -> bool {
        match self.ast.ty(ty) {
            TypeData::Builtin(_) => false,
            TypeData::Pointer { pointee, .. } | TypeData::Reference { pointee, .. } => {
                self.is_ignored(*pointee)
            }
            TypeData::Array { element, .. } => self.is_ignored(*element),
            TypeData::Typedef { decl, target } => match self.typedef_mapping(*decl) {
                Some(mapping) => mapping.is_ignored(self, ty),
                None => self.is_ignored(*target),
            },
            TypeData::InjectedClassName { injected, .. } => self.is_ignored(*injected),
            TypeData::Tag { decl } => {
                let template = self.ast.templated_decl(*decl);
                if template == *decl {
                    self.ast.decl(*decl).ignored
                } else {
                    let args = self.ast.specialization_args(*decl);
                    self.check_instance(ty, template, args, Some(*decl))
                }
            }
            TypeData::TemplateSpecialization {
                template,
                args,
                decl,
            } => self.check_instance(ty, *template, args, *decl),
        }
    }

    /// A mapping registered under the typedef's own name.
    fn typedef_mapping(&self, decl: DeclId) -> Option<TypeMapping> {
        let qualified = qualified_foreign_name(self.ast, decl);
        let unqualified = &self.ast.decl(decl).name;
        self.registry
            .lookup(&qualified, 0, self.target)
            .or_else(|| self.registry.lookup(unqualified, 0, self.target))
            .map(|entry| entry.mapping)
    }

    fn check_instance(
        &self,
        ty: TypeId,
        template: DeclId,
        args: &[TypeId],
        spec: Option<DeclId>,
    ) -> bool {
        if let Some(resolved) = self.registry.resolve(self.ast, ty, self.target) {
            return resolved.mapping.is_ignored(self, ty);
        }
        if self.ast.is_in_system_header(template) {
            tracing::trace!(
                template = %qualified_foreign_name(self.ast, template),
                "unmapped standard template"
            );
            return true;
        }
        self.ast.decl(template).ignored
            || spec.is_some_and(|spec| self.ast.decl(spec).ignored)
            || args.iter().any(|&arg| self.is_ignored(arg))
    }
}
