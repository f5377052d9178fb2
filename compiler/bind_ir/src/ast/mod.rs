//! The declaration arena and type pool.
//!
//! `Ast` owns every declaration and every type descriptor of one
//! generation pass. Declarations and types are appended, never removed or
//! mutated (apart from the `ignored` flag, which earlier passes set before
//! marshalling starts), so ids handed out stay valid for the whole pass.
//!
//! # Design
//!
//! - Flat `Vec` storage indexed by [`DeclId`] / [`TypeId`]
//! - Primitive types pre-interned at fixed indices
//! - Side indexes (children per scope, specializations per template, class
//!   templates per name) filled as declarations are pushed
//! - Sugar (typedefs) and modifiers (pointers, references) are separate
//!   nodes; queries such as [`desugar`](Ast::desugar) and
//!   [`final_pointee`](Ast::final_pointee) walk them explicitly

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{Decl, DeclId, DeclKind, Primitive, Qualifiers, TemplateArgs, TypeData, TypeId};

type DeclList = SmallVec<[DeclId; 4]>;

/// Declarations and types of one generation pass.
#[derive(Clone, Debug)]
pub struct Ast {
    decls: Vec<Decl>,
    types: Vec<TypeData>,
    children: FxHashMap<DeclId, DeclList>,
    specializations: FxHashMap<DeclId, DeclList>,
    class_templates: FxHashMap<String, DeclList>,
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}

impl Ast {
    /// Create an empty AST with the primitive types pre-interned.
    pub fn new() -> Self {
        let mut types = Vec::with_capacity(64);
        types.extend(Primitive::ALL.iter().map(|&p| TypeData::Builtin(p)));
        Self {
            decls: Vec::new(),
            types,
            children: FxHashMap::default(),
            specializations: FxHashMap::default(),
            class_templates: FxHashMap::default(),
        }
    }

    // ── Lookup ──────────────────────────────────────────────────

    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    #[inline]
    pub fn ty(&self, id: TypeId) -> &TypeData {
        &self.types[id.index()]
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ── Declarations ────────────────────────────────────────────

    fn push_decl(&mut self, name: &str, parent: Option<DeclId>, kind: DeclKind) -> DeclId {
        let id = DeclId::from_raw(
            u32::try_from(self.decls.len()).unwrap_or_else(|_| {
                panic!("declaration arena exceeded {} entries", u32::MAX)
            }),
        );
        if let Some(parent) = parent {
            self.children.entry(parent).or_default().push(id);
        }
        match &kind {
            DeclKind::ClassTemplate => {
                self.class_templates.entry(name.to_owned()).or_default().push(id);
            }
            DeclKind::Specialization { template, .. } => {
                self.specializations.entry(*template).or_default().push(id);
            }
            _ => {}
        }
        self.decls.push(Decl {
            name: name.to_owned(),
            parent,
            kind,
            ignored: false,
        });
        id
    }

    pub fn translation_unit(&mut self, name: &str, system_header: bool) -> DeclId {
        self.push_decl(name, None, DeclKind::TranslationUnit { system_header })
    }

    pub fn namespace(&mut self, parent: DeclId, name: &str) -> DeclId {
        self.push_decl(name, Some(parent), DeclKind::Namespace { inline: false })
    }

    pub fn inline_namespace(&mut self, parent: DeclId, name: &str) -> DeclId {
        self.push_decl(name, Some(parent), DeclKind::Namespace { inline: true })
    }

    pub fn class(&mut self, parent: DeclId, name: &str) -> DeclId {
        self.push_decl(name, Some(parent), DeclKind::Class)
    }

    pub fn class_template(&mut self, parent: DeclId, name: &str) -> DeclId {
        self.push_decl(name, Some(parent), DeclKind::ClassTemplate)
    }

    pub fn method(&mut self, parent: DeclId, name: &str) -> DeclId {
        self.push_decl(name, Some(parent), DeclKind::Method)
    }

    pub fn field(&mut self, parent: DeclId, name: &str, ty: TypeId) -> DeclId {
        self.push_decl(name, Some(parent), DeclKind::Field { ty })
    }

    /// Declare a typedef and return the sugared type naming it.
    pub fn typedef(&mut self, parent: DeclId, name: &str, target: TypeId) -> TypeId {
        let decl = self.push_decl(name, Some(parent), DeclKind::Typedef { target });
        self.push_type(TypeData::Typedef { decl, target })
    }

    /// Find or create the specialization of `template` over `args`.
    ///
    /// The specialization lives in the template's scope and carries the
    /// template's name.
    pub fn specialization(&mut self, template: DeclId, args: &[TypeId]) -> DeclId {
        if let Some(existing) = self
            .specializations_of(template)
            .find(|&spec| self.specialization_args(spec) == args)
        {
            return existing;
        }
        let template_decl = self.decl(template);
        let (name, parent) = (template_decl.name.clone(), template_decl.parent);
        self.push_decl(
            &name,
            parent,
            DeclKind::Specialization {
                template,
                args: TemplateArgs::from_slice(args),
            },
        )
    }

    pub fn mark_ignored(&mut self, decl: DeclId) {
        self.decls[decl.index()].ignored = true;
    }

    // ── Types ───────────────────────────────────────────────────

    fn push_type(&mut self, data: TypeData) -> TypeId {
        let id = TypeId::from_raw(
            u32::try_from(self.types.len())
                .unwrap_or_else(|_| panic!("type pool exceeded {} entries", u32::MAX)),
        );
        self.types.push(data);
        id
    }

    #[inline]
    pub fn primitive(&self, primitive: Primitive) -> TypeId {
        TypeId::of(primitive)
    }

    pub fn pointer(&mut self, pointee: TypeId) -> TypeId {
        self.push_type(TypeData::Pointer {
            pointee,
            quals: Qualifiers::empty(),
        })
    }

    pub fn const_pointer(&mut self, pointee: TypeId) -> TypeId {
        self.push_type(TypeData::Pointer {
            pointee,
            quals: Qualifiers::CONST,
        })
    }

    pub fn reference(&mut self, pointee: TypeId) -> TypeId {
        self.push_type(TypeData::Reference {
            pointee,
            quals: Qualifiers::empty(),
        })
    }

    pub fn const_reference(&mut self, pointee: TypeId) -> TypeId {
        self.push_type(TypeData::Reference {
            pointee,
            quals: Qualifiers::CONST,
        })
    }

    pub fn array(&mut self, element: TypeId, size: Option<u64>) -> TypeId {
        self.push_type(TypeData::Array { element, size })
    }

    pub fn tag(&mut self, decl: DeclId) -> TypeId {
        self.push_type(TypeData::Tag { decl })
    }

    /// Instantiate `template` over `args`, creating the specialization
    /// declaration if needed.
    pub fn instantiate(&mut self, template: DeclId, args: &[TypeId]) -> TypeId {
        let decl = self.specialization(template, args);
        self.push_type(TypeData::TemplateSpecialization {
            template,
            args: TemplateArgs::from_slice(args),
            decl: Some(decl),
        })
    }

    pub fn injected_class_name(&mut self, template: DeclId, injected: TypeId) -> TypeId {
        self.push_type(TypeData::InjectedClassName { template, injected })
    }

    // ── Scope queries ───────────────────────────────────────────

    /// Enclosing scopes from innermost to the root, excluding `decl`.
    pub fn enclosing_scopes(&self, decl: DeclId) -> impl Iterator<Item = DeclId> + '_ {
        std::iter::successors(self.decl(decl).parent, move |&scope| self.decl(scope).parent)
    }

    pub fn translation_unit_of(&self, decl: DeclId) -> Option<DeclId> {
        if self.decl(decl).is_translation_unit() {
            return Some(decl);
        }
        self.enclosing_scopes(decl)
            .find(|&scope| self.decl(scope).is_translation_unit())
    }

    pub fn is_in_system_header(&self, decl: DeclId) -> bool {
        self.translation_unit_of(decl).is_some_and(|tu| {
            matches!(
                self.decl(tu).kind,
                DeclKind::TranslationUnit {
                    system_header: true
                }
            )
        })
    }

    /// Direct children of `parent`, in declaration order.
    pub fn children(&self, parent: DeclId) -> impl Iterator<Item = DeclId> + '_ {
        Self::indexed(self.children.get(&parent))
    }

    /// Every class template named `name`, in declaration order.
    pub fn find_class_templates<'a>(&'a self, name: &'a str) -> impl Iterator<Item = DeclId> + 'a {
        Self::indexed(self.class_templates.get(name))
    }

    /// Every specialization of `template`, in declaration order.
    pub fn specializations_of(&self, template: DeclId) -> impl Iterator<Item = DeclId> + '_ {
        Self::indexed(self.specializations.get(&template))
    }

    /// The class template behind a specialization, or `decl` itself.
    pub fn templated_decl(&self, decl: DeclId) -> DeclId {
        match self.decl(decl).kind {
            DeclKind::Specialization { template, .. } => template,
            _ => decl,
        }
    }

    /// Template arguments of a specialization declaration; empty otherwise.
    pub fn specialization_args(&self, decl: DeclId) -> &[TypeId] {
        match &self.decl(decl).kind {
            DeclKind::Specialization { args, .. } => args,
            _ => &[],
        }
    }

    fn indexed(list: Option<&DeclList>) -> impl Iterator<Item = DeclId> + '_ {
        list.into_iter().flatten().copied()
    }

    // ── Type queries ────────────────────────────────────────────

    /// Strip typedef sugar.
    pub fn desugar(&self, mut ty: TypeId) -> TypeId {
        while let TypeData::Typedef { target, .. } = self.ty(ty) {
            ty = *target;
        }
        ty
    }

    /// Strip sugar and every pointer, reference, and array layer.
    pub fn final_pointee(&self, ty: TypeId) -> TypeId {
        let mut current = self.desugar(ty);
        loop {
            match self.ty(current) {
                TypeData::Pointer { pointee, .. } | TypeData::Reference { pointee, .. } => {
                    current = self.desugar(*pointee);
                }
                TypeData::Array { element, .. } => current = self.desugar(*element),
                _ => return current,
            }
        }
    }

    pub fn is_pointer(&self, ty: TypeId) -> bool {
        matches!(self.ty(self.desugar(ty)), TypeData::Pointer { .. })
    }

    pub fn is_reference(&self, ty: TypeId) -> bool {
        matches!(self.ty(self.desugar(ty)), TypeData::Reference { .. })
    }

    /// Pointer or reference.
    pub fn is_address(&self, ty: TypeId) -> bool {
        self.is_pointer(ty) || self.is_reference(ty)
    }

    /// `T*` where `T` is a builtin other than `nullptr_t`.
    pub fn is_pointer_to_primitive(&self, ty: TypeId) -> bool {
        match self.ty(self.desugar(ty)) {
            TypeData::Pointer { pointee, .. } => matches!(
                self.ty(self.desugar(*pointee)),
                TypeData::Builtin(p) if *p != Primitive::NullPtr
            ),
            _ => false,
        }
    }

    /// The template instantiation behind `ty`, looking through sugar,
    /// pointers, references, and injected class names.
    ///
    /// Returns either a `TemplateSpecialization` type or a `Tag` naming a
    /// specialization declaration.
    pub fn template_instance(&self, ty: TypeId) -> Option<TypeId> {
        let mut current = self.final_pointee(ty);
        loop {
            match self.ty(current) {
                TypeData::InjectedClassName { injected, .. } => {
                    current = self.final_pointee(*injected);
                }
                TypeData::TemplateSpecialization { .. } => return Some(current),
                TypeData::Tag { decl } if self.is_specialization(*decl) => return Some(current),
                _ => return None,
            }
        }
    }

    /// Template arguments of the instantiation behind `ty`.
    pub fn instance_args(&self, ty: TypeId) -> Option<&[TypeId]> {
        let instance = self.template_instance(ty)?;
        match self.ty(instance) {
            TypeData::TemplateSpecialization { args, .. } => Some(args),
            TypeData::Tag { decl } => Some(self.specialization_args(*decl)),
            _ => None,
        }
    }

    /// Specialization declaration of the instantiation behind `ty`.
    pub fn instance_decl(&self, ty: TypeId) -> Option<DeclId> {
        let instance = self.template_instance(ty)?;
        match self.ty(instance) {
            TypeData::TemplateSpecialization { decl, .. } => *decl,
            TypeData::Tag { decl } => Some(*decl),
            _ => None,
        }
    }

    /// Class template of the instantiation behind `ty`.
    pub fn instance_template(&self, ty: TypeId) -> Option<DeclId> {
        let instance = self.template_instance(ty)?;
        match self.ty(instance) {
            TypeData::TemplateSpecialization { template, .. } => Some(*template),
            TypeData::Tag { decl } => Some(self.templated_decl(*decl)),
            _ => None,
        }
    }

    fn is_specialization(&self, decl: DeclId) -> bool {
        matches!(self.decl(decl).kind, DeclKind::Specialization { .. })
    }

    /// Structural equality after removing sugar.
    pub fn same_type(&self, a: TypeId, b: TypeId) -> bool {
        let (a, b) = (self.desugar(a), self.desugar(b));
        if a == b {
            return true;
        }
        match (self.ty(a), self.ty(b)) {
            (
                TypeData::Pointer { pointee: pa, quals: qa },
                TypeData::Pointer { pointee: pb, quals: qb },
            )
            | (
                TypeData::Reference { pointee: pa, quals: qa },
                TypeData::Reference { pointee: pb, quals: qb },
            ) => qa == qb && self.same_type(*pa, *pb),
            (
                TypeData::Array { element: ea, size: sa },
                TypeData::Array { element: eb, size: sb },
            ) => sa == sb && self.same_type(*ea, *eb),
            (TypeData::Tag { decl: da }, TypeData::Tag { decl: db }) => da == db,
            (
                TypeData::TemplateSpecialization { template: ta, args: aa, .. },
                TypeData::TemplateSpecialization { template: tb, args: ab, .. },
            ) => {
                ta == tb
                    && aa.len() == ab.len()
                    && aa.iter().zip(ab.iter()).all(|(x, y)| self.same_type(*x, *y))
            }
            _ => false,
        }
    }
}
