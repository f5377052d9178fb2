//! Type Map Registry: signature string → type mapping.
//!
//! Entries are keyed by a signature, an inclusive template arity range, and
//! an optional generator target. Lookup for a concrete type walks its sugar
//! chain and tries a fixed sequence of candidate keys (see
//! [`candidate_keys`]); the first registered match wins.
//!
//! The built-in table is assembled by explicit [`TypeMapRegistry::register`]
//! calls in [`TypeMapRegistry::with_builtins`]. A process-wide read-only
//! instance is available through [`builtin_registry`].

use std::ops::RangeInclusive;
use std::sync::OnceLock;

use bind_ir::{Ast, NativeTypePrinter, TypeData, TypeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::mapping::TypeMapping;
use crate::qualify::qualified_foreign_name;
use crate::GeneratorTarget;

/// One registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeMapEntry {
    pub signature: String,
    pub arity: RangeInclusive<usize>,
    /// `None` registers the mapping for both surfaces.
    pub target: Option<GeneratorTarget>,
    pub mapping: TypeMapping,
}

impl TypeMapEntry {
    fn accepts(&self, arity: usize, target: GeneratorTarget) -> bool {
        self.arity.contains(&arity) && (self.target.is_none() || self.target == Some(target))
    }
}

/// A successful lookup: the mapping and the candidate key that matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub mapping: TypeMapping,
    pub key: String,
}

/// A key tried during resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub key: String,
    pub arity: usize,
}

#[derive(Clone, Debug, Default)]
pub struct TypeMapRegistry {
    entries: Vec<TypeMapEntry>,
    by_signature: FxHashMap<String, SmallVec<[usize; 2]>>,
}

impl TypeMapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard-library mappings.
    pub fn with_builtins() -> Self {
        use GeneratorTarget::{Managed, NativeAdjacent};

        let mut registry = Self::new();
        registry.register("va_list", 0..=0, None, TypeMapping::VaList);
        registry.register(
            "basic_string<char, char_traits<char>, allocator<char>>",
            3..=3,
            None,
            TypeMapping::String,
        );
        registry.register("std::wstring", 0..=0, None, TypeMapping::WString);
        registry.register(
            "basic_string<wchar_t, char_traits<wchar_t>, allocator<wchar_t>>",
            3..=3,
            None,
            TypeMapping::WString,
        );
        registry.register("std::vector", 1..=2, Some(NativeAdjacent), TypeMapping::VectorNative);
        registry.register("std::vector", 1..=2, Some(Managed), TypeMapping::VectorManaged);
        registry.register("std::map", 2..=4, None, TypeMapping::Map);
        registry.register("std::list", 1..=2, None, TypeMapping::List);
        registry.register("std::shared_ptr", 1..=1, None, TypeMapping::SharedPtr);
        registry.register(
            "basic_ostream<char, char_traits<char>>",
            2..=2,
            Some(NativeAdjacent),
            TypeMapping::OStream,
        );
        registry.register("std::nullptr_t", 0..=0, Some(NativeAdjacent), TypeMapping::NullPtr);
        registry.register("FILE", 0..=0, Some(Managed), TypeMapping::File);
        registry
    }

    pub fn register(
        &mut self,
        signature: impl Into<String>,
        arity: RangeInclusive<usize>,
        target: Option<GeneratorTarget>,
        mapping: TypeMapping,
    ) {
        let signature = signature.into();
        let index = self.entries.len();
        self.by_signature
            .entry(signature.clone())
            .or_default()
            .push(index);
        self.entries.push(TypeMapEntry {
            signature,
            arity,
            target,
            mapping,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry registered under `signature` accepting `arity` on `target`.
    pub fn lookup(
        &self,
        signature: &str,
        arity: usize,
        target: GeneratorTarget,
    ) -> Option<&TypeMapEntry> {
        self.by_signature
            .get(signature)?
            .iter()
            .map(|&i| &self.entries[i])
            .find(|entry| entry.accepts(arity, target))
    }

    /// Mapping for a concrete type, or `None` when nothing is registered.
    #[tracing::instrument(level = "trace", skip(self, ast))]
    pub fn resolve(&self, ast: &Ast, ty: TypeId, target: GeneratorTarget) -> Option<Resolved> {
        let resolved = candidate_keys(ast, ty).into_iter().find_map(|candidate| {
            self.lookup(&candidate.key, candidate.arity, target)
                .map(|entry| Resolved {
                    mapping: entry.mapping,
                    key: candidate.key,
                })
        });
        if let Some(hit) = &resolved {
            tracing::trace!(key = %hit.key, mapping = hit.mapping.name(), "type map hit");
        }
        resolved
    }
}

/// Keys tried for `ty`, in order.
///
/// Walking the sugar chain: each typedef contributes its qualified then
/// unqualified name; pointers, references and injected class names are
/// looked through. The walk ends at the first non-sugar node: an
/// instantiation contributes its full signature (unqualified, qualified)
/// then its bare template name (unqualified, qualified), a record its name,
/// a builtin its spelling.
pub fn candidate_keys(ast: &Ast, ty: TypeId) -> Vec<Candidate> {
    let unqualified = NativeTypePrinter::unqualified();
    let qualified = NativeTypePrinter::qualified();
    let mut keys = Vec::new();
    let mut push = |key: String, arity: usize| {
        if !keys.iter().any(|c: &Candidate| c.key == key && c.arity == arity) {
            keys.push(Candidate { key, arity });
        }
    };

    let mut current = ty;
    loop {
        match ast.ty(current) {
            TypeData::Typedef { decl, target } => {
                push(qualified_foreign_name(ast, *decl), 0);
                push(ast.decl(*decl).name.clone(), 0);
                current = *target;
            }
            TypeData::Pointer { pointee, .. } | TypeData::Reference { pointee, .. } => {
                current = *pointee;
            }
            TypeData::InjectedClassName { injected, .. } => current = *injected,
            TypeData::TemplateSpecialization { template, args, .. } => {
                let arity = args.len();
                push(unqualified.print(ast, current), arity);
                push(qualified.print(ast, current), arity);
                push(unqualified.decl_name(ast, *template), arity);
                push(qualified.decl_name(ast, *template), arity);
                break;
            }
            TypeData::Tag { decl } => {
                let arity = ast.specialization_args(*decl).len();
                if arity > 0 {
                    push(unqualified.print_decl(ast, *decl), arity);
                    push(qualified.print_decl(ast, *decl), arity);
                }
                push(unqualified.decl_name(ast, *decl), arity);
                push(qualified.decl_name(ast, *decl), arity);
                break;
            }
            TypeData::Builtin(p) => {
                push(p.spelling().to_owned(), 0);
                break;
            }
            TypeData::Array { .. } => break,
        }
    }
    keys
}

/// The built-in registry, initialized on first use.
pub fn builtin_registry() -> &'static TypeMapRegistry {
    static BUILTINS: OnceLock<TypeMapRegistry> = OnceLock::new();
    BUILTINS.get_or_init(TypeMapRegistry::with_builtins)
}
