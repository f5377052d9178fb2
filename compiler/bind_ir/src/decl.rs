//! Declarations and their enclosing-scope chain.

use std::fmt;

use crate::{TemplateArgs, TypeId};

/// A 32-bit index into the declaration arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct DeclId(u32);

impl DeclId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

/// What a declaration declares.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Root of a scope chain. One per parsed header.
    TranslationUnit {
        /// Whether the header belongs to the system (standard library).
        system_header: bool,
    },

    Namespace {
        /// Inline namespaces (`std::__1`) are transparent for name lookup.
        inline: bool,
    },

    Class,

    /// A class template. Its templated class shares its name and scope.
    ClassTemplate,

    /// A concrete instantiation of a class template.
    Specialization {
        template: DeclId,
        args: TemplateArgs,
    },

    Method,

    Field {
        ty: TypeId,
    },

    Typedef {
        target: TypeId,
    },
}

/// A single declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decl {
    pub name: String,
    /// Enclosing scope, `None` only for translation units.
    pub parent: Option<DeclId>,
    pub kind: DeclKind,
    /// Marked as excluded from the generated surface by an earlier pass.
    pub ignored: bool,
}

impl Decl {
    pub fn is_translation_unit(&self) -> bool {
        matches!(self.kind, DeclKind::TranslationUnit { .. })
    }

    pub fn is_inline_namespace(&self) -> bool {
        matches!(self.kind, DeclKind::Namespace { inline: true })
    }

    pub fn is_class_template(&self) -> bool {
        matches!(self.kind, DeclKind::ClassTemplate)
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, DeclKind::Method)
    }
}
