//! Foreign type descriptors.
//!
//! Every type is stored once in the [`Ast`](crate::Ast) type pool and
//! referenced by a 32-bit [`TypeId`]. Descriptors are immutable after
//! construction and shared by id, never deep-copied.
//!
//! # Layout
//!
//! - Primitive types are pre-interned at fixed indices (one per
//!   [`Primitive`] variant), so `TypeId::of(Primitive::Int)` needs no pool.
//! - Everything else is appended to the pool as it is built.

use std::fmt;

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::DeclId;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// First index for types appended after the primitives.
    pub const FIRST_DYNAMIC: u32 = Primitive::ALL.len() as u32;

    /// The pre-interned id of a primitive type.
    #[inline]
    pub const fn of(primitive: Primitive) -> Self {
        Self(primitive as u32)
    }

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

    /// Check if this id is one of the pre-interned primitives.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Primitive::from_id(*self) {
            Some(p) => write!(f, "TypeId({})", p.spelling()),
            None => write!(f, "TypeId({})", self.0),
        }
    }
}

/// Built-in C++ types.
///
/// The discriminant doubles as the pre-interned [`TypeId`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Primitive {
    Void = 0,
    Bool,
    Char,
    SChar,
    UChar,
    WChar,
    Char16,
    Char32,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Float,
    Double,
    /// `decltype(nullptr)`.
    NullPtr,
}

impl Primitive {
    /// All primitives in pool order.
    pub const ALL: [Self; 19] = [
        Self::Void,
        Self::Bool,
        Self::Char,
        Self::SChar,
        Self::UChar,
        Self::WChar,
        Self::Char16,
        Self::Char32,
        Self::Short,
        Self::UShort,
        Self::Int,
        Self::UInt,
        Self::Long,
        Self::ULong,
        Self::LongLong,
        Self::ULongLong,
        Self::Float,
        Self::Double,
        Self::NullPtr,
    ];

    /// Recover the primitive behind a pre-interned id.
    pub fn from_id(id: TypeId) -> Option<Self> {
        Self::ALL.get(id.index()).copied()
    }

    /// C++ spelling of the type.
    pub const fn spelling(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::SChar => "signed char",
            Self::UChar => "unsigned char",
            Self::WChar => "wchar_t",
            Self::Char16 => "char16_t",
            Self::Char32 => "char32_t",
            Self::Short => "short",
            Self::UShort => "unsigned short",
            Self::Int => "int",
            Self::UInt => "unsigned int",
            Self::Long => "long",
            Self::ULong => "unsigned long",
            Self::LongLong => "long long",
            Self::ULongLong => "unsigned long long",
            Self::Float => "float",
            Self::Double => "double",
            Self::NullPtr => "std::nullptr_t",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

bitflags! {
    /// cv-qualifiers applied to the pointee of a pointer or reference.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Qualifiers: u8 {
        const CONST = 1 << 0;
        const VOLATILE = 1 << 1;
    }
}

/// Template argument list. Most instantiations have at most four.
pub type TemplateArgs = SmallVec<[TypeId; 4]>;

/// Structure of a single type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Builtin(Primitive),

    Pointer {
        pointee: TypeId,
        quals: Qualifiers,
    },

    /// Lvalue reference.
    Reference {
        pointee: TypeId,
        quals: Qualifiers,
    },

    Array {
        element: TypeId,
        size: Option<u64>,
    },

    /// A record named by its declaration. The declaration may be a
    /// template specialization.
    Tag { decl: DeclId },

    /// A template instantiation such as `std::vector<int>`.
    TemplateSpecialization {
        template: DeclId,
        args: TemplateArgs,
        /// The specialization declaration, once one exists.
        decl: Option<DeclId>,
    },

    /// The template's own name used inside its definition.
    InjectedClassName { template: DeclId, injected: TypeId },

    /// Sugar: a typedef or alias naming another type.
    Typedef { decl: DeclId, target: TypeId },
}

impl TypeData {
    /// Short kind name for diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Builtin(_) => "builtin",
            Self::Pointer { .. } => "pointer",
            Self::Reference { .. } => "reference",
            Self::Array { .. } => "array",
            Self::Tag { .. } => "tag",
            Self::TemplateSpecialization { .. } => "template-specialization",
            Self::InjectedClassName { .. } => "injected-class-name",
            Self::Typedef { .. } => "typedef",
        }
    }
}
