//! Marshalling failures.
//!
//! Every failure drops the affected declaration from the generated surface.
//! None of them is ever turned into a no-op: a silently skipped conversion
//! yields a binding with the wrong type.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type MarshalResult<T> = Result<T, MarshalError>;

/// A type mapping operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SignatureType,
    ToForeign,
    ToHost,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignatureType => write!(f, "signature type"),
            Self::ToForeign => write!(f, "to-foreign marshalling"),
            Self::ToHost => write!(f, "to-host marshalling"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarshalError {
    /// The type has no mapping or is excluded from the surface.
    #[error("type `{ty}` is not supported on the generated surface")]
    UnsupportedType { ty: String },

    /// The mapping exists but declares the operation unimplemented.
    #[error("the {mapping} mapping does not support {operation}")]
    UnsupportedOperation {
        mapping: &'static str,
        operation: Operation,
    },

    /// A declaration the conversion depends on is not in scope.
    #[error("cannot resolve {what} needed to marshal `{ty}`")]
    UnresolvableDeclaration { what: &'static str, ty: String },

    /// The descriptor does not have the shape the mapping expects.
    ///
    /// Always a driver bug: the registry or ignore checker matched the
    /// wrong variant.
    #[error("malformed type shape for the {mapping} mapping: {detail}")]
    MalformedTypeShape {
        mapping: &'static str,
        detail: String,
    },
}

impl MarshalError {
    /// Whether the failure means "exclude the declaration" rather than a
    /// bug in the caller.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType { .. } | Self::UnsupportedOperation { .. }
        )
    }
}
