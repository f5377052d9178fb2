//! Type mappings for the foreign standard library.
//!
//! [`TypeMapping`] is a closed set of stateless variants. Every operation
//! takes the concrete type (directly or through a [`MarshalContext`]) and
//! derives what it needs from the AST on each call.
//!
//! # Output discipline
//!
//! Variant code never writes into the context. It returns a staged
//! [`MarshalBuffers`] which `to_foreign`/`to_host` commit only on success,
//! so a failed conversion leaves the call site's buffers untouched.

mod element;
mod map;
mod passthrough;
mod stream;
mod string;
mod vector;

pub use element::{host_type_of, marshal_element, ElementMarshal};

use bind_ir::TypeId;

use crate::buffers::MarshalBuffers;
use crate::context::{GenerationContext, MarshalContext};
use crate::error::{MarshalError, MarshalResult, Operation};
use crate::host::{HostType, Include};
use crate::ignore::IgnoreChecker;
use crate::SignatureKind;

use string::CharWidth;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeMapping {
    /// `std::string`
    String,
    /// `std::wstring`
    WString,
    /// `std::vector` on the native-adjacent surface: element-wise copy.
    VectorNative,
    /// `std::vector` on the managed surface: wrapped, not copied.
    VectorManaged,
    Map,
    List,
    SharedPtr,
    /// `std::ostream`, host to foreign only.
    OStream,
    /// `std::nullptr_t`
    NullPtr,
    /// C `FILE`, passed as an opaque handle.
    File,
    /// `va_list`
    VaList,
}

impl TypeMapping {
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::WString => "wstring",
            Self::VectorNative => "vector (native-adjacent)",
            Self::VectorManaged => "vector (managed)",
            Self::Map => "map",
            Self::List => "list",
            Self::SharedPtr => "shared_ptr",
            Self::OStream => "ostream",
            Self::NullPtr => "nullptr_t",
            Self::File => "FILE",
            Self::VaList => "va_list",
        }
    }

    fn unsupported(self, operation: Operation) -> MarshalError {
        MarshalError::UnsupportedOperation {
            mapping: self.name(),
            operation,
        }
    }

    /// Host type shown for `ty` in signatures.
    pub fn signature_type(
        self,
        gen: GenerationContext<'_>,
        ty: TypeId,
        kind: SignatureKind,
    ) -> MarshalResult<String> {
        let target = gen.target();
        match self {
            Self::String => string::signature(gen, ty, kind, CharWidth::Narrow),
            Self::WString => string::signature(gen, ty, kind, CharWidth::Wide),
            Self::VectorNative => vector::native_signature(gen, ty),
            Self::VectorManaged => vector::managed_signature(gen, ty, kind),
            Self::Map => map::signature(gen, ty, kind),
            Self::OStream => Ok(HostType::TextWriter.render(target).to_owned()),
            Self::NullPtr => Ok("std::nullptr_t".to_owned()),
            Self::File => Ok(HostType::IntPtr.render(target).to_owned()),
            Self::List | Self::SharedPtr | Self::VaList => {
                Err(self.unsupported(Operation::SignatureType))
            }
        }
    }

    /// Emit host → foreign conversion for the context's value.
    #[tracing::instrument(level = "trace", skip(self, ctx), fields(mapping = self.name(), slot = %ctx.slot))]
    pub fn to_foreign(self, ctx: &mut MarshalContext<'_>) -> MarshalResult<()> {
        let staged = match self {
            Self::String => string::to_foreign(ctx, CharWidth::Narrow),
            Self::WString => string::to_foreign(ctx, CharWidth::Wide),
            Self::VectorNative => vector::native_to_foreign(ctx),
            Self::VectorManaged => Ok(vector::managed_to_foreign(ctx)),
            Self::OStream => Ok(stream::to_foreign(ctx)),
            Self::NullPtr | Self::File => Ok(passthrough::forward(ctx)),
            Self::Map | Self::List | Self::SharedPtr | Self::VaList => {
                Err(self.unsupported(Operation::ToForeign))
            }
        };
        self.commit(ctx, staged)
    }

    /// Emit foreign → host conversion for the context's value.
    #[tracing::instrument(level = "trace", skip(self, ctx), fields(mapping = self.name(), slot = %ctx.slot))]
    pub fn to_host(self, ctx: &mut MarshalContext<'_>) -> MarshalResult<()> {
        let staged = match self {
            Self::String => string::to_host(ctx, CharWidth::Narrow),
            Self::WString => string::to_host(ctx, CharWidth::Wide),
            Self::VectorNative => vector::native_to_host(ctx),
            Self::VectorManaged => vector::managed_to_host(ctx),
            Self::NullPtr | Self::File => Ok(passthrough::forward(ctx)),
            Self::OStream | Self::Map | Self::List | Self::SharedPtr | Self::VaList => {
                Err(self.unsupported(Operation::ToHost))
            }
        };
        self.commit(ctx, staged)
    }

    fn commit(
        self,
        ctx: &mut MarshalContext<'_>,
        staged: MarshalResult<MarshalBuffers>,
    ) -> MarshalResult<()> {
        match staged {
            Ok(buffers) => {
                ctx.buffers.commit(buffers);
                Ok(())
            }
            Err(err) => {
                tracing::debug!(mapping = self.name(), name = %ctx.name, %err, "marshalling failed");
                Err(err)
            }
        }
    }

    /// Whether a type handled by this mapping is excluded.
    pub fn is_ignored(self, checker: &IgnoreChecker<'_>, ty: TypeId) -> bool {
        match self {
            Self::VectorNative | Self::VectorManaged => vector::is_ignored(checker, ty),
            Self::Map | Self::List | Self::SharedPtr | Self::VaList => true,
            Self::String
            | Self::WString
            | Self::OStream
            | Self::NullPtr
            | Self::File => false,
        }
    }

    /// `false` when values cross the boundary unchanged and the caller
    /// should skip the mapping at call sites.
    pub const fn does_marshalling(self) -> bool {
        !matches!(self, Self::NullPtr)
    }

    /// Header the native-adjacent surface must include to name the type.
    pub fn required_include(self) -> Option<Include> {
        match self {
            Self::NullPtr => Some(Include::angled("cstddef")),
            _ => None,
        }
    }
}
