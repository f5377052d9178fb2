//! Standard-library type marshalling for the binding generator.
//!
//! Decides how foreign standard types (`std::string`, `std::vector`,
//! `std::ostream`, ...) appear on the generated host surface and emits the
//! conversion code for every call boundary.
//!
//! # Flow
//!
//! 1. [`IgnoreChecker`] decides whether a type is usable at all.
//! 2. [`TypeMapRegistry`] finds the [`TypeMapping`] for a usable type.
//! 3. The mapping supplies the host signature type and, per call site, fills
//!    a [`MarshalContext`]'s setup, return-expression, and cleanup buffers.
//! 4. [`FunctionMarshaller`] splices those fragments around the call.
//!
//! # Tracing
//!
//! Decisions are logged through `tracing`. Call [`init_tracing`] once at
//! startup and set `RUST_LOG` (e.g. `RUST_LOG=bind_marshal=trace`) to see
//! them.

mod buffers;
mod context;
mod error;
mod function;
mod host;
mod ignore;
mod mapping;
mod options;
mod qualify;
mod registry;
mod stack;

#[cfg(test)]
mod test_helpers;

pub use buffers::{CodeBuffer, MarshalBuffers};
pub use context::{
    Direction, GenerationContext, MarshalContext, ParamShape, Site, SlotCounter, SlotIndex,
};
pub use error::{MarshalError, MarshalResult, Operation};
pub use function::{ForeignFunction, ForeignParam, FunctionBody, FunctionMarshaller};
pub use host::{HostType, HostTypePrinter, Include, IncludeKind};
pub use ignore::IgnoreChecker;
pub use mapping::{host_type_of, marshal_element, ElementMarshal, TypeMapping};
pub use options::{GeneratorTarget, MarshalOptions, SignatureKind};
pub use qualify::{qualified_foreign_name, qualified_host_name};
pub use registry::{
    builtin_registry, candidate_keys, Candidate, Resolved, TypeMapEntry, TypeMapRegistry,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
