//! Types whose foreign and host representations coincide.

use crate::buffers::MarshalBuffers;
use crate::context::MarshalContext;

/// The source expression, unchanged.
pub(super) fn forward(ctx: &MarshalContext<'_>) -> MarshalBuffers {
    let mut out = MarshalBuffers::new();
    out.return_expr.clone_from(&ctx.name);
    out
}
