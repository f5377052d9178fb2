//! `std::ostream`: a host `TextWriter` adapted through a marshal context.

use crate::buffers::MarshalBuffers;
use crate::context::{MarshalContext, ParamShape};

/// The marshal context lives until the end of the enclosing block, which
/// outlasts the call.
pub(super) fn to_foreign(ctx: &MarshalContext<'_>) -> MarshalBuffers {
    let name = &ctx.name;
    let context_var = format!("ctx_{name}");
    let deref = if ctx.shape() == ParamShape::ByPointer {
        ""
    } else {
        "*"
    };

    let mut out = MarshalBuffers::new();
    out.setup
        .writeln(format!("msclr::interop::marshal_context {context_var};"));
    out.return_expr = format!("{deref}{context_var}.marshal_as<std::ostream*>({name})");
    out
}
