//! `std::map`: signatures only. Values never cross the boundary.

use bind_ir::TypeId;

use crate::context::GenerationContext;
use crate::error::{MarshalError, MarshalResult};
use crate::{GeneratorTarget, SignatureKind};

use super::element::host_type_of;

pub(super) fn signature(
    gen: GenerationContext<'_>,
    ty: TypeId,
    kind: SignatureKind,
) -> MarshalResult<String> {
    if gen.target() == GeneratorTarget::Managed && kind == SignatureKind::Native {
        return Ok("Std.Map".to_owned());
    }

    let (key, value) = match gen.ast.instance_args(ty) {
        Some([key, value, ..]) => (*key, *value),
        _ => {
            return Err(MarshalError::MalformedTypeShape {
                mapping: "map",
                detail: format!("`{}` needs key and value arguments", gen.native_name(ty)),
            })
        }
    };
    let key = host_type_of(gen, key, SignatureKind::Managed)?;
    let value = host_type_of(gen, value, SignatureKind::Managed)?;
    Ok(match gen.target() {
        GeneratorTarget::NativeAdjacent => {
            format!("System::Collections::Generic::Dictionary<{key}, {value}>^")
        }
        GeneratorTarget::Managed => {
            format!("System.Collections.Generic.Dictionary<{key}, {value}>")
        }
    })
}
