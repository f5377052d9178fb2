//! Marshalling of template arguments inside container loops.

use bind_ir::TypeId;

use crate::buffers::{CodeBuffer, MarshalBuffers};
use crate::context::{Direction, GenerationContext, MarshalContext};
use crate::error::{MarshalError, MarshalResult};
use crate::host::HostType;
use crate::stack::with_stack_guard;
use crate::SignatureKind;

/// One element's conversion, ready to splice into a loop body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementMarshal {
    /// Locals the conversion needs, declared before `expr` is used.
    pub local_decl: CodeBuffer,
    pub expr: String,
    /// Runs after the element has been stored.
    pub cleanup: CodeBuffer,
}

/// Marshal the value `name` of type `ty` one level below `parent`.
///
/// Mapped elements run their mapping in a child context that shares the
/// parent's slot. Unmapped usable elements pass through unchanged. An
/// ignored element fails the whole container.
pub fn marshal_element(
    parent: &MarshalContext<'_>,
    ty: TypeId,
    name: &str,
    direction: Direction,
) -> MarshalResult<ElementMarshal> {
    with_stack_guard(|| {
        let gen = parent.gen;
        if gen.ignore_checker().is_ignored(ty) {
            return Err(MarshalError::UnsupportedType {
                ty: gen.native_name(ty),
            });
        }

        let mut child = parent.element(ty, name, direction);
        match gen.mapping_for(ty) {
            Some(mapping) if mapping.does_marshalling() => match direction {
                Direction::ToForeign => mapping.to_foreign(&mut child)?,
                Direction::ToHost => mapping.to_host(&mut child)?,
            },
            _ => child.buffers.return_expr.push_str(name),
        }

        let MarshalBuffers {
            setup,
            return_expr,
            cleanup,
        } = child.buffers;
        Ok(ElementMarshal {
            local_decl: setup,
            expr: return_expr,
            cleanup,
        })
    })
}

/// Host spelling of `ty` as a type argument or signature type.
///
/// Mapped types use their mapping's signature; pointers to primitives
/// become the address-sized integer.
pub fn host_type_of(
    gen: GenerationContext<'_>,
    ty: TypeId,
    kind: SignatureKind,
) -> MarshalResult<String> {
    if let Some(mapping) = gen.mapping_for(ty) {
        return mapping.signature_type(gen, ty, kind);
    }
    if gen.ast.is_pointer_to_primitive(ty) {
        return Ok(HostType::IntPtr.render(gen.target()).to_owned());
    }
    Ok(gen.host_printer().print(ty))
}
