//! `std::vector`.
//!
//! The native-adjacent surface copies element by element into a host list
//! (or a fresh `std::vector`), marshalling each element recursively. The
//! managed surface wraps the native vector in `Std.Vector<T>` and never
//! copies.

use bind_ir::{Ast, TypeId};

use crate::buffers::MarshalBuffers;
use crate::context::{Direction, GenerationContext, MarshalContext};
use crate::error::{MarshalError, MarshalResult};
use crate::ignore::IgnoreChecker;
use crate::SignatureKind;

use super::element::{host_type_of, marshal_element};

const LIST: &str = "System::Collections::Generic::List";

/// The first template argument: the element type.
fn element_type(gen: GenerationContext<'_>, ty: TypeId) -> MarshalResult<TypeId> {
    first_argument(gen.ast, ty).ok_or_else(|| MarshalError::MalformedTypeShape {
        mapping: "vector",
        detail: format!(
            "`{}` ({}) has no element type",
            gen.native_name(ty),
            gen.ast.ty(ty).kind_name()
        ),
    })
}

fn first_argument(ast: &Ast, ty: TypeId) -> Option<TypeId> {
    ast.instance_args(ty).and_then(|args| args.first().copied())
}

/// A vector is usable exactly when its element is. A vector without
/// arguments cannot be marshalled at all.
pub(super) fn is_ignored(checker: &IgnoreChecker<'_>, ty: TypeId) -> bool {
    match first_argument(checker.ast(), ty) {
        Some(element) => checker.is_ignored(element),
        None => true,
    }
}

pub(super) fn native_signature(gen: GenerationContext<'_>, ty: TypeId) -> MarshalResult<String> {
    let element = element_type(gen, ty)?;
    let host_element = host_type_of(gen, element, SignatureKind::Managed)?;
    Ok(format!("{LIST}<{host_element}>^"))
}

pub(super) fn managed_signature(
    gen: GenerationContext<'_>,
    ty: TypeId,
    kind: SignatureKind,
) -> MarshalResult<String> {
    match kind {
        SignatureKind::Native => Ok("Std.Vector".to_owned()),
        SignatureKind::Managed => {
            let element = element_type(gen, ty)?;
            let host_element = host_type_of(gen, element, SignatureKind::Managed)?;
            Ok(format!("Std.Vector<{host_element}>"))
        }
    }
}

/// Loop-local names for the context's nesting depth.
struct LoopNames {
    element: String,
    marshalled: String,
    temporary: String,
}

impl LoopNames {
    fn new(ctx: &MarshalContext<'_>) -> Self {
        let suffix = ctx.depth_suffix();
        Self {
            element: format!("_element{suffix}"),
            marshalled: format!("_marshalElement{suffix}"),
            temporary: format!("_tmp{}", ctx.name),
        }
    }
}

pub(super) fn native_to_foreign(ctx: &MarshalContext<'_>) -> MarshalResult<MarshalBuffers> {
    let gen = ctx.gen;
    let element = element_type(gen, ctx.ty)?;
    let names = LoopNames::new(ctx);
    let marshalled = marshal_element(ctx, element, &names.element, Direction::ToForeign)?;
    let host_element = host_type_of(gen, element, SignatureKind::Managed)?;
    let native_element = gen.native_name(element);
    let to_pointer = if gen.ast.is_pointer_to_primitive(element) {
        ".ToPointer()"
    } else {
        ""
    };

    let mut out = MarshalBuffers::new();
    let setup = &mut out.setup;
    setup.writeln(format!(
        "auto {} = std::vector<{native_element}>();",
        names.temporary
    ));
    setup.writeln(format!(
        "for each({host_element} {} in {})",
        names.element, ctx.name
    ));
    setup.open_brace();
    setup.append(marshalled.local_decl);
    setup.writeln(format!(
        "auto {} = {}{to_pointer};",
        names.marshalled, marshalled.expr
    ));
    setup.writeln(format!("{}.push_back({});", names.temporary, names.marshalled));
    setup.append(marshalled.cleanup);
    setup.close_brace();
    out.return_expr = names.temporary;
    Ok(out)
}

pub(super) fn native_to_host(ctx: &MarshalContext<'_>) -> MarshalResult<MarshalBuffers> {
    let gen = ctx.gen;
    let element = element_type(gen, ctx.ty)?;
    let names = LoopNames::new(ctx);
    let marshalled = marshal_element(ctx, element, &names.element, Direction::ToHost)?;
    let host_element = host_type_of(gen, element, SignatureKind::Managed)?;

    let mut out = MarshalBuffers::new();
    let setup = &mut out.setup;
    setup.writeln(format!(
        "auto {} = gcnew {LIST}<{host_element}>();",
        names.temporary
    ));
    setup.writeln(format!("for(auto {} : {})", names.element, ctx.name));
    setup.open_brace();
    setup.append(marshalled.local_decl);
    setup.writeln(format!("auto {} = {};", names.marshalled, marshalled.expr));
    if gen.ast.is_pointer_to_primitive(element) {
        setup.writeln(format!(
            "{}->Add({host_element}({}));",
            names.temporary, names.marshalled
        ));
    } else {
        setup.writeln(format!("{}->Add({});", names.temporary, names.marshalled));
    }
    setup.append(marshalled.cleanup);
    setup.close_brace();
    out.return_expr = names.temporary;
    Ok(out)
}

pub(super) fn managed_to_foreign(ctx: &MarshalContext<'_>) -> MarshalBuffers {
    let mut out = MarshalBuffers::new();
    out.return_expr = format!("{}.Internal", ctx.name);
    out
}

pub(super) fn managed_to_host(ctx: &MarshalContext<'_>) -> MarshalResult<MarshalBuffers> {
    let gen = ctx.gen;
    let element = element_type(gen, ctx.ty)?;
    let host_element = host_type_of(gen, element, SignatureKind::Managed)?;
    let mut out = MarshalBuffers::new();
    out.return_expr = format!("new Std.Vector<{host_element}>({})", ctx.name);
    Ok(out)
}
