//! `std::basic_string` over `char` and `wchar_t`.
//!
//! On the native-adjacent surface conversions go through the clix helpers.
//! On the managed surface a host string becomes a temporary
//! `basic_string` built with a temporary allocator; both temporaries are
//! disposed after the call, string first.

use bind_ir::{Ast, DeclId, NativeTypePrinter, TypeId};

use crate::buffers::MarshalBuffers;
use crate::context::{GenerationContext, MarshalContext, ParamShape, Site};
use crate::error::{MarshalError, MarshalResult};
use crate::host::HostType;
use crate::qualify::qualified_host_name;
use crate::{GeneratorTarget, SignatureKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum CharWidth {
    Narrow,
    Wide,
}

impl CharWidth {
    const fn mapping(self) -> &'static str {
        match self {
            Self::Narrow => "string",
            Self::Wide => "wstring",
        }
    }
}

pub(super) fn signature(
    gen: GenerationContext<'_>,
    ty: TypeId,
    kind: SignatureKind,
    width: CharWidth,
) -> MarshalResult<String> {
    match (gen.target(), kind) {
        (GeneratorTarget::Managed, SignatureKind::Native) => {
            let spec = basic_string(gen, ty, width.mapping())?;
            Ok(format!("{}.__Internal", qualified_host_name(gen.ast, spec)))
        }
        (target, _) => Ok(HostType::Text.render(target).to_owned()),
    }
}

pub(super) fn to_foreign(ctx: &MarshalContext<'_>, width: CharWidth) -> MarshalResult<MarshalBuffers> {
    match ctx.gen.target() {
        GeneratorTarget::NativeAdjacent => Ok(clix(ctx, width)),
        GeneratorTarget::Managed => managed_to_foreign(ctx, width),
    }
}

pub(super) fn to_host(ctx: &MarshalContext<'_>, width: CharWidth) -> MarshalResult<MarshalBuffers> {
    match ctx.gen.target() {
        GeneratorTarget::NativeAdjacent => Ok(clix(ctx, width)),
        GeneratorTarget::Managed => managed_to_host(ctx, width),
    }
}

/// `clix::marshalString<E>(name)`, symmetric in both directions.
fn clix(ctx: &MarshalContext<'_>, width: CharWidth) -> MarshalBuffers {
    let options = ctx.options();
    let encoding = match width {
        CharWidth::Narrow => &options.narrow_encoding,
        CharWidth::Wide => &options.wide_encoding,
    };
    let mut out = MarshalBuffers::new();
    out.return_expr = format!("clix::marshalString<{encoding}>({})", ctx.name);
    out
}

fn managed_to_foreign(ctx: &MarshalContext<'_>, width: CharWidth) -> MarshalResult<MarshalBuffers> {
    let gen = ctx.gen;
    let ast = gen.ast;
    let spec = basic_string(gen, ctx.ty, width.mapping())?;
    let allocator = allocator_for(gen, spec, width)?;
    let allocator = gen.host_printer().print_decl(allocator);
    let qualified = qualified_host_name(ast, spec);
    let convert = &ast.decl(ast.templated_decl(spec)).name;
    let instance = &ctx.options().instance_identifier;
    let name = &ctx.name;

    let mut out = MarshalBuffers::new();
    let shape = ctx.shape();
    if shape == ParamShape::ByPointer || (shape == ParamShape::ByReference && ctx.site == Site::Field) {
        out.return_expr = format!(
            "{qualified}Extensions.{convert}({name}, new {allocator}()).{instance}"
        );
        return Ok(out);
    }

    let slot = ctx.slot;
    let var_allocator = format!("__allocator{slot}");
    let var_string = format!("__basicString{slot}");
    out.setup
        .writeln(format!("var {var_allocator} = new {allocator}();"));
    out.setup.writeln(format!(
        "var {var_string} = {qualified}Extensions.{convert}({name}, {var_allocator});"
    ));
    if shape == ParamShape::ByValue {
        out.return_expr = format!("*({qualified}.__Internal*) {var_string}.{instance}");
    } else {
        out.return_expr = format!("{var_string}.{instance}");
    }
    out.cleanup.writeln(format!("{var_string}.Dispose(false);"));
    out.cleanup.writeln(format!("{var_allocator}.Dispose();"));
    Ok(out)
}

fn managed_to_host(ctx: &MarshalContext<'_>, width: CharWidth) -> MarshalResult<MarshalBuffers> {
    let gen = ctx.gen;
    let ast = gen.ast;
    let spec = basic_string(gen, ctx.ty, width.mapping())?;
    let c_str = c_str_accessor(gen, spec)?;
    let qualified = qualified_host_name(ast, spec);
    let wrapper = gen.host_printer().print_decl(spec);
    let create = &ctx.options().create_instance_identifier;
    let var_string = format!("__basicStringRet{}", ctx.slot);

    let mut out = MarshalBuffers::new();
    out.setup
        .writeln(format!("var {var_string} = {wrapper}.{create}({});", ctx.name));
    if ast.is_address(ctx.ty) {
        out.return_expr = format!("{qualified}Extensions.{c_str}({var_string})");
    } else {
        let var_result = format!("__stringRet{}", ctx.slot);
        out.setup.writeln(format!(
            "var {var_result} = {qualified}Extensions.{c_str}({var_string});"
        ));
        out.setup.writeln(format!("{var_string}.Dispose(false);"));
        out.return_expr = var_result;
    }
    Ok(out)
}

/// The `basic_string` specialization behind `ty`.
fn basic_string(gen: GenerationContext<'_>, ty: TypeId, mapping: &'static str) -> MarshalResult<DeclId> {
    gen.ast
        .instance_decl(ty)
        .ok_or_else(|| MarshalError::MalformedTypeShape {
            mapping,
            detail: format!(
                "`{}` ({}) is not a basic_string specialization",
                gen.native_name(ty),
                gen.ast.ty(ty).kind_name()
            ),
        })
}

/// First usable `allocator` specialization over the string's character type,
/// taken from a class template declared in a system header.
fn allocator_for(gen: GenerationContext<'_>, spec: DeclId, width: CharWidth) -> MarshalResult<DeclId> {
    let ast = gen.ast;
    let ty = || NativeTypePrinter::qualified().print_decl(ast, spec);
    let Some(&char_ty) = ast.specialization_args(spec).first() else {
        return Err(MarshalError::MalformedTypeShape {
            mapping: width.mapping(),
            detail: format!("`{}` has no character argument", ty()),
        });
    };

    let mut templates = ast
        .find_class_templates("allocator")
        .filter(|&t| ast.is_in_system_header(t))
        .peekable();
    if templates.peek().is_none() {
        return Err(MarshalError::UnresolvableDeclaration {
            what: "allocator class template",
            ty: ty(),
        });
    }
    templates
        .flat_map(|t| ast.specializations_of(t))
        .find(|&s| !ast.decl(s).ignored && matches_char(ast, s, char_ty))
        .ok_or_else(|| MarshalError::UnresolvableDeclaration {
            what: "allocator specialization",
            ty: ty(),
        })
}

fn matches_char(ast: &Ast, allocator: DeclId, char_ty: TypeId) -> bool {
    ast.specialization_args(allocator)
        .first()
        .is_some_and(|&arg| ast.same_type(arg, char_ty))
}

/// Name of the `c_str` accessor, looked up on the specialization and then
/// on its class template.
fn c_str_accessor(gen: GenerationContext<'_>, spec: DeclId) -> MarshalResult<String> {
    let ast = gen.ast;
    [spec, ast.templated_decl(spec)]
        .into_iter()
        .flat_map(|scope| ast.children(scope))
        .map(|id| ast.decl(id))
        .find(|decl| decl.is_method() && decl.name == "c_str")
        .map(|decl| decl.name.clone())
        .ok_or_else(|| MarshalError::UnresolvableDeclaration {
            what: "c_str accessor",
            ty: NativeTypePrinter::qualified().print_decl(ast, spec),
        })
}
