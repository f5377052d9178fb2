//! Function body assembly.
//!
//! Drives the type mappings for every parameter and the return value of a
//! single foreign function and splices their fragments around the call:
//!
//! ```text
//! <parameter setup>
//! var __ret = callee(<marshalled arguments>);
//! <return conversion>
//! <parameter cleanup>
//! return <host value>;
//! ```
//!
//! Any failure drops the whole declaration: the caller gets the error and
//! nothing is emitted.

use bind_ir::{Primitive, TypeData, TypeId};

use crate::buffers::CodeBuffer;
use crate::context::{GenerationContext, MarshalContext, SlotCounter};
use crate::error::{MarshalError, MarshalResult};
use crate::host::Include;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForeignParam {
    pub name: String,
    pub ty: TypeId,
}

/// A foreign function signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForeignFunction {
    pub name: String,
    pub params: Vec<ForeignParam>,
    pub return_type: TypeId,
}

impl ForeignFunction {
    pub fn new(name: impl Into<String>, return_type: TypeId) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type,
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: TypeId) -> Self {
        self.params.push(ForeignParam {
            name: name.into(),
            ty,
        });
        self
    }
}

/// The assembled body of one generated function.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionBody {
    /// Parameter conversions, in parameter order.
    pub setup: CodeBuffer,
    /// The foreign call statement.
    pub call: String,
    /// Conversion of the call's result.
    pub return_setup: CodeBuffer,
    /// Parameter cleanup, in parameter order.
    pub cleanup: CodeBuffer,
    /// Host value returned, `None` for `void`.
    pub return_expr: Option<String>,
    /// Headers required by the mapped types, without duplicates.
    pub includes: Vec<Include>,
}

impl FunctionBody {
    pub fn render(&self, indent_width: usize) -> String {
        let mut out = CodeBuffer::new();
        out.append(self.setup.clone());
        out.writeln(self.call.clone());
        out.append(self.return_setup.clone());
        out.append(self.cleanup.clone());
        if let Some(expr) = &self.return_expr {
            out.writeln(format!("return {expr};"));
        }
        out.render(indent_width)
    }

    fn require(&mut self, include: Include) {
        if !self.includes.contains(&include) {
            self.includes.push(include);
        }
    }
}

/// Assembles function bodies for one generation pass.
#[derive(Clone, Copy, Debug)]
pub struct FunctionMarshaller<'a> {
    gen: GenerationContext<'a>,
}

impl<'a> FunctionMarshaller<'a> {
    pub fn new(gen: GenerationContext<'a>) -> Self {
        Self { gen }
    }

    #[tracing::instrument(level = "trace", skip(self, function), fields(function = %function.name))]
    pub fn marshal(&self, function: &ForeignFunction) -> MarshalResult<FunctionBody> {
        let result = self.assemble(function);
        if let Err(err) = &result {
            tracing::debug!(function = %function.name, %err, "declaration dropped");
        }
        result
    }

    fn assemble(&self, function: &ForeignFunction) -> MarshalResult<FunctionBody> {
        let gen = self.gen;
        let mut slots = SlotCounter::new();
        let mut body = FunctionBody::default();
        let mut args = Vec::with_capacity(function.params.len());

        for param in &function.params {
            self.ensure_usable(param.ty)?;
            let slot = slots.next_slot();
            let Some(mapping) = gen.mapping_for(param.ty) else {
                args.push(param.name.clone());
                continue;
            };
            if let Some(include) = mapping.required_include() {
                body.require(include);
            }
            if !mapping.does_marshalling() {
                args.push(param.name.clone());
                continue;
            }
            let mut ctx = MarshalContext::parameter(gen, param.ty, param.name.as_str(), slot);
            mapping.to_foreign(&mut ctx)?;
            body.setup.append(ctx.buffers.setup);
            body.cleanup.append(ctx.buffers.cleanup);
            args.push(ctx.buffers.return_expr);
        }

        let call = format!("{}({})", function.name, args.join(", "));
        if self.is_void(function.return_type) {
            body.call = format!("{call};");
            return Ok(body);
        }

        self.ensure_usable(function.return_type)?;
        let options = gen.options;
        body.call = format!(
            "{} {} = {call};",
            options.target.local_keyword(),
            options.return_var
        );
        let ret_ty = function.return_type;
        let slot = slots.next_slot();
        body.return_expr = Some(match gen.mapping_for(ret_ty) {
            Some(mapping) => {
                if let Some(include) = mapping.required_include() {
                    body.require(include);
                }
                if mapping.does_marshalling() {
                    let mut ctx = MarshalContext::return_value(gen, ret_ty, slot);
                    mapping.to_host(&mut ctx)?;
                    body.return_setup.append(ctx.buffers.setup);
                    body.cleanup.append(ctx.buffers.cleanup);
                    ctx.buffers.return_expr
                } else {
                    options.return_var.clone()
                }
            }
            None => options.return_var.clone(),
        });
        Ok(body)
    }

    fn ensure_usable(&self, ty: TypeId) -> MarshalResult<()> {
        if self.gen.ignore_checker().is_ignored(ty) {
            return Err(MarshalError::UnsupportedType {
                ty: self.gen.native_name(ty),
            });
        }
        Ok(())
    }

    fn is_void(&self, ty: TypeId) -> bool {
        let ast = self.gen.ast;
        matches!(ast.ty(ast.desugar(ty)), TypeData::Builtin(Primitive::Void))
    }
}

#[cfg(test)]
mod tests;
