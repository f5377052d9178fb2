//! Generation and per-call-site marshalling state.

use std::fmt;

use bind_ir::{Ast, NativeTypePrinter, TypeData, TypeId};

use crate::buffers::MarshalBuffers;
use crate::host::HostTypePrinter;
use crate::ignore::IgnoreChecker;
use crate::mapping::TypeMapping;
use crate::registry::TypeMapRegistry;
use crate::{GeneratorTarget, MarshalOptions};

/// Inputs shared by every call site of a generation pass.
#[derive(Clone, Copy, Debug)]
pub struct GenerationContext<'a> {
    pub ast: &'a Ast,
    pub registry: &'a TypeMapRegistry,
    pub options: &'a MarshalOptions,
}

impl<'a> GenerationContext<'a> {
    pub fn new(ast: &'a Ast, registry: &'a TypeMapRegistry, options: &'a MarshalOptions) -> Self {
        Self {
            ast,
            registry,
            options,
        }
    }

    #[inline]
    pub fn target(&self) -> GeneratorTarget {
        self.options.target
    }

    pub fn ignore_checker(&self) -> IgnoreChecker<'a> {
        IgnoreChecker::new(self.ast, self.registry, self.options.target)
    }

    /// Mapping registered for `ty` on the current surface.
    pub fn mapping_for(&self, ty: TypeId) -> Option<TypeMapping> {
        self.registry
            .resolve(self.ast, ty, self.options.target)
            .map(|resolved| resolved.mapping)
    }

    pub fn host_printer(&self) -> HostTypePrinter<'a> {
        HostTypePrinter::new(self.ast, self.options.target)
    }

    /// C++ spelling of `ty`, for diagnostics and native element types.
    pub fn native_name(&self, ty: TypeId) -> String {
        NativeTypePrinter::qualified().print(self.ast, ty)
    }
}

/// Index distinguishing the temporaries of one call site from its
/// siblings in the same function.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u32);

impl SlotIndex {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out slot indices for one function body, monotonically.
#[derive(Debug, Default)]
pub struct SlotCounter {
    next: u32,
}

impl SlotCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_slot(&mut self) -> SlotIndex {
        let slot = SlotIndex(self.next);
        self.next += 1;
        slot
    }

    /// Number of slots handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}

/// Where the marshalled value lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Site {
    Parameter,
    /// A reference stored in a record field.
    Field,
    Return,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Host value to foreign ABI value.
    ToForeign,
    /// Foreign ABI value to host value.
    ToHost,
}

/// How a value is passed, after removing sugar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamShape {
    ByValue,
    ByPointer,
    ByReference,
}

/// State for marshalling one value at one call site in one direction.
///
/// Mapping code reads the context and stages its output; only a successful
/// operation commits into [`buffers`](Self::buffers).
#[derive(Debug)]
pub struct MarshalContext<'a> {
    pub gen: GenerationContext<'a>,
    /// The value's type as declared, sugar included.
    pub ty: TypeId,
    /// Source expression: parameter name, field access, or return variable.
    pub name: String,
    pub slot: SlotIndex,
    pub site: Site,
    /// Element nesting level; 0 for the call site itself.
    pub depth: usize,
    pub buffers: MarshalBuffers,
}

impl<'a> MarshalContext<'a> {
    pub fn parameter(
        gen: GenerationContext<'a>,
        ty: TypeId,
        name: impl Into<String>,
        slot: SlotIndex,
    ) -> Self {
        Self::new(gen, ty, name.into(), slot, Site::Parameter)
    }

    pub fn field(
        gen: GenerationContext<'a>,
        ty: TypeId,
        name: impl Into<String>,
        slot: SlotIndex,
    ) -> Self {
        Self::new(gen, ty, name.into(), slot, Site::Field)
    }

    /// Context for a call's return value, named by the configured return
    /// variable.
    pub fn return_value(gen: GenerationContext<'a>, ty: TypeId, slot: SlotIndex) -> Self {
        let name = gen.options.return_var.clone();
        Self::new(gen, ty, name, slot, Site::Return)
    }

    fn new(
        gen: GenerationContext<'a>,
        ty: TypeId,
        name: String,
        slot: SlotIndex,
        site: Site,
    ) -> Self {
        Self {
            gen,
            ty,
            name,
            slot,
            site,
            depth: 0,
            buffers: MarshalBuffers::new(),
        }
    }

    /// Fresh context for an element one level down, sharing the slot.
    pub fn element(&self, ty: TypeId, name: impl Into<String>, direction: Direction) -> Self {
        let site = match direction {
            Direction::ToForeign => Site::Parameter,
            Direction::ToHost => Site::Return,
        };
        Self {
            gen: self.gen,
            ty,
            name: name.into(),
            slot: self.slot,
            site,
            depth: self.depth + 1,
            buffers: MarshalBuffers::new(),
        }
    }

    #[inline]
    pub fn ast(&self) -> &'a Ast {
        self.gen.ast
    }

    #[inline]
    pub fn options(&self) -> &'a MarshalOptions {
        self.gen.options
    }

    pub fn shape(&self) -> ParamShape {
        let ast = self.gen.ast;
        match ast.ty(ast.desugar(self.ty)) {
            TypeData::Pointer { .. } => ParamShape::ByPointer,
            TypeData::Reference { .. } => ParamShape::ByReference,
            _ => ParamShape::ByValue,
        }
    }

    /// Suffix keeping nested loop locals distinct: `""`, `"1"`, `"2"`, ...
    pub fn depth_suffix(&self) -> String {
        if self.depth == 0 {
            String::new()
        } else {
            self.depth.to_string()
        }
    }
}

#[cfg(test)]
mod tests;
