//! Foreign type descriptor model for the binding generator.
//!
//! This crate is the read-only input of the marshalling layer:
//!
//! - **Declarations** ([`Decl`], [`DeclId`]) with their enclosing-scope
//!   chain: translation units, (inline) namespaces, classes, class
//!   templates and their specializations, methods, fields, typedefs.
//! - **Type descriptors** ([`TypeData`], [`TypeId`]): builtins, pointers,
//!   references, arrays, tags, template specializations, injected class
//!   names, and typedef sugar.
//! - **Printing** ([`NativeTypePrinter`]): C++ spelling, qualified or not.
//!
//! Both arenas live in [`Ast`]. Parsing C++ into an `Ast` is not this
//! crate's concern; callers build it through the constructor methods.

mod ast;
mod decl;
mod printer;
mod ty;

pub use ast::Ast;
pub use decl::{Decl, DeclId, DeclKind};
pub use printer::{NameStyle, NativeTypePrinter};
pub use ty::{Primitive, Qualifiers, TemplateArgs, TypeData, TypeId};
