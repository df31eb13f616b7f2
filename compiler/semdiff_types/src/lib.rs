//! Type evidence for the canonicalization passes.
//!
//! Some rewrites are only sound for numbers (`x + 0` → `x`) or only for
//! integers (`0 * x` → `0`). The evidence for them comes from an external
//! type model: a declaration tree of modules, classes, variables and method
//! parameters with their declared nominal types. The [`TypeVisitor`] walks
//! a tree once, resolves each variable read against that model, and
//! records a [`TypeFlags`] word per node identity in a [`NodeTypes`] map.
//!
//! # Pipeline Position
//!
//! ```text
//! Aliasing → Structures → **Type Visitor** → Constants → Algebra → Identity → Constants
//! ```
//!
//! The map is computed once and read by the later passes. A node missing
//! from the map has unknown type, which disables every typed rewrite for
//! it; there is no "definitely not numeric" entry.

mod flags;
mod model;
mod node_types;
mod visitor;

pub use flags::{TypeFlags, ENUMERABLE_CLASSES, NUMERIC_CLASSES};
pub use model::{
    Decl, MethodDecl, MethodScope, ModuleDecl, ModuleIndex, ModuleKind, ParamDecl, TypeModel,
    TypeRef, TypeShape, VarDecl, VarDeclScope,
};
pub use node_types::NodeTypes;
pub use visitor::{visit_program, TypeVisitError, TypeVisitor};
