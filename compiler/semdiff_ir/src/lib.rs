//! AST value model for semdiff.
//!
//! The canonicalization passes never see source text. They receive a tree
//! of immutable [`Node`] values from an external parser and hand a new tree
//! back to an external re-emitter. This crate owns that tree:
//!
//! - [`Node`] / [`NodeKind`]: closed sum type over the supported node kinds
//! - [`NodeId`]: stable identity assigned at parse time
//! - [`NodeFlags`]: formatting and literal flags (line break, static literal, ...)
//! - [`Folder`]: bottom-up rewriting with structural sharing
//! - [`Visitor`]: read-only traversal with early exit
//! - [`AstBuilder`]: tree construction with unique identities
//! - [`equivalent`]: structural equality ignoring identity and location
//!
//! # Identity
//!
//! Copying a node with some fields replaced keeps its identity. Only nodes
//! that represent a genuinely new expression (a folded literal, for example)
//! carry [`NodeId::SYNTHETIC`]. Later passes key type evidence on identity,
//! so a synthetic node simply has no evidence.

mod ast;
mod builder;
mod dump;
mod equiv;
mod flags;
mod fold;
mod ids;
mod name;
mod node_id;
mod span;
mod stack;
mod visitor;

pub use ast::{inherit_newline, CallNode, Node, NodeKind, NodeRef, VarScope};
pub use builder::AstBuilder;
pub use equiv::equivalent;
pub use flags::NodeFlags;
pub use fold::{fold_call_parts, fold_children, FoldedCall, Folder};
pub use ids::{collect_ids, validate_unique_ids, DuplicateNodeId};
pub use name::Name;
pub use node_id::NodeId;
pub use span::Span;
pub use stack::ensure_sufficient_stack;
pub use visitor::{walk, Visitor};
