//! Read-only traversal.
//!
//! A [`Visitor`] walks the tree top-down, may keep its own state, and can
//! stop early by returning [`ControlFlow::Break`]. The tree itself is never
//! modified.

use std::ops::ControlFlow;

use crate::{ensure_sufficient_stack, NodeRef};

pub trait Visitor {
    /// Value carried out of the traversal on early exit.
    type Break;

    /// Visit a node. Default walks its children.
    fn visit(&mut self, node: &NodeRef) -> ControlFlow<Self::Break> {
        walk(self, node)
    }
}

/// Visit every direct child of `node` in source order.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, node: &NodeRef) -> ControlFlow<V::Break> {
    ensure_sufficient_stack(|| {
        for child in node.children() {
            visitor.visit(child)?;
        }
        ControlFlow::Continue(())
    })
}
