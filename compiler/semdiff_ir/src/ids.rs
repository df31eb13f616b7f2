//! Node identity bookkeeping.
//!
//! The parser hands over a root plus the identities reachable from it and
//! promises they are unique. These helpers produce that list and check
//! the promise.

use std::convert::Infallible;
use std::fmt;
use std::ops::ControlFlow;

use rustc_hash::FxHashSet;

use crate::{walk, NodeId, NodeRef, Visitor};

/// Two distinct nodes of one parse share an identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateNodeId {
    pub id: NodeId,
    /// Kind tag of the second node seen with this identity.
    pub kind: &'static str,
}

impl fmt::Display for DuplicateNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate node identity {} on `{}` node", self.id, self.kind)
    }
}

impl std::error::Error for DuplicateNodeId {}

/// Identities of every node reachable from `root`, in pre-order.
pub fn collect_ids(root: &NodeRef) -> Vec<NodeId> {
    struct Collect(Vec<NodeId>);

    impl Visitor for Collect {
        type Break = Infallible;

        fn visit(&mut self, node: &NodeRef) -> ControlFlow<Infallible> {
            self.0.push(node.id);
            walk(self, node)
        }
    }

    let mut collect = Collect(Vec::new());
    let _ = collect.visit(root);
    collect.0
}

/// Check that no two reachable nodes share an identity.
///
/// A node reached twice through a shared `Arc` counts once. Synthetic
/// identities are exempt.
pub fn validate_unique_ids(root: &NodeRef) -> Result<(), DuplicateNodeId> {
    struct Unique {
        seen: FxHashSet<NodeId>,
        nodes: FxHashSet<*const crate::Node>,
    }

    impl Visitor for Unique {
        type Break = DuplicateNodeId;

        fn visit(&mut self, node: &NodeRef) -> ControlFlow<DuplicateNodeId> {
            if !self.nodes.insert(std::sync::Arc::as_ptr(node)) {
                return ControlFlow::Continue(());
            }
            if !node.id.is_synthetic() && !self.seen.insert(node.id) {
                return ControlFlow::Break(DuplicateNodeId {
                    id: node.id,
                    kind: node.kind.tag(),
                });
            }
            walk(self, node)
        }
    }

    let mut unique = Unique {
        seen: FxHashSet::default(),
        nodes: FxHashSet::default(),
    };
    match unique.visit(root) {
        ControlFlow::Continue(()) => Ok(()),
        ControlFlow::Break(dup) => Err(dup),
    }
}
