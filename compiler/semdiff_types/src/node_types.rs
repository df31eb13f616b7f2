//! Node identity → type flags.

use rustc_hash::FxHashMap;
use semdiff_ir::{Node, NodeId};

use crate::TypeFlags;

/// Type evidence keyed by node identity.
///
/// Built once per file by the type visitor. A missing entry means
/// "unknown", never "not numeric". Nodes synthesized by a pass carry
/// [`NodeId::SYNTHETIC`] and are never present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeTypes {
    flags: FxHashMap<NodeId, TypeFlags>,
}

impl NodeTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record evidence for `id`. Synthetic identities are ignored.
    pub fn insert(&mut self, id: NodeId, flags: TypeFlags) {
        if !id.is_synthetic() {
            self.flags.insert(id, flags);
        }
    }

    pub fn get(&self, id: NodeId) -> Option<TypeFlags> {
        self.flags.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, TypeFlags)> + '_ {
        self.flags.iter().map(|(&id, &flags)| (id, flags))
    }

    /// Whether `node` is known to be numeric.
    pub fn is_numeric(&self, node: &Node) -> bool {
        self.get(node.id).is_some_and(TypeFlags::is_numeric)
    }

    /// Whether `node` is known to be exactly `Integer`.
    pub fn is_integer(&self, node: &Node) -> bool {
        self.get(node.id).is_some_and(TypeFlags::is_integer)
    }
}
