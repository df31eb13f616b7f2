//! Node identities.

use std::fmt;

/// Stable identity of an AST node.
///
/// Assigned by the parser, unique within one parse, and carried over
/// unchanged whenever a pass copies a node with some fields replaced.
/// Type evidence is keyed on this value.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Identity of a node synthesized by a pass (a folded literal, a
    /// constant produced by an identity rule). Never has type evidence.
    pub const SYNTHETIC: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_synthetic(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthetic() {
            write!(f, "NodeId::SYNTHETIC")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
