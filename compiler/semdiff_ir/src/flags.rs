//! Per-node flags.
//!
//! One flag word per node, shared by all kinds. Flags take part in
//! [`equivalent`](crate::equivalent), so a rewrite that produces a node the
//! parser would have produced for the canonical source must also produce
//! the parser's flags.

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct NodeFlags: u32 {
        // === Generic (bits 0-1) ===

        /// A source line break follows this node.
        const NEWLINE = 1 << 0;
        /// The node is a literal whose value is known statically.
        const STATIC_LITERAL = 1 << 1;

        // === Call flags (bits 2-5) ===

        /// `recv&.name`
        const SAFE_NAVIGATION = 1 << 2;
        /// A bare identifier that may be a local or a method call (`name`).
        const VARIABLE_CALL = 1 << 3;
        /// An attribute or index write (`recv.name = v`, `recv[k] = v`).
        const ATTRIBUTE_WRITE = 1 << 4;
        /// A call that may reach private methods (`self.name`).
        const IGNORE_VISIBILITY = 1 << 5;

        // === Integer base (bit 6) ===

        /// Integer literal written in base 10.
        const DECIMAL = 1 << 6;

        // === Compatibility (bit 8) ===

        /// Set by the parser on `recv[key] = value` index writes and on
        /// nothing else. The structures pass sets it on the index write it
        /// synthesizes from `store` so that the two forms compare equal;
        /// it carries no meaning beyond that.
        const INDEX_WRITE = 1 << 8;
    }
}

impl NodeFlags {
    /// Flags of a decimal integer literal, as parsed or folded.
    pub const INTEGER_LITERAL: Self =
        Self::from_bits_truncate(Self::DECIMAL.bits() | Self::STATIC_LITERAL.bits());

    /// Flags of a synthesized `recv[key] = value`.
    pub const INDEX_ASSIGN: Self =
        Self::from_bits_truncate(Self::ATTRIBUTE_WRITE.bits() | Self::INDEX_WRITE.bits());

    #[inline]
    pub const fn has_newline(self) -> bool {
        self.contains(Self::NEWLINE)
    }
}
