//! The fixed pass order.
//!
//! ```text
//! Aliasing → Structures → type visit → Constants → Algebra → Identity → Constants
//! ```
//!
//! Type evidence is computed once, after the syntactic passes, and keyed by
//! node identity. Later passes copy nodes with their identity, so the
//! evidence stays valid for every node that survives; synthesized nodes
//! simply have none. Constants runs a second time because Algebra and
//! Identity can bring literals together (`1 + x + 2` → `1 + 2 + x`).

use std::sync::Arc;

use bitflags::bitflags;
use semdiff_ir::NodeRef;
use semdiff_types::{visit_program, NodeTypes, TypeModel, TypeVisitError};

use crate::{algebra, alias, fold_constants, identities, structures};

bitflags! {
    /// Passes to run. Order is fixed; this only selects.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct PassSet: u8 {
        const ALIASING = 1 << 0;
        const STRUCTURES = 1 << 1;
        const CONSTANTS = 1 << 2;
        const ALGEBRA = 1 << 3;
        const IDENTITY = 1 << 4;

        /// Passes that need type evidence.
        const TYPED = Self::ALGEBRA.bits() | Self::IDENTITY.bits();
    }
}

impl Default for PassSet {
    fn default() -> Self {
        PassSet::all()
    }
}

/// Canonicalization options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CanonOptions {
    pub passes: PassSet,
}

impl CanonOptions {
    #[must_use]
    pub fn with_passes(passes: PassSet) -> Self {
        CanonOptions { passes }
    }
}

/// A canonicalized tree and the evidence it was canonicalized with.
#[derive(Clone, Debug)]
pub struct Canonical {
    pub root: NodeRef,
    /// Empty when no type model was given.
    pub node_types: NodeTypes,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    #[error("type visit failed: {0}")]
    TypeVisit(#[from] TypeVisitError),
}

/// Run the enabled passes over `root`, in order.
///
/// Without a type model the typed passes are skipped: no evidence is not
/// evidence of anything.
///
/// # Errors
///
/// Fails only when the type visitor meets a module path it cannot resolve.
#[tracing::instrument(level = "debug", skip_all, fields(passes = ?options.passes))]
pub fn canonicalize(
    root: &NodeRef,
    model: Option<&TypeModel>,
    options: &CanonOptions,
) -> Result<Canonical, CanonError> {
    let passes = options.passes;
    let mut root = Arc::clone(root);

    if passes.contains(PassSet::ALIASING) {
        root = alias(&root);
    }
    if passes.contains(PassSet::STRUCTURES) {
        root = structures(&root);
    }

    let node_types = match model {
        Some(model) if passes.intersects(PassSet::TYPED) => visit_program(model, &root)?,
        _ => NodeTypes::new(),
    };
    let typed = model.is_some();

    if passes.contains(PassSet::CONSTANTS) {
        root = fold_constants(&root);
    }
    if typed && passes.contains(PassSet::ALGEBRA) {
        root = algebra(&root, &node_types);
    }
    if typed && passes.contains(PassSet::IDENTITY) {
        root = identities(&root, &node_types);
    }
    if passes.contains(PassSet::CONSTANTS) {
        root = fold_constants(&root);
    }

    Ok(Canonical { root, node_types })
}

#[cfg(test)]
mod tests;
