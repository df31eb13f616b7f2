//! Canonicalization passes for semdiff.
//!
//! Two versions of a program are compared for meaning rather than surface
//! syntax by first rewriting both into one normal form. Each pass is a
//! pure tree-to-tree function; untouched subtrees are shared with the
//! input.
//!
//! # Pipeline Position
//!
//! ```text
//! parse → Aliasing → Structures → (type visit) → Constants
//!       → Algebra → Identity → Constants → re-emit → diff
//! ```
//!
//! # Passes
//!
//! 1. **Aliasing** (`aliasing`): method synonyms to one canonical name
//!    - `collect` → `map`, `length` → `size`, ...
//!
//! 2. **Structures** (`structures`): collection idioms to literal syntax
//!    - `Array.new` → `[]`, `Hash[]` → `{}`
//!    - `a.push(e)` → `a << e`, `h.store(k, v)` → `h[k] = v`
//!
//! 3. **Constants** (`constants`): integer literal arithmetic folded
//!
//! 4. **Algebra** (`algebra`): commuting operands of `+` and `*` sorted,
//!    given numeric evidence for every operand
//!
//! 5. **Identity** (`identity`): `x + 0`, `x * 1`, `--x`, ... given
//!    numeric evidence
//!
//! Algebra and Identity are type-directed. Without evidence for a node
//! they leave it alone: "unknown" never means "numeric".

mod aliasing;
mod algebra;
mod constants;
mod identity;
mod pipeline;
mod rewrite;
mod structures;

#[cfg(test)]
mod test_support;

pub use aliasing::{alias, canonical_alias, ALIASES};
pub use algebra::{algebra, operand_order, sort_key, ASSOCIATIVE_OPERATORS, COMMUTATIVE_OPERATORS};
pub use constants::{fold_binary, fold_constants, FOLDABLE_OPERATORS};
pub use identity::identities;
pub use pipeline::{canonicalize, CanonError, CanonOptions, Canonical, PassSet};
pub use structures::structures;
