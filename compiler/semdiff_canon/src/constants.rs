//! Constant folding over integer literals.
//!
//! A binary operator call whose receiver and sole argument are both
//! integer literals is evaluated and replaced by the result:
//!
//! ```text
//! (2 + 3)       5
//! (4 * 2 - 1)   7
//! (8 / 4) + 3   5
//! ```
//!
//! Integers are 64-bit here. Anything the target language would evaluate
//! differently from checked 64-bit arithmetic (overflow into a big
//! integer, division by zero, a negative exponent producing a rational) is
//! left for runtime: the call is kept as written.

use semdiff_ir::{fold_call_parts, fold_children, inherit_newline, CallNode, Folder, NodeKind, NodeRef};

use crate::rewrite::{integer_literal, with_single_statement};

/// Operators the pass evaluates.
pub const FOLDABLE_OPERATORS: &[&str] = &["+", "-", "*", "/", "%", "**", "&", "|", "^", "<<", ">>"];

/// Fold integer literal arithmetic.
#[tracing::instrument(level = "debug", skip_all)]
pub fn fold_constants(root: &NodeRef) -> NodeRef {
    ConstantFolder.fold(root)
}

struct ConstantFolder;

impl Folder for ConstantFolder {
    fn fold_call(&mut self, node: &NodeRef, call: &CallNode) -> NodeRef {
        let folded = fold_call_parts(self, call);
        let operands = match (&folded.receiver, folded.sole_argument(), &folded.block) {
            (Some(lhs), Some(rhs), None) => lhs.integer_value().zip(rhs.integer_value()),
            _ => None,
        };
        let Some(value) = operands.and_then(|(lhs, rhs)| fold_binary(call.name.as_str(), lhs, rhs)) else {
            return folded.rebuild(node, call);
        };
        tracing::trace!(id = %node.id, op = %call.name, value, "fold");
        inherit_newline(node, integer_literal(node.span, value))
    }

    /// `(stmt)` collapses once `stmt` folds to an integer literal. Groups
    /// of several statements are folded statement by statement.
    fn fold_parentheses(&mut self, node: &NodeRef, _body: Option<&NodeRef>) -> NodeRef {
        let Some(statement) = node.single_statement() else {
            return fold_children(self, node);
        };
        let statement = self.fold(statement);
        if matches!(statement.kind, NodeKind::Integer { .. }) {
            return inherit_newline(node, statement);
        }
        with_single_statement(node, statement)
    }
}

/// Evaluate `lhs op rhs` with the target language's integer semantics.
///
/// Returns `None` when the operator is not foldable or the result does not
/// fit a 64-bit integer. Division rounds toward negative infinity and the
/// remainder takes the sign of the divisor. A negative shift count shifts
/// the other way.
pub fn fold_binary(op: &str, lhs: i64, rhs: i64) -> Option<i64> {
    match op {
        "+" => lhs.checked_add(rhs),
        "-" => lhs.checked_sub(rhs),
        "*" => lhs.checked_mul(rhs),
        // Division-by-zero: defer to runtime.
        "/" | "%" if rhs == 0 => None,
        "/" => floor_div(lhs, rhs),
        "%" => floor_mod(lhs, rhs),
        "**" => {
            let exp = u32::try_from(rhs).ok()?;
            lhs.checked_pow(exp)
        }
        "&" => Some(lhs & rhs),
        "|" => Some(lhs | rhs),
        "^" => Some(lhs ^ rhs),
        "<<" => shift_left(lhs, rhs),
        ">>" => shift_right(lhs, rhs),
        _ => None,
    }
}

fn floor_div(lhs: i64, rhs: i64) -> Option<i64> {
    let quotient = lhs.checked_div(rhs)?;
    let remainder = lhs.checked_rem(rhs)?;
    if remainder != 0 && (remainder < 0) != (rhs < 0) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

fn floor_mod(lhs: i64, rhs: i64) -> Option<i64> {
    let remainder = lhs.checked_rem(rhs)?;
    if remainder != 0 && (remainder < 0) != (rhs < 0) {
        Some(remainder + rhs)
    } else {
        Some(remainder)
    }
}

fn shift_left(lhs: i64, rhs: i64) -> Option<i64> {
    if rhs < 0 {
        return shift_right(lhs, rhs.checked_neg()?);
    }
    if lhs == 0 {
        return Some(0);
    }
    let shift = u32::try_from(rhs).ok().filter(|&s| s < 64)?;
    let result = lhs.wrapping_shl(shift);
    // Round-trip check: if shifting back recovers the original, no overflow.
    (result >> shift == lhs).then_some(result)
}

fn shift_right(lhs: i64, rhs: i64) -> Option<i64> {
    if rhs < 0 {
        return shift_left(lhs, rhs.checked_neg()?);
    }
    match u32::try_from(rhs) {
        Ok(shift) if shift < 64 => Some(lhs >> shift),
        // Every bit shifted out: only the sign remains.
        _ => Some(if lhs < 0 { -1 } else { 0 }),
    }
}
