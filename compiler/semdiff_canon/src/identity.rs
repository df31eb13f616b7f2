//! Arithmetic identities, given type evidence.
//!
//! ```text
//! x + 0    x        0 + x    x
//! x - 0    x        0 - x    -x
//! x * 1    x        1 * x    x
//! x * 0    0        0 * x    0      (x: Integer)
//! x / 1    x
//! x ** 1   x        x ** 0   1      (x: Integer)
//! +x       x
//! --x      x        ---x     -x
//! ```
//!
//! Every rule needs evidence that the non-literal operand is numeric. The
//! zero rules need more: `0 * x` is not `0` for a float (`NaN`, infinity)
//! or for an arbitrary numeric type, so they only fire when `x` is known
//! to be exactly `Integer`.

use std::sync::Arc;

use semdiff_ir::{fold_call_parts, inherit_newline, CallNode, FoldedCall, Folder, Node, NodeRef};
use semdiff_types::NodeTypes;

use crate::rewrite::{integer_literal, with_call};

/// Simplify arithmetic identities on operands `types` proves numeric.
#[tracing::instrument(level = "debug", skip_all)]
pub fn identities(root: &NodeRef, types: &NodeTypes) -> NodeRef {
    Identities { types }.fold(root)
}

struct Identities<'t> {
    types: &'t NodeTypes,
}

impl Folder for Identities<'_> {
    fn fold_call(&mut self, node: &NodeRef, call: &CallNode) -> NodeRef {
        let folded = fold_call_parts(self, call);
        match self.simplify(node, call, &folded) {
            Some(result) => {
                tracing::trace!(id = %node.id, op = %call.name, "identity");
                inherit_newline(node, result)
            }
            None => folded.rebuild(node, call),
        }
    }
}

impl Identities<'_> {
    fn numeric(&self, node: &Node) -> bool {
        self.types.is_numeric(node)
    }

    fn integer(&self, node: &Node) -> bool {
        self.types.is_integer(node)
    }

    fn simplify(&self, node: &Node, call: &CallNode, folded: &FoldedCall) -> Option<NodeRef> {
        if folded.block.is_some() {
            return None;
        }
        let lhs = folded.receiver.as_ref()?;
        if folded.arguments.is_none() {
            return match call.name.as_str() {
                "+@" => self.numeric(lhs).then(|| Arc::clone(lhs)),
                "-@" => self.collapse_negation(node, lhs),
                _ => None,
            };
        }
        let rhs = folded.sole_argument()?;
        let result = match call.name.as_str() {
            "+" if self.numeric(lhs) && zero(rhs) => lhs,
            "+" if self.numeric(rhs) && zero(lhs) => rhs,
            "-" if self.numeric(lhs) && zero(rhs) => lhs,
            "-" if self.numeric(rhs) && zero(lhs) => {
                return Some(
                    self.collapse_negation(node, rhs)
                        .unwrap_or_else(|| negate(node, Arc::clone(rhs))),
                );
            }
            "*" if self.numeric(lhs) && one(rhs) => lhs,
            "*" if self.numeric(rhs) && one(lhs) => rhs,
            "*" if self.integer(lhs) && zero(rhs) => rhs,
            "*" if self.integer(rhs) && zero(lhs) => lhs,
            "/" if self.numeric(lhs) && one(rhs) => lhs,
            "**" if self.numeric(lhs) && one(rhs) => lhs,
            "**" if self.integer(lhs) && zero(rhs) => return Some(integer_literal(node.span, 1)),
            _ => return None,
        };
        Some(Arc::clone(result))
    }

    /// `node` negates `operand`. Count the sign flips through nested
    /// negations and single-statement parentheses below it: an even count
    /// cancels to the innermost operand, an odd count leaves one negation.
    ///
    /// Returns `None` when there is nothing to collapse or the innermost
    /// operand is not known to be numeric.
    fn collapse_negation(&self, node: &Node, operand: &NodeRef) -> Option<NodeRef> {
        let mut base = operand;
        let mut flips = 1_usize;
        loop {
            if let Some(inner) = base.single_statement() {
                base = inner;
                continue;
            }
            match base.as_call() {
                Some(CallNode {
                    receiver: Some(inner),
                    name,
                    arguments: None,
                    block: None,
                }) if name == "-@" => {
                    base = inner;
                    flips += 1;
                }
                _ => break,
            }
        }

        if !self.numeric(base) {
            return None;
        }
        if flips % 2 == 0 {
            Some(Arc::clone(base))
        } else if Arc::ptr_eq(base, operand) {
            None
        } else {
            Some(negate(node, Arc::clone(base)))
        }
    }
}

fn zero(node: &Node) -> bool {
    node.is_integer(0)
}

fn one(node: &Node) -> bool {
    node.is_integer(1)
}

/// `-operand`, in place of `node`.
fn negate(node: &Node, operand: NodeRef) -> NodeRef {
    with_call(
        node,
        CallNode {
            receiver: Some(operand),
            name: "-@".into(),
            arguments: None,
            block: None,
        },
    )
}

#[cfg(test)]
mod tests;
