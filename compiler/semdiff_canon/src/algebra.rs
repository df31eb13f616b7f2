//! Commutativity and associativity of `+` and `*`, given type evidence.
//!
//! ```text
//! b + a          a + b
//! c * a          a * c
//! (a + c) + b    a + b + c
//! ```
//!
//! A chain of one operator is flattened into its operands (through
//! parentheses), the operands are sorted by [`operand_order`], and a
//! left-associated chain is rebuilt. Every operand must be a numeric
//! literal or carry numeric evidence; otherwise the chain is kept as
//! written, since `+` on strings or arrays does not commute.

use std::sync::Arc;

use semdiff_ir::{
    ensure_sufficient_stack, equivalent, fold_call_parts, fold_children, inherit_newline,
    CallNode, FoldedCall, Folder, Name, Node, NodeFlags, NodeKind, NodeRef, VarScope,
};
use semdiff_types::NodeTypes;

use crate::rewrite::{with_call, with_single_statement};

/// Operators whose two operands may be swapped.
pub const COMMUTATIVE_OPERATORS: &[&str] = &["+", "*"];

/// Operators whose chains may be regrouped.
pub const ASSOCIATIVE_OPERATORS: &[&str] = &["+", "*"];

/// Sort commuting operands that `types` proves numeric.
#[tracing::instrument(level = "debug", skip_all)]
pub fn algebra(root: &NodeRef, types: &NodeTypes) -> NodeRef {
    Algebra { types }.fold(root)
}

/// Ordering key of an operand.
///
/// Variables and bare calls sort by name (with their sigil), literals by
/// value after a `#` prefix, anything else by kind after a `~` prefix. No
/// identifier starts with `#`, so a literal never shares a key with a name
/// (`1` is `#1`, the local `_1` is `_1`).
///
/// Distinct operands can still share a key (`self.x` and `x`, `f(1)` and
/// `f(2)`); [`operand_order`] breaks those ties.
pub fn sort_key(node: &Node) -> String {
    match &node.kind {
        NodeKind::Read { scope, name } => format!("{}{name}", sigil(*scope)),
        NodeKind::Call(call) => call.name.to_string(),
        NodeKind::Integer { value } => format!("#{value}"),
        NodeKind::Float { value } => format!("#{value:?}"),
        other => format!("~{}", other.tag()),
    }
}

/// Total order of operands: [`sort_key`], then the full dump.
///
/// Two operands compare equal only when they print the same, that is when
/// they are [`equivalent`], so the order of a sorted chain never depends on
/// the order it was written in.
pub fn operand_order(node: &Node) -> (String, String) {
    (sort_key(node), node.to_string())
}

fn sigil(scope: VarScope) -> &'static str {
    match scope {
        VarScope::Instance => "@",
        VarScope::Class => "@@",
        VarScope::Global => "$",
        VarScope::Local | VarScope::Constant => "",
    }
}

struct Algebra<'t> {
    types: &'t NodeTypes,
}

impl Folder for Algebra<'_> {
    fn fold_call(&mut self, node: &NodeRef, call: &CallNode) -> NodeRef {
        let folded = fold_call_parts(self, call);
        let Some(reordered) = self.reorder(node, call, &folded) else {
            return folded.rebuild(node, call);
        };
        let reordered = inherit_newline(node, reordered);
        let original = folded.rebuild(node, call);
        if equivalent(&reordered, &original) {
            return original;
        }
        tracing::trace!(id = %node.id, op = %call.name, "reorder");
        reordered
    }

    /// `(a + b)` loses its parentheses once both operands are numeric.
    fn fold_parentheses(&mut self, node: &NodeRef, _body: Option<&NodeRef>) -> NodeRef {
        let Some(statement) = node.single_statement() else {
            return fold_children(self, node);
        };
        let statement = self.fold(statement);
        if self.is_numeric_chain_link(&statement) {
            tracing::trace!(id = %node.id, "unwrap");
            return inherit_newline(node, statement);
        }
        with_single_statement(node, statement)
    }
}

impl Algebra<'_> {
    fn numeric(&self, node: &Node) -> bool {
        matches!(node.kind, NodeKind::Integer { .. } | NodeKind::Float { .. })
            || self.types.is_numeric(node)
    }

    fn is_numeric_chain_link(&self, node: &Node) -> bool {
        node.as_call().is_some_and(|call| {
            ASSOCIATIVE_OPERATORS.contains(&call.name.as_str())
                && call.receiver.as_ref().is_some_and(|lhs| self.numeric(lhs))
                && call.sole_argument().is_some_and(|rhs| self.numeric(rhs))
        })
    }

    fn reorder(&self, node: &Node, call: &CallNode, folded: &FoldedCall) -> Option<NodeRef> {
        let op = call.name.as_str();
        if !COMMUTATIVE_OPERATORS.contains(&op) || folded.block.is_some() {
            return None;
        }
        let lhs = folded.receiver.as_ref()?;
        let rhs = folded.sole_argument()?;
        let arguments = folded.arguments.as_ref()?;

        if ASSOCIATIVE_OPERATORS.contains(&op) {
            let mut operands = Vec::new();
            flatten(op, lhs, &mut operands);
            flatten(op, rhs, &mut operands);
            if operands.iter().all(|operand| self.numeric(operand)) {
                operands.sort_by_cached_key(|operand| operand_order(operand));
                return Some(rebuild(node, &call.name, arguments, operands));
            }
        }

        // The chain cannot be flattened, but the two operands still commute.
        if self.numeric(lhs) && self.numeric(rhs) && operand_order(lhs) > operand_order(rhs) {
            let swapped = Arc::new(arguments.with_kind(NodeKind::Arguments {
                arguments: vec![Arc::clone(lhs)],
            }));
            return Some(with_call(
                node,
                CallNode {
                    receiver: Some(Arc::clone(rhs)),
                    name: call.name.clone(),
                    arguments: Some(swapped),
                    block: None,
                },
            ));
        }
        None
    }
}

/// Collect the operands of a chain of `op` calls, left to right, looking
/// through single-statement parentheses.
fn flatten(op: &str, node: &NodeRef, out: &mut Vec<NodeRef>) {
    ensure_sufficient_stack(|| {
        let node = unwrap_parentheses(node);
        if let Some(call) = node.as_call() {
            if call.name == op && call.block.is_none() {
                if let (Some(lhs), Some(rhs)) = (&call.receiver, call.sole_argument()) {
                    flatten(op, lhs, out);
                    flatten(op, rhs, out);
                    return;
                }
            }
        }
        out.push(Arc::clone(node));
    });
}

fn unwrap_parentheses(mut node: &NodeRef) -> &NodeRef {
    while let Some(inner) = node.single_statement() {
        node = inner;
    }
    node
}

/// Left-associated chain `((o1 op o2) op o3) ...`. Every link takes the
/// identity and span of `node` and of its `arguments`.
fn rebuild(node: &Node, op: &Name, arguments: &Node, operands: Vec<NodeRef>) -> NodeRef {
    let mut operands = operands.into_iter();
    let Some(mut chain) = operands.next() else {
        return Arc::new(node.clone());
    };
    for operand in operands {
        let arguments = Arc::new(arguments.with_kind(NodeKind::Arguments {
            arguments: vec![operand],
        }));
        chain = Arc::new(Node::new(
            node.id,
            node.span,
            NodeFlags::empty(),
            NodeKind::Call(CallNode {
                receiver: Some(chain),
                name: op.clone(),
                arguments: Some(arguments),
                block: None,
            }),
        ));
    }
    chain
}
