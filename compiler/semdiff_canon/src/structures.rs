//! Collection idioms to literal syntax.
//!
//! | Expression               | Canonical form  |
//! |--------------------------|-----------------|
//! | `Array.new`, `Array.new(0)` | `[]`         |
//! | `Hash.new`, `Hash[]`     | `{}`            |
//! | `a.push(e)`              | `a << e`        |
//! | `"a".concat(b)`          | `"a" << b`      |
//! | `h.store(k, v)`          | `h[k] = v`      |
//!
//! Purely syntactic. `concat` is only rewritten on a string literal
//! receiver, where it is known to append. Any other argument shape is left
//! alone, as is a safe-navigation call (`a&.push(e)`), which has no
//! operator form. The rewritten node keeps the identity of the call it
//! replaces.

use std::sync::Arc;

use semdiff_ir::{
    fold_call_parts, inherit_newline, CallNode, FoldedCall, Folder, Node, NodeFlags, NodeKind,
    NodeRef, VarScope,
};

use crate::rewrite::with_call;

/// Rewrite collection idioms into literal syntax.
#[tracing::instrument(level = "debug", skip_all)]
pub fn structures(root: &NodeRef) -> NodeRef {
    Structures.fold(root)
}

struct Structures;

impl Folder for Structures {
    fn fold_call(&mut self, node: &NodeRef, call: &CallNode) -> NodeRef {
        let folded = fold_call_parts(self, call);
        let rewritten = match call.name.as_str() {
            "new" => constructor(node, &folded),
            "[]" => class_bracket(node, &folded),
            "push" => shovel(node, &folded),
            "concat" if folded.receiver.as_ref().is_some_and(|r| matches!(r.kind, NodeKind::Str { .. })) => {
                shovel(node, &folded)
            }
            "store" => index_assign(node, &folded),
            _ => None,
        };
        match rewritten {
            Some(rewritten) => {
                tracing::trace!(id = %node.id, name = %call.name, "structure");
                inherit_newline(node, rewritten)
            }
            None => folded.rebuild(node, call),
        }
    }
}

/// Name of a plain constant receiver (`Array` in `Array.new`).
fn constant_receiver(folded: &FoldedCall) -> Option<&str> {
    match &folded.receiver.as_deref()?.kind {
        NodeKind::Read {
            scope: VarScope::Constant,
            name,
        } => Some(name.as_str()),
        _ => None,
    }
}

/// An empty literal of `kind` in place of `node`.
fn empty_literal(node: &Node, kind: NodeKind) -> NodeRef {
    Arc::new(Node::new(node.id, node.span, NodeFlags::STATIC_LITERAL, kind))
}

/// `Array.new`, `Array.new(0)` → `[]`; `Hash.new` → `{}`.
fn constructor(node: &Node, folded: &FoldedCall) -> Option<NodeRef> {
    if folded.block.is_some() {
        return None;
    }
    match (constant_receiver(folded)?, folded.argument_list()) {
        ("Array", []) => Some(empty_literal(node, NodeKind::Array { elements: Vec::new() })),
        ("Array", [size]) if size.is_integer(0) => {
            Some(empty_literal(node, NodeKind::Array { elements: Vec::new() }))
        }
        ("Hash", []) => Some(empty_literal(node, NodeKind::Hash { elements: Vec::new() })),
        _ => None,
    }
}

/// `Hash[]` → `{}`.
fn class_bracket(node: &Node, folded: &FoldedCall) -> Option<NodeRef> {
    if folded.block.is_some() || !folded.argument_list().is_empty() {
        return None;
    }
    (constant_receiver(folded)? == "Hash")
        .then(|| empty_literal(node, NodeKind::Hash { elements: Vec::new() }))
}

/// `a.push(e)` → `a << e`.
fn shovel(node: &Node, folded: &FoldedCall) -> Option<NodeRef> {
    folded.sole_argument()?;
    if folded.block.is_some() || node.flags.contains(NodeFlags::SAFE_NAVIGATION) {
        return None;
    }
    let call = CallNode {
        receiver: Some(Arc::clone(folded.receiver.as_ref()?)),
        name: "<<".into(),
        arguments: folded.arguments.clone(),
        block: None,
    };
    Some(with_call(&node.with_flags(NodeFlags::empty()), call))
}

/// `h.store(k, v)` → `h[k] = v`.
///
/// The index-assignment form a parser produces carries
/// [`NodeFlags::INDEX_WRITE`] next to `ATTRIBUTE_WRITE`, so the rewrite
/// sets both to compare equal to it.
fn index_assign(node: &Node, folded: &FoldedCall) -> Option<NodeRef> {
    if folded.argument_list().len() != 2
        || folded.block.is_some()
        || node.flags.contains(NodeFlags::SAFE_NAVIGATION)
    {
        return None;
    }
    let call = CallNode {
        receiver: Some(Arc::clone(folded.receiver.as_ref()?)),
        name: "[]=".into(),
        arguments: folded.arguments.clone(),
        block: None,
    };
    Some(with_call(&node.with_flags(NodeFlags::INDEX_ASSIGN), call))
}

#[cfg(test)]
mod tests;
