//! Node construction shared by the passes.

use std::sync::Arc;

use semdiff_ir::{CallNode, Node, NodeFlags, NodeId, NodeKind, NodeRef, Span};

/// A freshly synthesized integer literal. It has no identity of its own,
/// so no type evidence can ever be found for it.
pub(crate) fn integer_literal(span: Span, value: i64) -> NodeRef {
    Arc::new(Node::new(
        NodeId::SYNTHETIC,
        span,
        NodeFlags::INTEGER_LITERAL,
        NodeKind::Integer { value },
    ))
}

/// `node` turned into the call `call`, keeping identity, span and flags.
pub(crate) fn with_call(node: &Node, call: CallNode) -> NodeRef {
    Arc::new(node.with_kind(NodeKind::Call(call)))
}

/// A parenthesized group of one statement, rebuilt around `statement`.
///
/// Returns `parens` itself when `statement` is the statement it already
/// holds.
pub(crate) fn with_single_statement(parens: &NodeRef, statement: NodeRef) -> NodeRef {
    let NodeKind::Parentheses { body: Some(body) } = &parens.kind else {
        return Arc::clone(parens);
    };
    if parens
        .single_statement()
        .is_some_and(|old| Arc::ptr_eq(old, &statement))
    {
        return Arc::clone(parens);
    }
    let body = Arc::new(body.with_kind(NodeKind::Statements {
        body: vec![statement],
    }));
    Arc::new(parens.with_kind(NodeKind::Parentheses { body: Some(body) }))
}
