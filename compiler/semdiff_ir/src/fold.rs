//! Bottom-up tree rewriting.
//!
//! A [`Folder`] maps a tree to a new tree. The default methods rebuild each
//! node from its folded children; a pass overrides the hooks for the node
//! kinds it rewrites. When no child of a node changed, the original node is
//! returned as is, so untouched subtrees are shared between input and output.

use std::sync::Arc;

use crate::ast::argument_list;
use crate::{ensure_sufficient_stack, CallNode, Node, NodeKind, NodeRef};

/// Tree-to-tree transformation by structural recursion.
///
/// `fold` dispatches to the kind-specific hooks; everything not hooked is
/// rebuilt with [`fold_children`].
pub trait Folder {
    fn fold(&mut self, node: &NodeRef) -> NodeRef {
        ensure_sufficient_stack(|| match &node.kind {
            NodeKind::Call(call) => self.fold_call(node, call),
            NodeKind::Parentheses { body } => self.fold_parentheses(node, body.as_ref()),
            _ => fold_children(self, node),
        })
    }

    /// Fold a call. Default folds receiver, arguments and block.
    fn fold_call(&mut self, node: &NodeRef, call: &CallNode) -> NodeRef {
        fold_call_parts(self, call).rebuild(node, call)
    }

    /// Fold a parenthesized group. Default folds the body.
    fn fold_parentheses(&mut self, node: &NodeRef, body: Option<&NodeRef>) -> NodeRef {
        let _ = body;
        fold_children(self, node)
    }

    fn fold_opt(&mut self, node: Option<&NodeRef>) -> Option<NodeRef> {
        node.map(|n| self.fold(n))
    }
}

/// Receiver, arguments and block of a call after folding.
#[derive(Clone, Debug)]
pub struct FoldedCall {
    pub receiver: Option<NodeRef>,
    pub arguments: Option<NodeRef>,
    pub block: Option<NodeRef>,
}

impl FoldedCall {
    pub fn argument_list(&self) -> &[NodeRef] {
        argument_list(self.arguments.as_ref())
    }

    /// The only folded argument, if there is exactly one.
    pub fn sole_argument(&self) -> Option<&NodeRef> {
        match self.argument_list() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Rebuild `node` with the folded parts and its original name.
    ///
    /// Returns `node` itself when nothing changed.
    pub fn rebuild(self, node: &NodeRef, call: &CallNode) -> NodeRef {
        if same(self.receiver.as_ref(), call.receiver.as_ref())
            && same(self.arguments.as_ref(), call.arguments.as_ref())
            && same(self.block.as_ref(), call.block.as_ref())
        {
            return Arc::clone(node);
        }
        Arc::new(node.with_kind(NodeKind::Call(CallNode {
            receiver: self.receiver,
            name: call.name.clone(),
            arguments: self.arguments,
            block: self.block,
        })))
    }
}

/// Fold the receiver, arguments and block of `call`, in that order.
pub fn fold_call_parts<F: Folder + ?Sized>(folder: &mut F, call: &CallNode) -> FoldedCall {
    FoldedCall {
        receiver: folder.fold_opt(call.receiver.as_ref()),
        arguments: folder.fold_opt(call.arguments.as_ref()),
        block: folder.fold_opt(call.block.as_ref()),
    }
}

/// Rebuild `node` from its folded children without looking at it.
pub fn fold_children<F: Folder + ?Sized>(folder: &mut F, node: &NodeRef) -> NodeRef {
    let mut cx = Children {
        folder,
        changed: false,
    };
    let kind = match &node.kind {
        NodeKind::Program { statements } => NodeKind::Program {
            statements: cx.one(statements),
        },
        NodeKind::Statements { body } => NodeKind::Statements {
            body: cx.many(body),
        },
        NodeKind::Call(call) => NodeKind::Call(CallNode {
            receiver: cx.opt(call.receiver.as_ref()),
            name: call.name.clone(),
            arguments: cx.opt(call.arguments.as_ref()),
            block: cx.opt(call.block.as_ref()),
        }),
        NodeKind::Arguments { arguments } => NodeKind::Arguments {
            arguments: cx.many(arguments),
        },
        NodeKind::Array { elements } => NodeKind::Array {
            elements: cx.many(elements),
        },
        NodeKind::Hash { elements } => NodeKind::Hash {
            elements: cx.many(elements),
        },
        NodeKind::Assoc { key, value } => NodeKind::Assoc {
            key: cx.one(key),
            value: cx.one(value),
        },
        NodeKind::Parentheses { body } => NodeKind::Parentheses {
            body: cx.opt(body.as_ref()),
        },
        NodeKind::ConstantPath { parent, name } => NodeKind::ConstantPath {
            parent: cx.opt(parent.as_ref()),
            name: name.clone(),
        },
        NodeKind::Write { scope, name, value } => NodeKind::Write {
            scope: *scope,
            name: name.clone(),
            value: cx.one(value),
        },
        NodeKind::Block { parameters, body } => NodeKind::Block {
            parameters: parameters.clone(),
            body: cx.opt(body.as_ref()),
        },
        NodeKind::Def {
            name,
            receiver,
            parameters,
            body,
        } => NodeKind::Def {
            name: name.clone(),
            receiver: cx.opt(receiver.as_ref()),
            parameters: parameters.clone(),
            body: cx.opt(body.as_ref()),
        },
        NodeKind::Module {
            constant_path,
            body,
        } => NodeKind::Module {
            constant_path: cx.one(constant_path),
            body: cx.opt(body.as_ref()),
        },
        NodeKind::Class {
            constant_path,
            superclass,
            body,
        } => NodeKind::Class {
            constant_path: cx.one(constant_path),
            superclass: cx.opt(superclass.as_ref()),
            body: cx.opt(body.as_ref()),
        },
        NodeKind::SingletonClass { expression, body } => NodeKind::SingletonClass {
            expression: cx.one(expression),
            body: cx.opt(body.as_ref()),
        },
        NodeKind::If {
            predicate,
            statements,
            subsequent,
        } => NodeKind::If {
            predicate: cx.one(predicate),
            statements: cx.opt(statements.as_ref()),
            subsequent: cx.opt(subsequent.as_ref()),
        },
        // Leaves.
        NodeKind::Integer { .. }
        | NodeKind::Float { .. }
        | NodeKind::Str { .. }
        | NodeKind::Symbol { .. }
        | NodeKind::True
        | NodeKind::False
        | NodeKind::Nil
        | NodeKind::SelfRef
        | NodeKind::Read { .. } => return Arc::clone(node),
    };
    if cx.changed {
        Arc::new(Node::with_kind(node, kind))
    } else {
        Arc::clone(node)
    }
}

fn same(a: Option<&NodeRef>, b: Option<&NodeRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Folds children one by one and remembers whether any of them changed.
struct Children<'f, F: ?Sized> {
    folder: &'f mut F,
    changed: bool,
}

impl<F: Folder + ?Sized> Children<'_, F> {
    fn one(&mut self, node: &NodeRef) -> NodeRef {
        let folded = self.folder.fold(node);
        self.changed |= !Arc::ptr_eq(&folded, node);
        folded
    }

    fn opt(&mut self, node: Option<&NodeRef>) -> Option<NodeRef> {
        node.map(|n| self.one(n))
    }

    fn many(&mut self, nodes: &[NodeRef]) -> Vec<NodeRef> {
        nodes.iter().map(|n| self.one(n)).collect()
    }
}
