//! Tree construction.
//!
//! [`AstBuilder`] hands out a fresh identity for every node it creates, so
//! trees built through one builder satisfy the parser contract (unique
//! identities within one parse). It sets the flags a parser would set:
//! `NEWLINE` on every statement of a statement list, `STATIC_LITERAL` on
//! literals, `VARIABLE_CALL` on bare identifiers.

use std::sync::Arc;

use crate::{CallNode, Name, Node, NodeFlags, NodeId, NodeKind, NodeRef, Span, VarScope};

/// Builds nodes with unique identities.
#[derive(Debug, Default)]
pub struct AstBuilder {
    next_id: u32,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after `next_id`. Useful when splicing into a
    /// tree whose identities are already taken.
    pub fn starting_at(next_id: u32) -> Self {
        AstBuilder { next_id }
    }

    /// The next unused identity.
    ///
    /// Panics once every identity below [`NodeId::SYNTHETIC`] is taken,
    /// rather than handing out the sentinel.
    fn fresh_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        match self.next_id.checked_add(1) {
            Some(next) if !id.is_synthetic() => {
                self.next_id = next;
                id
            }
            _ => panic!("node identities exhausted after {} nodes", self.next_id),
        }
    }

    /// Create a node of any kind with the given flags.
    pub fn node(&mut self, flags: NodeFlags, kind: NodeKind) -> NodeRef {
        let id = self.fresh_id();
        Arc::new(Node::new(id, Span::DUMMY, flags, kind))
    }

    // Literals

    pub fn int(&mut self, value: i64) -> NodeRef {
        self.node(NodeFlags::INTEGER_LITERAL, NodeKind::Integer { value })
    }

    pub fn float(&mut self, value: f64) -> NodeRef {
        self.node(NodeFlags::STATIC_LITERAL, NodeKind::Float { value })
    }

    pub fn string(&mut self, value: &str) -> NodeRef {
        self.node(NodeFlags::empty(), NodeKind::Str { value: value.into() })
    }

    pub fn symbol(&mut self, value: &str) -> NodeRef {
        self.node(
            NodeFlags::STATIC_LITERAL,
            NodeKind::Symbol {
                value: value.into(),
            },
        )
    }

    pub fn true_lit(&mut self) -> NodeRef {
        self.node(NodeFlags::STATIC_LITERAL, NodeKind::True)
    }

    pub fn false_lit(&mut self) -> NodeRef {
        self.node(NodeFlags::STATIC_LITERAL, NodeKind::False)
    }

    pub fn nil(&mut self) -> NodeRef {
        self.node(NodeFlags::STATIC_LITERAL, NodeKind::Nil)
    }

    pub fn self_ref(&mut self) -> NodeRef {
        self.node(NodeFlags::empty(), NodeKind::SelfRef)
    }

    /// `[elements]`; static when every element is.
    pub fn array(&mut self, elements: Vec<NodeRef>) -> NodeRef {
        let flags = static_if_all(&elements);
        self.node(flags, NodeKind::Array { elements })
    }

    /// `{ key => value, ... }`; static when every pair is.
    pub fn hash(&mut self, pairs: Vec<(NodeRef, NodeRef)>) -> NodeRef {
        let elements: Vec<NodeRef> = pairs
            .into_iter()
            .map(|(key, value)| {
                let flags = static_if_all(&[Arc::clone(&key), Arc::clone(&value)]);
                self.node(flags, NodeKind::Assoc { key, value })
            })
            .collect();
        let flags = static_if_all(&elements);
        self.node(flags, NodeKind::Hash { elements })
    }

    // Variables

    pub fn read(&mut self, scope: VarScope, name: &str) -> NodeRef {
        self.node(
            NodeFlags::empty(),
            NodeKind::Read {
                scope,
                name: name.into(),
            },
        )
    }

    pub fn lvar(&mut self, name: &str) -> NodeRef {
        self.read(VarScope::Local, name)
    }

    pub fn ivar(&mut self, name: &str) -> NodeRef {
        self.read(VarScope::Instance, name)
    }

    pub fn cvar(&mut self, name: &str) -> NodeRef {
        self.read(VarScope::Class, name)
    }

    pub fn gvar(&mut self, name: &str) -> NodeRef {
        self.read(VarScope::Global, name)
    }

    pub fn constant(&mut self, name: &str) -> NodeRef {
        self.read(VarScope::Constant, name)
    }

    /// `parent::name`, or `::name` without a parent.
    pub fn constant_path(&mut self, parent: Option<NodeRef>, name: &str) -> NodeRef {
        self.node(
            NodeFlags::empty(),
            NodeKind::ConstantPath {
                parent,
                name: name.into(),
            },
        )
    }

    /// A `::`-separated path such as `"A::B::C"` or `"::A"`.
    ///
    /// A single segment becomes a constant read.
    pub fn path(&mut self, path: &str) -> NodeRef {
        let (absolute, rest) = match path.strip_prefix("::") {
            Some(rest) => (true, rest),
            None => (false, path),
        };
        let mut segments = rest.split("::");
        let first = segments.next().unwrap_or_default();
        let mut node = if absolute {
            self.constant_path(None, first)
        } else {
            self.constant(first)
        };
        for segment in segments {
            node = self.constant_path(Some(node), segment);
        }
        node
    }

    pub fn write(&mut self, scope: VarScope, name: &str, value: NodeRef) -> NodeRef {
        self.node(
            NodeFlags::empty(),
            NodeKind::Write {
                scope,
                name: name.into(),
                value,
            },
        )
    }

    // Calls

    /// `receiver.name(arguments)`; no arguments node when `arguments` is empty.
    pub fn call(&mut self, receiver: Option<NodeRef>, name: &str, arguments: Vec<NodeRef>) -> NodeRef {
        self.call_with_block(receiver, name, arguments, None)
    }

    pub fn call_with_block(
        &mut self,
        receiver: Option<NodeRef>,
        name: &str,
        arguments: Vec<NodeRef>,
        block: Option<NodeRef>,
    ) -> NodeRef {
        let arguments = self.arguments(arguments);
        self.node(
            NodeFlags::empty(),
            NodeKind::Call(CallNode {
                receiver,
                name: name.into(),
                arguments,
                block,
            }),
        )
    }

    /// Arguments node, absent for an empty list.
    pub fn arguments(&mut self, arguments: Vec<NodeRef>) -> Option<NodeRef> {
        if arguments.is_empty() {
            None
        } else {
            Some(self.node(NodeFlags::empty(), NodeKind::Arguments { arguments }))
        }
    }

    /// `lhs op rhs`
    pub fn binary(&mut self, lhs: NodeRef, op: &str, rhs: NodeRef) -> NodeRef {
        self.call(Some(lhs), op, vec![rhs])
    }

    /// `-operand` / `+operand`; `op` is the method name (`-@`, `+@`).
    pub fn unary(&mut self, op: &str, operand: NodeRef) -> NodeRef {
        self.call(Some(operand), op, Vec::new())
    }

    /// A bare identifier that is not a known local: `name`.
    pub fn vcall(&mut self, name: &str) -> NodeRef {
        self.node(
            NodeFlags::VARIABLE_CALL,
            NodeKind::Call(CallNode {
                receiver: None,
                name: name.into(),
                arguments: None,
                block: None,
            }),
        )
    }

    /// `receiver[key] = value`
    pub fn index_assign(&mut self, receiver: NodeRef, key: NodeRef, value: NodeRef) -> NodeRef {
        let arguments = self.arguments(vec![key, value]);
        self.node(
            NodeFlags::INDEX_ASSIGN,
            NodeKind::Call(CallNode {
                receiver: Some(receiver),
                name: "[]=".into(),
                arguments,
                block: None,
            }),
        )
    }

    pub fn block(&mut self, parameters: &[&str], body: Vec<NodeRef>) -> NodeRef {
        let body = self.body(body);
        self.node(
            NodeFlags::empty(),
            NodeKind::Block {
                parameters: names(parameters),
                body,
            },
        )
    }

    // Grouping

    /// Statement list; every statement gets `NEWLINE`.
    pub fn statements(&mut self, body: Vec<NodeRef>) -> NodeRef {
        let body = body
            .into_iter()
            .map(|stmt| {
                if stmt.has_newline() {
                    stmt
                } else {
                    Arc::new(stmt.with_flags(stmt.flags | NodeFlags::NEWLINE))
                }
            })
            .collect();
        self.node(NodeFlags::empty(), NodeKind::Statements { body })
    }

    /// `( statements )`. Statements inside parentheses carry no `NEWLINE`.
    pub fn parens(&mut self, body: Vec<NodeRef>) -> NodeRef {
        let body = if body.is_empty() {
            None
        } else {
            Some(self.node(NodeFlags::empty(), NodeKind::Statements { body }))
        };
        self.node(NodeFlags::empty(), NodeKind::Parentheses { body })
    }

    /// `( expr )`
    pub fn paren(&mut self, expr: NodeRef) -> NodeRef {
        self.parens(vec![expr])
    }

    pub fn program(&mut self, body: Vec<NodeRef>) -> NodeRef {
        let statements = self.statements(body);
        self.node(NodeFlags::empty(), NodeKind::Program { statements })
    }

    // Definitions

    /// `def name(parameters) body end`
    pub fn def(&mut self, name: &str, parameters: &[&str], body: Vec<NodeRef>) -> NodeRef {
        self.def_on(None, name, parameters, body)
    }

    /// `def receiver.name(parameters) body end`
    pub fn def_on(
        &mut self,
        receiver: Option<NodeRef>,
        name: &str,
        parameters: &[&str],
        body: Vec<NodeRef>,
    ) -> NodeRef {
        let body = self.body(body);
        self.node(
            NodeFlags::empty(),
            NodeKind::Def {
                name: name.into(),
                receiver,
                parameters: names(parameters),
                body,
            },
        )
    }

    /// `module path; body; end`
    pub fn module(&mut self, path: &str, body: Vec<NodeRef>) -> NodeRef {
        let constant_path = self.path(path);
        self.module_at(constant_path, body)
    }

    /// `module` with an explicit constant path node.
    pub fn module_at(&mut self, constant_path: NodeRef, body: Vec<NodeRef>) -> NodeRef {
        let body = self.body(body);
        self.node(
            NodeFlags::empty(),
            NodeKind::Module {
                constant_path,
                body,
            },
        )
    }

    /// `class path [< superclass]; body; end`
    pub fn class(&mut self, path: &str, superclass: Option<NodeRef>, body: Vec<NodeRef>) -> NodeRef {
        let constant_path = self.path(path);
        let body = self.body(body);
        self.node(
            NodeFlags::empty(),
            NodeKind::Class {
                constant_path,
                superclass,
                body,
            },
        )
    }

    /// `class << self; body; end`
    pub fn singleton_class(&mut self, body: Vec<NodeRef>) -> NodeRef {
        let expression = self.self_ref();
        let body = self.body(body);
        self.node(
            NodeFlags::empty(),
            NodeKind::SingletonClass { expression, body },
        )
    }

    /// `if predicate; then_body; else; else_body; end`
    pub fn if_else(
        &mut self,
        predicate: NodeRef,
        then_body: Vec<NodeRef>,
        else_body: Option<NodeRef>,
    ) -> NodeRef {
        let statements = self.body(then_body);
        self.node(
            NodeFlags::empty(),
            NodeKind::If {
                predicate,
                statements,
                subsequent: else_body,
            },
        )
    }

    fn body(&mut self, body: Vec<NodeRef>) -> Option<NodeRef> {
        if body.is_empty() {
            None
        } else {
            Some(self.statements(body))
        }
    }
}

fn names(names: &[&str]) -> Vec<Name> {
    names.iter().map(|&n| Name::from(n)).collect()
}

fn static_if_all(nodes: &[NodeRef]) -> NodeFlags {
    if nodes
        .iter()
        .all(|n| n.flags.contains(NodeFlags::STATIC_LITERAL))
    {
        NodeFlags::STATIC_LITERAL
    } else {
        NodeFlags::empty()
    }
}

#[cfg(test)]
mod tests;
