//! AST node types.
//!
//! Nodes are immutable and reference counted. A rewrite builds new nodes
//! only along the path from a changed leaf to the root; every untouched
//! subtree is shared by reference between the input and output trees.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::{Name, NodeFlags, NodeId, Span};

/// Shared handle to an immutable node.
pub type NodeRef = Arc<Node>;

/// Storage scope of a variable read or write.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VarScope {
    /// `name`
    Local,
    /// `@name`
    Instance,
    /// `@@name`
    Class,
    /// `$name`
    Global,
    /// `Name`
    Constant,
}

impl VarScope {
    /// Tag used in dumps and sort keys.
    pub const fn tag(self) -> &'static str {
        match self {
            VarScope::Local => "lvar",
            VarScope::Instance => "ivar",
            VarScope::Class => "cvar",
            VarScope::Global => "gvar",
            VarScope::Constant => "const",
        }
    }
}

/// A method call: `receiver.name(arguments) { block }`.
///
/// Binary operators are calls with a receiver and exactly one argument
/// (`a + b` is `a.+(b)`); unary operators are calls named `-@` / `+@`
/// with a receiver and no arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct CallNode {
    pub receiver: Option<NodeRef>,
    pub name: Name,
    /// An [`NodeKind::Arguments`] node, absent when the call has none.
    pub arguments: Option<NodeRef>,
    pub block: Option<NodeRef>,
}

impl CallNode {
    /// Argument list, empty when the call has no arguments node.
    pub fn argument_list(&self) -> &[NodeRef] {
        argument_list(self.arguments.as_ref())
    }

    /// The only argument, if there is exactly one.
    pub fn sole_argument(&self) -> Option<&NodeRef> {
        match self.argument_list() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Elements of an optional arguments node.
pub(crate) fn argument_list(arguments: Option<&NodeRef>) -> &[NodeRef] {
    match arguments.map(|a| &a.kind) {
        Some(NodeKind::Arguments { arguments }) => arguments,
        _ => &[],
    }
}

/// Node kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Root of a parsed file. `statements` is a `Statements` node.
    Program { statements: NodeRef },
    Statements { body: Vec<NodeRef> },
    Call(CallNode),
    Arguments { arguments: Vec<NodeRef> },
    Integer { value: i64 },
    Float { value: f64 },
    Str { value: Arc<str> },
    Symbol { value: Name },
    True,
    False,
    Nil,
    SelfRef,
    Array { elements: Vec<NodeRef> },
    Hash { elements: Vec<NodeRef> },
    /// `key => value` inside a hash literal.
    Assoc { key: NodeRef, value: NodeRef },
    /// `( ... )`. `body` is a `Statements` node, absent for `()`.
    Parentheses { body: Option<NodeRef> },
    Read { scope: VarScope, name: Name },
    /// `parent::name`, or `::name` when `parent` is absent.
    ConstantPath { parent: Option<NodeRef>, name: Name },
    Write { scope: VarScope, name: Name, value: NodeRef },
    Block { parameters: Vec<Name>, body: Option<NodeRef> },
    /// `def [receiver.]name(parameters) body end`
    Def {
        name: Name,
        receiver: Option<NodeRef>,
        parameters: Vec<Name>,
        body: Option<NodeRef>,
    },
    Module { constant_path: NodeRef, body: Option<NodeRef> },
    Class {
        constant_path: NodeRef,
        superclass: Option<NodeRef>,
        body: Option<NodeRef>,
    },
    /// `class << expression; body; end`
    SingletonClass { expression: NodeRef, body: Option<NodeRef> },
    If {
        predicate: NodeRef,
        statements: Option<NodeRef>,
        subsequent: Option<NodeRef>,
    },
}

impl NodeKind {
    /// Short kind tag used in dumps, sort keys and error messages.
    pub const fn tag(&self) -> &'static str {
        match self {
            NodeKind::Program { .. } => "program",
            NodeKind::Statements { .. } => "statements",
            NodeKind::Call(_) => "call",
            NodeKind::Arguments { .. } => "arguments",
            NodeKind::Integer { .. } => "int",
            NodeKind::Float { .. } => "float",
            NodeKind::Str { .. } => "str",
            NodeKind::Symbol { .. } => "sym",
            NodeKind::True => "true",
            NodeKind::False => "false",
            NodeKind::Nil => "nil",
            NodeKind::SelfRef => "self",
            NodeKind::Array { .. } => "array",
            NodeKind::Hash { .. } => "hash",
            NodeKind::Assoc { .. } => "assoc",
            NodeKind::Parentheses { .. } => "parens",
            NodeKind::Read { scope, .. } => scope.tag(),
            NodeKind::ConstantPath { .. } => "colon2",
            NodeKind::Write { scope, .. } => match scope {
                VarScope::Local => "lvasgn",
                VarScope::Instance => "ivasgn",
                VarScope::Class => "cvasgn",
                VarScope::Global => "gvasgn",
                VarScope::Constant => "casgn",
            },
            NodeKind::Block { .. } => "block",
            NodeKind::Def { .. } => "def",
            NodeKind::Module { .. } => "module",
            NodeKind::Class { .. } => "class",
            NodeKind::SingletonClass { .. } => "sclass",
            NodeKind::If { .. } => "if",
        }
    }
}

/// An AST node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub span: Span,
    pub flags: NodeFlags,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: NodeId, span: Span, flags: NodeFlags, kind: NodeKind) -> Self {
        Node {
            id,
            span,
            flags,
            kind,
        }
    }

    /// Copy of this node with `kind` replaced. Identity, span and flags
    /// carry over.
    #[must_use]
    pub fn with_kind(&self, kind: NodeKind) -> Node {
        Node {
            id: self.id,
            span: self.span,
            flags: self.flags,
            kind,
        }
    }

    /// Copy of this node with `flags` replaced.
    #[must_use]
    pub fn with_flags(&self, flags: NodeFlags) -> Node {
        Node {
            flags,
            ..self.clone()
        }
    }

    #[inline]
    pub fn has_newline(&self) -> bool {
        self.flags.has_newline()
    }

    pub fn as_call(&self) -> Option<&CallNode> {
        match &self.kind {
            NodeKind::Call(call) => Some(call),
            _ => None,
        }
    }

    /// Whether this is a call named `name`.
    pub fn is_call_named(&self, name: &str) -> bool {
        self.as_call().is_some_and(|call| call.name == name)
    }

    pub fn integer_value(&self) -> Option<i64> {
        match self.kind {
            NodeKind::Integer { value } => Some(value),
            _ => None,
        }
    }

    /// Whether this is the integer literal `value`.
    pub fn is_integer(&self, value: i64) -> bool {
        self.integer_value() == Some(value)
    }

    /// The statement wrapped by a parenthesized group of exactly one
    /// statement.
    pub fn single_statement(&self) -> Option<&NodeRef> {
        let NodeKind::Parentheses { body: Some(body) } = &self.kind else {
            return None;
        };
        match &body.kind {
            NodeKind::Statements { body } if body.len() == 1 => body.first(),
            _ => None,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> SmallVec<[&NodeRef; 4]> {
        let mut out = SmallVec::new();
        match &self.kind {
            NodeKind::Program { statements } => out.push(statements),
            NodeKind::Statements { body } => out.extend(body),
            NodeKind::Call(call) => {
                out.extend(&call.receiver);
                out.extend(&call.arguments);
                out.extend(&call.block);
            }
            NodeKind::Arguments { arguments } => out.extend(arguments),
            NodeKind::Array { elements } | NodeKind::Hash { elements } => out.extend(elements),
            NodeKind::Assoc { key, value } => {
                out.push(key);
                out.push(value);
            }
            NodeKind::Parentheses { body } | NodeKind::Block { body, .. } => out.extend(body),
            NodeKind::ConstantPath { parent, .. } => out.extend(parent),
            NodeKind::Write { value, .. } => out.push(value),
            NodeKind::Def { receiver, body, .. } => {
                out.extend(receiver);
                out.extend(body);
            }
            NodeKind::Module {
                constant_path,
                body,
            } => {
                out.push(constant_path);
                out.extend(body);
            }
            NodeKind::Class {
                constant_path,
                superclass,
                body,
            } => {
                out.push(constant_path);
                out.extend(superclass);
                out.extend(body);
            }
            NodeKind::SingletonClass { expression, body } => {
                out.push(expression);
                out.extend(body);
            }
            NodeKind::If {
                predicate,
                statements,
                subsequent,
            } => {
                out.push(predicate);
                out.extend(statements);
                out.extend(subsequent);
            }
            NodeKind::Integer { .. }
            | NodeKind::Float { .. }
            | NodeKind::Str { .. }
            | NodeKind::Symbol { .. }
            | NodeKind::True
            | NodeKind::False
            | NodeKind::Nil
            | NodeKind::SelfRef
            | NodeKind::Read { .. } => {}
        }
        out
    }
}

/// Give `replacement` the line-break flag of the node it replaces.
///
/// Returns `replacement` itself when the flags already agree, so re-emitted
/// text only changes in content, never in line placement.
pub fn inherit_newline(original: &Node, replacement: NodeRef) -> NodeRef {
    let wanted = original.has_newline();
    if replacement.has_newline() == wanted {
        return replacement;
    }
    let mut flags = replacement.flags;
    flags.set(NodeFlags::NEWLINE, wanted);
    Arc::new(replacement.with_flags(flags))
}
