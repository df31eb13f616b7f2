//! S-expression dump of a tree.
//!
//! `Display` for [`Node`] prints every kind, value and flag but omits
//! identity and span, so two trees print the same exactly when they are
//! [`equivalent`](crate::equivalent). Absent optional children print as `_`.
//!
//! ```text
//! (call (lvar x) + (arguments (int 0 #static_literal #decimal)) _ #newline)
//! ```

use std::fmt;

use crate::{ensure_sufficient_stack, Node, NodeKind, NodeRef};

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    ensure_sufficient_stack(|| {
        write!(f, "({}", node.kind.tag())?;
        write_kind(f, &node.kind)?;
        for (name, _) in node.flags.iter_names() {
            write!(f, " #{}", name.to_ascii_lowercase())?;
        }
        f.write_str(")")
    })
}

fn write_kind(f: &mut fmt::Formatter<'_>, kind: &NodeKind) -> fmt::Result {
    match kind {
        NodeKind::Program { statements } => slot(f, Some(statements)),
        NodeKind::Statements { body: nodes }
        | NodeKind::Arguments { arguments: nodes }
        | NodeKind::Array { elements: nodes }
        | NodeKind::Hash { elements: nodes } => {
            for node in nodes {
                slot(f, Some(node))?;
            }
            Ok(())
        }
        NodeKind::Call(call) => {
            slot(f, call.receiver.as_ref())?;
            write!(f, " {}", call.name)?;
            slot(f, call.arguments.as_ref())?;
            slot(f, call.block.as_ref())
        }
        NodeKind::Integer { value } => write!(f, " {value}"),
        NodeKind::Float { value } => write!(f, " {value:?}"),
        NodeKind::Str { value } => write!(f, " {value:?}"),
        NodeKind::Symbol { value } => write!(f, " :{value}"),
        NodeKind::True | NodeKind::False | NodeKind::Nil | NodeKind::SelfRef => Ok(()),
        NodeKind::Assoc { key, value } => {
            slot(f, Some(key))?;
            slot(f, Some(value))
        }
        NodeKind::Parentheses { body } => slot(f, body.as_ref()),
        NodeKind::Read { name, .. } => write!(f, " {name}"),
        NodeKind::ConstantPath { parent, name } => {
            slot(f, parent.as_ref())?;
            write!(f, " {name}")
        }
        NodeKind::Write { name, value, .. } => {
            write!(f, " {name}")?;
            slot(f, Some(value))
        }
        NodeKind::Block { parameters, body } => {
            params(f, parameters)?;
            slot(f, body.as_ref())
        }
        NodeKind::Def {
            name,
            receiver,
            parameters,
            body,
        } => {
            slot(f, receiver.as_ref())?;
            write!(f, " {name}")?;
            params(f, parameters)?;
            slot(f, body.as_ref())
        }
        NodeKind::Module {
            constant_path,
            body,
        } => {
            slot(f, Some(constant_path))?;
            slot(f, body.as_ref())
        }
        NodeKind::Class {
            constant_path,
            superclass,
            body,
        } => {
            slot(f, Some(constant_path))?;
            slot(f, superclass.as_ref())?;
            slot(f, body.as_ref())
        }
        NodeKind::SingletonClass { expression, body } => {
            slot(f, Some(expression))?;
            slot(f, body.as_ref())
        }
        NodeKind::If {
            predicate,
            statements,
            subsequent,
        } => {
            slot(f, Some(predicate))?;
            slot(f, statements.as_ref())?;
            slot(f, subsequent.as_ref())
        }
    }
}

fn slot(f: &mut fmt::Formatter<'_>, node: Option<&NodeRef>) -> fmt::Result {
    match node {
        Some(node) => {
            f.write_str(" ")?;
            write_node(f, node)
        }
        None => f.write_str(" _"),
    }
}

fn params(f: &mut fmt::Formatter<'_>, names: &[crate::Name]) -> fmt::Result {
    f.write_str(" |")?;
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{name}")?;
    }
    f.write_str("|")
}
