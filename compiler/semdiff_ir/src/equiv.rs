//! Structural equivalence.

use crate::{ensure_sufficient_stack, Node, NodeKind, NodeRef};

/// Whether two trees are the same up to identity and location.
///
/// Kinds, names, literal values and flags must all match. This is the
/// comparison the downstream diff relies on: two files whose canonical
/// trees are equivalent re-emit to the same text.
pub fn equivalent(a: &Node, b: &Node) -> bool {
    ensure_sufficient_stack(|| a.flags == b.flags && same_kind(&a.kind, &b.kind))
}

fn same_kind(a: &NodeKind, b: &NodeKind) -> bool {
    use NodeKind as K;

    match (a, b) {
        (K::Program { statements: a }, K::Program { statements: b }) => equivalent(a, b),
        (K::Statements { body: a }, K::Statements { body: b })
        | (K::Arguments { arguments: a }, K::Arguments { arguments: b })
        | (K::Array { elements: a }, K::Array { elements: b })
        | (K::Hash { elements: a }, K::Hash { elements: b }) => all(a, b),
        (K::Call(a), K::Call(b)) => {
            a.name == b.name
                && opt(a.receiver.as_ref(), b.receiver.as_ref())
                && opt(a.arguments.as_ref(), b.arguments.as_ref())
                && opt(a.block.as_ref(), b.block.as_ref())
        }
        (K::Integer { value: a }, K::Integer { value: b }) => a == b,
        (K::Float { value: a }, K::Float { value: b }) => a.to_bits() == b.to_bits(),
        (K::Str { value: a }, K::Str { value: b }) => a == b,
        (K::Symbol { value: a }, K::Symbol { value: b }) => a == b,
        (K::True, K::True) | (K::False, K::False) | (K::Nil, K::Nil) | (K::SelfRef, K::SelfRef) => {
            true
        }
        (K::Assoc { key: ak, value: av }, K::Assoc { key: bk, value: bv }) => {
            equivalent(ak, bk) && equivalent(av, bv)
        }
        (K::Parentheses { body: a }, K::Parentheses { body: b }) => opt(a.as_ref(), b.as_ref()),
        (K::Read { scope: sa, name: na }, K::Read { scope: sb, name: nb }) => sa == sb && na == nb,
        (
            K::ConstantPath {
                parent: pa,
                name: na,
            },
            K::ConstantPath {
                parent: pb,
                name: nb,
            },
        ) => na == nb && opt(pa.as_ref(), pb.as_ref()),
        (
            K::Write {
                scope: sa,
                name: na,
                value: va,
            },
            K::Write {
                scope: sb,
                name: nb,
                value: vb,
            },
        ) => sa == sb && na == nb && equivalent(va, vb),
        (
            K::Block {
                parameters: pa,
                body: ba,
            },
            K::Block {
                parameters: pb,
                body: bb,
            },
        ) => pa == pb && opt(ba.as_ref(), bb.as_ref()),
        (
            K::Def {
                name: na,
                receiver: ra,
                parameters: pa,
                body: ba,
            },
            K::Def {
                name: nb,
                receiver: rb,
                parameters: pb,
                body: bb,
            },
        ) => na == nb && pa == pb && opt(ra.as_ref(), rb.as_ref()) && opt(ba.as_ref(), bb.as_ref()),
        (
            K::Module {
                constant_path: ca,
                body: ba,
            },
            K::Module {
                constant_path: cb,
                body: bb,
            },
        ) => equivalent(ca, cb) && opt(ba.as_ref(), bb.as_ref()),
        (
            K::Class {
                constant_path: ca,
                superclass: sa,
                body: ba,
            },
            K::Class {
                constant_path: cb,
                superclass: sb,
                body: bb,
            },
        ) => {
            equivalent(ca, cb) && opt(sa.as_ref(), sb.as_ref()) && opt(ba.as_ref(), bb.as_ref())
        }
        (
            K::SingletonClass {
                expression: ea,
                body: ba,
            },
            K::SingletonClass {
                expression: eb,
                body: bb,
            },
        ) => equivalent(ea, eb) && opt(ba.as_ref(), bb.as_ref()),
        (
            K::If {
                predicate: pa,
                statements: sa,
                subsequent: qa,
            },
            K::If {
                predicate: pb,
                statements: sb,
                subsequent: qb,
            },
        ) => {
            equivalent(pa, pb)
                && opt(sa.as_ref(), sb.as_ref())
                && opt(qa.as_ref(), qb.as_ref())
        }
        _ => false,
    }
}

fn all(a: &[NodeRef], b: &[NodeRef]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| equivalent(a, b))
}

fn opt(a: Option<&NodeRef>, b: Option<&NodeRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => equivalent(a, b),
        (None, None) => true,
        _ => false,
    }
}
