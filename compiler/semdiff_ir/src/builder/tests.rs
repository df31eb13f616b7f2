use pretty_assertions::assert_eq;

use super::*;
use crate::{collect_ids, validate_unique_ids, DuplicateNodeId};

#[test]
fn identities_are_unique() {
    let mut b = AstBuilder::new();
    let x = b.lvar("x");
    let zero = b.int(0);
    let sum = b.binary(x, "+", zero);
    let root = b.program(vec![sum]);

    let ids = collect_ids(&root);
    // program, statements, call, lvar, arguments, int
    assert_eq!(ids.len(), 6);
    assert_eq!(validate_unique_ids(&root), Ok(()));
}

#[test]
fn duplicate_identity_is_reported() {
    let mut first = AstBuilder::new();
    let mut second = AstBuilder::new();
    let x = first.lvar("x");
    let y = second.lvar("y");
    let mut b = AstBuilder::starting_at(50);
    let root = b.array(vec![x, y]);
    assert_eq!(
        validate_unique_ids(&root),
        Err(DuplicateNodeId {
            id: NodeId::new(0),
            kind: "lvar",
        })
    );
}

#[test]
fn shared_subtree_is_not_a_duplicate() {
    let mut b = AstBuilder::new();
    let x = b.lvar("x");
    let root = b.array(vec![Arc::clone(&x), x]);
    assert_eq!(validate_unique_ids(&root), Ok(()));
}

#[test]
fn literal_flags() {
    let mut b = AstBuilder::new();
    assert_eq!(b.int(4).flags, NodeFlags::INTEGER_LITERAL);
    assert_eq!(b.float(1.5).flags, NodeFlags::STATIC_LITERAL);
    let empty = b.array(Vec::new());
    assert_eq!(empty.flags, NodeFlags::STATIC_LITERAL);
    let x = b.lvar("x");
    let dynamic = b.array(vec![x]);
    assert_eq!(dynamic.flags, NodeFlags::empty());
    assert_eq!(b.vcall("foo").flags, NodeFlags::VARIABLE_CALL);
}

#[test]
fn paths() {
    let mut b = AstBuilder::new();
    assert_eq!(b.path("A").to_string(), "(const A)");
    assert_eq!(b.path("A::B").to_string(), "(colon2 (const A) B)");
    assert_eq!(b.path("::A::B").to_string(), "(colon2 (colon2 _ A) B)");
}

#[test]
fn statements_get_newlines() {
    let mut b = AstBuilder::new();
    let x = b.lvar("x");
    let y = b.lvar("y");
    let stmts = b.statements(vec![x, y]);
    assert_eq!(
        stmts.to_string(),
        "(statements (lvar x #newline) (lvar y #newline))"
    );
    let z = b.lvar("z");
    let parens = b.paren(z);
    assert_eq!(parens.to_string(), "(parens (statements (lvar z)))");
}

#[test]
fn last_identity_below_the_sentinel_is_handed_out() {
    let mut b = AstBuilder::starting_at(u32::MAX - 1);
    let x = b.lvar("x");
    assert_eq!(x.id, NodeId::new(u32::MAX - 1));
    assert!(!x.id.is_synthetic());
}

#[test]
#[should_panic(expected = "node identities exhausted")]
fn synthetic_identity_is_never_handed_out() {
    let mut b = AstBuilder::starting_at(u32::MAX - 1);
    let _ = b.lvar("x");
    let _ = b.lvar("y");
}
