use pretty_assertions::assert_eq;
use semdiff_ir::NodeId;

use super::*;
use crate::test_support::Typed;

fn run(t: &Typed, root: &NodeRef) -> NodeRef {
    identities(root, &t.types)
}

#[test]
fn zero_addition() {
    let mut t = Typed::default();
    let x = t.numeric("x");
    let zero = t.int(0);
    let input = t.binary(Arc::clone(&x), "+", zero);
    assert!(Arc::ptr_eq(&run(&t, &input), &x));

    let zero = t.int(0);
    let y = t.numeric("y");
    let input = t.binary(zero, "+", Arc::clone(&y));
    assert!(Arc::ptr_eq(&run(&t, &input), &y));
}

#[test]
fn zero_subtraction() {
    let mut t = Typed::default();
    let x = t.numeric("x");
    let zero = t.int(0);
    let input = t.binary(Arc::clone(&x), "-", zero);
    assert!(Arc::ptr_eq(&run(&t, &input), &x));
}

#[test]
fn subtraction_from_zero_negates() {
    let mut t = Typed::default();
    let zero = t.int(0);
    let x = t.numeric("x");
    let input = t.binary(zero, "-", x);

    let output = run(&t, &input);
    assert_eq!(output.to_string(), "(call (lvar x) -@ _ _)");
    assert_eq!(output.id, input.id);
}

#[test]
fn multiplicative_identity() {
    let mut t = Typed::default();
    let x = t.numeric("x");
    let one = t.int(1);
    let input = t.binary(Arc::clone(&x), "*", one);
    assert!(Arc::ptr_eq(&run(&t, &input), &x));

    let one = t.int(1);
    let input = t.binary(one, "*", Arc::clone(&x));
    assert!(Arc::ptr_eq(&run(&t, &input), &x));
}

#[test]
fn zero_multiplication_needs_integer() {
    let mut t = Typed::default();
    let i = t.integer("i");
    let zero = t.int(0);
    let input = t.binary(zero.clone(), "*", i);
    assert!(Arc::ptr_eq(&run(&t, &input), &zero));

    let i = t.integer("i");
    let zero = t.int(0);
    let input = t.binary(i, "*", zero.clone());
    assert!(Arc::ptr_eq(&run(&t, &input), &zero));

    for x in [t.numeric("x"), t.float("f"), t.untyped("u")] {
        let zero = t.int(0);
        let input = t.binary(zero, "*", x);
        assert!(Arc::ptr_eq(&run(&t, &input), &input), "{input}");
    }
}

#[test]
fn division_identity() {
    let mut t = Typed::default();
    let x = t.numeric("x");
    let one = t.int(1);
    let input = t.binary(Arc::clone(&x), "/", one);
    assert!(Arc::ptr_eq(&run(&t, &input), &x));

    // 1 / x is not x
    let one = t.int(1);
    let input = t.binary(one, "/", x);
    assert!(Arc::ptr_eq(&run(&t, &input), &input));
}

#[test]
fn exponent_identity() {
    let mut t = Typed::default();
    let x = t.numeric("x");
    let one = t.int(1);
    let input = t.binary(Arc::clone(&x), "**", one);
    assert!(Arc::ptr_eq(&run(&t, &input), &x));
}

#[test]
fn zero_exponent_needs_integer() {
    let mut t = Typed::default();
    let i = t.integer("i");
    let zero = t.int(0);
    let input = t.binary(i, "**", zero);
    let output = run(&t, &input);
    assert_eq!(output.integer_value(), Some(1));
    assert_eq!(output.id, NodeId::SYNTHETIC);

    let x = t.numeric("x");
    let zero = t.int(0);
    let input = t.binary(x, "**", zero);
    assert!(Arc::ptr_eq(&run(&t, &input), &input));
}

#[test]
fn unary_plus() {
    let mut t = Typed::default();
    let x = t.numeric("x");
    let input = t.b.unary("+@", Arc::clone(&x));
    assert!(Arc::ptr_eq(&run(&t, &input), &x));

    let u = t.untyped("u");
    let input = t.b.unary("+@", u);
    assert!(Arc::ptr_eq(&run(&t, &input), &input));
}

#[test]
fn repeated_negation() {
    let mut t = Typed::default();
    let expected = ["(call (lvar x) -@ _ _)", "(lvar x)"];
    for depth in 1..=6 {
        let mut expr = t.numeric("x");
        for _ in 0..depth {
            expr = t.neg(expr);
        }
        assert_eq!(run(&t, &expr).to_string(), expected[(depth + 1) % 2], "depth {depth}");
    }
}

#[test]
fn repeated_negation_through_parentheses() {
    // -(-(-x)) → -x, -(-(-(-x))) → x
    let mut t = Typed::default();
    let mut expr = t.numeric("x");
    expr = t.neg(expr);
    for _ in 0..2 {
        expr = t.paren(expr);
        expr = t.neg(expr);
    }
    assert_eq!(run(&t, &expr).to_string(), "(call (lvar x) -@ _ _)");

    expr = t.paren(expr);
    expr = t.neg(expr);
    assert_eq!(run(&t, &expr).to_string(), "(lvar x)");
}

#[test]
fn single_negation_is_kept() {
    let mut t = Typed::default();
    let x = t.numeric("x");
    let input = t.neg(x);
    assert!(Arc::ptr_eq(&run(&t, &input), &input));
}

#[test]
fn negation_of_untyped_operand_is_kept() {
    let mut t = Typed::default();
    let u = t.untyped("u");
    let inner = t.neg(u);
    let input = t.neg(inner);
    assert!(Arc::ptr_eq(&run(&t, &input), &input));
}

#[test]
fn untyped_operands_are_never_rewritten() {
    let mut t = Typed::default();
    for (op, literal) in [("+", 0), ("-", 0), ("*", 1), ("*", 0), ("/", 1), ("**", 1), ("**", 0)] {
        let u = t.untyped("u");
        let lit = t.int(literal);
        let input = t.binary(u, op, lit);
        assert!(Arc::ptr_eq(&run(&t, &input), &input), "{input}");
    }
}

#[test]
fn rules_fire_bottom_up() {
    // (x * 1) + 0 → x: the inner rule returns `x` itself, whose evidence
    // then lets the outer rule fire.
    let mut t = Typed::default();
    let x = t.numeric("x");
    let one = t.int(1);
    let product = t.binary(Arc::clone(&x), "*", one);
    let zero = t.int(0);
    let input = t.binary(product, "+", zero);
    assert!(Arc::ptr_eq(&run(&t, &input), &x));
}

#[test]
fn parenthesized_operand_has_no_evidence() {
    // (x) + 0 stays: the group itself is not typed.
    let mut t = Typed::default();
    let x = t.numeric("x");
    let group = t.paren(x);
    let zero = t.int(0);
    let input = t.binary(group, "+", zero);
    assert!(Arc::ptr_eq(&run(&t, &input), &input));
}

#[test]
fn statement_keeps_its_line_break() {
    let mut t = Typed::default();
    let x = t.numeric("x");
    let zero = t.int(0);
    let sum = t.binary(x, "+", zero);
    let root = t.b.program(vec![sum]);
    assert_eq!(
        run(&t, &root).to_string(),
        "(program (statements (lvar x #newline)))"
    );
}
