use pretty_assertions::assert_eq;
use semdiff_ir::AstBuilder;
use semdiff_types::{MethodDecl, MethodScope, ModuleDecl, TypeRef};

use super::*;

/// `def f(params); body; end` and a model declaring each parameter's type.
fn method(
    params: &[(&str, &str)],
    body: impl FnOnce(&mut AstBuilder) -> Vec<NodeRef>,
) -> (NodeRef, TypeModel) {
    let mut b = AstBuilder::new();
    let names: Vec<&str> = params.iter().map(|&(name, _)| name).collect();
    let body = body(&mut b);
    let def = b.def("f", &names, body);
    let root = b.program(vec![def]);

    let decl = params
        .iter()
        .fold(MethodDecl::new(MethodScope::Instance, "f"), |decl, &(name, ty)| {
            decl.with_param(name, vec![TypeRef::basic(ty)])
        });
    (root, TypeModel::new(vec![decl.into()]))
}

/// Dump of the canonical form of `f` with all passes.
fn canon(params: &[(&str, &str)], body: impl FnOnce(&mut AstBuilder) -> Vec<NodeRef>) -> String {
    let (root, model) = method(params, body);
    match canonicalize(&root, Some(&model), &CanonOptions::default()) {
        Ok(canonical) => canonical.root.to_string(),
        Err(err) => panic!("canonicalize failed: {err}"),
    }
}

/// Dump of `f` as written.
fn written(params: &[(&str, &str)], body: impl FnOnce(&mut AstBuilder) -> Vec<NodeRef>) -> String {
    method(params, body).0.to_string()
}

fn untyped(root: &NodeRef, passes: PassSet) -> NodeRef {
    match canonicalize(root, None, &CanonOptions::with_passes(passes)) {
        Ok(canonical) => canonical.root,
        Err(err) => panic!("canonicalize failed: {err}"),
    }
}

#[test]
fn literal_arithmetic_folds_without_a_model() {
    let mut b = AstBuilder::new();
    let four = b.int(4);
    let two = b.int(2);
    let sum = b.binary(four, "+", two);
    let root = b.program(vec![sum]);
    assert_eq!(
        untyped(&root, PassSet::all()).to_string(),
        "(program (statements (int 6 #newline #static_literal #decimal)))"
    );
}

#[test]
fn numeric_identities() {
    let x = [("x", "Numeric")];
    assert_eq!(
        canon(&x, |b| {
            let x = b.lvar("x");
            let zero = b.int(0);
            let plus = b.binary(x, "+", zero);
            let zero = b.int(0);
            let x = b.lvar("x");
            let minus = b.binary(zero, "-", x);
            let mut three = b.lvar("x");
            for _ in 0..3 {
                three = b.unary("-@", three);
            }
            let mut four = b.lvar("x");
            for _ in 0..4 {
                four = b.unary("-@", four);
            }
            vec![plus, minus, three, four]
        }),
        written(&x, |b| {
            let plain = b.lvar("x");
            let x = b.lvar("x");
            let negated = b.unary("-@", x);
            let x = b.lvar("x");
            let negated_again = b.unary("-@", x);
            let last = b.lvar("x");
            vec![plain, negated, negated_again, last]
        })
    );
}

#[test]
fn zero_rules_need_integer_evidence() {
    let body = |b: &mut AstBuilder| {
        let zero = b.int(0);
        let x = b.lvar("x");
        let product = b.binary(zero, "*", x);
        let x = b.lvar("x");
        let zero = b.int(0);
        let power = b.binary(x, "**", zero);
        vec![product, power]
    };

    assert_eq!(
        canon(&[("x", "Integer")], body),
        written(&[("x", "Integer")], |b| vec![b.int(0), b.int(1)])
    );
    assert_eq!(
        canon(&[("x", "Numeric")], body),
        written(&[("x", "Numeric")], body)
    );
    assert_eq!(
        canon(&[("x", "Float")], body),
        written(&[("x", "Float")], body)
    );
}

#[test]
fn commuting_operands_agree_regardless_of_grouping() {
    let params = [("a", "Numeric"), ("b", "Numeric"), ("c", "Numeric")];
    let ascending = canon(&params, |b| {
        let (a, bb, c) = (b.lvar("a"), b.lvar("b"), b.lvar("c"));
        let ab = b.binary(a, "+", bb);
        vec![b.binary(ab, "+", c)]
    });
    let descending = canon(&params, |b| {
        let (c, bb, a) = (b.lvar("c"), b.lvar("b"), b.lvar("a"));
        let cb = b.binary(c, "+", bb);
        vec![b.binary(cb, "+", a)]
    });
    let grouped = canon(&params, |b| {
        let (c, bb, a) = (b.lvar("c"), b.lvar("b"), b.lvar("a"));
        let ba = b.binary(bb, "+", a);
        let group = b.paren(ba);
        vec![b.binary(c, "+", group)]
    });
    assert_eq!(descending, ascending);
    assert_eq!(grouped, ascending);
}

#[test]
fn constants_run_again_after_algebra() {
    // 1 + x + 2 → 3 + x
    let x = [("x", "Integer")];
    assert_eq!(
        canon(&x, |b| {
            let one = b.int(1);
            let x = b.lvar("x");
            let two = b.int(2);
            let first = b.binary(one, "+", x);
            vec![b.binary(first, "+", two)]
        }),
        written(&x, |b| {
            let three = b.int(3);
            let x = b.lvar("x");
            vec![b.binary(three, "+", x)]
        })
    );
}

#[test]
fn array_idioms_meet_literal_append() {
    let mut b = AstBuilder::new();
    let array = b.constant("Array");
    let zero = b.int(0);
    let new = b.call(Some(array), "new", vec![zero]);
    let d = b.lvar("d");
    let push = b.call(Some(new), "push", vec![d]);
    let idiom = b.program(vec![push]);

    let mut b = AstBuilder::new();
    let empty = b.array(Vec::new());
    let d = b.lvar("d");
    let shovel = b.binary(empty, "<<", d);
    let literal = b.program(vec![shovel]);

    assert_eq!(
        untyped(&idiom, PassSet::all()).to_string(),
        untyped(&literal, PassSet::all()).to_string()
    );
}

#[test]
fn typed_passes_are_skipped_without_a_model() {
    let mut b = AstBuilder::new();
    let x = b.lvar("x");
    let zero = b.int(0);
    let sum = b.binary(x, "+", zero);
    let bb = b.lvar("b");
    let a = b.lvar("a");
    let commuted = b.binary(bb, "*", a);
    let root = b.program(vec![sum, commuted]);

    assert!(Arc::ptr_eq(&untyped(&root, PassSet::all()), &root));
}

#[test]
fn only_selected_passes_run() {
    let mut b = AstBuilder::new();
    let xs = b.lvar("xs");
    let collect = b.call(Some(xs), "collect", Vec::new());
    let four = b.int(4);
    let two = b.int(2);
    let sum = b.binary(four, "+", two);
    let root = b.program(vec![collect, sum]);

    assert_eq!(
        untyped(&root, PassSet::ALIASING).to_string(),
        "(program (statements \
         (call (lvar xs) map _ _ #newline) \
         (call (int 4 #static_literal #decimal) + (arguments (int 2 #static_literal #decimal)) _ #newline)))"
    );
    assert!(Arc::ptr_eq(&untyped(&root, PassSet::empty()), &root));
}

#[test]
fn evidence_is_returned() {
    let (root, model) = method(&[("x", "Integer")], |b| vec![b.lvar("x")]);
    let canonical = canonicalize(&root, Some(&model), &CanonOptions::default());
    assert!(matches!(canonical, Ok(ref c) if c.node_types.len() == 1));
}

#[test]
fn unresolvable_module_path_fails() {
    let mut b = AstBuilder::new();
    let receiver = b.vcall("factory");
    let path = b.constant_path(Some(receiver), "Widget");
    let module = b.module_at(path, Vec::new());
    let root = b.program(vec![module]);
    let model = TypeModel::new(vec![ModuleDecl::module("Widget").into()]);

    let result = canonicalize(&root, Some(&model), &CanonOptions::default());
    assert!(matches!(
        result,
        Err(CanonError::TypeVisit(TypeVisitError::UnsupportedPath { kind: "call", .. }))
    ));
}
