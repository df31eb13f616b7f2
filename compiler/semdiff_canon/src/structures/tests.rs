use std::sync::Arc;

use pretty_assertions::assert_eq;
use semdiff_ir::AstBuilder;

use super::*;

/// Dump of `structures` applied to the tree built by `input`.
fn canon(input: impl FnOnce(&mut AstBuilder) -> NodeRef) -> String {
    let root = input(&mut AstBuilder::new());
    structures(&root).to_string()
}

fn dump(expected: impl FnOnce(&mut AstBuilder) -> NodeRef) -> String {
    expected(&mut AstBuilder::new()).to_string()
}

/// Assert `input` comes back as the very same tree.
fn assert_untouched(input: impl FnOnce(&mut AstBuilder) -> NodeRef) {
    let root = input(&mut AstBuilder::new());
    let output = structures(&root);
    assert!(Arc::ptr_eq(&root, &output), "rewrote {root}");
}

#[test]
fn array_new() {
    let expected = dump(|b| b.array(Vec::new()));
    assert_eq!(
        canon(|b| {
            let array = b.constant("Array");
            b.call(Some(array), "new", Vec::new())
        }),
        expected
    );
    assert_eq!(
        canon(|b| {
            let array = b.constant("Array");
            let zero = b.int(0);
            b.call(Some(array), "new", vec![zero])
        }),
        expected
    );
}

#[test]
fn array_new_keeps_the_call_identity() {
    let mut b = AstBuilder::new();
    let array = b.constant("Array");
    let input = b.call(Some(array), "new", Vec::new());
    assert_eq!(structures(&input).id, input.id);
}

#[test]
fn array_new_with_size_block_or_variable_is_untouched() {
    assert_untouched(|b| {
        let array = b.constant("Array");
        let five = b.int(5);
        b.call(Some(array), "new", vec![five])
    });
    assert_untouched(|b| {
        let array = b.constant("Array");
        let five = b.int(5);
        let zero = b.int(0);
        b.call(Some(array), "new", vec![five, zero])
    });
    assert_untouched(|b| {
        let array = b.constant("Array");
        let i = b.lvar("i");
        let block = b.block(&["i"], vec![i]);
        b.call_with_block(Some(array), "new", Vec::new(), Some(block))
    });
    assert_untouched(|b| {
        let array = b.constant("Array");
        let n = b.lvar("n");
        b.call(Some(array), "new", vec![n])
    });
}

#[test]
fn hash_new_and_bracket() {
    let expected = dump(|b| b.hash(Vec::new()));
    assert_eq!(
        canon(|b| {
            let hash = b.constant("Hash");
            b.call(Some(hash), "new", Vec::new())
        }),
        expected
    );
    assert_eq!(
        canon(|b| {
            let hash = b.constant("Hash");
            b.call(Some(hash), "[]", Vec::new())
        }),
        expected
    );
}

#[test]
fn hash_with_default_or_pairs_is_untouched() {
    assert_untouched(|b| {
        let hash = b.constant("Hash");
        let zero = b.int(0);
        b.call(Some(hash), "new", vec![zero])
    });
    assert_untouched(|b| {
        let hash = b.constant("Hash");
        let a = b.lvar("a");
        let c = b.lvar("c");
        b.call(Some(hash), "[]", vec![a, c])
    });
    assert_untouched(|b| {
        // Hash.new { |h, k| h[k] = [] }
        let hash = b.constant("Hash");
        let h = b.lvar("h");
        let k = b.lvar("k");
        let empty = b.array(Vec::new());
        let store = b.index_assign(h, k, empty);
        let block = b.block(&["h", "k"], vec![store]);
        b.call_with_block(Some(hash), "new", Vec::new(), Some(block))
    });
}

#[test]
fn constructor_on_other_receivers_is_untouched() {
    assert_untouched(|b| {
        let set = b.constant("Set");
        b.call(Some(set), "new", Vec::new())
    });
    assert_untouched(|b| {
        let array = b.path("Foo::Array");
        b.call(Some(array), "new", Vec::new())
    });
    assert_untouched(|b| {
        let list = b.lvar("list");
        b.call(Some(list), "[]", Vec::new())
    });
}

#[test]
fn push_becomes_shovel() {
    assert_eq!(
        canon(|b| {
            let array = b.lvar("array");
            let e = b.lvar("e");
            b.call(Some(array), "push", vec![e])
        }),
        dump(|b| {
            let array = b.lvar("array");
            let e = b.lvar("e");
            b.binary(array, "<<", e)
        })
    );
}

#[test]
fn chained_push() {
    // array.push(a).push(b) → array << a << b
    assert_eq!(
        canon(|b| {
            let array = b.lvar("array");
            let a = b.lvar("a");
            let first = b.call(Some(array), "push", vec![a]);
            let c = b.lvar("b");
            b.call(Some(first), "push", vec![c])
        }),
        dump(|b| {
            let array = b.lvar("array");
            let a = b.lvar("a");
            let first = b.binary(array, "<<", a);
            let c = b.lvar("b");
            b.binary(first, "<<", c)
        })
    );
}

#[test]
fn push_with_other_arities_is_untouched() {
    assert_untouched(|b| {
        let array = b.lvar("array");
        b.call(Some(array), "push", Vec::new())
    });
    assert_untouched(|b| {
        let array = b.lvar("array");
        let a = b.lvar("a");
        let c = b.lvar("b");
        b.call(Some(array), "push", vec![a, c])
    });
}

#[test]
fn safe_navigation_push_is_untouched() {
    assert_untouched(|b| {
        let array = b.lvar("array");
        let e = b.lvar("e");
        let push = b.call(Some(array), "push", vec![e]);
        Arc::new(push.with_flags(NodeFlags::SAFE_NAVIGATION))
    });
}

#[test]
fn concat_on_string_literal() {
    assert_eq!(
        canon(|b| {
            let hello = b.string("hello");
            let world = b.lvar("world");
            b.call(Some(hello), "concat", vec![world])
        }),
        dump(|b| {
            let hello = b.string("hello");
            let world = b.lvar("world");
            b.binary(hello, "<<", world)
        })
    );
}

#[test]
fn concat_elsewhere_is_untouched() {
    assert_untouched(|b| {
        let array = b.lvar("array");
        let other = b.lvar("other");
        b.call(Some(array), "concat", vec![other])
    });
    assert_untouched(|b| {
        let a = b.string("a");
        let x = b.string("b");
        let y = b.string("c");
        b.call(Some(a), "concat", vec![x, y])
    });
}

#[test]
fn store_becomes_index_assignment() {
    assert_eq!(
        canon(|b| {
            let hash = b.lvar("hash");
            let key = b.symbol("key");
            let value = b.string("value");
            b.call(Some(hash), "store", vec![key, value])
        }),
        dump(|b| {
            let hash = b.lvar("hash");
            let key = b.symbol("key");
            let value = b.string("value");
            b.index_assign(hash, key, value)
        })
    );
    assert_untouched(|b| {
        let hash = b.lvar("hash");
        let key = b.lvar("key");
        b.call(Some(hash), "store", vec![key])
    });
}

#[test]
fn statement_keeps_its_line_break() {
    assert_eq!(
        canon(|b| {
            let array = b.constant("Array");
            let new = b.call(Some(array), "new", Vec::new());
            b.program(vec![new])
        }),
        "(program (statements (array #newline #static_literal)))"
    );
}
