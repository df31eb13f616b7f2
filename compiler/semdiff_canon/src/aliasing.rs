//! Method synonyms.
//!
//! Objects that respond to one name of a synonym pair are assumed to
//! respond to the other as well, so no type evidence is needed. Only the
//! method name changes; receiver, arguments and block are kept.

use semdiff_ir::{fold_call_parts, inherit_newline, CallNode, Folder, NodeRef};

use crate::rewrite::with_call;

/// Non-canonical name → canonical name.
pub const ALIASES: &[(&str, &str)] = &[
    ("collect", "map"),
    ("detect", "find"),
    ("find_all", "select"),
    ("inject", "reduce"),
    ("member?", "include?"),
    ("length", "size"),
];

/// The canonical name for `name`, if `name` is a known synonym.
pub fn canonical_alias(name: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find_map(|&(alias, canonical)| (alias == name).then_some(canonical))
}

/// Rename every aliased call to its canonical name.
#[tracing::instrument(level = "debug", skip_all)]
pub fn alias(root: &NodeRef) -> NodeRef {
    Aliasing.fold(root)
}

struct Aliasing;

impl Folder for Aliasing {
    fn fold_call(&mut self, node: &NodeRef, call: &CallNode) -> NodeRef {
        let folded = fold_call_parts(self, call);
        let Some(canonical) = canonical_alias(call.name.as_str()) else {
            return folded.rebuild(node, call);
        };
        tracing::trace!(id = %node.id, from = %call.name, to = canonical, "alias");
        let renamed = with_call(
            node,
            CallNode {
                receiver: folded.receiver,
                name: canonical.into(),
                arguments: folded.arguments,
                block: folded.block,
            },
        );
        inherit_newline(node, renamed)
    }
}
