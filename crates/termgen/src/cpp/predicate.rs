use crate::cpp::writer::CodeWriter;
use crate::node::{Node, NodeSet};

/// Emits `is_<node>`, delegating to the raw tag test `<tag_test_prefix><Tag>`.
pub fn synthesize_is_predicate(node: &Node, expression: &str, tag_test_prefix: &str) -> String {
    let name = node.name();
    let mut w = CodeWriter::new(2);
    w.line(format!("/// \\brief Test for a {name} expression"));
    w.line("/// \\param t A term");
    w.line(format!("/// \\return True if it is a {name} expression"));
    w.line("inline");
    w.line(format!("bool is_{name}(const {expression}& t)"));
    w.block(|w| w.line(format!("return {tag_test_prefix}{}(t);", node.tag())));
    w.finish()
}

/// Emits the predicates of every node in row order.
pub fn synthesize_is_predicates(set: &NodeSet, tag_test_prefix: &str) -> String {
    set.iter()
        .map(|node| synthesize_is_predicate(node, set.expression(), tag_test_prefix))
        .collect::<Vec<_>>()
        .join("\n")
}
