//! C++ renderings of a node set.
//!
//! Every synthesizer returns plain text ending in a newline, ready to be
//! spliced between the generated-text markers of a header.

mod builder;
mod class;
mod predicate;
mod visitor;
pub(crate) mod writer;

pub use builder::synthesize_builder;
pub use class::{synthesize_class, synthesize_classes};
pub use predicate::{synthesize_is_predicate, synthesize_is_predicates};
pub use visitor::synthesize_visitor;

use crate::error::RenderError;
use crate::node::{Node, NodeSet};
use writer::CodeWriter;

/// Names used by the generated dispatchers for their own locals.
const RESERVED_NAMES: &[&str] = &["x", "a", "result"];

/// Which of the two traversal forms is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// `template <typename Arg>`: an `Arg& a` is threaded through every call.
    Threaded,
    /// The `<void>` specialization without an extra argument.
    Absent,
}

impl Context {
    fn hook_parameter(self) -> &'static str {
        match self {
            Context::Threaded => ", Arg& /* a */",
            Context::Absent => "",
        }
    }

    fn argument(self) -> &'static str {
        match self {
            Context::Threaded => ", a",
            Context::Absent => "",
        }
    }
}

/// Rejects field names that would shadow the dispatcher's own locals.
fn check_reserved_names(set: &NodeSet) -> Result<(), RenderError> {
    for node in set {
        for field in &node.fields {
            if RESERVED_NAMES.contains(&field.name()) {
                return Err(RenderError::ReservedName {
                    node: node.name().to_owned(),
                    name: field.name().to_owned(),
                });
            }
        }
    }
    Ok(())
}

/// `const Expr& x, <declarations>[, Arg& /* a */]`
fn hook_parameters(node: &Node, expression: &str, context: Context) -> String {
    let mut params = format!("const {expression}& x");
    if !node.is_nullary() {
        params.push_str(", ");
        params.push_str(&node.spec.signature.declarations());
    }
    params.push_str(context.hook_parameter());
    params
}

/// `x, <field names>[, a]`
fn hook_arguments(node: &Node, context: Context) -> String {
    let mut args = String::from("x");
    for field in &node.fields {
        args.push_str(", ");
        args.push_str(field.name());
    }
    args.push_str(context.argument());
    args
}

/// Writes one local per field, projected through the node's accessor.
fn write_extractions(w: &mut CodeWriter, node: &Node) {
    for field in &node.fields {
        w.line(format!(
            "{} {} = {}(x).{}();",
            field.ty(),
            field.name(),
            node.name(),
            field.accessor
        ));
    }
}

/// Writes the head of the `index`th branch of the tag dispatch chain.
fn write_branch_condition(w: &mut CodeWriter, index: usize, node: &Node) {
    let keyword = if index == 0 { "if" } else { "else if" };
    w.line(format!("{keyword} (is_{}(x))", node.name()));
}
