use convert_case::{Case, Casing};

use super::{
    Context, check_reserved_names, hook_arguments, hook_parameters, write_branch_condition,
    write_extractions,
};
use crate::config::Primitives;
use crate::cpp::writer::CodeWriter;
use crate::error::RenderError;
use crate::node::{Node, NodeSet};

/// Emits the rebuilding visitor for `set`: the `Arg` template followed by
/// its `<void>` specialization.
///
/// A `visit_<node>` hook returning the default-constructed expression asks
/// the dispatcher to rebuild the node from its recursively visited fields;
/// any other value replaces the node as is.
pub fn synthesize_builder(set: &NodeSet, primitives: &Primitives) -> Result<String, RenderError> {
    check_reserved_names(set)?;
    let debug_macro = format!(
        "{}{}_BUILDER_DEBUG",
        primitives.debug_macro_prefix,
        crate::base_name(set.expression()).to_case(Case::UpperSnake)
    );
    let mut w = CodeWriter::new(2);
    write_builder(&mut w, set, &debug_macro, Context::Threaded);
    w.blank();
    write_builder(&mut w, set, &debug_macro, Context::Absent);
    Ok(w.finish())
}

fn write_builder(w: &mut CodeWriter, set: &NodeSet, debug_macro: &str, context: Context) {
    let expression = set.expression();
    let builder = format!("{}_builder", crate::base_name(expression));

    w.line("/// \\brief Modifying visitor class for expressions.");
    w.line("///");
    match context {
        Context::Threaded => {
            w.line("/// During traversal");
            w.line("/// of the nodes, the expression is rebuilt from scratch.");
            w.line(format!(
                "/// If a visit_<node> function returns {expression}(), the recursion is continued"
            ));
            w.line("/// in the children of this node, otherwise not.");
            w.line("/// An arbitrary additional argument may be passed during the recursion.");
            w.line("template <typename Arg = void>");
            w.line(format!("struct {builder}"));
        }
        Context::Absent => {
            w.line(format!(
                "/// If a visit_<node> function returns {expression}(), the recursion is continued"
            ));
            w.line("/// in the children of this node, otherwise not.");
            w.line("template <>");
            w.line(format!("struct {builder}<void>"));
        }
    }

    w.block_with("};", |w| {
        w.line("/// \\brief The type of the additional argument for the recursion");
        match context {
            Context::Threaded => w.line("typedef Arg argument_type;"),
            Context::Absent => w.line("typedef void argument_type;"),
        }
        w.blank();
        w.line(format!(
            "/// \\brief Returns true if the expression is not equal to {expression}()."
        ));
        w.line("/// This is used to determine if the recursion in a node needs to be continued.");
        w.line("/// \\param x A expression");
        w.line(format!(
            "/// \\return True if the term is not equal to {expression}()"
        ));
        w.line(format!("bool is_finished(const {expression}& x)"));
        w.block(|w| w.line(format!("return x != {expression}();")));
        w.blank();
        w.line("/// \\brief Destructor.");
        w.line(format!("virtual ~{builder}()"));
        w.line("{ }");

        for node in set {
            write_hook(w, node, expression, context);
        }

        w.blank();
        w.line("/// \\brief Visits the nodes of the expression, and calls the corresponding visit_<node>");
        w.line(format!(
            "/// member functions. If the return value of a visit function equals {expression}(),"
        ));
        w.line("/// the recursion in this node is continued automatically, otherwise the returned");
        w.line("/// value is used for rebuilding the expression.");
        w.line("/// \\param x A expression");
        match context {
            Context::Threaded => {
                w.line("/// \\param a An additional argument for the recursion");
                w.line("/// \\return The visit result");
                w.line(format!("{expression} visit(const {expression}& x, Arg& a)"));
            }
            Context::Absent => {
                w.line("/// \\return The visit result");
                w.line(format!("{expression} visit(const {expression}& x)"));
            }
        }
        w.block(|w| {
            w.raw_line(format!("#ifdef {debug_macro}"));
            w.line("std::cerr << \"<visit>\" << pp(x) << std::endl;");
            w.raw_line("#endif");
            w.line(format!("{expression} result;"));
            for (index, node) in set.iter().enumerate() {
                write_branch(w, index, node, context);
            }
            w.raw_line(format!("#ifdef {debug_macro}"));
            w.line("std::cerr << \"<visit result>\" << pp(result) << std::endl;");
            w.raw_line("#endif");
            w.line("return result;");
        });
    });
}

fn write_hook(w: &mut CodeWriter, node: &Node, expression: &str, context: Context) {
    let name = node.name();
    w.blank();
    w.line(format!("/// \\brief Visit {name} node"));
    w.line("/// \\return The result of visiting the node");
    w.line(format!(
        "virtual {expression} visit_{name}({})",
        hook_parameters(node, expression, context)
    ));
    w.block(|w| w.line(format!("return {expression}();")));
}

fn write_branch(w: &mut CodeWriter, index: usize, node: &Node, context: Context) {
    write_branch_condition(w, index, node);
    w.block(|w| {
        write_extractions(w, node);
        w.line(format!(
            "result = visit_{}({});",
            node.name(),
            hook_arguments(node, context)
        ));
        w.line("if (!is_finished(result))");
        w.block(|w| {
            let fields = node
                .fields
                .iter()
                .map(|field| {
                    if field.is_recursive() {
                        format!("visit({}{})", field.name(), context.argument())
                    } else {
                        field.name().to_owned()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            w.line(format!("result = {}({fields});", node.name()));
        });
    });
}
