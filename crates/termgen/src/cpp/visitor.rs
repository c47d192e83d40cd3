use super::{
    Context, check_reserved_names, hook_arguments, hook_parameters, write_branch_condition,
    write_extractions,
};
use crate::cpp::writer::CodeWriter;
use crate::error::RenderError;
use crate::node::{Node, NodeSet};

/// Emits the read-only visitor for `set`: the `Arg` template followed by
/// its `<void>` specialization.
///
/// Each node gets a `visit_<node>` hook returning whether to recurse and a
/// `leave_<node>` hook that runs whether or not recursion happened.
pub fn synthesize_visitor(set: &NodeSet) -> Result<String, RenderError> {
    check_reserved_names(set)?;
    let mut w = CodeWriter::new(2);
    write_visitor(&mut w, set, Context::Threaded);
    w.blank();
    write_visitor(&mut w, set, Context::Absent);
    Ok(w.finish())
}

fn write_visitor(w: &mut CodeWriter, set: &NodeSet, context: Context) {
    let expression = set.expression();
    let visitor = format!("{}_visitor", crate::base_name(expression));

    w.line("/// \\brief Visitor class for expressions.");
    w.line("///");
    match context {
        Context::Threaded => {
            w.line("/// There is a visit_<node> and a leave_<node>");
            w.line("/// function for each type of node. By default these functions do nothing, so they");
            w.line("/// must be overridden to add behavior. If the visit_<node> function returns true,");
            w.line("/// the recursion is continued in the children of the node.");
            w.line("template <typename Arg=void>");
            w.line(format!("struct {visitor}"));
        }
        Context::Absent => {
            w.line("/// If a visit_<node> function returns true, the recursion is continued");
            w.line("/// in the children of this node, otherwise not.");
            w.line("template <>");
            w.line(format!("struct {visitor}<void>"));
        }
    }

    w.block_with("};", |w| {
        w.line("/// \\brief The type of the additional argument for the recursion");
        match context {
            Context::Threaded => w.line("typedef Arg argument_type;"),
            Context::Absent => w.line("typedef void argument_type;"),
        }
        w.blank();
        w.line("/// \\brief These names can be used as return types of the visit functions, to make");
        w.line("/// the code more readable.");
        w.line("enum return_type");
        w.block_with("};", |w| {
            w.line("stop_recursion = false,");
            w.line("continue_recursion = true");
        });
        w.blank();
        w.line("/// \\brief Destructor.");
        w.line(format!("virtual ~{visitor}()"));
        w.line("{ }");

        for node in set {
            write_hooks(w, node, expression, context);
        }

        w.blank();
        w.line("/// \\brief Visits the nodes of the expression, and calls the corresponding visit_<node>");
        w.line("/// member functions. If the return value of a member function equals false, then the");
        w.line("/// recursion in this node is stopped.");
        w.line("/// \\param x A term");
        match context {
            Context::Threaded => {
                w.line("/// \\param a An additional argument for the recursion");
                w.line(format!("void visit(const {expression}& x, Arg& a)"));
            }
            Context::Absent => w.line(format!("void visit(const {expression}& x)")),
        }
        w.block(|w| {
            for (index, node) in set.iter().enumerate() {
                write_branch(w, index, node, context);
            }
        });
    });
}

fn write_hooks(w: &mut CodeWriter, node: &Node, expression: &str, context: Context) {
    let name = node.name();
    w.blank();
    w.line(format!("/// \\brief Visit {name} node"));
    w.line("/// \\return The result of visiting the node");
    w.line(format!(
        "virtual bool visit_{name}({})",
        hook_parameters(node, expression, context)
    ));
    w.block(|w| w.line("return continue_recursion;"));
    w.blank();
    w.line(format!("/// \\brief Leave {name} node"));
    w.line(format!("virtual void leave_{name}()"));
    w.line("{}");
}

fn write_branch(w: &mut CodeWriter, index: usize, node: &Node, context: Context) {
    write_branch_condition(w, index, node);
    w.block(|w| {
        write_extractions(w, node);
        let call = format!("visit_{}({})", node.name(), hook_arguments(node, context));
        if node.has_recursive_fields() {
            w.line(format!("bool result = {call};"));
            w.line("if (result) {");
            w.indented(|w| {
                for field in node.recursive_fields() {
                    w.line(format!("visit({}{});", field.name(), context.argument()));
                }
            });
            w.line("}");
        } else {
            w.line(format!("{call};"));
        }
        w.line(format!("leave_{}();", node.name()));
    });
}
