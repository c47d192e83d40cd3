use crate::config::Primitives;
use crate::cpp::writer::CodeWriter;
use crate::node::{Node, NodeSet};

/// Emits the class definition of one node kind.
///
/// The class has a wrap constructor asserting the runtime tag, a
/// convenience constructor taking the typed parameters, and one accessor per
/// parameter.
pub fn synthesize_class(node: &Node, super_type: &str, primitives: &Primitives) -> String {
    let name = node.name();
    let tag = node.tag();
    let mut w = CodeWriter::new(2);

    w.line(format!("/// \\brief {}", node.description()));
    w.line(format!("class {name}: public {super_type}"));
    w.block_with("};", |w| {
        w.line("public:");
        w.indented(|w| {
            w.line("/// \\brief Constructor.");
            w.line("/// \\param term A term");
            w.line(format!("{name}({} term)", primitives.term_type));
            w.line(format!("  : {super_type}(term)"));
            w.block(|w| {
                w.line(format!(
                    "assert({}{tag}(m_term));",
                    primitives.check_term_prefix
                ));
            });

            w.blank();
            w.line("/// \\brief Constructor.");
            for field in &node.fields {
                w.line(format!("/// \\param {} A {}", field.name(), field.ty()));
            }
            w.line(format!("{name}({})", node.spec.signature.declarations()));
            let names = node
                .fields
                .iter()
                .map(|f| f.name())
                .collect::<Vec<_>>()
                .join(", ");
            w.line(format!(
                "  : {super_type}({}{tag}({names}))",
                primitives.make_prefix
            ));
            w.line("{}");

            for field in &node.fields {
                w.blank();
                w.line(format!("{} {}() const", field.ty(), field.accessor));
                w.block(|w| {
                    w.line(format!(
                        "return {}{}(*this);",
                        primitives.argument_namespace,
                        primitives.argument(field.ty(), field.position)
                    ));
                });
            }
        });
    });

    w.finish()
}

/// Emits the classes of every node, in row order, ready for splicing.
pub fn synthesize_classes(set: &NodeSet, super_type: &str, primitives: &Primitives) -> String {
    let classes: Vec<String> = set
        .iter()
        .map(|node| synthesize_class(node, super_type, primitives))
        .collect();
    classes.join("\n")
}
