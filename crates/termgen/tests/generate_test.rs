use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use termgen::{
    ArtifactKind, FieldClass, FsStore, Language, Manifest, MemoryStore, NodeSet, Primitives,
    TextStore, plan, render_artifact,
};

const PROCESS_TABLE: &str = include_str!("fixtures/process_expression.txt");

const HEADER: &str = "\
#ifndef PROCESS_EXPRESSION_VISITOR_H
#define PROCESS_EXPRESSION_VISITOR_H

#include \"process_expression.h\"

namespace process {

//--- start generated text ---//
//--- end generated text ---//

} // namespace process

#endif // PROCESS_EXPRESSION_VISITOR_H
";

const MANIFEST: &str = r#"
[[job]]
kind = "visitor"
table = "tables/process_expression.txt"
expression = "process_expression"
target = "include/process_expression_visitor.h"

[[job]]
kind = "builder"
table = "tables/process_expression.txt"
expression = "process_expression"
target = "include/process_expression_builder.h"

[[job]]
kind = "visitor"
language = "rust"
table = "tables/process_expression.txt"
expression = "process_expression"
target = "src/visitor.rs"
"#;

fn process_set() -> NodeSet {
    NodeSet::parse("process_expression.txt", PROCESS_TABLE, "process_expression").unwrap()
}

#[test]
fn test_process_table_classification() {
    let set = process_set();
    assert_eq!(set.len(), 20);
    assert_eq!(set.nodes()[0].tag(), "Action");
    assert_eq!(set.nodes()[19].tag(), "Choice");

    let leaf_only: Vec<&str> = set
        .iter()
        .filter(|node| !node.has_recursive_fields())
        .map(|node| node.name())
        .collect();
    assert_eq!(
        leaf_only,
        ["action", "process_instance", "process_instance_assignment", "delta", "tau"]
    );

    let at = set.iter().find(|node| node.tag() == "AtTime").unwrap();
    let classes: Vec<(&str, FieldClass)> = at
        .fields
        .iter()
        .map(|field| (field.accessor.as_str(), field.class))
        .collect();
    assert_eq!(
        classes,
        [
            ("operand", FieldClass::Recursive),
            ("time_stamp", FieldClass::Leaf)
        ]
    );
}

#[test]
fn test_sum_is_rebuilt_from_operand_only() {
    let set = process_set();
    let sum = set.iter().find(|node| node.tag() == "Sum").unwrap();
    assert_eq!(sum.fields[0].class, FieldClass::Leaf);
    assert_eq!(sum.fields[1].class, FieldClass::Recursive);

    let text = render_artifact(
        &set,
        ArtifactKind::Builder,
        Language::Cpp,
        "process_expression",
        &Primitives::default(),
    )
    .unwrap();
    assert!(text.contains("        result = sum(v, visit(right, a));\n"));
    assert!(text.contains("        result = sum(v, visit(right));\n"));
    assert!(!text.contains("visit(v"));
}

#[test]
fn test_tau_renders_class_branch_and_predicate() {
    let set = NodeSet::parse("t", "Tau | tau() ()  | The value tau", "process_expression").unwrap();
    let primitives = Primitives::default();
    let render = |kind| render_artifact(&set, kind, Language::Cpp, "process_expression", &primitives);

    let classes = render(ArtifactKind::Classes).unwrap();
    assert!(classes.contains("tau(atermpp::aterm_appl term)"));
    assert!(classes.contains("    tau()\n      : process_expression(core::detail::gsMakeTau())\n"));
    assert!(!classes.contains("() const"));

    let visitor = render(ArtifactKind::Visitor).unwrap();
    assert!(visitor.contains("    if (is_tau(x))\n    {\n      visit_tau(x);\n      leave_tau();\n    }\n"));

    let predicates = render(ArtifactKind::Predicates).unwrap();
    assert!(predicates.contains("bool is_tau(const process_expression& t)"));
    assert!(predicates.contains("return core::detail::gsIsTau(t);"));
}

#[test]
fn test_rust_backend_renders_whole_table() {
    let set = process_set();
    let primitives = Primitives::default();
    for kind in [
        ArtifactKind::Classes,
        ArtifactKind::Visitor,
        ArtifactKind::Builder,
        ArtifactKind::Predicates,
    ] {
        let text = render_artifact(&set, kind, Language::Rust, "process_expression", &primitives)
            .unwrap();
        syn::parse_file(&text).unwrap();
    }
}

#[test]
fn test_generate_in_memory_is_idempotent() {
    let mut store = MemoryStore::new();
    store.insert("tables/process_expression.txt", PROCESS_TABLE);
    store.insert("include/process_expression_visitor.h", HEADER);
    store.insert("include/process_expression_builder.h", HEADER);
    store.insert("src/visitor.rs", HEADER);
    let manifest = Manifest::parse(Path::new("termgen.toml"), MANIFEST).unwrap();

    let first = plan(&manifest, &store).unwrap();
    assert_eq!(first.commit(&mut store).unwrap(), 3);
    let visitor = store.get("include/process_expression_visitor.h").unwrap().to_owned();

    let second = plan(&manifest, &store).unwrap();
    assert!(second.is_up_to_date());
    assert_eq!(second.commit(&mut store).unwrap(), 0);
    assert_eq!(
        store.get("include/process_expression_visitor.h").unwrap(),
        visitor
    );
}

#[test]
fn test_generate_on_disk_keeps_surrounding_text() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("tables")).unwrap();
    fs::create_dir_all(root.join("include")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("tables/process_expression.txt"), PROCESS_TABLE).unwrap();
    fs::write(root.join("include/process_expression_visitor.h"), HEADER).unwrap();
    fs::write(root.join("include/process_expression_builder.h"), HEADER).unwrap();
    fs::write(root.join("src/visitor.rs"), HEADER).unwrap();
    fs::write(root.join("termgen.toml"), MANIFEST).unwrap();

    let mut store = FsStore::new(root);
    let manifest = Manifest::load(&store, Path::new("termgen.toml")).unwrap();
    plan(&manifest, &store).unwrap().commit(&mut store).unwrap();

    let visitor = fs::read_to_string(root.join("include/process_expression_visitor.h")).unwrap();
    let (before, rest) = visitor.split_once("//--- start generated text ---//\n").unwrap();
    let (generated, after) = rest.split_once("//--- end generated text ---//").unwrap();
    assert_eq!(
        before,
        "#ifndef PROCESS_EXPRESSION_VISITOR_H\n#define PROCESS_EXPRESSION_VISITOR_H\n\n#include \"process_expression.h\"\n\nnamespace process {\n\n"
    );
    assert_eq!(
        after,
        "\n\n} // namespace process\n\n#endif // PROCESS_EXPRESSION_VISITOR_H\n"
    );
    assert!(generated.starts_with("/// \\brief Visitor class for expressions."));
    assert!(generated.contains("struct process_expression_visitor<void>"));

    let rust = store.read_text(Path::new("src/visitor.rs")).unwrap();
    assert!(rust.contains("pub trait ProcessExpressionVisitor {"));
    assert!(plan(&manifest, &store).unwrap().is_up_to_date());
}

#[test]
fn test_row_order_is_preserved_in_every_artifact() {
    let set = process_set();
    let primitives = Primitives::default();
    let names: Vec<&str> = set.iter().map(|node| node.name()).collect();
    for kind in [ArtifactKind::Visitor, ArtifactKind::Builder] {
        let text = render_artifact(&set, kind, Language::Cpp, "process_expression", &primitives)
            .unwrap();
        let template = &text[..text.find("template <>").unwrap()];
        let positions: Vec<usize> = names
            .iter()
            .map(|name| template.find(&format!("(is_{name}(x))")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
