use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;

const TABLE: &str = "\
Sum | sum(const data::variable_list& v, const process_expression& right) (bound_variables, operand) | The sum operator
Tau | tau() () | The value tau
";

const HEADER: &str = "// prelude\n//--- start generated text ---//\n//--- end generated text ---//\n// epilogue\n";

const MANIFEST: &str = r#"
[[job]]
kind = "predicates"
table = "table.txt"
expression = "process_expression"
target = "out.h"
"#;

fn termgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_termgen"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run termgen")
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("table.txt"), TABLE).unwrap();
    fs::write(dir.path().join("out.h"), HEADER).unwrap();
    fs::write(dir.path().join("termgen.toml"), MANIFEST).unwrap();
    dir
}

#[test]
fn test_check_reports_stale_targets() {
    let dir = project();
    let output = termgen(dir.path(), &["generate", "--check"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_to_string(dir.path().join("out.h")).unwrap(), HEADER);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = project();
    let output = termgen(dir.path(), &["generate", "--dry-run"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("out.h"));
    assert_eq!(fs::read_to_string(dir.path().join("out.h")).unwrap(), HEADER);
}

#[test]
fn test_generate_then_check() {
    let dir = project();
    assert!(termgen(dir.path(), &["generate"]).status.success());

    let header = fs::read_to_string(dir.path().join("out.h")).unwrap();
    assert!(header.contains("bool is_sum(const process_expression& t)"));
    assert!(header.ends_with("//--- end generated text ---//\n// epilogue\n"));

    assert!(termgen(dir.path(), &["generate", "--check"]).status.success());
}

#[test]
fn test_manifest_in_another_directory() {
    let dir = project();
    let output = termgen(
        dir.path().parent().unwrap(),
        &[
            "generate",
            "--manifest",
            dir.path().join("termgen.toml").to_str().unwrap(),
        ],
    );
    assert!(output.status.success());
    assert!(
        fs::read_to_string(dir.path().join("out.h"))
            .unwrap()
            .contains("is_tau")
    );
}

#[test]
fn test_render_prints_rust_visitor() {
    let dir = project();
    let output = termgen(
        dir.path(),
        &[
            "render",
            "--table",
            "table.txt",
            "--expression",
            "process_expression",
            "--kind",
            "visitor",
            "--language",
            "rust",
        ],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("pub trait ProcessExpressionVisitor {"));
    assert!(stdout.contains("pub trait ProcessExpressionVisitorWith<A> {"));
}

#[test]
fn test_render_reads_primitives_from_manifest() {
    let dir = project();
    fs::write(
        dir.path().join("custom.toml"),
        "[primitives]\ntag_test_prefix = \"detail::is_\"\n",
    )
    .unwrap();
    let args = [
        "render",
        "--table",
        "table.txt",
        "--expression",
        "process_expression",
        "--kind",
        "predicates",
    ];

    let output = termgen(dir.path(), &args);
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("return core::detail::gsIsTau(t);"));

    let output = termgen(dir.path(), &[&args[..], &["--manifest", "custom.toml"][..]].concat());
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("return detail::is_Tau(t);"));
    assert!(stdout.contains("return detail::is_Sum(t);"));
}

#[test]
fn test_inspect_shows_classification() {
    let dir = project();
    let output = termgen(
        dir.path(),
        &["inspect", "-t", "table.txt", "-e", "process_expression"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("recursive"));
    assert!(stdout.contains("leaf"));
    assert!(stdout.contains("2 node(s) of process_expression"));
}

#[test]
fn test_malformed_table_fails() {
    let dir = project();
    fs::write(dir.path().join("table.txt"), "Bad | bad(int) | no name\n").unwrap();
    let output = termgen(dir.path(), &["generate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("table.txt:1: malformed row"));
}
