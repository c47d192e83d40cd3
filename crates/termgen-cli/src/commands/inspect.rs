//! Inspect command - prints every row of a table with its classified fields.

use std::path::PathBuf;

use nu_ansi_term::Color;
use termgen::{FieldClass, load_node_set};

use crate::util::store_for;

#[derive(clap::Args)]
pub struct Args {
    /// Specification table to inspect
    #[arg(short, long)]
    pub table: PathBuf,

    /// Expression type; fields of exactly this type are recursive
    #[arg(short, long)]
    pub expression: String,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let (store, table) = store_for(&args.table);
    let set = load_node_set(&store, &table, &args.expression)?;

    for node in &set {
        println!(
            "{} {} (line {}): {}",
            Color::Cyan.bold().paint(node.tag()),
            node.name(),
            node.spec.line,
            node.description()
        );
        for field in &node.fields {
            let class = match field.class {
                FieldClass::Recursive => Color::Green.paint("recursive"),
                FieldClass::Leaf => Color::DarkGray.paint("leaf"),
            };
            println!(
                "  {}. {} {} -> {}() {class}",
                field.position,
                field.ty(),
                field.name(),
                field.accessor
            );
        }
    }
    println!("{} node(s) of {}", set.len(), set.expression());
    Ok(())
}
