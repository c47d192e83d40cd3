use std::path::PathBuf;

use anyhow::Context as _;
use termgen::{Manifest, Primitives, load_node_set, render_artifact};

use crate::util::{KindArg, LanguageArg, store_for};

#[derive(clap::Args)]
pub struct Args {
    /// Specification table to render
    #[arg(short, long)]
    pub table: PathBuf,

    /// Expression type; fields of exactly this type are recursive
    #[arg(short, long)]
    pub expression: String,

    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    #[arg(short, long, value_enum, default_value_t)]
    pub language: LanguageArg,

    /// Base class of generated C++ classes (defaults to the expression type)
    #[arg(long)]
    pub super_type: Option<String>,

    /// Manifest whose `[primitives]` are used instead of the mCRL2 defaults
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let (store, table) = store_for(&args.table);
    let set = load_node_set(&store, &table, &args.expression)?;
    let primitives = match &args.manifest {
        Some(path) => {
            let (store, name) = store_for(path);
            Manifest::load(&store, &name)
                .with_context(|| format!("failed to load {}", path.display()))?
                .primitives
        }
        None => Primitives::default(),
    };
    let super_type = args.super_type.as_deref().unwrap_or(&args.expression);
    let text = render_artifact(
        &set,
        args.kind.into(),
        args.language.into(),
        super_type,
        &primitives,
    )?;
    print!("{text}");
    Ok(())
}
