//! Generate command - splices every manifest job into its target.

use std::path::PathBuf;

use anyhow::Context as _;
use nu_ansi_term::Color;
use termgen::{MANIFEST_FILENAME, Manifest, plan};

use crate::util::store_for;

#[derive(clap::Args)]
pub struct Args {
    /// Path to the manifest. Job paths are relative to its directory.
    #[arg(short, long, default_value = MANIFEST_FILENAME)]
    pub manifest: PathBuf,

    /// Write nothing; exit with status 1 if any target is out of date
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let (mut store, manifest_name) = store_for(&args.manifest);
    let manifest = Manifest::load(&store, &manifest_name)
        .with_context(|| format!("failed to load {}", args.manifest.display()))?;
    tracing::debug!(jobs = manifest.jobs.len(), root = %store.root().display(), "loaded manifest");
    let plan = plan(&manifest, &store)?;

    if args.check || args.dry_run {
        let mut stale = 0;
        for change in plan.stale() {
            println!("{} {}", Color::Yellow.paint("stale"), change.target.display());
            stale += 1;
        }
        if stale == 0 {
            println!("{}", Color::Green.paint("all targets up to date"));
        } else if args.check {
            std::process::exit(1);
        }
        return Ok(());
    }

    let written = plan.commit(&mut store)?;
    println!(
        "{} {written} of {} target(s)",
        Color::Green.paint("updated"),
        plan.changes.len()
    );
    Ok(())
}
