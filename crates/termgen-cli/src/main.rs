use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod util;

#[derive(Parser)]
#[command(name = "termgen", about = "Term class, visitor and builder generator")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate every target listed in the manifest
    Generate(commands::generate::Args),
    /// Render one table and print the result
    Render(commands::render::Args),
    /// Show how the fields of a table are classified
    Inspect(commands::inspect::Args),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
    }
}
