//! `pageboard`: merge rendered page screenshots into review boards and
//! normalize the margins of rendered diagrams.

mod args;
mod board;
mod files;
mod merge;
mod normalize;
mod pages;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Merge page screenshots into one image and trim rendered diagrams.
#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge page PNGs into a single long image or grid.
    Merge(merge::Args),
    /// Merge client and admin screenshots into one design board.
    Board(board::Args),
    /// Trim empty margins and re-pad images symmetrically.
    Normalize(normalize::Args),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Merge(args) => merge::run(&args),
        Command::Board(args) => board::run(&args),
        Command::Normalize(args) => normalize::run(&args),
    }
}
