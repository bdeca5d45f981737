//! Lectern CLI - lecture site cross-reference tool.
//!
//! Provides commands for:
//! - `check`: Validate the sitemap and build the cross-reference index
//! - `list`: List every page in sitemap order
//! - `page`: Look up a page by its path name
//! - `resolve`: Resolve a named identifier to a link

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ListArgs, PageArgs, ResolveArgs};
use output::Output;

/// Lectern - lecture site cross-reference tool.
#[derive(Parser)]
#[command(name = "lectern", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the sitemap and build the cross-reference index.
    Check(CheckArgs),
    /// List every page in sitemap order.
    List(ListArgs),
    /// Show the title and identifier of a page.
    Page(PageArgs),
    /// Resolve a named identifier to a link.
    Resolve(ResolveArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Check(args) => args.common.verbose,
            Self::List(args) => args.common.verbose,
            Self::Page(args) => args.common.verbose,
            Self::Resolve(args) => args.common.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::List(args) => args.execute(),
        Commands::Page(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
