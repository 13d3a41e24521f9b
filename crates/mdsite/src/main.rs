//! mdsite CLI - Markdown static site generator.
//!
//! Provides commands for:
//! - `build`: Generate the site from content, static assets and a template
//! - `render`: Convert a single markdown file and print the HTML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, RenderArgs};
use output::Output;

/// mdsite - Markdown static site generator.
#[derive(Parser)]
#[command(name = "mdsite", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static site.
    Build(BuildArgs),
    /// Convert one markdown file to HTML on stdout.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
