//! # site CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use site_cli::menu::{run_menu, MenuArgs};
use site_cli::messages::{run_messages, MessagesArgs};
use site_cli::themes::{run_themes, ThemesArgs};
use site_cli::validate::{run_validate, ValidateArgs};

/// Authoring tool for simple-site configuration documents.
///
/// Validates a site configuration JSON document against the schema
/// registry and shows what a renderer would derive from it.
#[derive(Parser, Debug)]
#[command(name = "site", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document and list every failure by field path.
    Validate(ValidateArgs),

    /// Show the resolved theme set.
    Themes(ThemesArgs),

    /// Show the navigation menu derived from the pages.
    Menu(MenuArgs),

    /// Look up translations with locale fallback.
    Messages(MessagesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &mut out),
        Commands::Themes(args) => run_themes(args, &mut out),
        Commands::Menu(args) => run_menu(args, &mut out),
        Commands::Messages(args) => run_messages(args, &mut out),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
