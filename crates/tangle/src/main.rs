//! tangle CLI - Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "tangle")]
#[command(version)]
#[command(about = "Embedded-TypeScript diagnostics for YAML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the language server over stdio
    Lsp,

    /// Check files once and print any diagnostics found
    Check {
        /// YAML files to check
        #[arg(required = true)]
        files: Vec<String>,

        /// Print diagnostics as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging. Logs go to stderr: stdout carries JSON-RPC when
    // serving and check results otherwise.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tangle=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lsp => commands::lsp::execute(),
        Commands::Check { files, json } => commands::check::execute(&files, json),
    }
}
