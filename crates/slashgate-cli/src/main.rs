//! `slashgate` -- run slash commands against their configured endpoints.
//!
//! Provides the following subcommands:
//!
//! - `slashgate exec` -- Dispatch one command and print the reply.
//! - `slashgate list` -- Show the configured triggers.

use clap::{Parser, Subcommand};

mod commands;

/// Slash command relay CLI.
#[derive(Parser)]
#[command(name = "slashgate", about = "Slash command HTTP relay", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Dispatch a slash command and print the reply.
    Exec(commands::exec::ExecArgs),

    /// List configured slash commands.
    List(commands::list::ListArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Exec(args) => commands::exec::run(args).await,
        Commands::List(args) => commands::list::run(args),
    }
}
