//! Command-line interface for a draw session
//!
//! Every invocation opens the session from the record directory: the roster
//! record is loaded and shuffled, persisted winners and absentees are resumed,
//! then the requested operation runs. Results are printed to stdout as JSON;
//! logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use draw_core::DrawConfig;
use std::path::PathBuf;

mod commands;

use commands::{ImportArgs, SessionCommand};

#[derive(Parser)]
#[command(name = "draw")]
#[command(about = "Draw - prize draw session tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, default_value = "draw.toml")]
    config: PathBuf,

    /// Record directory, overriding `session.data_dir`
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store roster rows from a JSON file as the roster record
    Import(ImportArgs),

    #[command(flatten)]
    Session(SessionCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = DrawConfig::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(data_dir) = cli.data_dir {
        config.session.data_dir = data_dir;
    }
    tracing::debug!(data_dir = %config.session.data_dir.display(), "config loaded");

    match cli.command {
        Commands::Import(args) => commands::import_roster(&config, &args).await,
        Commands::Session(cmd) => {
            let service = commands::open_session(&config).await?;
            commands::handle_session_command(&service, cmd).await
        }
    }
}
