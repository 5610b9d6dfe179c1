//! plantscan CLI entry point.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plantscan", version, about = "Plant disease photo demo backend")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve(ServeArgs),
    /// Print stored diagnosis records, newest first, as JSON
    Records(RecordsArgs),
}

/// Flags for `plantscan serve`. Each one overrides config file and environment.
#[derive(Args, Default)]
pub(crate) struct ServeArgs {
    /// Config file (defaults to ./plantscan.toml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Persistence connection string (memory://, redb://<path>, or a file path)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Directory of static assets served at the root path
    #[arg(long)]
    pub public_dir: Option<PathBuf>,

    /// Write uploaded photos to this directory instead of keeping them in memory
    #[arg(long)]
    pub upload_dir: Option<PathBuf>,

    /// Maximum analyze request body size in bytes
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,

    /// Expose Prometheus metrics on this port
    #[arg(long)]
    pub metrics_port: Option<u16>,
}

/// Flags for `plantscan records`.
#[derive(Args)]
pub(crate) struct RecordsArgs {
    /// Config file (defaults to ./plantscan.toml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Persistence connection string to read from
    #[arg(long)]
    pub database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::init_tracing(cli.log_json);

    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::execute(args).await,
        Some(Commands::Records(args)) => commands::records::execute(args).await,
        None => commands::serve::execute(ServeArgs::default()).await,
    }
}
