//! shelf - local content-catalog manager CLI

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about = "Track, install, and launch catalog items")]
struct Cli {
    /// Manifest file to load the catalog from
    #[arg(long, global = true, env = "SHELF_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Fetch the manifest over HTTP instead of reading a local file
    #[arg(long, global = true, conflicts_with = "manifest")]
    manifest_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog items and their install status
    List {
        /// Only show installed items
        #[arg(long)]
        installed: bool,
    },
    /// Install one or more items by cloning their sources
    Install {
        /// Item id(s)
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Resolve an installed item's entry document and print its display reference
    Launch {
        /// Item id
        id: String,
    },
    /// Reload the catalog and report what it contains
    Refresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let source = cmd::source_from(cli.manifest, cli.manifest_url)?;

    match cli.command {
        Commands::List { installed } => cmd::list::list(source.as_ref(), installed).await,
        Commands::Install { ids } => cmd::install::install(source.as_ref(), &ids).await,
        Commands::Launch { id } => cmd::launch::launch(source.as_ref(), &id).await,
        Commands::Refresh => cmd::refresh::refresh(source.as_ref()).await,
    }
}
