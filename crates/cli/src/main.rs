//! Loomline CLI - catalog queries and health checks from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Probe the hosted store
//! loom-cli check
//!
//! # Search the fabric catalog
//! loom-cli search fabrics -s cotton --price-min 10 --price-max 20 --sort price-low
//!
//! # Search the designer directory with an experience bucket
//! loom-cli search designers --experience entry --availability immediate
//!
//! # Fetch one record
//! loom-cli get fabrics 6b9f1c0e-0d7a-4b52-9b8e-2f6d2f1a9c11
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_API_URL` - Base URL of the hosted store's REST endpoint
//! - `CATALOG_API_KEY` - API key for the store

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "loom-cli")]
#[command(author, version, about = "Loomline catalog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe connectivity to the hosted store
    Check,
    /// Query a collection with filters, sorting, and pagination
    Search {
        #[command(subcommand)]
        collection: commands::search::SearchTarget,
    },
    /// Fetch a single record by id
    Get {
        /// Collection to read from
        collection: CollectionArg,
        /// Record id (UUID)
        id: uuid::Uuid,
    },
}

/// Collection argument for `get`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CollectionArg {
    Fabrics,
    Designers,
    Orders,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Check => commands::check::run().await?,
        Commands::Search { collection } => commands::search::run(collection).await?,
        Commands::Get { collection, id } => commands::get::run(collection.into(), id).await?,
    }
    Ok(())
}

impl From<CollectionArg> for loomline_catalog::Collection {
    fn from(arg: CollectionArg) -> Self {
        match arg {
            CollectionArg::Fabrics => Self::Fabrics,
            CollectionArg::Designers => Self::Designers,
            CollectionArg::Orders => Self::Orders,
        }
    }
}
