//! CLI command implementations.

pub mod check;
pub mod get;
pub mod search;

use loomline_catalog::store::PostgrestStore;
use loomline_catalog::{Catalog, CatalogConfig};
use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] loomline_catalog::config::ConfigError),

    /// The pipeline reported an error.
    #[error(transparent)]
    Catalog(#[from] loomline_catalog::CatalogError),
}

/// Build a catalog pipeline from the environment.
pub fn catalog_from_env() -> Result<Catalog<PostgrestStore>, CliError> {
    let config = CatalogConfig::from_env()?;
    Ok(Catalog::new(PostgrestStore::new(&config.store)))
}
