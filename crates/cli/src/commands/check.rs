//! Connectivity probe against the hosted store.
//!
//! Runs the same cheap limit-1 read the application issues before its
//! first real query, and reports the error class on failure so operators
//! know whether to wait (transient) or fix configuration.

use loomline_catalog::CatalogError;

use super::{CliError, catalog_from_env};

/// Run the health probe.
///
/// # Errors
///
/// Returns a [`CliError`] when configuration is missing or the probe
/// fails.
pub async fn run() -> Result<(), CliError> {
    let catalog = catalog_from_env()?;

    match catalog.check_connection().await {
        Ok(()) => {
            print_status("ok: store is reachable");
            Ok(())
        }
        Err(err) => {
            if let CatalogError::Store(store_err) = &err {
                print_status(store_err.user_message());
            }
            Err(err.into())
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_status(message: &str) {
    println!("{message}");
}
