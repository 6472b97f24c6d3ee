//! Single-record lookup.

use loomline_catalog::Collection;
use uuid::Uuid;

use super::{CliError, catalog_from_env};

/// Fetch and print one record.
///
/// # Errors
///
/// Returns a [`CliError`] when the record is missing or the store is
/// unreachable after retries.
pub async fn run(collection: Collection, id: Uuid) -> Result<(), CliError> {
    let catalog = catalog_from_env()?;

    match collection {
        Collection::Fabrics => {
            let fabric = catalog.fabric_by_id(id).await?;
            print_line(&format!(
                "{} | {} | {} | {} | rated {:.1}",
                fabric.id, fabric.name, fabric.price_display, fabric.vendor_name, fabric.rating
            ));
        }
        Collection::Designers => {
            let designer = catalog.designer_by_id(id).await?;
            print_line(&format!(
                "{} | {} | {} | {} yrs | {}",
                designer.id,
                designer.name,
                designer.title,
                designer.years_experience,
                designer.availability.as_str()
            ));
        }
        Collection::Orders => {
            let order = catalog.order_by_id(id).await?;
            print_line(&format!(
                "{} | {} | {} | {} | {}",
                order.id, order.order_number, order.status_label, order.total_display, order.date_display
            ));
        }
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{line}");
}
