//! Collection search with filters, sorting, and pagination.

use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use loomline_catalog::refine::{DesignerRefinement, ExperienceBand, OrderRefinement};
use loomline_catalog::{FilterState, PageResult};
use loomline_core::OrderStatus;

use super::{CliError, catalog_from_env};

/// Which collection to search, with its filter flags.
#[derive(Debug, Subcommand)]
pub enum SearchTarget {
    /// Search the fabric catalog
    Fabrics(FabricArgs),
    /// Search the designer directory
    Designers(DesignerArgs),
    /// Search the order dashboard
    Orders(OrderArgs),
}

/// Flags shared by every collection.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Free-text search term
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Sort token (e.g., price-low, newest, rating)
    #[arg(long, default_value = "")]
    pub sort: String,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Items per page
    #[arg(long)]
    pub page_size: Option<u32>,
}

/// Fabric catalog filters.
#[derive(Debug, Args)]
pub struct FabricArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Material facet (repeatable)
    #[arg(long)]
    pub material: Vec<String>,

    /// Price-per-yard bounds
    #[arg(long, default_value = "")]
    pub price_min: String,
    #[arg(long, default_value = "")]
    pub price_max: String,

    /// GSM bounds
    #[arg(long, default_value = "")]
    pub gsm_min: String,
    #[arg(long, default_value = "")]
    pub gsm_max: String,

    /// Minimum-order-quantity bounds
    #[arg(long, default_value = "")]
    pub moq_min: String,
    #[arg(long, default_value = "")]
    pub moq_max: String,
}

/// Designer directory filters.
#[derive(Debug, Args)]
pub struct DesignerArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Specialty facet (repeatable)
    #[arg(long)]
    pub specialty: Vec<String>,

    /// Experience bucket: entry, mid, senior, expert (repeatable)
    #[arg(long)]
    pub experience: Vec<String>,

    /// Availability token: available, busy, immediate (repeatable)
    #[arg(long)]
    pub availability: Vec<String>,

    /// Minimum rating threshold
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Hourly-rate bounds
    #[arg(long)]
    pub rate_min: Option<Decimal>,
    #[arg(long)]
    pub rate_max: Option<Decimal>,
}

/// Order dashboard filters.
#[derive(Debug, Args)]
pub struct OrderArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Status facet (repeatable): created, confirmed, shipped, delivered,
    /// cancelled
    #[arg(long)]
    pub status: Vec<String>,
}

impl CommonArgs {
    fn apply(&self, filter: &mut FilterState) {
        filter.search.clone_from(&self.search);
        filter.sort_by.clone_from(&self.sort);
        filter.page = self.page;
        if let Some(page_size) = self.page_size {
            filter.page_size = page_size;
        }
    }
}

/// Run a search and print the page.
///
/// # Errors
///
/// Returns a [`CliError`] when configuration is missing or the fetch
/// fails after retries.
pub async fn run(target: SearchTarget) -> Result<(), CliError> {
    let catalog = catalog_from_env()?;

    match target {
        SearchTarget::Fabrics(args) => {
            let mut filter = FilterState::fabrics();
            args.common.apply(&mut filter);
            if !args.material.is_empty() {
                filter.select_terms("material", args.material);
            }
            filter.set_range("price_per_yard", args.price_min, args.price_max);
            filter.set_range("gsm", args.gsm_min, args.gsm_max);
            filter.set_range("minimum_order_quantity", args.moq_min, args.moq_max);

            if let Some(page) = catalog.fabrics(&filter).await?.into_page() {
                print_page(&page, |fabric| {
                    format!(
                        "{} | {} | {} | {}",
                        fabric.name, fabric.material, fabric.price_display, fabric.vendor_name
                    )
                });
            }
        }
        SearchTarget::Designers(args) => {
            let mut filter = FilterState::designers();
            args.common.apply(&mut filter);
            if !args.specialty.is_empty() {
                filter.select_terms("specialties", args.specialty);
            }

            let refinement = DesignerRefinement {
                experience_bands: args
                    .experience
                    .iter()
                    .filter_map(|token| ExperienceBand::from_str_param(token))
                    .collect(),
                availability: args.availability,
                min_rating: args.min_rating,
                rate_min: args.rate_min,
                rate_max: args.rate_max,
            };

            if let Some(page) = catalog.designers(&filter, &refinement).await?.into_page() {
                print_page(&page, |designer| {
                    format!(
                        "{} | {} | {} yrs | rated {:.1} | {}",
                        designer.name,
                        designer.title,
                        designer.years_experience,
                        designer.rating,
                        designer.availability.as_str()
                    )
                });
            }
        }
        SearchTarget::Orders(args) => {
            let mut filter = FilterState::orders();
            args.common.apply(&mut filter);
            let statuses = valid_status_tokens(&args.status);
            if !statuses.is_empty() {
                filter.select_terms("status", statuses);
            }

            if let Some(page) = catalog.orders(&filter, &OrderRefinement::default()).await?.into_page() {
                print_page(&page, |order| {
                    format!(
                        "{} | {} | {} | {}",
                        order.order_number, order.status_label, order.total_display, order.date_display
                    )
                });
            }
        }
    }

    Ok(())
}

/// Validate status tokens against the order lifecycle; unknown tokens are
/// dropped rather than sent to the store as bogus filter values.
fn valid_status_tokens(tokens: &[String]) -> Vec<&'static str> {
    tokens
        .iter()
        .filter_map(|token| OrderStatus::from_str_param(token))
        .map(|status| status.as_str())
        .collect()
}

#[allow(clippy::print_stdout)]
fn print_page<T>(page: &PageResult<T>, render: impl Fn(&T) -> String) {
    for item in &page.items {
        println!("{}", render(item));
    }
    println!(
        "showing {} (page {} of {})",
        page.meta.range_label(),
        page.meta.current_page,
        page.meta.total_pages
    );
}
