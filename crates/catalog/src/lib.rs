//! Loomline Catalog - the query-and-filter pipeline.
//!
//! Everything the marketplace shows in a list - fabrics in the catalog,
//! designers in the directory, orders on the dashboard - goes through the
//! same five-stage pipeline:
//!
//! 1. [`query::build_query`] translates a [`filter::FilterState`] into an
//!    immutable [`query::QueryDescriptor`].
//! 2. [`retry::RetryPolicy`] runs the remote fetch with bounded retries,
//!    retrying only transient connectivity failures.
//! 3. [`normalize`] reshapes raw store rows into flat view models with
//!    defaults filled in.
//! 4. [`refine`] applies the handful of predicates the remote store cannot
//!    express cheaply (experience buckets, availability aliases).
//! 5. [`page::paginate`] folds the remote total count into page metadata.
//!
//! The remote store is consumed through the [`store::CollectionStore`]
//! capability trait; production code injects [`store::PostgrestStore`],
//! tests inject [`store::MemoryStore`]. There is no ambient client handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use loomline_catalog::{Catalog, FilterState, store::PostgrestStore};
//!
//! let store = PostgrestStore::new(&config.store);
//! let catalog = Catalog::new(store);
//!
//! let mut filter = FilterState::fabrics();
//! filter.search = "cotton".into();
//! let page = catalog.fabrics(&filter).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod page;
pub mod pipeline;
pub mod query;
pub mod refine;
pub mod retry;
pub mod store;

pub use config::{CatalogConfig, StoreConfig};
pub use error::{CatalogError, NormalizeError, StoreError};
pub use filter::{Collection, CollectionSchema, FilterState, RangeSelection, SortDirection};
pub use normalize::{Defaults, DesignerView, FabricView, OrderView};
pub use page::{PageMeta, paginate};
pub use pipeline::{Catalog, Fetched, PageResult};
pub use query::{Predicate, QueryDescriptor, build_query};
pub use refine::{DesignerRefinement, ExperienceBand, OrderRefinement};
pub use retry::RetryPolicy;
