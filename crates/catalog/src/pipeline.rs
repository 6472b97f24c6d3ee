//! Pipeline orchestration: one call per list view.
//!
//! [`Catalog`] wires the five stages together: build the descriptor, run
//! the fetch through the retry policy, normalize the rows, refine them,
//! and fold the total count into page metadata.
//!
//! Rapid filter edits can leave several fetches in flight at once. Each
//! fetch takes a ticket from a per-collection monotonic sequence; a fetch
//! whose ticket is no longer the latest when it completes resolves to
//! [`Fetched::Stale`] so the caller never overwrites newer state with an
//! older response.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::instrument;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::filter::{Collection, FilterState};
use crate::normalize::{
    Defaults, DesignerView, FabricView, OrderView, normalize_designer, normalize_fabric,
    normalize_order,
};
use crate::page::{PageMeta, paginate};
use crate::query::build_query;
use crate::refine::{DesignerRefinement, OrderRefinement};
use crate::retry::RetryPolicy;
use crate::store::CollectionStore;

/// One fetched, normalized, refined page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    /// View models for the current page, after refinement.
    pub items: Vec<T>,
    /// Page metadata computed from the remote total. Refinement narrows
    /// `items` without correcting `meta.total_count`; both are exposed so
    /// callers can render exact counts.
    pub meta: PageMeta,
}

/// Outcome of a fetch under concurrent filter edits.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// This fetch was the latest when it completed.
    Page(PageResult<T>),
    /// A newer fetch for the same collection was issued while this one
    /// was in flight; discard it.
    Stale,
}

impl<T> Fetched<T> {
    /// The page, if this fetch was still current.
    pub fn into_page(self) -> Option<PageResult<T>> {
        match self {
            Self::Page(page) => Some(page),
            Self::Stale => None,
        }
    }
}

/// Per-collection monotonic fetch tickets.
#[derive(Debug, Default)]
struct RequestSequencer {
    fabrics: AtomicU64,
    designers: AtomicU64,
    orders: AtomicU64,
}

impl RequestSequencer {
    const fn counter(&self, collection: Collection) -> &AtomicU64 {
        match collection {
            Collection::Fabrics => &self.fabrics,
            Collection::Designers => &self.designers,
            Collection::Orders => &self.orders,
        }
    }

    fn issue(&self, collection: Collection) -> u64 {
        self.counter(collection).fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, collection: Collection, ticket: u64) -> bool {
        self.counter(collection).load(Ordering::SeqCst) == ticket
    }
}

/// The catalog read pipeline over an injected collection store.
#[derive(Debug)]
pub struct Catalog<S> {
    store: S,
    retry: RetryPolicy,
    defaults: Defaults,
    sequencer: RequestSequencer,
}

impl<S: CollectionStore> Catalog<S> {
    /// Create a pipeline with the default retry policy and defaults.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_policy(store, RetryPolicy::default())
    }

    /// Create a pipeline with a custom retry policy.
    #[must_use]
    pub fn with_policy(store: S, retry: RetryPolicy) -> Self {
        Self {
            store,
            retry,
            defaults: Defaults::default(),
            sequencer: RequestSequencer::default(),
        }
    }

    /// Override the normalizer's display defaults.
    pub fn set_defaults(&mut self, defaults: Defaults) {
        self.defaults = defaults;
    }

    /// Access the underlying store (for write flows and probes).
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Cheap connectivity probe, not retried.
    ///
    /// # Errors
    ///
    /// Returns the classified [`crate::StoreError`] on failure.
    pub async fn check_connection(&self) -> Result<(), CatalogError> {
        Ok(self.store.health().await?)
    }

    /// Fetch a page of the fabric catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] after the retry budget, or for a
    /// structurally invalid row.
    #[instrument(skip(self, filter), fields(page = filter.page))]
    pub async fn fabrics(&self, filter: &FilterState) -> Result<Fetched<FabricView>, CatalogError> {
        debug_assert_eq!(filter.schema.collection, Collection::Fabrics);
        self.fetch_page(filter, normalize_fabric, |items| items).await
    }

    /// Fetch a page of the designer directory, refined client-side.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] after the retry budget, or for a
    /// structurally invalid row.
    #[instrument(skip(self, filter, refinement), fields(page = filter.page))]
    pub async fn designers(
        &self,
        filter: &FilterState,
        refinement: &DesignerRefinement,
    ) -> Result<Fetched<DesignerView>, CatalogError> {
        debug_assert_eq!(filter.schema.collection, Collection::Designers);
        self.fetch_page(filter, normalize_designer, |items| refinement.apply(items))
            .await
    }

    /// Fetch a page of the order dashboard, refined client-side.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] after the retry budget, or for a
    /// structurally invalid row.
    #[instrument(skip(self, filter, refinement), fields(page = filter.page))]
    pub async fn orders(
        &self,
        filter: &FilterState,
        refinement: &OrderRefinement,
    ) -> Result<Fetched<OrderView>, CatalogError> {
        debug_assert_eq!(filter.schema.collection, Collection::Orders);
        self.fetch_page(filter, normalize_order, |items| refinement.apply(items))
            .await
    }

    /// Fetch a single fabric by id.
    ///
    /// # Errors
    ///
    /// [`crate::StoreError::NotFound`] when no row matches; other store
    /// errors after the retry budget.
    pub async fn fabric_by_id(&self, id: Uuid) -> Result<FabricView, CatalogError> {
        let raw = self
            .retry
            .run(|| self.store.get_by_id(Collection::Fabrics, id))
            .await?;
        Ok(normalize_fabric(&raw, &self.defaults)?)
    }

    /// Fetch a single designer by id.
    ///
    /// # Errors
    ///
    /// [`crate::StoreError::NotFound`] when no row matches; other store
    /// errors after the retry budget.
    pub async fn designer_by_id(&self, id: Uuid) -> Result<DesignerView, CatalogError> {
        let raw = self
            .retry
            .run(|| self.store.get_by_id(Collection::Designers, id))
            .await?;
        Ok(normalize_designer(&raw, &self.defaults)?)
    }

    /// Fetch a single order by id.
    ///
    /// # Errors
    ///
    /// [`crate::StoreError::NotFound`] when no row matches; other store
    /// errors after the retry budget.
    pub async fn order_by_id(&self, id: Uuid) -> Result<OrderView, CatalogError> {
        let raw = self
            .retry
            .run(|| self.store.get_by_id(Collection::Orders, id))
            .await?;
        Ok(normalize_order(&raw, &self.defaults)?)
    }

    /// Distinct material names across the catalog, sorted, for populating
    /// filter options.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] after the retry budget.
    pub async fn fabric_materials(&self) -> Result<Vec<String>, CatalogError> {
        let mut filter = FilterState::fabrics();
        filter.page_size = 1000;
        let descriptor = build_query(&filter);

        let page = self.retry.run(|| self.store.query(&descriptor)).await?;

        let materials: std::collections::BTreeSet<String> = page
            .records
            .iter()
            .filter_map(|row| row.get("material").and_then(serde_json::Value::as_str))
            .filter(|material| !material.is_empty())
            .map(str::to_string)
            .collect();
        Ok(materials.into_iter().collect())
    }

    /// Shared fetch path: build, fetch with retries, normalize, refine,
    /// paginate, then check the ticket.
    async fn fetch_page<T, N, R>(
        &self,
        filter: &FilterState,
        normalize: N,
        refine: R,
    ) -> Result<Fetched<T>, CatalogError>
    where
        N: Fn(&serde_json::Value, &Defaults) -> Result<T, crate::error::NormalizeError>,
        R: FnOnce(Vec<T>) -> Vec<T>,
    {
        let collection = filter.schema.collection;
        let ticket = self.sequencer.issue(collection);
        let descriptor = build_query(filter);

        let page = self.retry.run(|| self.store.query(&descriptor)).await?;

        let items: Vec<T> = page
            .records
            .iter()
            .map(|raw| normalize(raw, &self.defaults))
            .collect::<Result<_, _>>()?;
        let items = refine(items);

        let meta = paginate(page.total, filter.page, filter.page_size);

        if self.sequencer.is_latest(collection, ticket) {
            Ok(Fetched::Page(PageResult { items, meta }))
        } else {
            Ok(Fetched::Stale)
        }
    }
}
