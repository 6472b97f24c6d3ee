//! Failure classification through the retry layer, end to end.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use serde_json::Value;
use uuid::Uuid;

use loomline_catalog::query::QueryDescriptor;
use loomline_catalog::store::{CollectionStore, MemoryStore, Mutation, QueryPage};
use loomline_catalog::{Catalog, CatalogError, Collection, FilterState, RetryPolicy, StoreError};

use loomline_integration_tests::seeded_store;

/// Store wrapper that counts how many queries reach the backend.
struct CountingStore {
    inner: MemoryStore,
    queries: Arc<AtomicU32>,
}

impl CountingStore {
    fn new(inner: MemoryStore) -> (Self, Arc<AtomicU32>) {
        let queries = Arc::new(AtomicU32::new(0));
        let store = Self {
            inner,
            queries: Arc::clone(&queries),
        };
        (store, queries)
    }
}

impl CollectionStore for CountingStore {
    async fn query(&self, descriptor: &QueryDescriptor) -> Result<QueryPage, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.query(descriptor).await
    }

    async fn get_by_id(&self, collection: Collection, id: Uuid) -> Result<Value, StoreError> {
        self.inner.get_by_id(collection, id).await
    }

    async fn mutate(&self, collection: Collection, mutation: Mutation) -> Result<Value, StoreError> {
        self.inner.mutate(collection, mutation).await
    }

    async fn health(&self) -> Result<(), StoreError> {
        self.inner.health().await
    }
}

// ============================================================================
// Transient Failures
// ============================================================================

#[tokio::test(start_paused = true)]
async fn transient_failures_retry_until_the_budget_allows() {
    let inner = seeded_store();
    inner.push_fault(StoreError::Transient("connection reset".into()));
    inner.push_fault(StoreError::Transient("connection reset".into()));
    let (store, queries) = CountingStore::new(inner);
    let catalog = Catalog::new(store);

    let result = catalog.fabrics(&FilterState::fabrics()).await;

    assert!(result.is_ok());
    assert_eq!(queries.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn exhausted_budget_surfaces_the_last_transient_error() {
    let inner = seeded_store();
    for _ in 0..3 {
        inner.push_fault(StoreError::Transient("gateway timeout".into()));
    }
    let (store, queries) = CountingStore::new(inner);
    let catalog = Catalog::new(store);

    let err = catalog
        .fabrics(&FilterState::fabrics())
        .await
        .expect_err("budget exhausted");

    assert_eq!(queries.load(Ordering::SeqCst), 3);
    assert!(matches!(
        err,
        CatalogError::Store(StoreError::Transient(_))
    ));
}

// ============================================================================
// Permanent Failures
// ============================================================================

#[tokio::test(start_paused = true)]
async fn permanent_failures_are_not_retried() {
    let inner = seeded_store();
    inner.push_fault(StoreError::Schema("column does not exist".into()));
    let (store, queries) = CountingStore::new(inner);
    let catalog = Catalog::new(store);

    let err = catalog
        .fabrics(&FilterState::fabrics())
        .await
        .expect_err("schema errors fail fast");

    assert_eq!(queries.load(Ordering::SeqCst), 1);
    assert!(matches!(err, CatalogError::Store(StoreError::Schema(_))));
}

#[tokio::test]
async fn missing_record_fails_on_the_first_attempt() {
    let catalog = Catalog::new(seeded_store());

    let err = catalog
        .fabric_by_id(Uuid::nil())
        .await
        .expect_err("unknown id");

    assert!(matches!(err, CatalogError::Store(StoreError::NotFound(_))));
}

// ============================================================================
// Policy + Messages
// ============================================================================

#[tokio::test]
async fn immediate_policy_skips_backoff_delays() {
    let inner = seeded_store();
    inner.push_fault(StoreError::Transient("blip".into()));
    let (store, queries) = CountingStore::new(inner);
    let catalog = Catalog::with_policy(store, RetryPolicy::immediate(2));

    // No paused clock here: immediate mode must not sleep at all.
    let result = catalog.fabrics(&FilterState::fabrics()).await;

    assert!(result.is_ok());
    assert_eq!(queries.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn user_message_stays_friendly_after_exhaustion() {
    let inner = seeded_store();
    for _ in 0..3 {
        inner.push_fault(StoreError::Transient("socket hangup".into()));
    }
    let catalog = Catalog::new(CountingStore::new(inner).0);

    let err = catalog
        .fabrics(&FilterState::fabrics())
        .await
        .expect_err("budget exhausted");

    let message = err.user_message();
    assert!(!message.contains("socket hangup"));
    assert!(!message.is_empty());
}

#[tokio::test]
async fn health_probe_reports_store_faults() {
    let inner = seeded_store();
    inner.push_fault(StoreError::PermissionDenied("bad key".into()));
    let catalog = Catalog::new(inner);

    assert!(catalog.check_connection().await.is_err());
}
