//! The remote collection-store boundary.
//!
//! The pipeline never talks to an ambient client handle; it consumes a
//! [`CollectionStore`] capability passed in explicitly. Production code
//! injects [`PostgrestStore`]; tests inject [`MemoryStore`], which
//! evaluates the same descriptors over seeded fixtures.
//!
//! Rows cross this boundary as raw [`serde_json::Value`] records. The
//! normalizer owns turning them into typed view models; the store stays
//! shape-agnostic.

mod memory;
mod postgrest;

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

use serde_json::Value;
use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::Collection;
use crate::query::QueryDescriptor;

/// An entity exactly as the remote store returned it. Nested relations
/// (vendor, images, portfolios) may be absent or null.
pub type RawRecord = Value;

/// One fetched page: the windowed rows plus the total match count across
/// the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPage {
    /// Rows within the requested window.
    pub records: Vec<RawRecord>,
    /// Total rows matching the predicates, ignoring the window.
    pub total: u64,
}

/// A write operation. The read pipeline never issues these; the
/// surrounding listing/order flows do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Insert a new row.
    Insert { row: Value },
    /// Merge `changes` into the row with `id`.
    Update { id: Uuid, changes: Value },
    /// Delete the row with `id`.
    Delete { id: Uuid },
}

/// Capability trait for the hosted collection-query service.
///
/// Any backend that supports equality, set-membership, numeric-range, and
/// substring predicates plus sort and offset/limit windowing can sit
/// behind this trait.
pub trait CollectionStore {
    /// Run a windowed query, returning matching rows and the total count.
    fn query(
        &self,
        descriptor: &QueryDescriptor,
    ) -> impl Future<Output = Result<QueryPage, StoreError>> + Send;

    /// Fetch a single row by id.
    ///
    /// Returns [`StoreError::NotFound`] when no row matches.
    fn get_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> impl Future<Output = Result<RawRecord, StoreError>> + Send;

    /// Apply a write and return the affected row.
    fn mutate(
        &self,
        collection: Collection,
        mutation: Mutation,
    ) -> impl Future<Output = Result<RawRecord, StoreError>> + Send;

    /// Cheap connectivity probe: a limit-1 read against the fabrics
    /// table. Used by the CLI health check before doing real work.
    fn health(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
