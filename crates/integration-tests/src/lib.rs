//! Integration tests for Loomline.
//!
//! Every scenario in `tests/` runs fully in-process against
//! [`loomline_catalog::store::MemoryStore`], so there is nothing to start
//! first:
//!
//! ```bash
//! cargo test -p loomline-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_search` - end-to-end filter, sort, and pagination flows
//! - `designer_refinement` - client-side narrowing of designer pages
//! - `retry_semantics` - failure classification through the retry layer
//!
//! This crate exports the seed-data builders the test files share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use serde_json::{Value, json};

use loomline_catalog::Collection;
use loomline_catalog::store::MemoryStore;

/// Fixed fabric rows covering a spread of materials, prices, and ages.
#[must_use]
pub fn fabric_rows() -> Vec<Value> {
    vec![
        json!({
            "id": "11111111-1111-1111-1111-111111111111",
            "name": "Organic Cotton Twill",
            "material": "cotton",
            "price_per_yard": 12.5,
            "gsm": 280,
            "minimum_order_quantity": 50,
            "status": "active",
            "created_at": "2026-02-05T00:00:00Z",
            "vendor": {"name": "Mill & Thread", "verified": true}
        }),
        json!({
            "id": "22222222-2222-2222-2222-222222222222",
            "name": "Cotton Poplin",
            "material": "cotton",
            "price_per_yard": 15.0,
            "gsm": 120,
            "minimum_order_quantity": 100,
            "status": "active",
            "created_at": "2026-02-04T00:00:00Z"
        }),
        json!({
            "id": "33333333-3333-3333-3333-333333333333",
            "name": "Cotton Canvas",
            "material": "cotton",
            "price_per_yard": 35.0,
            "gsm": 400,
            "minimum_order_quantity": 25,
            "status": "active",
            "created_at": "2026-02-03T00:00:00Z"
        }),
        json!({
            "id": "44444444-4444-4444-4444-444444444444",
            "name": "Silk Charmeuse",
            "material": "silk",
            "price_per_yard": 42.0,
            "gsm": 90,
            "minimum_order_quantity": 10,
            "status": "active",
            "created_at": "2026-02-02T00:00:00Z"
        }),
        json!({
            "id": "55555555-5555-5555-5555-555555555555",
            "name": "Linen Blend",
            "material": "linen",
            "price_per_yard": 18.0,
            "gsm": 200,
            "minimum_order_quantity": 75,
            "status": "active",
            "created_at": "2026-02-01T00:00:00Z"
        }),
    ]
}

/// Designer rows whose years of experience span every bucket.
#[must_use]
pub fn designer_rows() -> Vec<Value> {
    vec![
        json!({
            "id": "aaaaaaaa-0000-0000-0000-000000000001",
            "name": "Priya Raman",
            "years_experience": 2,
            "experience_level": "entry",
            "rating": 4.2,
            "available": true,
            "hourly_rate": 45,
            "specialties": ["sustainable", "knitwear"]
        }),
        json!({
            "id": "aaaaaaaa-0000-0000-0000-000000000002",
            "name": "Jonas Weiss",
            "years_experience": 5,
            "experience_level": "mid",
            "rating": 4.6,
            "available": false,
            "hourly_rate": 80,
            "specialties": ["tailoring"]
        }),
        json!({
            "id": "aaaaaaaa-0000-0000-0000-000000000003",
            "name": "Mei Tanaka",
            "years_experience": 8,
            "experience_level": "senior",
            "rating": 4.9,
            "available": true,
            "hourly_rate": 120,
            "specialties": ["couture", "tailoring"]
        }),
        json!({
            "id": "aaaaaaaa-0000-0000-0000-000000000004",
            "name": "Sofia Marchetti",
            "years_experience": 20,
            "experience_level": "expert",
            "rating": 5.0,
            "available": true,
            "hourly_rate": 200,
            "specialties": ["couture"]
        }),
    ]
}

/// Order rows across several statuses and amounts.
#[must_use]
pub fn order_rows() -> Vec<Value> {
    vec![
        json!({
            "id": "bbbbbbbb-0000-0000-0000-000000000001",
            "order_number": "LM-1001",
            "status": "created",
            "total_amount": 350.0,
            "created_at": "2026-03-10T09:00:00Z",
            "buyer": {"name": "Atelier Nord"},
            "vendor": {"name": "Mill & Thread"},
            "order_items": [{}, {}]
        }),
        json!({
            "id": "bbbbbbbb-0000-0000-0000-000000000002",
            "order_number": "LM-1002",
            "status": "shipped",
            "total_amount": 1200.0,
            "created_at": "2026-03-08T09:00:00Z",
            "buyer": {"name": "Studio Kite"},
            "vendor": {"name": "Mill & Thread"},
            "order_items": [{}]
        }),
        json!({
            "id": "bbbbbbbb-0000-0000-0000-000000000003",
            "order_number": "LM-1003",
            "status": "delivered",
            "total_amount": 90.0,
            "created_at": "2026-03-01T09:00:00Z",
            "buyer": {"name": "Atelier Nord"},
            "vendor": {"name": "Coastal Weaves"},
            "order_items": [{}, {}, {}]
        }),
    ]
}

/// A store seeded with every fixture collection.
#[must_use]
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.seed(Collection::Fabrics, fabric_rows());
    store.seed(Collection::Designers, designer_rows());
    store.seed(Collection::Orders, order_rows());
    store
}
