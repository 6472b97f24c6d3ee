//! Loomline Core - Shared types library.
//!
//! This crate provides common types used across all Loomline components:
//! - `catalog` - The query/filter/pagination pipeline over the hosted store
//! - `cli` - Command-line tools for catalog queries and health checks
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
