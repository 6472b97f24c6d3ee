//! Result normalization: raw store rows in, flat view models out.
//!
//! Applied independently to every row of a fetched page. Missing nested
//! relations become documented defaults instead of nulls, and derived
//! display strings are computed here exactly once - nothing downstream
//! recomputes them. The only error a normalizer raises is a structurally
//! invalid row (missing or malformed identity, or a present field of the
//! wrong type).

mod defaults;
mod designer;
mod fabric;
mod order;

pub use defaults::Defaults;
pub use designer::{DesignerView, normalize_designer};
pub use fabric::{FabricView, normalize_fabric};
pub use order::{OrderView, normalize_order};

use serde_json::Value;
use uuid::Uuid;

use crate::error::NormalizeError;

/// Extract and validate a row's identity field.
fn identity(raw: &Value, collection: &'static str) -> Result<Uuid, NormalizeError> {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .ok_or(NormalizeError::MissingId { collection })?;

    id.parse().map_err(|_| NormalizeError::MalformedId {
        collection,
        value: id.to_string(),
    })
}

/// Deserialize a raw row into its typed shape.
fn decode<T: serde::de::DeserializeOwned>(
    raw: &Value,
    collection: &'static str,
) -> Result<T, NormalizeError> {
    serde_json::from_value(raw.clone())
        .map_err(|source| NormalizeError::InvalidShape { collection, source })
}
