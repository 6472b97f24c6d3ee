//! Order row normalization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loomline_core::{OrderId, OrderStatus, Price};

use crate::error::NormalizeError;

use super::{Defaults, decode, identity};

#[derive(Debug, Default, Deserialize)]
struct OrderRow {
    #[serde(default)]
    order_number: Option<String>,
    #[serde(default)]
    status: Option<OrderStatus>,
    #[serde(default)]
    total_amount: Option<Decimal>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    buyer: Option<PartyRelation>,
    #[serde(default)]
    vendor: Option<PartyRelation>,
    #[serde(default)]
    order_items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PartyRelation {
    #[serde(default)]
    name: Option<String>,
}

/// Presentation-ready order summary.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub id: OrderId,
    pub order_number: String,
    pub status: OrderStatus,
    /// Precomputed status label (the stored spelling).
    pub status_label: &'static str,
    pub total: Price,
    pub total_display: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Precomputed date string (e.g., "Jan 5, 2026"), empty when unknown.
    pub date_display: String,
    pub buyer_name: String,
    pub vendor_name: String,
    pub item_count: usize,
}

/// Normalize one raw order row.
///
/// # Errors
///
/// Returns a [`NormalizeError`] only for structurally invalid rows.
pub fn normalize_order(raw: &Value, defaults: &Defaults) -> Result<OrderView, NormalizeError> {
    let id = identity(raw, "orders")?;
    let row: OrderRow = decode(raw, "orders")?;

    let status = row.status.unwrap_or_default();
    let total = Price::usd(row.total_amount.unwrap_or_default());
    let total_display = total.display();
    let date_display = row
        .created_at
        .map(|at| at.format("%b %-d, %Y").to_string())
        .unwrap_or_default();

    let party_name = |party: Option<PartyRelation>| {
        party
            .and_then(|p| p.name)
            .unwrap_or_else(|| defaults.vendor_name.clone())
    };

    Ok(OrderView {
        id: id.into(),
        order_number: row.order_number.unwrap_or_default(),
        status,
        status_label: status.as_str(),
        total,
        total_display,
        created_at: row.created_at,
        date_display,
        buyer_name: party_name(row.buyer),
        vendor_name: party_name(row.vendor),
        item_count: row.order_items.len(),
    })
}
