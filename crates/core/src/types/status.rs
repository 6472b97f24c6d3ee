//! Status enums for marketplace entities.
//!
//! These mirror the enum columns in the hosted store, so serde renames must
//! match the stored string values exactly.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a fabric listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FabricStatus {
    #[default]
    Active,
    OutOfStock,
    Discontinued,
    PendingReview,
}

/// Order lifecycle status.
///
/// Orders move `Created -> Confirmed -> Shipped -> Delivered`; `Cancelled`
/// is terminal from any pre-shipment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Created,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Parse a UI-facing status token; `"all"` and unknown tokens mean
    /// no status filter.
    #[must_use]
    pub fn from_str_param(s: &str) -> Option<Self> {
        match s {
            "created" => Some(Self::Created),
            "confirmed" => Some(Self::Confirmed),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Stored string value, as the remote store's enum column spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Designer availability as displayed in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    #[default]
    Busy,
}

impl Availability {
    /// Display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Busy => "busy",
        }
    }
}

/// Designer seniority tier stored on the profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Expert,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_param_roundtrip() {
        for status in [
            OrderStatus::Created,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str_param(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::from_str_param("all"), None);
        assert_eq!(OrderStatus::from_str_param("bogus"), None);
    }

    #[test]
    fn test_status_serde_matches_store_spelling() {
        let json = serde_json::to_string(&FabricStatus::OutOfStock).expect("serialize");
        assert_eq!(json, "\"out_of_stock\"");
        let back: Availability = serde_json::from_str("\"available\"").expect("deserialize");
        assert_eq!(back, Availability::Available);
    }
}
