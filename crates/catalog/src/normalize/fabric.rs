//! Fabric row normalization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loomline_core::{FabricId, FabricStatus, Price};

use crate::error::NormalizeError;

use super::{Defaults, decode, identity};

/// A fabric row as the store returns it. Every field except the identity
/// is optional; the vendor and image relations may be entirely absent.
#[derive(Debug, Default, Deserialize)]
struct FabricRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    material: Option<String>,
    #[serde(default)]
    composition: Option<String>,
    #[serde(default)]
    price_per_yard: Option<Decimal>,
    #[serde(default)]
    gsm: Option<u32>,
    #[serde(default)]
    minimum_order_quantity: Option<u32>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    status: Option<FabricStatus>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    vendor: Option<VendorRelation>,
    #[serde(default)]
    fabric_images: Vec<ImageRelation>,
}

#[derive(Debug, Deserialize)]
struct VendorRelation {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    verified: bool,
}

#[derive(Debug, Deserialize)]
struct ImageRelation {
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    display_order: i32,
}

/// Presentation-ready fabric listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FabricView {
    pub id: FabricId,
    pub name: String,
    pub material: String,
    pub composition: String,
    /// Price per yard.
    pub price: Price,
    /// Precomputed display string (e.g., "$12.50/yd").
    pub price_display: String,
    /// Fabric weight in grams per square meter.
    pub gsm: u32,
    /// Minimum order quantity in yards.
    pub moq: u32,
    pub rating: f64,
    pub status: FabricStatus,
    pub vendor_name: String,
    pub vendor_verified: bool,
    /// Lowest-display-order image, or the placeholder.
    pub image_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Normalize one raw fabric row.
///
/// # Errors
///
/// Returns a [`NormalizeError`] only for structurally invalid rows.
pub fn normalize_fabric(raw: &Value, defaults: &Defaults) -> Result<FabricView, NormalizeError> {
    let id = identity(raw, "fabrics")?;
    let row: FabricRow = decode(raw, "fabrics")?;

    let price = Price::usd(row.price_per_yard.unwrap_or_default());
    let price_display = format!("{}/yd", price.display());

    let image_url = row
        .fabric_images
        .iter()
        .filter(|image| image.image_url.is_some())
        .min_by_key(|image| image.display_order)
        .and_then(|image| image.image_url.clone())
        .unwrap_or_else(|| defaults.fabric_image.clone());

    let (vendor_name, vendor_verified) = row.vendor.map_or_else(
        || (defaults.vendor_name.clone(), false),
        |vendor| {
            (
                vendor.name.unwrap_or_else(|| defaults.vendor_name.clone()),
                vendor.verified,
            )
        },
    );

    Ok(FabricView {
        id: id.into(),
        name: row.name.unwrap_or_default(),
        material: row.material.unwrap_or_default(),
        composition: row.composition.unwrap_or_default(),
        price,
        price_display,
        gsm: row.gsm.unwrap_or_default(),
        moq: row.minimum_order_quantity.unwrap_or_default(),
        rating: row.rating.unwrap_or(defaults.rating),
        status: row.status.unwrap_or_default(),
        vendor_name,
        vendor_verified,
        image_url,
        created_at: row.created_at,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_row_normalizes() {
        let raw = json!({
            "id": "11111111-1111-1111-1111-111111111111",
            "name": "Organic Cotton Twill",
            "material": "Cotton",
            "composition": "100% Organic Cotton",
            "price_per_yard": "12.50",
            "gsm": 220,
            "minimum_order_quantity": 50,
            "rating": 4.8,
            "status": "active",
            "vendor": {"name": "Mill & Co", "verified": true},
            "fabric_images": [
                {"image_url": "https://cdn.example.com/b.jpg", "display_order": 2},
                {"image_url": "https://cdn.example.com/a.jpg", "display_order": 1}
            ]
        });

        let view = normalize_fabric(&raw, &Defaults::default()).expect("normalize");
        assert_eq!(view.name, "Organic Cotton Twill");
        assert_eq!(view.price_display, "$12.50/yd");
        assert_eq!(view.vendor_name, "Mill & Co");
        assert!(view.vendor_verified);
        // Lowest display order wins.
        assert_eq!(view.image_url, "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn test_missing_relations_get_defaults() {
        let defaults = Defaults::default();
        let raw = json!({"id": "11111111-1111-1111-1111-111111111111"});

        let view = normalize_fabric(&raw, &defaults).expect("normalize");
        assert_eq!(view.image_url, defaults.fabric_image);
        assert_eq!(view.vendor_name, defaults.vendor_name);
        assert!(!view.vendor_verified);
        assert!((view.rating - defaults.rating).abs() < f64::EPSILON);
        assert_eq!(view.status, FabricStatus::Active);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let raw = json!({"name": "Mystery Fabric"});
        assert!(normalize_fabric(&raw, &Defaults::default()).is_err());
    }
}
