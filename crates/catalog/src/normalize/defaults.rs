//! Centralized display defaults for missing raw-record fields.
//!
//! Filling a neutral rating or a stock photo for an entity that lacks one
//! is a display-layer compromise, not a business rule. Keeping every such
//! value here (and making the set overridable) keeps that compromise in
//! one place.

use rust_decimal::Decimal;

/// Default values substituted by the normalizer. Construct with
/// [`Defaults::default`] and override individual fields as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    /// Placeholder for fabrics with no uploaded images.
    pub fabric_image: String,
    /// Placeholder for designers with no portfolio images.
    pub profile_image: String,
    /// Neutral rating for unrated entities.
    pub rating: f64,
    /// Hourly rate shown for designers who haven't set one.
    pub hourly_rate: Decimal,
    /// Years of experience assumed when the profile omits it.
    pub years_experience: u32,
    /// Bio shown for designers without one.
    pub bio: String,
    /// Display name for listings whose vendor relation is absent.
    pub vendor_name: String,
    /// Specialty attributed to designers with an empty specialty list.
    pub specialty: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            fabric_image: "https://images.unsplash.com/photo-1528459801416-a9e53bbf4e17?w=400"
                .to_string(),
            profile_image: "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=400"
                .to_string(),
            rating: 4.5,
            hourly_rate: Decimal::from(85),
            years_experience: 5,
            bio: "Professional fashion designer with expertise in creating unique designs."
                .to_string(),
            vendor_name: "Marketplace Vendor".to_string(),
            specialty: "Fashion Design".to_string(),
        }
    }
}
