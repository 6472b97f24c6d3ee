//! Designer profile normalization.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loomline_core::{Availability, DesignerId, ExperienceLevel};

use crate::error::NormalizeError;

use super::{Defaults, decode, identity};

#[derive(Debug, Default, Deserialize)]
struct DesignerRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    specialties: Vec<String>,
    #[serde(default)]
    experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    years_experience: Option<u32>,
    #[serde(default)]
    hourly_rate: Option<Decimal>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    available: Option<bool>,
    #[serde(default)]
    designer_portfolios: Vec<PortfolioRelation>,
}

#[derive(Debug, Deserialize)]
struct PortfolioRelation {
    #[serde(default)]
    image_url: Option<String>,
}

/// Presentation-ready designer profile.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignerView {
    pub id: DesignerId,
    pub name: String,
    /// Derived headline (e.g., "Senior Fashion Designer"), computed once.
    pub title: String,
    pub location: String,
    pub bio: String,
    pub specializations: Vec<String>,
    pub experience_level: ExperienceLevel,
    /// Raw years of experience; the refiner buckets this.
    pub years_experience: u32,
    pub hourly_rate: Decimal,
    pub rating: f64,
    pub availability: Availability,
    /// First portfolio image, or the placeholder.
    pub profile_image: String,
    pub portfolio_images: Vec<String>,
}

/// Derived headline for a profile. Only experts earn the "Senior" prefix.
fn derive_title(level: ExperienceLevel) -> String {
    let prefix = match level {
        ExperienceLevel::Expert => "Senior",
        _ => "Professional",
    };
    format!("{prefix} Fashion Designer")
}

/// Normalize one raw designer row.
///
/// # Errors
///
/// Returns a [`NormalizeError`] only for structurally invalid rows.
pub fn normalize_designer(raw: &Value, defaults: &Defaults) -> Result<DesignerView, NormalizeError> {
    let id = identity(raw, "designers")?;
    let row: DesignerRow = decode(raw, "designers")?;

    let portfolio_images: Vec<String> = row
        .designer_portfolios
        .iter()
        .filter_map(|portfolio| portfolio.image_url.clone())
        .collect();

    let profile_image = portfolio_images
        .first()
        .cloned()
        .unwrap_or_else(|| defaults.profile_image.clone());

    let specializations = if row.specialties.is_empty() {
        vec![defaults.specialty.clone()]
    } else {
        row.specialties
    };

    let experience_level = row.experience_level.unwrap_or_default();

    Ok(DesignerView {
        id: id.into(),
        name: row.name.unwrap_or_default(),
        title: derive_title(experience_level),
        location: row.location.unwrap_or_default(),
        bio: row.bio.unwrap_or_else(|| defaults.bio.clone()),
        specializations,
        experience_level,
        years_experience: row.years_experience.unwrap_or(defaults.years_experience),
        hourly_rate: row.hourly_rate.unwrap_or(defaults.hourly_rate),
        rating: row.rating.unwrap_or(defaults.rating),
        availability: if row.available.unwrap_or(false) {
            Availability::Available
        } else {
            Availability::Busy
        },
        profile_image,
        portfolio_images,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_expert_gets_senior_title() {
        let raw = json!({
            "id": "22222222-2222-2222-2222-222222222222",
            "name": "Ava Laurent",
            "experience_level": "expert",
            "years_experience": 18,
            "available": true
        });

        let view = normalize_designer(&raw, &Defaults::default()).expect("normalize");
        assert_eq!(view.title, "Senior Fashion Designer");
        assert_eq!(view.availability, Availability::Available);
        assert_eq!(view.years_experience, 18);
    }

    #[test]
    fn test_sparse_row_gets_defaults() {
        let defaults = Defaults::default();
        let raw = json!({"id": "22222222-2222-2222-2222-222222222222"});

        let view = normalize_designer(&raw, &defaults).expect("normalize");
        assert_eq!(view.title, "Professional Fashion Designer");
        assert_eq!(view.bio, defaults.bio);
        assert_eq!(view.hourly_rate, defaults.hourly_rate);
        assert_eq!(view.specializations, vec![defaults.specialty.clone()]);
        assert_eq!(view.profile_image, defaults.profile_image);
        assert_eq!(view.availability, Availability::Busy);
    }

    #[test]
    fn test_portfolio_images_carry_through() {
        let raw = json!({
            "id": "22222222-2222-2222-2222-222222222222",
            "designer_portfolios": [
                {"image_url": "https://cdn.example.com/p1.jpg"},
                {"image_url": null},
                {"image_url": "https://cdn.example.com/p2.jpg"}
            ]
        });

        let view = normalize_designer(&raw, &Defaults::default()).expect("normalize");
        assert_eq!(view.profile_image, "https://cdn.example.com/p1.jpg");
        assert_eq!(view.portfolio_images.len(), 2);
    }
}
