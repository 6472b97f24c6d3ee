//! Client-side refinement of an already-fetched page.
//!
//! A few predicates are impractical to push into the remote query:
//! bucketed numeric ranges whose bucket definitions belong to the UI, and
//! availability tokens with aliases. They run here, over the normalized
//! view models of the current page.
//!
//! Combination rules mirror the remote query so local and remote
//! filtering compose losslessly: AND across dimensions, OR within a
//! dimension's selections, and a dimension with nothing selected is
//! skipped. Refinement only ever narrows; applying it twice equals
//! applying it once.
//!
//! Refinement does not correct the remote total count - see the design
//! notes for that trade-off.

use rust_decimal::Decimal;

use loomline_core::{Availability, OrderStatus};

use crate::normalize::{DesignerView, OrderView};

/// Named experience buckets from the directory UI, defined over raw
/// years of experience. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExperienceBand {
    /// 1-3 years.
    Entry,
    /// 4-7 years.
    Mid,
    /// 8-15 years.
    Senior,
    /// More than 15 years.
    Expert,
}

impl ExperienceBand {
    /// Parse a UI token.
    #[must_use]
    pub fn from_str_param(s: &str) -> Option<Self> {
        match s {
            "entry" => Some(Self::Entry),
            "mid" => Some(Self::Mid),
            "senior" => Some(Self::Senior),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }

    /// Whether `years` falls inside this bucket.
    #[must_use]
    pub const fn contains(self, years: u32) -> bool {
        match self {
            Self::Entry => years >= 1 && years <= 3,
            Self::Mid => years >= 4 && years <= 7,
            Self::Senior => years >= 8 && years <= 15,
            Self::Expert => years > 15,
        }
    }
}

/// Availability tokens the directory UI can send. "immediate" is an
/// alias: it matches explicitly available designers, not a distinct
/// stored state.
fn availability_token_matches(token: &str, actual: Availability) -> bool {
    token == actual.as_str() || (token == "immediate" && actual == Availability::Available)
}

/// Refinement dimensions for the designer directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignerRefinement {
    /// Selected experience buckets; empty means the dimension is skipped.
    pub experience_bands: Vec<ExperienceBand>,
    /// Selected availability tokens (including aliases).
    pub availability: Vec<String>,
    /// Minimum rating threshold.
    pub min_rating: Option<f64>,
    /// Hourly-rate bounds.
    pub rate_min: Option<Decimal>,
    pub rate_max: Option<Decimal>,
}

impl DesignerRefinement {
    /// Whether every dimension is unselected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn matches(&self, designer: &DesignerView) -> bool {
        let bands_ok = self.experience_bands.is_empty()
            || self
                .experience_bands
                .iter()
                .any(|band| band.contains(designer.years_experience));

        let availability_ok = self.availability.is_empty()
            || self
                .availability
                .iter()
                .any(|token| availability_token_matches(token, designer.availability));

        let rating_ok = self
            .min_rating
            .is_none_or(|threshold| designer.rating >= threshold);

        let rate_ok = self.rate_min.is_none_or(|min| designer.hourly_rate >= min)
            && self.rate_max.is_none_or(|max| designer.hourly_rate <= max);

        bands_ok && availability_ok && rating_ok && rate_ok
    }

    /// Keep only matching designers.
    #[must_use]
    pub fn apply(&self, items: Vec<DesignerView>) -> Vec<DesignerView> {
        if self.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|designer| self.matches(designer))
            .collect()
    }
}

/// Refinement dimensions for the order dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRefinement {
    /// Selected statuses; empty means the dimension is skipped.
    pub statuses: Vec<OrderStatus>,
    /// Order-total bounds.
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
}

impl OrderRefinement {
    /// Whether every dimension is unselected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn matches(&self, order: &OrderView) -> bool {
        let status_ok =
            self.statuses.is_empty() || self.statuses.iter().any(|status| *status == order.status);

        let amount_ok = self.amount_min.is_none_or(|min| order.total.amount >= min)
            && self.amount_max.is_none_or(|max| order.total.amount <= max);

        status_ok && amount_ok
    }

    /// Keep only matching orders.
    #[must_use]
    pub fn apply(&self, items: Vec<OrderView>) -> Vec<OrderView> {
        if self.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|order| self.matches(order))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::normalize::{Defaults, normalize_designer};

    use super::*;

    fn designer_with_experience(years: u32) -> DesignerView {
        let raw = json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "years_experience": years,
            "available": years % 2 == 0
        });
        normalize_designer(&raw, &Defaults::default()).expect("normalize")
    }

    fn designer_with_rate(rate: u32) -> DesignerView {
        let raw = json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "hourly_rate": rate
        });
        normalize_designer(&raw, &Defaults::default()).expect("normalize")
    }

    #[test]
    fn test_entry_band_keeps_only_entry_designers() {
        let designers: Vec<_> = [2, 5, 8].into_iter().map(designer_with_experience).collect();
        let refinement = DesignerRefinement {
            experience_bands: vec![ExperienceBand::Entry],
            ..Default::default()
        };

        let kept = refinement.apply(designers);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].years_experience, 2);
    }

    #[test]
    fn test_bands_or_within_dimension() {
        let designers: Vec<_> = [2, 5, 8, 20].into_iter().map(designer_with_experience).collect();
        let refinement = DesignerRefinement {
            experience_bands: vec![ExperienceBand::Entry, ExperienceBand::Expert],
            ..Default::default()
        };

        let kept = refinement.apply(designers);
        let years: Vec<_> = kept.iter().map(|d| d.years_experience).collect();
        assert_eq!(years, vec![2, 20]);
    }

    #[test]
    fn test_immediate_aliases_available() {
        let available = designer_with_experience(2); // even -> available
        let busy = designer_with_experience(3);
        let refinement = DesignerRefinement {
            availability: vec!["immediate".to_string()],
            ..Default::default()
        };

        let kept = refinement.apply(vec![available.clone(), busy]);
        assert_eq!(kept, vec![available]);
    }

    #[test]
    fn test_refinement_is_idempotent_and_never_expands() {
        let designers: Vec<_> = (1..=20).map(designer_with_experience).collect();
        let refinement = DesignerRefinement {
            experience_bands: vec![ExperienceBand::Mid],
            availability: vec!["available".to_string()],
            min_rating: Some(4.0),
            ..Default::default()
        };

        let once = refinement.apply(designers.clone());
        let twice = refinement.apply(once.clone());
        assert_eq!(once, twice);
        assert!(once.len() <= designers.len());
    }

    #[test]
    fn test_rate_bounds_are_independent_and_inclusive() {
        let designers: Vec<_> = [45, 80, 120, 200].into_iter().map(designer_with_rate).collect();

        let floor_only = DesignerRefinement {
            rate_min: Some(Decimal::from(80)),
            ..Default::default()
        };
        let kept = floor_only.apply(designers.clone());
        let rates: Vec<_> = kept.iter().map(|d| d.hourly_rate).collect();
        assert_eq!(rates, vec![Decimal::from(80), Decimal::from(120), Decimal::from(200)]);

        let both = DesignerRefinement {
            rate_min: Some(Decimal::from(50)),
            rate_max: Some(Decimal::from(150)),
            ..Default::default()
        };
        let kept = both.apply(designers);
        let rates: Vec<_> = kept.iter().map(|d| d.hourly_rate).collect();
        assert_eq!(rates, vec![Decimal::from(80), Decimal::from(120)]);
    }

    #[test]
    fn test_empty_refinement_skips_everything() {
        let designers: Vec<_> = [1, 10].into_iter().map(designer_with_experience).collect();
        let refinement = DesignerRefinement::default();
        assert_eq!(refinement.apply(designers.clone()), designers);
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert!(!ExperienceBand::Entry.contains(0));
        assert!(ExperienceBand::Entry.contains(1));
        assert!(ExperienceBand::Entry.contains(3));
        assert!(!ExperienceBand::Entry.contains(4));
        assert!(ExperienceBand::Senior.contains(15));
        assert!(!ExperienceBand::Expert.contains(15));
        assert!(ExperienceBand::Expert.contains(16));
    }
}
