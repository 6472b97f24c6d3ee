//! Client-side narrowing of designer pages after the remote fetch.

use rust_decimal::Decimal;

use loomline_catalog::refine::{DesignerRefinement, ExperienceBand};
use loomline_catalog::{Catalog, FilterState};

use loomline_integration_tests::seeded_store;

// ============================================================================
// Experience Buckets
// ============================================================================

#[tokio::test]
async fn entry_bucket_keeps_only_one_to_three_years() {
    let catalog = Catalog::new(seeded_store());

    let refinement = DesignerRefinement {
        experience_bands: vec![ExperienceBand::Entry],
        ..Default::default()
    };

    let page = catalog
        .designers(&FilterState::designers(), &refinement)
        .await
        .expect("fetch")
        .into_page()
        .expect("latest");

    // Fixture years are 2, 5, 8, 20; only the two-year profile survives.
    assert_eq!(page.items.len(), 1);
    assert_eq!(
        page.items.first().map(|d| d.years_experience),
        Some(2)
    );
}

#[tokio::test]
async fn multiple_buckets_union_their_members() {
    let catalog = Catalog::new(seeded_store());

    let refinement = DesignerRefinement {
        experience_bands: vec![ExperienceBand::Entry, ExperienceBand::Expert],
        ..Default::default()
    };

    let page = catalog
        .designers(&FilterState::designers(), &refinement)
        .await
        .expect("fetch")
        .into_page()
        .expect("latest");

    let years: Vec<u32> = page.items.iter().map(|d| d.years_experience).collect();
    assert_eq!(years.len(), 2);
    assert!(years.contains(&2));
    assert!(years.contains(&20));
}

// ============================================================================
// Availability + Rating
// ============================================================================

#[tokio::test]
async fn immediate_token_matches_available_profiles() {
    let catalog = Catalog::new(seeded_store());

    let refinement = DesignerRefinement {
        availability: vec!["immediate".into()],
        ..Default::default()
    };

    let page = catalog
        .designers(&FilterState::designers(), &refinement)
        .await
        .expect("fetch")
        .into_page()
        .expect("latest");

    // Three of the four fixture profiles are currently available.
    assert_eq!(page.items.len(), 3);
}

#[tokio::test]
async fn rating_floor_and_bucket_intersect() {
    let catalog = Catalog::new(seeded_store());

    let refinement = DesignerRefinement {
        experience_bands: vec![ExperienceBand::Senior, ExperienceBand::Expert],
        min_rating: Some(4.95),
        ..Default::default()
    };

    let page = catalog
        .designers(&FilterState::designers(), &refinement)
        .await
        .expect("fetch")
        .into_page()
        .expect("latest");

    // Senior(8y, 4.9) misses the floor; expert(20y, 5.0) clears both.
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items.first().map(|d| d.rating), Some(5.0));
}

#[tokio::test]
async fn rate_range_intersects_experience_buckets() {
    let catalog = Catalog::new(seeded_store());

    // Fixture rates are 45, 80, 120, 200 at 2, 5, 8, 20 years.
    let refinement = DesignerRefinement {
        experience_bands: vec![ExperienceBand::Mid, ExperienceBand::Senior],
        rate_min: Some(Decimal::from(100)),
        rate_max: Some(Decimal::from(150)),
        ..Default::default()
    };

    let page = catalog
        .designers(&FilterState::designers(), &refinement)
        .await
        .expect("fetch")
        .into_page()
        .expect("latest");

    // The mid profile at $80 misses the rate floor; only the senior at
    // $120 clears both dimensions.
    assert_eq!(page.items.len(), 1);
    assert_eq!(
        page.items.first().map(|d| d.hourly_rate),
        Some(Decimal::from(120))
    );
}

// ============================================================================
// Refinement Laws
// ============================================================================

#[tokio::test]
async fn empty_refinement_is_identity() {
    let catalog = Catalog::new(seeded_store());

    let all = catalog
        .designers(&FilterState::designers(), &DesignerRefinement::default())
        .await
        .expect("fetch")
        .into_page()
        .expect("latest");

    assert_eq!(all.items.len(), 4);
}

#[tokio::test]
async fn refinement_never_expands_the_page() {
    let catalog = Catalog::new(seeded_store());
    let filter = FilterState::designers();

    let unrefined = catalog
        .designers(&filter, &DesignerRefinement::default())
        .await
        .expect("fetch")
        .into_page()
        .expect("latest");

    let refinement = DesignerRefinement {
        availability: vec!["available".into()],
        min_rating: Some(4.5),
        ..Default::default()
    };
    let refined = catalog
        .designers(&filter, &refinement)
        .await
        .expect("fetch")
        .into_page()
        .expect("latest");

    assert!(refined.items.len() <= unrefined.items.len());
    for kept in &refined.items {
        assert!(unrefined.items.iter().any(|d| d.id == kept.id));
    }
}

#[tokio::test]
async fn derived_titles_follow_experience_level() {
    let catalog = Catalog::new(seeded_store());

    let page = catalog
        .designers(&FilterState::designers(), &DesignerRefinement::default())
        .await
        .expect("fetch")
        .into_page()
        .expect("latest");

    for designer in &page.items {
        if designer.years_experience > 15 {
            assert_eq!(designer.title, "Senior Fashion Designer");
        } else {
            assert_eq!(designer.title, "Professional Fashion Designer");
        }
    }
}
