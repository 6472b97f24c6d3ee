//! Filter state and per-collection schemas.
//!
//! A [`FilterState`] is what the presentation layer mutates as the user
//! toggles facets; it is a plain value, created with defaults on view
//! mount and discarded on navigation. Each facet selection is a tagged
//! [`FacetSelection`] so the query builder can handle every kind
//! exhaustively instead of probing loosely-typed values at runtime.
//!
//! Range bounds are kept as the raw strings the user typed. Validation
//! happens in the query builder: a bound that does not parse is simply
//! ignored for that side, never an error.

use std::collections::{BTreeMap, BTreeSet};

/// The three list collections served by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Fabrics,
    Designers,
    Orders,
}

impl Collection {
    /// Table name in the hosted store.
    #[must_use]
    pub const fn table_name(&self) -> &'static str {
        match self {
            Self::Fabrics => "fabrics",
            Self::Designers => "designers",
            Self::Orders => "orders",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A resolved sort specification: remote field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    /// Remote column to sort on.
    pub field: &'static str,
    /// Direction.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on `field`.
    #[must_use]
    pub const fn asc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `field`.
    #[must_use]
    pub const fn desc(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }
}

/// Raw user input for a numeric range facet. Either side may be empty or
/// unparseable; such bounds are treated as unbounded by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeSelection {
    /// Lower bound as typed.
    pub min: String,
    /// Upper bound as typed.
    pub max: String,
}

impl RangeSelection {
    /// Build from optional bound strings.
    #[must_use]
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

/// One facet's current selection, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetSelection {
    /// Set-valued facet: "field IN selected". An empty set filters nothing.
    Terms(BTreeSet<String>),
    /// Numeric range facet with independently optional bounds.
    Range(RangeSelection),
}

/// Filter state for one list view.
///
/// Facets are keyed by the remote column name in a `BTreeMap` so the
/// derived query descriptor is deterministic regardless of the order the
/// user touched the controls.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Collection schema this state filters.
    pub schema: CollectionSchema,
    /// Free-text search input. Whitespace-only means no search.
    pub search: String,
    /// Facet selections keyed by remote column.
    pub facets: BTreeMap<&'static str, FacetSelection>,
    /// UI-facing sort token (e.g., "price-low"). Unknown tokens fall back
    /// to the collection default.
    pub sort_by: String,
    /// Current page, 1-based. Values below 1 are clamped by the builder.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl FilterState {
    /// Default state for the fabric catalog (24-item grid).
    #[must_use]
    pub fn fabrics() -> Self {
        Self::with_schema(CollectionSchema::FABRICS, 24)
    }

    /// Default state for the designer directory.
    #[must_use]
    pub fn designers() -> Self {
        Self::with_schema(CollectionSchema::DESIGNERS, 12)
    }

    /// Default state for the order dashboard.
    #[must_use]
    pub fn orders() -> Self {
        Self::with_schema(CollectionSchema::ORDERS, 10)
    }

    fn with_schema(schema: CollectionSchema, page_size: u32) -> Self {
        Self {
            schema,
            search: String::new(),
            facets: BTreeMap::new(),
            sort_by: String::new(),
            page: 1,
            page_size,
        }
    }

    /// Replace the term selection for a set facet.
    pub fn select_terms<I, S>(&mut self, field: &'static str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facets.insert(
            field,
            FacetSelection::Terms(values.into_iter().map(Into::into).collect()),
        );
    }

    /// Replace the bounds for a range facet.
    pub fn set_range(&mut self, field: &'static str, min: impl Into<String>, max: impl Into<String>) {
        self.facets
            .insert(field, FacetSelection::Range(RangeSelection::new(min, max)));
    }

    /// Reset everything except the collection and page size to defaults.
    pub fn clear(&mut self) {
        let page_size = self.page_size;
        *self = Self::with_schema(self.schema, page_size);
    }
}

/// Static description of one collection: which columns free-text search
/// covers, and how UI sort tokens map onto remote columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionSchema {
    /// Collection this schema describes.
    pub collection: Collection,
    /// Columns included in the free-text search OR-group.
    pub searchable_fields: &'static [&'static str],
    /// UI sort token -> resolved sort.
    sort_table: &'static [(&'static str, SortSpec)],
    /// Fallback for empty or unknown sort tokens.
    pub default_sort: SortSpec,
}

impl CollectionSchema {
    /// Fabric catalog: searchable by name, material, and composition;
    /// defaults to newest first.
    pub const FABRICS: Self = Self {
        collection: Collection::Fabrics,
        searchable_fields: &["name", "material", "composition"],
        sort_table: &[
            ("price-low", SortSpec::asc("price_per_yard")),
            ("price-high", SortSpec::desc("price_per_yard")),
            ("newest", SortSpec::desc("created_at")),
            ("rating", SortSpec::desc("rating")),
            ("moq-low", SortSpec::asc("minimum_order_quantity")),
            ("moq-high", SortSpec::desc("minimum_order_quantity")),
        ],
        default_sort: SortSpec::desc("created_at"),
    };

    /// Designer directory: searchable by name and bio; defaults to highest
    /// rated. "relevance" is an alias the directory UI sends for rating.
    pub const DESIGNERS: Self = Self {
        collection: Collection::Designers,
        searchable_fields: &["name", "bio"],
        sort_table: &[
            ("name", SortSpec::asc("name")),
            ("rating", SortSpec::desc("rating")),
            ("relevance", SortSpec::desc("rating")),
            ("experience", SortSpec::desc("years_experience")),
        ],
        default_sort: SortSpec::desc("rating"),
    };

    /// Order dashboard: searchable by order number; defaults to newest.
    pub const ORDERS: Self = Self {
        collection: Collection::Orders,
        searchable_fields: &["order_number"],
        sort_table: &[
            ("date", SortSpec::desc("created_at")),
            ("amount", SortSpec::desc("total_amount")),
            ("status", SortSpec::asc("status")),
        ],
        default_sort: SortSpec::desc("created_at"),
    };

    /// Resolve a UI sort token, falling back to the collection default.
    #[must_use]
    pub fn resolve_sort(&self, token: &str) -> SortSpec {
        self.sort_table
            .iter()
            .find(|(key, _)| *key == token)
            .map_or(self.default_sort, |(_, spec)| *spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_token_resolution() {
        let schema = CollectionSchema::FABRICS;
        assert_eq!(
            schema.resolve_sort("price-low"),
            SortSpec::asc("price_per_yard")
        );
        // Unknown and empty tokens fall back to the default.
        assert_eq!(schema.resolve_sort("bogus"), schema.default_sort);
        assert_eq!(schema.resolve_sort(""), schema.default_sort);
    }

    #[test]
    fn test_relevance_aliases_rating() {
        let schema = CollectionSchema::DESIGNERS;
        assert_eq!(schema.resolve_sort("relevance"), schema.resolve_sort("rating"));
    }

    #[test]
    fn test_clear_keeps_collection_and_page_size() {
        let mut filter = FilterState::fabrics();
        filter.search = "silk".into();
        filter.select_terms("material", ["Silk"]);
        filter.page = 4;

        filter.clear();

        assert_eq!(filter, FilterState::fabrics());
        assert_eq!(filter.page_size, 24);
    }
}
