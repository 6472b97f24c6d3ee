//! Query builder: filter state in, immutable descriptor out.
//!
//! [`build_query`] is a pure function. The same [`FilterState`] always
//! yields a structurally equal [`QueryDescriptor`], which is what makes
//! the whole read path testable by equality.

use rust_decimal::Decimal;

use crate::filter::{Collection, FacetSelection, FilterState, SortSpec};

/// Comparison operator within a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Exact equality.
    Eq,
    /// Set membership.
    In,
    /// Greater than or equal.
    Gte,
    /// Less than or equal.
    Lte,
    /// Case-insensitive substring match.
    ILike,
}

/// Predicate operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateValue {
    Text(String),
    Number(Decimal),
    Set(Vec<String>),
}

/// A single condition: field, operator, value.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Remote column.
    pub field: &'static str,
    /// Comparison operator.
    pub op: Operator,
    /// Operand.
    pub value: PredicateValue,
}

impl Predicate {
    /// `field IN values`. The values are sorted, so equal selections made
    /// in different orders produce equal predicates.
    #[must_use]
    pub fn within(field: &'static str, mut values: Vec<String>) -> Self {
        values.sort_unstable();
        Self {
            field,
            op: Operator::In,
            value: PredicateValue::Set(values),
        }
    }

    /// `field >= bound`.
    #[must_use]
    pub const fn at_least(field: &'static str, bound: Decimal) -> Self {
        Self {
            field,
            op: Operator::Gte,
            value: PredicateValue::Number(bound),
        }
    }

    /// `field <= bound`.
    #[must_use]
    pub const fn at_most(field: &'static str, bound: Decimal) -> Self {
        Self {
            field,
            op: Operator::Lte,
            value: PredicateValue::Number(bound),
        }
    }

    /// Case-insensitive substring match on `field`.
    #[must_use]
    pub const fn contains(field: &'static str, term: String) -> Self {
        Self {
            field,
            op: Operator::ILike,
            value: PredicateValue::Text(term),
        }
    }

    /// `field = value`.
    #[must_use]
    pub const fn equals(field: &'static str, value: String) -> Self {
        Self {
            field,
            op: Operator::Eq,
            value: PredicateValue::Text(value),
        }
    }
}

/// The `{offset, limit}` slice requested from the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// Store-agnostic representation of one fetch.
///
/// Built once per fetch and never mutated afterwards; a filter edit builds
/// a fresh descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    /// Target collection.
    pub collection: Collection,
    /// AND-combined predicates.
    pub predicates: Vec<Predicate>,
    /// OR-combined free-text search predicates; empty when no search.
    pub search_group: Vec<Predicate>,
    /// Sort specification.
    pub sort: SortSpec,
    /// Page window.
    pub window: PageWindow,
}

impl QueryDescriptor {
    /// Whether this descriptor carries a free-text search. Search results
    /// are not cached by the store client.
    #[must_use]
    pub const fn has_search(&self) -> bool {
        !self.search_group.is_empty()
    }
}

/// Translate filter state into a query descriptor.
///
/// - Whitespace-only search is treated as absent.
/// - An empty term set adds no predicate for that facet.
/// - Range bounds are added independently, and only when they parse to a
///   non-negative number; anything else is silently ignored for that side.
/// - The page number is clamped to >= 1 before computing the offset.
#[must_use]
pub fn build_query(filter: &FilterState) -> QueryDescriptor {
    let schema = &filter.schema;

    let search_group = match filter.search.trim() {
        "" => Vec::new(),
        term => schema
            .searchable_fields
            .iter()
            .map(|&field| Predicate::contains(field, term.to_string()))
            .collect(),
    };

    let mut predicates = Vec::new();
    for (&field, selection) in &filter.facets {
        match selection {
            FacetSelection::Terms(values) => {
                if !values.is_empty() {
                    predicates.push(Predicate::within(field, values.iter().cloned().collect()));
                }
            }
            FacetSelection::Range(range) => {
                if let Some(min) = parse_bound(&range.min) {
                    predicates.push(Predicate::at_least(field, min));
                }
                if let Some(max) = parse_bound(&range.max) {
                    predicates.push(Predicate::at_most(field, max));
                }
            }
        }
    }

    let page = u64::from(filter.page.max(1));
    let page_size = u64::from(filter.page_size);

    QueryDescriptor {
        collection: schema.collection,
        predicates,
        search_group,
        sort: schema.resolve_sort(&filter.sort_by),
        window: PageWindow {
            offset: (page - 1) * page_size,
            limit: page_size,
        },
    }
}

/// Parse one range bound. Empty, non-numeric, and negative input all mean
/// "unbounded" rather than an error - the filter UI stays permissive.
fn parse_bound(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .filter(|value| !value.is_sign_negative())
}
