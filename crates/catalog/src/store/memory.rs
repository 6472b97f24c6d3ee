//! In-memory collection store for tests and local development.
//!
//! Evaluates query descriptors over seeded JSON fixtures with the same
//! predicate semantics the hosted store applies remotely, so pipeline
//! tests exercise real descriptors end to end. Errors can be queued for
//! injection to drive the retry paths.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::{Collection, SortDirection, SortSpec};
use crate::query::{Operator, Predicate, PredicateValue, QueryDescriptor};

use super::{CollectionStore, Mutation, QueryPage, RawRecord};

/// Seeded, fault-injectable store fake.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<Collection, Vec<Value>>>,
    faults: Mutex<VecDeque<StoreError>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with fixture rows.
    pub fn seed(&self, collection: Collection, rows: Vec<Value>) {
        self.tables
            .lock()
            .expect("memory store poisoned")
            .insert(collection, rows);
    }

    /// Queue an error; each queued error consumes one subsequent call.
    pub fn push_fault(&self, error: StoreError) {
        self.faults
            .lock()
            .expect("memory store poisoned")
            .push_back(error);
    }

    fn take_fault(&self) -> Option<StoreError> {
        self.faults
            .lock()
            .expect("memory store poisoned")
            .pop_front()
    }

    fn rows(&self, collection: Collection) -> Vec<Value> {
        self.tables
            .lock()
            .expect("memory store poisoned")
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }
}

impl CollectionStore for MemoryStore {
    async fn query(&self, descriptor: &QueryDescriptor) -> Result<QueryPage, StoreError> {
        if let Some(fault) = self.take_fault() {
            return Err(fault);
        }

        let mut matched: Vec<Value> = self
            .rows(descriptor.collection)
            .into_iter()
            .filter(|row| row_matches(row, descriptor))
            .collect();

        sort_rows(&mut matched, descriptor.sort);
        let total = matched.len() as u64;

        let records = matched
            .into_iter()
            .skip(usize::try_from(descriptor.window.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(descriptor.window.limit).unwrap_or(usize::MAX))
            .collect();

        Ok(QueryPage { records, total })
    }

    async fn get_by_id(&self, collection: Collection, id: Uuid) -> Result<RawRecord, StoreError> {
        if let Some(fault) = self.take_fault() {
            return Err(fault);
        }

        self.rows(collection)
            .into_iter()
            .find(|row| row_id(row) == Some(id))
            .ok_or_else(|| StoreError::NotFound(format!("{collection} row {id}")))
    }

    async fn mutate(&self, collection: Collection, mutation: Mutation) -> Result<RawRecord, StoreError> {
        if let Some(fault) = self.take_fault() {
            return Err(fault);
        }

        let mut tables = self.tables.lock().expect("memory store poisoned");
        let rows = tables.entry(collection).or_default();

        match mutation {
            Mutation::Insert { mut row } => {
                if row.get("id").is_none()
                    && let Some(object) = row.as_object_mut()
                {
                    object.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
                }
                rows.push(row.clone());
                Ok(row)
            }
            Mutation::Update { id, changes } => {
                let row = rows
                    .iter_mut()
                    .find(|row| row_id(row) == Some(id))
                    .ok_or_else(|| StoreError::NotFound(format!("{collection} row {id}")))?;
                if let (Some(target), Some(patch)) = (row.as_object_mut(), changes.as_object()) {
                    for (key, value) in patch {
                        target.insert(key.clone(), value.clone());
                    }
                }
                Ok(row.clone())
            }
            Mutation::Delete { id } => {
                let index = rows
                    .iter()
                    .position(|row| row_id(row) == Some(id))
                    .ok_or_else(|| StoreError::NotFound(format!("{collection} row {id}")))?;
                Ok(rows.remove(index))
            }
        }
    }

    async fn health(&self) -> Result<(), StoreError> {
        self.take_fault().map_or(Ok(()), Err)
    }
}

fn row_id(row: &Value) -> Option<Uuid> {
    row.get("id")?.as_str()?.parse().ok()
}

fn row_matches(row: &Value, descriptor: &QueryDescriptor) -> bool {
    let search_ok = descriptor.search_group.is_empty()
        || descriptor
            .search_group
            .iter()
            .any(|predicate| predicate_matches(row, predicate));

    search_ok
        && descriptor
            .predicates
            .iter()
            .all(|predicate| predicate_matches(row, predicate))
}

fn predicate_matches(row: &Value, predicate: &Predicate) -> bool {
    let Some(field) = row.get(predicate.field) else {
        return false;
    };

    match (predicate.op, &predicate.value) {
        (Operator::Eq, PredicateValue::Text(expected)) => field.as_str() == Some(expected),
        (Operator::ILike, PredicateValue::Text(term)) => field
            .as_str()
            .is_some_and(|s| s.to_lowercase().contains(&term.to_lowercase())),
        (Operator::In, PredicateValue::Set(values)) => match field {
            // Array columns match on overlap, scalar columns on membership.
            Value::Array(elements) => elements
                .iter()
                .filter_map(Value::as_str)
                .any(|element| values.iter().any(|value| value == element)),
            Value::String(s) => values.iter().any(|value| value == s),
            _ => false,
        },
        (Operator::Gte, PredicateValue::Number(bound)) => {
            numeric(field).is_some_and(|n| n >= bound_f64(*bound))
        }
        (Operator::Lte, PredicateValue::Number(bound)) => {
            numeric(field).is_some_and(|n| n <= bound_f64(*bound))
        }
        _ => false,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

fn bound_f64(bound: Decimal) -> f64 {
    bound.to_f64().unwrap_or(f64::NAN)
}

fn sort_rows(rows: &mut [Value], sort: SortSpec) {
    rows.sort_by(|a, b| {
        let ordering = compare_field(a.get(sort.field), b.get(sort.field));
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare_field(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    match (a, b) {
        (Some(a), Some(b)) => match (numeric(a), numeric(b)) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => a.as_str().unwrap_or("").cmp(b.as_str().unwrap_or("")),
        },
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
