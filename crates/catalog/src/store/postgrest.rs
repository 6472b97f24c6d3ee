//! HTTP client for the hosted PostgREST-style collection store.
//!
//! Translates [`QueryDescriptor`]s into the store's query-parameter
//! dialect and classifies every failure into a typed [`StoreError`] at
//! this boundary - nothing above it ever inspects status codes or error
//! bodies. Non-search query responses are cached with `moka`
//! (5-minute TTL by default).

use std::sync::Arc;

use moka::future::Cache;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::filter::{Collection, SortDirection};
use crate::query::{Operator, Predicate, PredicateValue, QueryDescriptor};

use super::{CollectionStore, Mutation, QueryPage, RawRecord};

/// Client for the hosted collection-query service.
#[derive(Clone)]
pub struct PostgrestStore {
    inner: Arc<PostgrestStoreInner>,
}

struct PostgrestStoreInner {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
    cache: Cache<String, QueryPage>,
}

/// Error body shape returned by the store on failed requests.
#[derive(Debug, Default, Deserialize)]
struct StoreErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Store error code for an empty single-row lookup.
const CODE_NO_SINGLE_ROW: &str = "PGRST116";
/// Postgres error code for an undefined table.
const CODE_UNDEFINED_TABLE: &str = "42P01";
/// Postgres error code for an undefined column.
const CODE_UNDEFINED_COLUMN: &str = "42703";

impl PostgrestStore {
    /// Create a new store client.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(PostgrestStoreInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.clone(),
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    fn endpoint(&self, collection: Collection) -> Result<Url, StoreError> {
        self.inner
            .base_url
            .join(collection.table_name())
            .map_err(|e| StoreError::Schema(format!("bad endpoint for {collection}: {e}")))
    }

    fn headers(&self, prefer: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(key) = HeaderValue::from_str(&self.inner.api_key) {
            headers.insert("apikey", key.clone());
            if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.inner.api_key)) {
                headers.insert(reqwest::header::AUTHORIZATION, bearer);
            }
        }
        if let Some(prefer) = prefer {
            headers.insert("Prefer", HeaderValue::from_static(prefer));
        }
        headers
    }

    /// Turn a non-success response into a typed error.
    async fn classify_failure(response: reqwest::Response) -> StoreError {
        let status = response.status();
        let body: StoreErrorBody = response.json().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                StoreError::PermissionDenied(body.message)
            }
            StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => StoreError::Transient(format!(
                "store answered {status}: {}",
                body.message
            )),
            StatusCode::NOT_ACCEPTABLE => {
                // Single-object requests answer 406 when no row matched.
                StoreError::NotFound(body.message)
            }
            _ if body.code == CODE_NO_SINGLE_ROW => StoreError::NotFound(body.message),
            _ if body.code == CODE_UNDEFINED_TABLE || body.code == CODE_UNDEFINED_COLUMN => {
                StoreError::Schema(format!("{}: {}", body.code, body.message))
            }
            _ if status.is_server_error() => {
                StoreError::Transient(format!("store answered {status}: {}", body.message))
            }
            _ => StoreError::Schema(format!("store answered {status}: {}", body.message)),
        }
    }
}

impl CollectionStore for PostgrestStore {
    #[instrument(skip(self), fields(collection = %descriptor.collection))]
    async fn query(&self, descriptor: &QueryDescriptor) -> Result<QueryPage, StoreError> {
        let mut url = self.endpoint(descriptor.collection)?;
        let cache_key = {
            apply_descriptor(&mut url, descriptor);
            url.as_str().to_string()
        };

        // Search results change with every keystroke; caching them would
        // mostly produce dead entries.
        if !descriptor.has_search()
            && let Some(page) = self.inner.cache.get(&cache_key).await
        {
            debug!("cache hit for query");
            return Ok(page);
        }

        let response = self
            .inner
            .client
            .get(url)
            .headers(self.headers(Some("count=exact")))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let total_hint = content_range_total(response.headers());
        let records: Vec<RawRecord> = response.json().await?;
        let total = total_hint.unwrap_or(records.len() as u64);
        let page = QueryPage { records, total };

        if !descriptor.has_search() {
            self.inner.cache.insert(cache_key, page.clone()).await;
        }

        Ok(page)
    }

    #[instrument(skip(self), fields(collection = %collection, id = %id))]
    async fn get_by_id(&self, collection: Collection, id: Uuid) -> Result<RawRecord, StoreError> {
        let mut url = self.endpoint(collection)?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("limit", "1");

        let response = self
            .inner
            .client
            .get(url)
            .headers(self.headers(None))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let mut rows: Vec<RawRecord> = response.json().await?;
        rows.pop()
            .ok_or_else(|| StoreError::NotFound(format!("{collection} row {id}")))
    }

    #[instrument(skip(self, mutation), fields(collection = %collection))]
    async fn mutate(&self, collection: Collection, mutation: Mutation) -> Result<RawRecord, StoreError> {
        let mut url = self.endpoint(collection)?;
        let headers = self.headers(Some("return=representation"));

        let request = match &mutation {
            Mutation::Insert { row } => self.inner.client.post(url).headers(headers).json(row),
            Mutation::Update { id, changes } => {
                url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
                self.inner.client.patch(url).headers(headers).json(changes)
            }
            Mutation::Delete { id } => {
                url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
                self.inner.client.delete(url).headers(headers)
            }
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        // Writes invalidate cached reads for every collection; entries are
        // keyed by full URL, so per-collection invalidation would need a
        // scan anyway.
        self.inner.cache.invalidate_all();

        let mut rows: Vec<RawRecord> = response.json().await?;
        rows.pop().ok_or_else(|| {
            StoreError::NotFound(format!("{collection} mutation affected no rows"))
        })
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<(), StoreError> {
        let mut url = self.endpoint(Collection::Fabrics)?;
        url.query_pairs_mut()
            .append_pair("select", "id")
            .append_pair("limit", "1");

        let response = self
            .inner
            .client
            .get(url)
            .headers(self.headers(None))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::classify_failure(response).await)
        }
    }
}

/// Append a descriptor's predicates, sort, and window to the request URL.
fn apply_descriptor(url: &mut Url, descriptor: &QueryDescriptor) {
    let mut pairs = url.query_pairs_mut();

    for predicate in &descriptor.predicates {
        pairs.append_pair(predicate.field, &render_operand(predicate));
    }

    if !descriptor.search_group.is_empty() {
        let group = descriptor
            .search_group
            .iter()
            .map(|predicate| format!("{}.{}", predicate.field, render_operand(predicate)))
            .collect::<Vec<_>>()
            .join(",");
        pairs.append_pair("or", &format!("({group})"));
    }

    let direction = match descriptor.sort.direction {
        SortDirection::Ascending => "asc",
        SortDirection::Descending => "desc",
    };
    pairs.append_pair("order", &format!("{}.{direction}", descriptor.sort.field));
    pairs.append_pair("offset", &descriptor.window.offset.to_string());
    pairs.append_pair("limit", &descriptor.window.limit.to_string());
}

/// Render a predicate's operator and operand in the store's dialect.
fn render_operand(predicate: &Predicate) -> String {
    match (predicate.op, &predicate.value) {
        (Operator::Eq, PredicateValue::Text(value)) => format!("eq.{}", quote_value(value)),
        (Operator::ILike, PredicateValue::Text(term)) => {
            format!("ilike.{}", quote_value(&format!("*{term}*")))
        }
        (Operator::Gte, PredicateValue::Number(bound)) => format!("gte.{bound}"),
        (Operator::Lte, PredicateValue::Number(bound)) => format!("lte.{bound}"),
        (Operator::In, PredicateValue::Set(values)) => {
            let quoted = values
                .iter()
                .map(|value| quote_value(value))
                .collect::<Vec<_>>()
                .join(",");
            format!("in.({quoted})")
        }
        // A mismatched operator/operand pair cannot be built through the
        // Predicate constructors.
        _ => String::new(),
    }
}

/// Double-quote an operand value when it contains characters the filter
/// grammar treats as syntax, escaping embedded quotes and backslashes.
/// Without this, a term like `raw, unbleached` would split an `or=(...)`
/// group at the comma.
fn quote_value(value: &str) -> String {
    if value.contains([',', '.', ':', '(', ')', '"', '\\', ' ']) {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    } else {
        value.to_owned()
    }
}

/// Total match count from a `Content-Range` header (`0-23/57` or `*/57`).
fn content_range_total(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::CONTENT_RANGE)?
        .to_str()
        .ok()?
        .rsplit('/')
        .next()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::filter::FilterState;
    use crate::query::build_query;

    use super::*;

    #[test]
    fn test_descriptor_rendering() {
        let mut filter = FilterState::fabrics();
        filter.search = "cotton".into();
        filter.select_terms("material", ["Cotton", "Linen"]);
        filter.set_range("price_per_yard", "10", "20");
        filter.sort_by = "price-low".into();
        filter.page = 2;

        let descriptor = build_query(&filter);
        let mut url: Url = "https://store.example.com/rest/v1/".parse().expect("url");
        url = url.join("fabrics").expect("join");
        apply_descriptor(&mut url, &descriptor);

        let query = url.query().expect("query string");
        assert!(query.contains("material=in.%28Cotton%2CLinen%29"));
        assert!(query.contains("price_per_yard=gte.10"));
        assert!(query.contains("price_per_yard=lte.20"));
        assert!(query.contains("order=price_per_yard.asc"));
        assert!(query.contains("offset=24"));
        assert!(query.contains("limit=24"));
        assert!(query.contains("name.ilike.*cotton*"));
    }

    #[test]
    fn test_render_operand_dialect() {
        assert_eq!(
            render_operand(&Predicate::at_least("gsm", Decimal::from(120))),
            "gte.120"
        );
        assert_eq!(
            render_operand(&Predicate::contains("name", "silk".into())),
            "ilike.*silk*"
        );
        assert_eq!(
            render_operand(&Predicate::equals("status", "created".into())),
            "eq.created"
        );
    }

    #[test]
    fn test_operand_values_with_reserved_characters_are_quoted() {
        assert_eq!(
            render_operand(&Predicate::contains("name", "raw, unbleached".into())),
            "ilike.\"*raw, unbleached*\""
        );
        assert_eq!(
            render_operand(&Predicate::within(
                "material",
                vec!["Linen (heavy)".into(), "Cotton".into()],
            )),
            "in.(Cotton,\"Linen (heavy)\")"
        );
        assert_eq!(
            render_operand(&Predicate::equals("vendor_name", "Acme \"Mills\"".into())),
            "eq.\"Acme \\\"Mills\\\"\""
        );
    }

    #[test]
    fn test_content_range_total() {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_RANGE,
            HeaderValue::from_static("0-23/57"),
        );
        assert_eq!(content_range_total(&headers), Some(57));

        headers.insert(
            reqwest::header::CONTENT_RANGE,
            HeaderValue::from_static("*/0"),
        );
        assert_eq!(content_range_total(&headers), Some(0));

        assert_eq!(content_range_total(&HeaderMap::new()), None);
    }
}
