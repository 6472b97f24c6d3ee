//! Error types for the catalog pipeline.
//!
//! The store boundary classifies every failure into a typed variant up
//! front; nothing downstream inspects message text. The classification
//! drives both the retry decision ([`StoreError::is_transient`]) and the
//! user-facing message ([`StoreError::user_message`]), since remediation
//! differs per class.

use thiserror::Error;

/// Errors returned by a collection store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connectivity or availability failure - unreachable host, timeout,
    /// rate limit, paused project. Worth retrying.
    #[error("store unavailable: {0}")]
    Transient(String),

    /// A single-row lookup matched nothing. Never retried.
    #[error("not found: {0}")]
    NotFound(String),

    /// The query referenced a missing table or column. Retrying cannot
    /// help; the deployment is misconfigured.
    #[error("schema error: {0}")]
    Schema(String),

    /// The query was rejected by the store's access policy.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The store answered with a body we could not decode.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the retry executor should attempt this operation again.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// Message suitable for showing to an end user. Connectivity and
    /// configuration failures read differently because fixing them does.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Transient(_) => {
                "The catalog service is temporarily unavailable. Please check back in a moment."
            }
            Self::NotFound(_) => "We couldn't find what you were looking for.",
            Self::Schema(_) | Self::Parse(_) => {
                "The catalog is misconfigured. Please contact support."
            }
            Self::PermissionDenied(_) => {
                "You don't have access to this data. Please contact support."
            }
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        // Transport-level failures are the classic transient class; anything
        // that produced a response is classified from the status elsewhere.
        if err.is_connect() || err.is_timeout() || err.is_request() {
            Self::Transient(err.to_string())
        } else {
            Self::Schema(err.to_string())
        }
    }
}

/// Error raised when a raw store row cannot become a view model.
///
/// Absent optional fields are not errors - they get defaults. Only a
/// structurally broken row (no identity) is rejected.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The row is missing its identity field.
    #[error("{collection} row is missing its id")]
    MissingId {
        /// Collection the row came from.
        collection: &'static str,
    },

    /// The row's identity field is not a valid UUID.
    #[error("{collection} row has malformed id {value:?}")]
    MalformedId {
        /// Collection the row came from.
        collection: &'static str,
        /// The offending value.
        value: String,
    },

    /// A present field has the wrong type (e.g., a string where a number
    /// belongs).
    #[error("{collection} row has an invalid shape: {source}")]
    InvalidShape {
        /// Collection the row came from.
        collection: &'static str,
        /// Underlying decode error.
        source: serde_json::Error,
    },
}

/// Top-level pipeline error.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Remote fetch failed after the retry budget.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A fetched row was structurally invalid.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl CatalogError {
    /// User-facing message for the presentation layer.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Store(err) => err.user_message(),
            Self::Normalize(_) => "The catalog returned malformed data. Please contact support.",
        }
    }
}
