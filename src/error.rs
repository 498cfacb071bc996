//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// Every failed operation leaves the store exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The store behind a handle has been dropped
    #[error("cache cannot be nil")]
    NilCache,

    /// A pre-built item was required but none was supplied
    #[error("item cannot be nil")]
    NilItem,

    /// The item was already expired when it was inserted
    #[error("item has expired")]
    ItemExpired,

    /// A keyed update targeted a missing or expired key
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// A loosely-typed item was not an entry of the store's type
    #[error("value must be a cache entry of the expected type")]
    ValueTypeMismatch,

    /// Invalid request data
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::ItemNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::NilItem
            | CacheError::ItemExpired
            | CacheError::ValueTypeMismatch
            | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::NilCache => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
