//! API Handlers
//!
//! HTTP request handlers, one per store operation.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::cache::{expires_in, TimedStore};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, ExpiresResponse, GetResponse, HasResponse, HealthResponse, SetRequest,
    SetResponse, UpdateExpiresRequest, UpdateResponse, UpdateValueRequest,
};

/// Application state shared across all handlers.
///
/// The store is internally synchronized, so handlers share it by cloning.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache store
    pub cache: TimedStore<Value>,
    /// TTL in seconds for set requests without an explicit expiration
    pub default_ttl: u64,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: TimedStore<Value>, default_ttl: u64) -> Self {
        Self { cache, default_ttl }
    }

    /// Creates a new AppState with an empty store from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TimedStore::new(), config.default_ttl)
    }

    fn expiration_for(&self, req: &SetRequest) -> Result<DateTime<Utc>> {
        if let Some(expires_at) = req.expires_at {
            return Ok(expires_at);
        }
        expires_in(Duration::from_secs(req.ttl.unwrap_or(self.default_ttl)))
    }
}

/// Handler for PUT /set
///
/// Stores a value under a key, overwriting any existing entry.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    // Validate request
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let expires_at = state.expiration_for(&req)?;
    state.cache.set(req.key.clone(), req.value, expires_at)?;

    Ok(Json(SetResponse::new(req.key, expires_at)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let (value, expires_at) = state
        .cache
        .get_with_expiration(&key)
        .ok_or_else(|| CacheError::ItemNotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value, expires_at)))
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let exists = state.cache.has(&key);
    Json(HasResponse::new(key, exists))
}

/// Handler for DELETE /del/:key
///
/// Succeeds whether or not the key was present.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.cache.delete(&key);
    Json(DeleteResponse::new(key))
}

/// Handler for PATCH /value/:key
pub async fn update_value_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<UpdateValueRequest>,
) -> Result<Json<UpdateResponse>> {
    state.cache.update_value(&key, req.value)?;
    Ok(Json(UpdateResponse::new(key)))
}

/// Handler for PATCH /expires/:key
pub async fn update_expires_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<UpdateExpiresRequest>,
) -> Result<Json<UpdateResponse>> {
    state.cache.update_expires_at(&key, req.expires_at)?;
    Ok(Json(UpdateResponse::new(key)))
}

/// Handler for GET /expires/:key
///
/// Reports the stored expiration without evicting expired entries.
pub async fn expires_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ExpiresResponse>> {
    let expires_at = state
        .cache
        .expiration_time(&key)
        .ok_or_else(|| CacheError::ItemNotFound(key.clone()))?;

    Ok(Json(ExpiresResponse::new(key, expires_at)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
