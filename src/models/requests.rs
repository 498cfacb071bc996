//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for the SET operation (PUT /set)
///
/// At most one of `ttl` and `expires_at` may be given; with neither, the
/// server's default TTL applies.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds; must be at least 1
    #[serde(default)]
    pub ttl: Option<u64>,
    /// Optional absolute expiration (RFC 3339)
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        if self.ttl == Some(0) {
            return Some("TTL must be at least 1 second".to_string());
        }
        if self.ttl.is_some() && self.expires_at.is_some() {
            return Some("Specify either ttl or expires_at, not both".to_string());
        }
        None
    }
}

/// Request body for PATCH /value/:key
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateValueRequest {
    /// The replacement value
    pub value: Value,
}

/// Request body for PATCH /expires/:key
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExpiresRequest {
    /// The new expiration (RFC 3339); may lie in the past
    pub expires_at: DateTime<Utc>,
}
