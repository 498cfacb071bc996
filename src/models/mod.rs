//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{SetRequest, UpdateExpiresRequest, UpdateValueRequest, MAX_KEY_LENGTH};
pub use responses::{
    DeleteResponse, ExpiresResponse, GetResponse, HasResponse, HealthResponse, SetResponse,
    UpdateResponse,
};
