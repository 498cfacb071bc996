//! API Module
//!
//! HTTP handlers and routing that expose a shared `TimedStore` over REST.
//!
//! # Endpoints
//! - `PUT /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /has/:key` - Check for a live key
//! - `DELETE /del/:key` - Delete a key
//! - `PATCH /value/:key` - Update a value
//! - `GET|PATCH /expires/:key` - Read or update an expiration
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
