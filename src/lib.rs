//! Timed Cache - A thread-safe in-memory key-value cache
//!
//! Entries carry an optional absolute expiration that is enforced lazily,
//! on access to each key. An HTTP front end is provided in `api`.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{
    expires_in, Cache, Entry, Expiry, NoExpiry, PlainStore, Store, TimedCache, TimedStore,
    WeakStore,
};
pub use config::Config;
pub use error::{CacheError, Result};
