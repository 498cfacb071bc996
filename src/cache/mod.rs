//! Cache Module
//!
//! Provides an in-memory key-value store with lazy per-entry expiration.

mod entry;
mod store;
mod traits;


// Re-export public types
pub use entry::{Entry, Expiry, NoExpiry};
pub use store::{expires_in, PlainStore, Store, TimedStore, WeakStore};
pub use traits::{Cache, TimedCache};
