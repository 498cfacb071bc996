//! Cache Capability Traits
//!
//! Lets callers program against any store flavour, timed or plain.

use chrono::{DateTime, Utc};

use crate::cache::entry::Expiry;
use crate::cache::store::Store;
use crate::error::Result;

/// Operations shared by every cache flavour.
pub trait Cache<V> {
    /// Expiration carried by each entry.
    type Expiry;

    fn set(&self, key: &str, value: V, expires_at: Self::Expiry) -> Result<()>;
    fn update_value(&self, key: &str, value: V) -> Result<()>;
    fn has(&self, key: &str) -> bool;
    fn get(&self, key: &str) -> Option<V>;
    fn delete(&self, key: &str);
}

/// A cache whose entries expire at an absolute instant.
pub trait TimedCache<V>: Cache<V, Expiry = DateTime<Utc>> {
    fn expiration_time(&self, key: &str) -> Option<DateTime<Utc>>;
    fn update_expires_at(&self, key: &str, expires_at: DateTime<Utc>) -> Result<()>;
}

impl<V: Clone, E: Expiry> Cache<V> for Store<V, E> {
    type Expiry = E;

    fn set(&self, key: &str, value: V, expires_at: E) -> Result<()> {
        Store::set(self, key, value, expires_at)
    }

    fn update_value(&self, key: &str, value: V) -> Result<()> {
        Store::update_value(self, key, value)
    }

    fn has(&self, key: &str) -> bool {
        Store::has(self, key)
    }

    fn get(&self, key: &str) -> Option<V> {
        Store::get(self, key)
    }

    fn delete(&self, key: &str) {
        Store::delete(self, key)
    }
}

impl<V: Clone> TimedCache<V> for Store<V, DateTime<Utc>> {
    fn expiration_time(&self, key: &str) -> Option<DateTime<Utc>> {
        Store::expiration_time(self, key)
    }

    fn update_expires_at(&self, key: &str, expires_at: DateTime<Utc>) -> Result<()> {
        Store::update_expires_at(self, key, expires_at)
    }
}
