//! Cache Entry Module
//!
//! Defines individual cache entries and the expiry policies they can carry.

use chrono::{DateTime, Utc};

// == Expiry Policy ==
/// Decides whether an entry is still live at a given instant.
///
/// Implemented by `DateTime<Utc>` for timed entries and by [`NoExpiry`] for
/// entries that live until they are deleted.
pub trait Expiry: Copy + Send + Sync + 'static {
    /// Returns true once `now` is strictly after the expiration instant.
    fn has_passed(&self, now: DateTime<Utc>) -> bool;
}

impl Expiry for DateTime<Utc> {
    fn has_passed(&self, now: DateTime<Utc>) -> bool {
        now > *self
    }
}

/// Expiry policy for entries that never expire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NoExpiry;

impl Expiry for NoExpiry {
    fn has_passed(&self, _now: DateTime<Utc>) -> bool {
        false
    }
}

// == Entry ==
/// A single cached record: a value and the instant it stops being served.
///
/// Entries do no locking of their own; the owning store guards them.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<V, E = DateTime<Utc>> {
    value: V,
    expires_at: E,
}

impl<V, E: Expiry> Entry<V, E> {
    // == Constructor ==
    /// Creates a new entry. No validation happens here; the store rejects
    /// entries that are already expired when they are inserted.
    pub fn new(value: V, expires_at: E) -> Self {
        Self { value, expires_at }
    }

    /// Returns the stored value without checking expiration.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Replaces the stored value, leaving the expiration untouched.
    pub fn set_value(&mut self, value: V) {
        self.value = value;
    }

    /// Consumes the entry and returns its value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns the expiration without checking it against the clock.
    pub fn expires_at(&self) -> E {
        self.expires_at
    }

    /// Replaces the expiration, leaving the value untouched.
    pub fn set_expires_at(&mut self, expires_at: E) {
        self.expires_at = expires_at;
    }

    // == Is Expired ==
    /// Checks the entry against the current time.
    ///
    /// Boundary condition: an entry whose expiration equals the current
    /// instant is still live; it expires strictly after that instant.
    pub fn has_expired(&self) -> bool {
        self.has_expired_at(Utc::now())
    }

    /// Checks the entry against an explicit instant.
    pub fn has_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.has_passed(now)
    }
}
