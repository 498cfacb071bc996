//! Cache Store Module
//!
//! Main cache engine: a HashMap of entries behind a single reader/writer
//! lock, with expiration enforced lazily on every keyed access.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::cache::entry::{Entry, Expiry, NoExpiry};
use crate::error::{CacheError, Result};

type EntryMap<V, E> = HashMap<String, Entry<V, E>>;

/// Store whose entries expire at an absolute UTC instant.
pub type TimedStore<V> = Store<V, DateTime<Utc>>;

/// Store whose entries live until they are deleted.
pub type PlainStore<V> = Store<V, NoExpiry>;

// == Cache Store ==
/// Thread-safe key-value store with lazy per-entry expiration.
///
/// Cloning a `Store` is cheap and yields another handle to the same map,
/// so one store can be shared across threads without an extra `Arc`.
///
/// Expired entries are never returned. They stay in the map until the next
/// access to their key finds them expired, at which point they are removed
/// under the write lock. There is no background sweep.
pub struct Store<V, E = DateTime<Utc>> {
    entries: Arc<RwLock<EntryMap<V, E>>>,
}

impl<V, E> Clone for Store<V, E> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V, E> Default for Store<V, E> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<V, E> fmt::Debug for Store<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}

impl<V, E: Expiry> Store<V, E> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores `value` under `key`, overwriting any existing entry.
    ///
    /// Fails with [`CacheError::ItemExpired`] if `expires_at` has already
    /// passed; the map is left untouched in that case.
    pub fn set(&self, key: impl Into<String>, value: V, expires_at: E) -> Result<()> {
        self.insert(key.into(), Entry::new(value, expires_at))
    }

    /// Stores a pre-built entry. `None` fails with [`CacheError::NilItem`].
    pub fn set_item(&self, key: impl Into<String>, item: Option<Entry<V, E>>) -> Result<()> {
        let entry = item.ok_or(CacheError::NilItem)?;
        self.insert(key.into(), entry)
    }

    /// Stores a loosely-typed item, which must be an `Entry<V, E>`.
    pub fn set_boxed(&self, key: impl Into<String>, item: Box<dyn Any + Send>) -> Result<()>
    where
        V: 'static,
    {
        let entry = item
            .downcast::<Entry<V, E>>()
            .map_err(|_| CacheError::ValueTypeMismatch)?;
        self.insert(key.into(), *entry)
    }

    fn insert(&self, key: String, entry: Entry<V, E>) -> Result<()> {
        let mut entries = self.entries.write();
        if entry.has_expired() {
            return Err(CacheError::ItemExpired);
        }
        trace!(key = %key, "storing entry");
        entries.insert(key, entry);
        Ok(())
    }

    // == Update Value ==
    /// Replaces the value stored under `key`, keeping its expiration.
    ///
    /// Fails with [`CacheError::ItemNotFound`] if the key is absent or its
    /// entry has expired; an expired entry is purged as a side effect.
    pub fn update_value(&self, key: &str, value: V) -> Result<()> {
        self.update_live(key, |entry| entry.set_value(value))
    }

    fn update_live(&self, key: &str, update: impl FnOnce(&mut Entry<V, E>)) -> Result<()> {
        let mut entries = self.entries.write();

        match entries.get_mut(key) {
            Some(entry) if !entry.has_expired() => {
                update(entry);
                return Ok(());
            }
            Some(_) => {}
            None => return Err(CacheError::ItemNotFound(key.to_string())),
        }

        entries.remove(key);
        debug!(key, "evicted expired entry on update");
        Err(CacheError::ItemNotFound(key.to_string()))
    }

    // == Has ==
    /// Returns true if `key` holds a live entry. Evicts an expired one.
    pub fn has(&self, key: &str) -> bool {
        self.read_live(key, |_| ()).is_some()
    }

    // == Get ==
    /// Returns a clone of the live value under `key`.
    ///
    /// Missing and expired keys both yield `None`; an expired entry is
    /// removed from the map before returning.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.read_live(key, |entry| entry.value().clone())
    }

    fn read_live<R>(&self, key: &str, read: impl FnOnce(&Entry<V, E>) -> R) -> Option<R> {
        {
            let entries = self.entries.read();
            let entry = entries.get(key)?;
            if !entry.has_expired() {
                return Some(read(entry));
            }
        }

        self.evict_if_expired(key);
        None
    }

    /// Removes `key` under the write lock if its entry is still expired.
    fn evict_if_expired(&self, key: &str) {
        let mut entries = self.entries.write();
        // Another writer may have replaced the entry since the read lock was released.
        if entries.get(key).is_some_and(Entry::has_expired) {
            entries.remove(key);
            debug!(key, "evicted expired entry");
        }
    }

    // == Delete ==
    /// Removes `key`. Deleting a missing key is a no-op.
    pub fn delete(&self, key: &str) {
        if self.entries.write().remove(key).is_some() {
            trace!(key, "deleted entry");
        }
    }

    // == Length ==
    /// Returns the number of entries held, including expired entries that
    /// have not been accessed since they expired.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns a handle that does not keep the store alive.
    pub fn downgrade(&self) -> WeakStore<V, E> {
        WeakStore {
            entries: Arc::downgrade(&self.entries),
        }
    }
}

/// Returns the instant `ttl` from now.
pub fn expires_in(ttl: Duration) -> Result<DateTime<Utc>> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .ok_or_else(|| CacheError::InvalidRequest(format!("TTL {ttl:?} is out of range")))
}

impl<V> Store<V, DateTime<Utc>> {
    /// Stores `value` under `key` for `ttl` from now.
    pub fn set_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) -> Result<()> {
        self.set(key, value, expires_in(ttl)?)
    }

    /// Returns the live value under `key` together with its expiration,
    /// both read from the same entry. Evicts an expired entry like [`Store::get`].
    pub fn get_with_expiration(&self, key: &str) -> Option<(V, DateTime<Utc>)>
    where
        V: Clone,
    {
        self.read_live(key, |entry| (entry.value().clone(), entry.expires_at()))
    }

    // == Update Expiration ==
    /// Replaces the expiration of `key`, keeping its value.
    ///
    /// A past instant is accepted; the entry is then purged on its next
    /// access. Missing or already expired keys fail with
    /// [`CacheError::ItemNotFound`].
    pub fn update_expires_at(&self, key: &str, expires_at: DateTime<Utc>) -> Result<()> {
        self.update_live(key, |entry| entry.set_expires_at(expires_at))
    }

    // == Expiration Time ==
    /// Returns the stored expiration for `key`, or `None` if absent.
    ///
    /// This is a plain read: an expired entry still reports its expiration
    /// and is not evicted.
    pub fn expiration_time(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.read().get(key).map(Entry::expires_at)
    }
}

// == Weak Store ==
/// Non-owning handle to a [`Store`].
pub struct WeakStore<V, E = DateTime<Utc>> {
    entries: Weak<RwLock<EntryMap<V, E>>>,
}

impl<V, E> Clone for WeakStore<V, E> {
    fn clone(&self) -> Self {
        Self {
            entries: Weak::clone(&self.entries),
        }
    }
}

impl<V, E> fmt::Debug for WeakStore<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakStore")
            .field("alive", &(self.entries.strong_count() > 0))
            .finish()
    }
}

impl<V, E> WeakStore<V, E> {
    /// Returns the store, or [`CacheError::NilCache`] once it has been dropped.
    pub fn upgrade(&self) -> Result<Store<V, E>> {
        self.entries
            .upgrade()
            .map(|entries| Store { entries })
            .ok_or(CacheError::NilCache)
    }
}
