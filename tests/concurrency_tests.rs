//! Concurrency Tests for the Cache Store
//!
//! Hammers one shared store from many threads.

use std::sync::Barrier;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use timed_cache::{CacheError, TimedStore};

const WRITERS: usize = 8;
const READERS: usize = 8;
const KEYS_PER_WRITER: usize = 200;

fn key(writer: usize, i: usize) -> String {
    format!("w{writer}-k{i}")
}

#[test]
fn test_concurrent_writers_and_readers() {
    let store = TimedStore::new();
    let expires_at = Utc::now() + chrono::Duration::hours(1);
    let barrier = Barrier::new(WRITERS + READERS);

    thread::scope(|s| {
        for writer in 0..WRITERS {
            let store = store.clone();
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for round in 0..3 {
                    for i in 0..KEYS_PER_WRITER {
                        store
                            .set(key(writer, i), (writer, i, round), expires_at)
                            .unwrap();
                    }
                }
            });
        }

        for reader in 0..READERS {
            let store = store.clone();
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for i in 0..KEYS_PER_WRITER {
                    let writer = (reader + i) % WRITERS;
                    if let Some((w, k, _)) = store.get(&key(writer, i)) {
                        assert_eq!((w, k), (writer, i));
                    }
                }
            });
        }
    });

    // Last write wins for every key
    assert_eq!(store.len(), WRITERS * KEYS_PER_WRITER);
    for writer in 0..WRITERS {
        for i in 0..KEYS_PER_WRITER {
            assert_eq!(store.get(&key(writer, i)), Some((writer, i, 2)));
        }
    }
}

#[test]
fn test_concurrent_reads_of_expiring_entries() {
    let store = TimedStore::new();
    for i in 0..100 {
        store
            .set_ttl(format!("k{i}"), i, Duration::from_millis(50))
            .unwrap();
    }

    thread::sleep(Duration::from_millis(100));

    thread::scope(|s| {
        for _ in 0..READERS {
            let store = store.clone();
            s.spawn(move || {
                for i in 0..100 {
                    assert_eq!(store.get(&format!("k{i}")), None);
                    assert!(!store.has(&format!("k{i}")));
                }
            });
        }
    });

    assert!(store.is_empty());
}

#[test]
fn test_eviction_does_not_remove_fresh_overwrite() {
    let store = TimedStore::new();
    let fresh = Utc::now() + chrono::Duration::hours(1);

    for round in 0..20 {
        store
            .set_ttl("hot", -1, Duration::from_millis(20))
            .unwrap();
        thread::sleep(Duration::from_millis(30));

        thread::scope(|s| {
            let reader = store.clone();
            s.spawn(move || {
                let _ = reader.get("hot");
            });
            let writer = store.clone();
            s.spawn(move || {
                writer.set("hot", round, fresh).unwrap();
            });
        });

        // Whatever the interleaving, the live overwrite survives
        assert_eq!(store.get("hot"), Some(round));
    }
}

#[test]
fn test_concurrent_updates_and_deletes() {
    let store = TimedStore::new();
    let expires_at = Utc::now() + chrono::Duration::hours(1);
    for i in 0..KEYS_PER_WRITER {
        store.set(format!("k{i}"), 0usize, expires_at).unwrap();
    }

    thread::scope(|s| {
        for worker in 0..WRITERS {
            let store = store.clone();
            s.spawn(move || {
                for i in 0..KEYS_PER_WRITER {
                    let key = format!("k{i}");
                    if i % WRITERS == worker {
                        store.delete(&key);
                    } else {
                        match store.update_value(&key, worker) {
                            Ok(()) | Err(CacheError::ItemNotFound(_)) => {}
                            Err(err) => panic!("unexpected error: {err}"),
                        }
                    }
                }
            });
        }
    });

    assert!(store.is_empty());
}
