//! In-process store with Redis-compatible semantics, backed by `DashMap`.
//!
//! Expiry is lazy: an expired entry is dropped the next time its key is
//! touched. Each operation runs under a single shard lock, so a push or a bulk
//! hash write is atomic with respect to other callers.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::store::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
enum StoredValue {
    String(String),
    List(VecDeque<String>),
    Hash(HashMap<String, String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: StoredValue,
    expires_at: Option<Instant>,
}

impl Entry {
    fn persistent(value: StoredValue) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Memory store used for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn purge_expired(&self, key: &str) {
        let now = Instant::now();
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
    }
}

/// Resolve `LRANGE` bounds against a list of `len` elements.
///
/// Negative indices count from the tail. Returns `None` when the range is empty.
pub(crate) fn normalize_range(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let start = if start < 0 { start.saturating_add(len) } else { start }.max(0);
    let stop = if stop < 0 { stop.saturating_add(len) } else { stop };

    if start >= len || start > stop {
        return None;
    }
    let stop = stop.min(len - 1);

    Some((start as usize, stop as usize))
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        // An overflowing deadline is far enough out to mean "never".
        let expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        self.entries.insert(
            key.to_string(),
            Entry {
                value: StoredValue::String(value.to_string()),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.purge_expired(key);
        match self.entries.get(key) {
            None => Ok(None),
            Some(entry) => match &entry.value {
                StoredValue::String(value) => Ok(Some(value.clone())),
                _ => Err(StoreError::wrong_type(key)),
            },
        }
    }

    async fn lpush(&self, key: &str, value: &str) -> Result<u64, StoreError> {
        self.purge_expired(key);
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::persistent(StoredValue::List(VecDeque::new())));

        match &mut entry.value {
            StoredValue::List(list) => {
                list.push_front(value.to_string());
                Ok(list.len() as u64)
            }
            _ => Err(StoreError::wrong_type(key)),
        }
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        self.purge_expired(key);
        let Some(entry) = self.entries.get(key) else {
            return Ok(Vec::new());
        };

        match &entry.value {
            StoredValue::List(list) => Ok(normalize_range(list.len(), start, stop)
                .map(|(from, to)| list.range(from..=to).cloned().collect())
                .unwrap_or_default()),
            _ => Err(StoreError::wrong_type(key)),
        }
    }

    async fn hset_multiple(
        &self,
        key: &str,
        fields: &[(String, String)],
    ) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Err(StoreError::Operation(
                "wrong number of arguments for 'hset' command".to_string(),
            ));
        }

        self.purge_expired(key);
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::persistent(StoredValue::Hash(HashMap::new())));

        match &mut entry.value {
            StoredValue::Hash(hash) => {
                hash.extend(fields.iter().cloned());
                Ok(())
            }
            _ => Err(StoreError::wrong_type(key)),
        }
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        self.purge_expired(key);
        match self.entries.get(key) {
            None => Ok(None),
            Some(entry) => match &entry.value {
                StoredValue::Hash(hash) => Ok(hash.get(field).cloned()),
                _ => Err(StoreError::wrong_type(key)),
            },
        }
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        self.purge_expired(key);
        match self.entries.get(key) {
            None => Ok(HashMap::new()),
            Some(entry) => match &entry.value {
                StoredValue::Hash(hash) => Ok(hash.clone()),
                _ => Err(StoreError::wrong_type(key)),
            },
        }
    }

    async fn del(&self, key: &str) -> Result<bool, StoreError> {
        self.purge_expired(key);
        Ok(self.entries.remove(key).is_some())
    }
}
