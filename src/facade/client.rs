//! Typed facade over an injected key-value store.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::facade::{DiagnosticSink, FailureRecord, LegacyFacade, TracingSink};
use crate::store::{KeyValueStore, StoreError};

type Params = Vec<(&'static str, String)>;

/// Convenience operations over a key-value store.
///
/// Each call issues at most one store command and never retries. Failures are
/// returned to the caller and reported once to the diagnostic sink. Use
/// [`legacy`](Self::legacy) for the boolean / sentinel shape.
///
/// Cloning is cheap; clones share the store handle and the sink.
#[derive(Clone)]
pub struct KeyValueFacade {
    store: Arc<dyn KeyValueStore>,
    sink: Arc<dyn DiagnosticSink>,
}

impl KeyValueFacade {
    pub fn new(store: Arc<dyn KeyValueStore>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { store, sink }
    }

    /// Facade reporting failures through `tracing`.
    pub fn with_tracing(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, Arc::new(TracingSink))
    }

    /// Sentinel-returning view of this facade.
    pub fn legacy(&self) -> LegacyFacade<'_> {
        LegacyFacade::new(self)
    }

    /// Set a string value with no expiry.
    pub async fn set_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.run(
            "set_string",
            key,
            || vec![("value", value.to_string())],
            self.store.set(key, value, None),
        )
        .await
    }

    /// Set a string value that expires after `ttl`. A zero TTL is rejected.
    pub async fn set_string_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        self.run(
            "set_string_with_ttl",
            key,
            || vec![("value", value.to_string()), ("ttl", format!("{:?}", ttl))],
            async {
                if ttl.is_zero() {
                    return Err(StoreError::invalid_argument("ttl must be greater than zero"));
                }
                self.store.set(key, value, Some(ttl)).await
            },
        )
        .await
    }

    /// Read a string value; `None` when the key does not exist or has expired.
    pub async fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.run("get_string", key, Vec::new, self.store.get(key))
            .await
    }

    /// Insert at the head of a list, creating it if needed. Returns the new length.
    pub async fn list_push_front(&self, key: &str, value: &str) -> Result<u64, StoreError> {
        self.run(
            "list_push_front",
            key,
            || vec![("value", value.to_string())],
            self.store.lpush(key, value),
        )
        .await
    }

    /// Elements between `start` and `end`, both inclusive.
    ///
    /// `0` is the first element and `-1` the last; out-of-range bounds are
    /// clamped, so a missing key and an empty window both yield an empty vector.
    pub async fn list_range(
        &self,
        key: &str,
        start: i64,
        end: i64,
    ) -> Result<Vec<String>, StoreError> {
        self.run(
            "list_range",
            key,
            || vec![("start", start.to_string()), ("end", end.to_string())],
            self.store.lrange(key, start, end),
        )
        .await
    }

    /// Write all `fields` into the hash at `key` with one command.
    ///
    /// Atomicity across fields is whatever the store gives a single multi-field
    /// `HSET`. An empty map succeeds without contacting the store.
    pub async fn hash_bulk_set(
        &self,
        key: &str,
        fields: &HashMap<String, String>,
    ) -> Result<(), StoreError> {
        self.run(
            "hash_bulk_set",
            key,
            || vec![("fields", format!("{:?}", fields))],
            async {
                if fields.is_empty() {
                    return Ok(());
                }
                let pairs: Vec<(String, String)> = fields
                    .iter()
                    .map(|(field, value)| (field.clone(), value.clone()))
                    .collect();
                self.store.hset_multiple(key, &pairs).await
            },
        )
        .await
    }

    /// Read one hash field.
    pub async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        self.run(
            "hash_get",
            key,
            || vec![("field", field.to_string())],
            self.store.hget(key, field),
        )
        .await
    }

    /// Read every field of a hash; empty when the key does not exist.
    pub async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        self.run("hash_get_all", key, Vec::new, self.store.hgetall(key))
            .await
    }

    /// Delete a key of any type. `Ok(false)` means there was nothing to delete.
    pub async fn delete_key(&self, key: &str) -> Result<bool, StoreError> {
        self.run("delete_key", key, Vec::new, self.store.del(key))
            .await
    }

    /// Validate the key, await the store call and report a failure once.
    ///
    /// `call` is lazy, so nothing reaches the store when validation fails.
    async fn run<T>(
        &self,
        operation: &'static str,
        key: &str,
        params: impl FnOnce() -> Params,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        let result = if key.is_empty() {
            Err(StoreError::invalid_argument("key must not be empty"))
        } else {
            call.await
        };

        if let Err(ref error) = result {
            let params = params();
            self.sink.operation_failed(&FailureRecord {
                operation,
                key,
                params: &params,
                error,
            });
        }

        result
    }
}
