//! KeyValueStore trait definition.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::store::StoreError;

/// Store-client capability handed to the facade.
///
/// Every method maps to exactly one store command. Implementations must not
/// retry; the caller decides what a failure means.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `SET key value`, or `PSETEX` when a TTL is given.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError>;

    /// `GET key`. `None` when the key is missing or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// `LPUSH key value`, returning the list length after the push.
    async fn lpush(&self, key: &str, value: &str) -> Result<u64, StoreError>;

    /// `LRANGE key start stop` with inclusive, tail-relative negative bounds.
    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError>;

    /// `HSET key f1 v1 f2 v2 ...` in a single command.
    async fn hset_multiple(
        &self,
        key: &str,
        fields: &[(String, String)],
    ) -> Result<(), StoreError>;

    /// `HGET key field`.
    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// `HGETALL key`.
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;

    /// `DEL key`, returning whether a key was removed.
    async fn del(&self, key: &str) -> Result<bool, StoreError>;
}
