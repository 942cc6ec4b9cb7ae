//! Test doubles shared by the facade tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::facade::{DiagnosticSink, FailureRecord};
use crate::store::{KeyValueStore, StoreError};

/// Owned copy of a [`FailureRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFailure {
    pub operation: &'static str,
    pub key: String,
    pub params: Vec<(&'static str, String)>,
    pub error: StoreError,
}

#[derive(Default)]
pub struct RecordingSink {
    records: Mutex<Vec<RecordedFailure>>,
}

impl RecordingSink {
    pub fn records(&self) -> Vec<RecordedFailure> {
        self.records.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl DiagnosticSink for RecordingSink {
    fn operation_failed(&self, record: &FailureRecord<'_>) {
        self.records.lock().unwrap().push(RecordedFailure {
            operation: record.operation,
            key: record.key.to_string(),
            params: record.params.to_vec(),
            error: record.error.clone(),
        });
    }
}

/// Store whose every command fails as if the server were unreachable.
pub struct UnreachableStore;

fn unreachable() -> StoreError {
    StoreError::Connection("connection refused".to_string())
}

#[async_trait]
impl KeyValueStore for UnreachableStore {
    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<(), StoreError> {
        Err(unreachable())
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(unreachable())
    }

    async fn lpush(&self, _key: &str, _value: &str) -> Result<u64, StoreError> {
        Err(unreachable())
    }

    async fn lrange(&self, _key: &str, _start: i64, _stop: i64) -> Result<Vec<String>, StoreError> {
        Err(unreachable())
    }

    async fn hset_multiple(
        &self,
        _key: &str,
        _fields: &[(String, String)],
    ) -> Result<(), StoreError> {
        Err(unreachable())
    }

    async fn hget(&self, _key: &str, _field: &str) -> Result<Option<String>, StoreError> {
        Err(unreachable())
    }

    async fn hgetall(&self, _key: &str) -> Result<HashMap<String, String>, StoreError> {
        Err(unreachable())
    }

    async fn del(&self, _key: &str) -> Result<bool, StoreError> {
        Err(unreachable())
    }
}
