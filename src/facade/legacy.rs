//! Sentinel-returning shim over [`KeyValueFacade`].
//!
//! Callers written against the boolean / null contract keep working: every
//! failure collapses into `false`, `None`, `-1` or an empty vector. Those values
//! are indistinguishable from a genuinely missing or empty entry, so new code
//! should prefer the typed methods on [`KeyValueFacade`].

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::facade::KeyValueFacade;

/// Unit of an expiry amount passed to [`LegacyFacade::set_string_with_ttl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// `amount` of this unit as a [`Duration`], saturating on overflow.
    pub fn to_duration(self, amount: u64) -> Duration {
        match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(amount),
            TimeUnit::Microseconds => Duration::from_micros(amount),
            TimeUnit::Milliseconds => Duration::from_millis(amount),
            TimeUnit::Seconds => Duration::from_secs(amount),
            TimeUnit::Minutes => Duration::from_secs(amount.saturating_mul(60)),
            TimeUnit::Hours => Duration::from_secs(amount.saturating_mul(60 * 60)),
            TimeUnit::Days => Duration::from_secs(amount.saturating_mul(24 * 60 * 60)),
        }
    }
}

/// Borrowed view of a [`KeyValueFacade`] returning sentinels instead of errors.
///
/// The underlying typed call already reports each failure to the diagnostic
/// sink; this shim adds no reporting of its own.
#[derive(Clone, Copy)]
pub struct LegacyFacade<'a> {
    inner: &'a KeyValueFacade,
}

impl<'a> LegacyFacade<'a> {
    pub fn new(inner: &'a KeyValueFacade) -> Self {
        Self { inner }
    }

    /// `true` when the value was stored.
    pub async fn set_string(&self, key: &str, value: &str) -> bool {
        self.inner.set_string(key, value).await.is_ok()
    }

    /// `true` when the value was stored with an expiry of `expire` `unit`s.
    /// A zero expiry is a failure.
    pub async fn set_string_with_ttl(
        &self,
        key: &str,
        value: &str,
        expire: u64,
        unit: TimeUnit,
    ) -> bool {
        self.inner
            .set_string_with_ttl(key, value, unit.to_duration(expire))
            .await
            .is_ok()
    }

    /// The value, or `None` when missing, expired or on failure.
    pub async fn get_string(&self, key: &str) -> Option<String> {
        self.inner.get_string(key).await.ok().flatten()
    }

    /// New list length, or `-1` on failure.
    pub async fn list_push_front(&self, key: &str, value: &str) -> i64 {
        match self.inner.list_push_front(key, value).await {
            Ok(len) => i64::try_from(len).unwrap_or(i64::MAX),
            Err(_) => -1,
        }
    }

    /// Elements in the inclusive range, or an empty vector on failure.
    pub async fn list_range(&self, key: &str, start: i64, end: i64) -> Vec<String> {
        self.inner
            .list_range(key, start, end)
            .await
            .unwrap_or_default()
    }

    pub async fn hash_bulk_set(&self, key: &str, fields: &HashMap<String, String>) -> bool {
        self.inner.hash_bulk_set(key, fields).await.is_ok()
    }

    /// `true` when the key was deleted or did not exist.
    pub async fn delete_key(&self, key: &str) -> bool {
        self.inner.delete_key(key).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::facade::testing::{RecordingSink, UnreachableStore};
    use crate::store::{KeyValueStore, MemoryStore};

    fn facade_over(store: Arc<dyn KeyValueStore>) -> (KeyValueFacade, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (KeyValueFacade::new(store, sink.clone()), sink)
    }

    #[test]
    fn test_time_unit_to_duration() {
        assert_eq!(TimeUnit::Nanoseconds.to_duration(5), Duration::from_nanos(5));
        assert_eq!(TimeUnit::Milliseconds.to_duration(5), Duration::from_millis(5));
        assert_eq!(TimeUnit::Seconds.to_duration(5), Duration::from_secs(5));
        assert_eq!(TimeUnit::Minutes.to_duration(2), Duration::from_secs(120));
        assert_eq!(TimeUnit::Hours.to_duration(1), Duration::from_secs(3_600));
        assert_eq!(TimeUnit::Days.to_duration(1), Duration::from_secs(86_400));
        assert_eq!(
            TimeUnit::Days.to_duration(u64::MAX),
            Duration::from_secs(u64::MAX)
        );
    }

    #[tokio::test]
    async fn test_success_paths() {
        let (facade, sink) = facade_over(Arc::new(MemoryStore::new()));
        let legacy = facade.legacy();

        assert!(legacy.set_string("k", "v").await);
        assert_eq!(legacy.get_string("k").await, Some("v".to_string()));

        assert_eq!(legacy.list_push_front("list", "a").await, 1);
        assert_eq!(legacy.list_push_front("list", "b").await, 2);
        assert_eq!(legacy.list_range("list", 0, -1).await, vec!["b", "a"]);

        let fields = HashMap::from([
            ("f1".to_string(), "x".to_string()),
            ("f2".to_string(), "y".to_string()),
        ]);
        assert!(legacy.hash_bulk_set("hash", &fields).await);
        assert_eq!(
            facade.hash_get("hash", "f2").await.unwrap(),
            Some("y".to_string())
        );

        assert_eq!(sink.count(), 0);
    }

    #[tokio::test]
    async fn test_set_with_ttl_expires() {
        let (facade, _) = facade_over(Arc::new(MemoryStore::new()));
        let legacy = facade.legacy();

        assert!(
            legacy
                .set_string_with_ttl("k", "v", 50, TimeUnit::Milliseconds)
                .await
        );
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(legacy.get_string("k").await, None);
    }

    #[tokio::test]
    async fn test_zero_expire_fails() {
        let (facade, sink) = facade_over(Arc::new(MemoryStore::new()));
        assert!(
            !facade
                .legacy()
                .set_string_with_ttl("k", "v", 0, TimeUnit::Seconds)
                .await
        );
        assert_eq!(sink.count(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (facade, _) = facade_over(Arc::new(MemoryStore::new()));
        let legacy = facade.legacy();

        assert!(legacy.delete_key("never-set").await);
        assert!(legacy.set_string("k", "v").await);
        assert!(legacy.delete_key("k").await);
        assert_eq!(legacy.get_string("k").await, None);
    }

    #[tokio::test]
    async fn test_unreachable_store_yields_sentinels() {
        let (facade, sink) = facade_over(Arc::new(UnreachableStore));
        let legacy = facade.legacy();
        let fields = HashMap::from([("f".to_string(), "v".to_string())]);

        assert!(!legacy.set_string("k", "v").await);
        assert_eq!(sink.count(), 1);

        assert!(
            !legacy
                .set_string_with_ttl("k", "v", 10, TimeUnit::Seconds)
                .await
        );
        assert_eq!(sink.count(), 2);

        assert_eq!(legacy.get_string("k").await, None);
        assert_eq!(sink.count(), 3);

        assert_eq!(legacy.list_push_front("k", "v").await, -1);
        assert_eq!(sink.count(), 4);

        assert!(legacy.list_range("k", 0, -1).await.is_empty());
        assert_eq!(sink.count(), 5);

        assert!(!legacy.hash_bulk_set("k", &fields).await);
        assert_eq!(sink.count(), 6);

        assert!(!legacy.delete_key("k").await);
        assert_eq!(sink.count(), 7);
    }
}
