//! Redis store implementation using bb8 connection pool.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError};

use crate::config::settings::RedisStoreConfig;
use crate::store::{KeyValueStore, StoreError};

type RedisPool = Pool<Client>;

/// Redis-backed store with bb8 connection pool.
pub struct RedisStore {
    pool: RedisPool,
    key_prefix: String,
}

impl RedisStore {
    pub async fn new(config: &RedisStoreConfig) -> Result<Self, StoreError> {
        let client =
            Client::open(config.url.as_str()).map_err(|e| StoreError::Connection(e.to_string()))?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout))
            .build(client)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(
            url = %config.url,
            pool_size = config.pool_size,
            key_prefix = %config.key_prefix,
            "Redis store pool ready"
        );

        Ok(Self {
            pool,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn prefixed_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }

    async fn get_conn(&self) -> Result<PooledConnection<'_, Client>, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

/// Milliseconds sent with `PSETEX`. Sub-millisecond TTLs round up so the key
/// still expires instead of being rejected by the server.
fn ttl_millis(ttl: Duration) -> u64 {
    let millis = ttl.as_millis();
    let millis = if ttl.subsec_nanos() % 1_000_000 != 0 {
        millis + 1
    } else {
        millis
    };
    u64::try_from(millis).unwrap_or(u64::MAX).max(1)
}

fn operation_error(e: RedisError) -> StoreError {
    StoreError::Operation(e.to_string())
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), StoreError> {
        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed = self.prefixed_key(key);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        match ttl {
            Some(ttl) => conn_ref
                .pset_ex::<_, _, ()>(&prefixed, value, ttl_millis(ttl))
                .await
                .map_err(operation_error),
            None => conn_ref
                .set::<_, _, ()>(&prefixed, value)
                .await
                .map_err(operation_error),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed = self.prefixed_key(key);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        conn_ref
            .get::<_, Option<String>>(&prefixed)
            .await
            .map_err(operation_error)
    }

    async fn lpush(&self, key: &str, value: &str) -> Result<u64, StoreError> {
        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed = self.prefixed_key(key);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        conn_ref
            .lpush::<_, _, u64>(&prefixed, value)
            .await
            .map_err(operation_error)
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<String>, StoreError> {
        let start = isize::try_from(start)
            .map_err(|_| StoreError::invalid_argument(format!("start {} out of range", start)))?;
        let stop = isize::try_from(stop)
            .map_err(|_| StoreError::invalid_argument(format!("stop {} out of range", stop)))?;

        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed = self.prefixed_key(key);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        conn_ref
            .lrange::<_, Vec<String>>(&prefixed, start, stop)
            .await
            .map_err(operation_error)
    }

    async fn hset_multiple(
        &self,
        key: &str,
        fields: &[(String, String)],
    ) -> Result<(), StoreError> {
        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed = self.prefixed_key(key);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        conn_ref
            .hset_multiple::<_, _, _, ()>(&prefixed, fields)
            .await
            .map_err(operation_error)
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed = self.prefixed_key(key);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        conn_ref
            .hget::<_, _, Option<String>>(&prefixed, field)
            .await
            .map_err(operation_error)
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed = self.prefixed_key(key);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        conn_ref
            .hgetall::<_, HashMap<String, String>>(&prefixed)
            .await
            .map_err(operation_error)
    }

    async fn del(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn: PooledConnection<'_, Client> = self.get_conn().await?;
        let prefixed = self.prefixed_key(key);

        let conn_ref: &mut MultiplexedConnection = &mut conn;
        let removed: usize = conn_ref.del(&prefixed).await.map_err(operation_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_millis_whole_seconds() {
        assert_eq!(ttl_millis(Duration::from_secs(5)), 5_000);
    }

    #[test]
    fn test_ttl_millis_rounds_up_fraction() {
        assert_eq!(ttl_millis(Duration::from_micros(1_500)), 2);
        assert_eq!(ttl_millis(Duration::from_nanos(1)), 1);
    }

    #[test]
    fn test_ttl_millis_exact_millis() {
        assert_eq!(ttl_millis(Duration::from_millis(250)), 250);
    }

    #[tokio::test]
    async fn test_new_rejects_malformed_url() {
        let config = RedisStoreConfig {
            url: "not a url".to_string(),
            ..RedisStoreConfig::default()
        };
        let result = RedisStore::new(&config).await;
        assert!(matches!(result, Err(StoreError::Connection(_))));
    }
}
