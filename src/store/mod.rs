//! Store backends the facade can be wired to.
//!
//! - Memory store (in-process, Redis-compatible semantics)
//! - Redis store (network, pooled with bb8)
//!
//! # Configuration
//!
//! ```toml
//! [store]
//! backend = "redis"  # or "memory"
//!
//! [store.redis]
//! url = "redis://127.0.0.1:6379"
//! pool_size = 4
//! connection_timeout = 5
//! key_prefix = ""
//! tls_enabled = false
//! ```

mod error;
mod memory;
mod redis;
mod traits;

use std::sync::Arc;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use redis::RedisStore;
pub use traits::KeyValueStore;

// Re-export config types
pub use crate::config::settings::{RedisStoreConfig, StoreBackend, StoreConfig};

/// Build the configured store backend.
///
/// The returned handle is meant to be passed to
/// [`KeyValueFacade::new`](crate::facade::KeyValueFacade::new); nothing is
/// registered globally.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    let store: Arc<dyn KeyValueStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Redis => Arc::new(RedisStore::new(&config.redis).await?),
    };
    tracing::debug!(backend = ?config.backend, "Store backend connected");
    Ok(store)
}
