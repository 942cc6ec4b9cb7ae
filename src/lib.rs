//! kvfacade
//!
//! Typed key-value operations over an injected store client, with a
//! sentinel-returning shim for callers that want the boolean / null shape.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod facade;
pub mod logger;
pub mod store;

pub use facade::{DiagnosticSink, KeyValueFacade, LegacyFacade, TimeUnit, TracingSink};
pub use store::{KeyValueStore, MemoryStore, RedisStore, StoreError};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

