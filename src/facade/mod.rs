//! Key-value facade.
//!
//! [`KeyValueFacade`] takes its store handle and its diagnostic sink at
//! construction time:
//!
//! ```ignore
//! let store = kvfacade::store::connect(&settings.store).await?;
//! let facade = KeyValueFacade::with_tracing(store);
//!
//! facade.set_string_with_ttl("session:42", "token", Duration::from_secs(60)).await?;
//! let events = facade.list_range("events", 0, -1).await?;
//!
//! // Boolean / sentinel shape for callers that want it
//! let stored: bool = facade.legacy().set_string("greeting", "hello").await;
//! ```

mod client;
mod diagnostics;
mod legacy;
#[cfg(test)]
mod testing;

pub use client::KeyValueFacade;
pub use diagnostics::{DiagnosticSink, DisplayParams, FailureRecord, TracingSink};
pub use legacy::{LegacyFacade, TimeUnit};
