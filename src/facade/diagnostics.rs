//! Failure reporting for facade operations.

use std::fmt;

use crate::store::StoreError;

/// One failed facade call, as handed to a [`DiagnosticSink`].
#[derive(Debug)]
pub struct FailureRecord<'a> {
    /// Facade operation name, e.g. `list_range`.
    pub operation: &'static str,
    pub key: &'a str,
    /// Operation parameters other than the key, in call order.
    pub params: &'a [(&'static str, String)],
    pub error: &'a StoreError,
}

impl FailureRecord<'_> {
    /// Parameters rendered as `name=value` pairs.
    pub fn display_params(&self) -> DisplayParams<'_> {
        DisplayParams(self.params)
    }
}

pub struct DisplayParams<'a>(&'a [(&'static str, String)]);

impl fmt::Display for DisplayParams<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

/// Receives one record per failed facade call.
pub trait DiagnosticSink: Send + Sync {
    fn operation_failed(&self, record: &FailureRecord<'_>);
}

/// Sink that emits each failure as a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn operation_failed(&self, record: &FailureRecord<'_>) {
        tracing::error!(
            operation = record.operation,
            key = record.key,
            params = %record.display_params(),
            error = %record.error,
            "Store operation failed"
        );
    }
}
