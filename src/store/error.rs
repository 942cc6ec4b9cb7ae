//! Store error types.

use thiserror::Error;

/// Errors that can occur while talking to the key-value store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store operation failed: {0}")]
    Operation(String),

    #[error("WRONGTYPE operation against key '{key}' holding the wrong kind of value")]
    WrongType { key: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl StoreError {
    pub fn wrong_type(key: impl Into<String>) -> Self {
        Self::WrongType { key: key.into() }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether the failure is on the connectivity side rather than the command.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
