//! Error types for the logger

use thiserror::Error;

/// Errors that can occur while setting up log output
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {message}")]
    Format { message: String },
}

impl LoggerError {
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }
}
