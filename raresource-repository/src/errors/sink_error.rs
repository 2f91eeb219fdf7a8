//! Sink error types.
//!
//! This module defines the error types that can occur while submitting
//! documents to a sink.

use thiserror::Error;

/// Errors that can occur during bulk submission.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Failed to write to the underlying output.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to serialize a document.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },
}

impl SinkError {
    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
