//! Configuration types for document sinks.

/// Configuration for a document sink.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Maximum number of documents allowed in a single bulk request.
    /// Set to None to disable the limit.
    pub max_batch_size: Option<usize>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(1000),
        }
    }
}

impl SinkConfig {
    /// Create a config with no batch size limit.
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
        }
    }

    /// Create a config with a custom batch size limit.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
        }
    }

    /// Check a batch against the configured limit.
    pub fn validate_batch_size(&self, size: usize) -> Result<(), crate::SinkError> {
        if let Some(max) = self.max_batch_size {
            if size > max {
                return Err(crate::SinkError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }
}
