//! # RARe-SOURCE Indexer
//!
//! Main library for the RARe-SOURCE gene/disease indexer.
//!
//! This crate provides the entry point and configuration for running
//! the ingest and writing the bulk body for the search index.

pub mod config;

pub use config::{Dependencies, IndexerConfig};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] raresource_ingest::IngestError),

    /// Sink error.
    #[error("Sink error: {0}")]
    SinkError(#[from] raresource_repository::SinkError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
