//! # RARe-SOURCE Repository
//!
//! This crate describes the search-engine side of the indexer: the index
//! mapping, a sink trait for bulk submission of documents, and a sink that
//! writes the OpenSearch bulk body to any writer.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use config::SinkConfig;
pub use errors::SinkError;
pub use interfaces::DocumentSink;
pub use opensearch::{get_index_settings, NdjsonBulkSink, INDEX_NAME};
