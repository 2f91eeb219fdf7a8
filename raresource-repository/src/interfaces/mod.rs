//! Interfaces for document sinks.

mod document_sink;

pub use document_sink::DocumentSink;
