//! Error types for the repository crate.

mod sink_error;

pub use sink_error::SinkError;
