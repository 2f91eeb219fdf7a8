//! Error types for the ingest.

use raresource_repository::SinkError;
use thiserror::Error;

/// Errors that can occur in the ingest.
///
/// Every variant aborts the run; per-record conditions that only reduce the
/// output (a gene without diseases, an unknown GARD identifier) are not errors.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Failed to open or read a source file.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed CSV or a value of the wrong type.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A declared column position does not exist in the file.
    #[error("Column {name} at position {position} not found (file has {width} columns)")]
    MissingColumn {
        name: String,
        position: usize,
        width: usize,
    },

    /// A required field is empty.
    #[error("Line {line}: required field {name} is missing")]
    MissingField { name: String, line: u64 },

    /// The associated genes field does not end with the list delimiter.
    #[error("Line {line}: associated genes {value:?} do not end with ';'")]
    MissingTrailingDelimiter { value: String, line: u64 },

    /// The associated genes field holds nothing but the delimiter.
    #[error("Line {line}: associated genes list is empty")]
    EmptyGeneList { line: u64 },

    /// A disease annotation URL does not start with the expected prefix.
    #[error("Line {line}: unexpected disease annotation URL {url:?}")]
    UnexpectedUrlPrefix { url: String, line: u64 },

    /// Two diseases share a GARD identifier.
    #[error("Duplicate GARD identifier {gard} (line {line})")]
    DuplicateIdentifier { gard: String, line: u64 },

    /// Error from the document sink.
    #[error("Sink error: {0}")]
    SinkError(#[from] SinkError),
}

impl IngestError {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a missing field error.
    pub fn missing_field(name: &str, line: u64) -> Self {
        Self::MissingField {
            name: name.to_string(),
            line,
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
