//! Newline-delimited bulk body writer.

use std::io::Write;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::SinkConfig;
use crate::errors::SinkError;
use crate::interfaces::DocumentSink;
use raresource_shared::{GeneDocument, GeneEntity, RaresourceField};

#[derive(Serialize)]
struct BulkAction<'a> {
    index: BulkTarget<'a>,
}

#[derive(Serialize)]
struct BulkTarget<'a> {
    #[serde(rename = "_index")]
    index: &'a str,
    #[serde(rename = "_id")]
    id: &'a str,
}

/// Document body without the `_id` metadata field, which the bulk API
/// only accepts on the action line.
#[derive(Serialize)]
struct DocumentSource<'a> {
    #[serde(flatten)]
    gene: &'a GeneEntity,
    raresource: &'a RaresourceField,
}

/// Sink that writes documents as an OpenSearch `_bulk` request body.
///
/// Each document becomes two lines: an `index` action carrying the target
/// index and document id, then the document source.
pub struct NdjsonBulkSink<W: Write> {
    writer: W,
    index_name: String,
    config: SinkConfig,
    written: usize,
}

impl<W: Write> NdjsonBulkSink<W> {
    /// Create a sink writing to `writer` for the given index.
    pub fn new(writer: W, index_name: impl Into<String>) -> Self {
        Self {
            writer,
            index_name: index_name.into(),
            config: SinkConfig::default(),
            written: 0,
        }
    }

    /// Create a sink with custom configuration.
    pub fn with_config(writer: W, index_name: impl Into<String>, config: SinkConfig) -> Self {
        Self {
            writer,
            index_name: index_name.into(),
            config,
            written: 0,
        }
    }

    /// Number of documents written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_document(&mut self, doc: &GeneDocument) -> Result<(), SinkError> {
        let action = BulkAction {
            index: BulkTarget {
                index: &self.index_name,
                id: &doc.id,
            },
        };
        serde_json::to_writer(&mut self.writer, &action)?;
        self.writer.write_all(b"\n")?;

        let source = DocumentSource {
            gene: &doc.gene,
            raresource: &doc.raresource,
        };
        serde_json::to_writer(&mut self.writer, &source)?;
        self.writer.write_all(b"\n")?;

        Ok(())
    }
}

impl<W: Write> DocumentSink for NdjsonBulkSink<W> {
    #[instrument(skip(self, docs), fields(doc_count = docs.len()))]
    fn bulk_index(&mut self, docs: &[GeneDocument]) -> Result<(), SinkError> {
        if docs.is_empty() {
            return Ok(());
        }

        self.config.validate_batch_size(docs.len())?;

        for doc in docs {
            self.write_document(doc)?;
        }
        self.written += docs.len();

        debug!(total_written = self.written, "Wrote bulk batch");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
