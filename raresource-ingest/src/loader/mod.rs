//! Loader module for the ingest.
//!
//! Hands assembled documents to a sink in batches.

use tracing::{debug, info, instrument};

use crate::errors::IngestError;
use raresource_repository::DocumentSink;
use raresource_shared::GeneDocument;

/// Configuration for the search loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of documents to batch before flushing.
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

/// Counts reported once loading has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Documents handed to the sink.
    pub documents: usize,
    /// Bulk batches handed to the sink.
    pub batches: usize,
}

/// Loader that feeds documents into a [`DocumentSink`].
///
/// There are no retries: the first sink error aborts the load.
pub struct SearchLoader<S: DocumentSink> {
    sink: S,
    config: LoaderConfig,
    pending_docs: Vec<GeneDocument>,
    summary: LoadSummary,
}

impl<S: DocumentSink> SearchLoader<S> {
    /// Create a new search loader with the given sink.
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, LoaderConfig::default())
    }

    /// Create a new search loader with custom configuration.
    pub fn with_config(sink: S, config: LoaderConfig) -> Self {
        let batch_size = config.batch_size.max(1);
        Self {
            sink,
            config: LoaderConfig { batch_size },
            pending_docs: Vec::with_capacity(batch_size),
            summary: LoadSummary::default(),
        }
    }

    /// Queue one document, flushing when the batch is full.
    pub fn load(&mut self, doc: GeneDocument) -> Result<(), IngestError> {
        self.pending_docs.push(doc);

        if self.pending_docs.len() >= self.config.batch_size {
            self.flush()?;
        }

        Ok(())
    }

    /// Queue every document from `docs`.
    #[instrument(skip(self, docs))]
    pub fn load_all<I>(&mut self, docs: I) -> Result<(), IngestError>
    where
        I: IntoIterator<Item = GeneDocument>,
    {
        for doc in docs {
            self.load(doc)?;
        }
        Ok(())
    }

    /// Send all pending documents to the sink.
    pub fn flush(&mut self) -> Result<(), IngestError> {
        if self.pending_docs.is_empty() {
            return Ok(());
        }

        let count = self.pending_docs.len();
        debug!(count = count, "Flushing documents to sink");

        self.sink.bulk_index(&self.pending_docs)?;
        self.pending_docs.clear();

        self.summary.documents += count;
        self.summary.batches += 1;
        Ok(())
    }

    /// Flush the remaining documents and the sink itself.
    pub fn finish(&mut self) -> Result<LoadSummary, IngestError> {
        self.flush()?;
        self.sink.flush()?;

        info!(
            documents = self.summary.documents,
            batches = self.summary.batches,
            "Loading completed"
        );
        Ok(self.summary)
    }

    /// Consume the loader and return the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
