//! Document sink trait definition.
//!
//! A sink receives batches of finished gene documents. Implementations decide
//! where they go: a bulk body on disk or stdout, an in-memory buffer in tests.

use crate::errors::SinkError;
use raresource_shared::GeneDocument;

/// Abstract interface for bulk document submission.
pub trait DocumentSink {
    /// Submit a batch of documents.
    ///
    /// # Arguments
    ///
    /// * `docs` - Documents to index, in output order
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The batch was accepted
    /// * `Err(SinkError)` - The batch could not be written
    fn bulk_index(&mut self, docs: &[GeneDocument]) -> Result<(), SinkError>;

    /// Flush anything buffered by the sink.
    fn flush(&mut self) -> Result<(), SinkError>;
}
