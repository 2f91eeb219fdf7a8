//! Processor module for the ingest.
//!
//! Turns gene rows into gene documents.

mod document_assembler;

pub use document_assembler::{gene_entity, DocumentAssembler};
