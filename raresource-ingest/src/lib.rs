//! # RARe-SOURCE Ingest
//!
//! This crate joins the RARe-SOURCE rare disease and gene tables into one
//! search document per gene.
//!
//! ## Architecture
//!
//! The ingest follows the Reader-Processor-Loader pattern:
//!
//! 1. **Reader**: Parses the two CSV exports into typed rows
//! 2. **Registry**: Builds the disease registry and the gene-to-disease index
//! 3. **Processor**: Assembles gene documents with their nested diseases
//! 4. **Loader**: Hands documents to a sink in batches
//! 5. **Orchestrator**: Drives the whole run

pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod reader;
pub mod registry;

pub use errors::IngestError;
pub use orchestrator::{load_data, DataSource, GeneDocuments, Orchestrator};
