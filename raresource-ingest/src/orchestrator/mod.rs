//! Orchestrator module for the ingest.
//!
//! Drives a complete run: read both exports, build the lookup structures,
//! assemble documents and load them.

use std::path::{Path, PathBuf};
use std::vec;

use tracing::{info, instrument};

use crate::errors::IngestError;
use crate::loader::{LoadSummary, SearchLoader};
use crate::processor::{gene_entity, DocumentAssembler};
use crate::reader::{read_genes, read_rare_diseases, GeneRow};
use crate::registry::{DiseaseRegistry, GeneDiseaseIndex};
use raresource_repository::DocumentSink;
use raresource_shared::GeneDocument;

/// File name of the rare disease export.
pub const DEFAULT_DISEASE_FILE: &str = "RARe-SOURCE-Browse-Rare-Diseases-03-21-2023.csv";

/// File name of the gene export.
pub const DEFAULT_GENE_FILE: &str = "RARe-SOURCE-Browse-Genes-03-21-2023.csv";

/// Locations of the two source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    pub disease_path: PathBuf,
    pub gene_path: PathBuf,
}

impl DataSource {
    /// Create a source from explicit paths.
    pub fn new(disease_path: impl Into<PathBuf>, gene_path: impl Into<PathBuf>) -> Self {
        Self {
            disease_path: disease_path.into(),
            gene_path: gene_path.into(),
        }
    }

    /// Use the default export file names inside `data_folder`.
    pub fn from_folder(data_folder: impl AsRef<Path>) -> Self {
        let folder = data_folder.as_ref();
        Self::new(folder.join(DEFAULT_DISEASE_FILE), folder.join(DEFAULT_GENE_FILE))
    }
}

/// Lazily assembled gene documents, in gene file order.
///
/// Owns everything the run built. The sequence is finite and can only be
/// consumed once; producing it again means calling [`load_data`] again.
pub struct GeneDocuments {
    genes: vec::IntoIter<GeneRow>,
    assembler: DocumentAssembler,
}

impl GeneDocuments {
    /// Create the sequence from parsed gene rows and a ready assembler.
    pub fn new(genes: Vec<GeneRow>, assembler: DocumentAssembler) -> Self {
        Self {
            genes: genes.into_iter(),
            assembler,
        }
    }

    /// Gene rows not consumed yet.
    pub fn remaining_genes(&self) -> usize {
        self.genes.len()
    }
}

impl Iterator for GeneDocuments {
    type Item = GeneDocument;

    fn next(&mut self) -> Option<Self::Item> {
        for row in self.genes.by_ref() {
            if let Some(doc) = self.assembler.assemble(gene_entity(row)) {
                return Some(doc);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.genes.len()))
    }
}

/// Run the join over the two exports.
///
/// Both files are read and validated before the first document is produced;
/// any input violation is returned here and no documents are produced.
#[instrument(skip(source), fields(
    disease_path = %source.disease_path.display(),
    gene_path = %source.gene_path.display()
))]
pub fn load_data(source: &DataSource) -> Result<GeneDocuments, IngestError> {
    let diseases = read_rare_diseases(&source.disease_path)?;
    let registry = DiseaseRegistry::build(&diseases)?;
    let index = GeneDiseaseIndex::build(&diseases);
    drop(diseases);

    let genes = read_genes(&source.gene_path)?;
    let assembler = DocumentAssembler::new(registry, index);

    info!(
        diseases = assembler.registry().len(),
        indexed_genes = assembler.index().len(),
        gene_rows = genes.len(),
        "Inputs validated"
    );
    Ok(GeneDocuments::new(genes, assembler))
}

/// Orchestrator that runs the ingest end to end.
pub struct Orchestrator<S: DocumentSink> {
    source: DataSource,
    loader: SearchLoader<S>,
}

impl<S: DocumentSink> Orchestrator<S> {
    /// Create a new orchestrator with the given components.
    pub fn new(source: DataSource, loader: SearchLoader<S>) -> Self {
        Self { source, loader }
    }

    /// Run the orchestrator.
    ///
    /// Returns once every document has been handed to the sink, or on the
    /// first error.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<LoadSummary, IngestError> {
        info!("Starting RARe-SOURCE ingest");

        let documents = load_data(&self.source)?;
        self.loader.load_all(documents)?;
        let summary = self.loader.finish()?;

        info!(
            documents = summary.documents,
            batches = summary.batches,
            "Ingest complete"
        );
        Ok(summary)
    }

    /// Consume the orchestrator and return the sink.
    pub fn into_sink(self) -> S {
        self.loader.into_sink()
    }
}
