//! Indexer settings read from the environment.

use std::env;
use std::path::PathBuf;

use crate::IndexingError;
use raresource_ingest::orchestrator::{DEFAULT_DISEASE_FILE, DEFAULT_GENE_FILE};
use raresource_ingest::DataSource;
use raresource_repository::INDEX_NAME;

/// Default folder holding the two exports.
const DEFAULT_DATA_FOLDER: &str = "data";

/// Output path meaning standard output.
const STDOUT_PATH: &str = "-";

/// Default number of documents per bulk batch.
const DEFAULT_BATCH_SIZE: usize = 100;

/// Settings for one indexer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Folder holding the exports.
    pub data_folder: PathBuf,
    /// Disease export file name, relative to `data_folder`.
    pub disease_file: String,
    /// Gene export file name, relative to `data_folder`.
    pub gene_file: String,
    /// Where to write the bulk body; `None` writes to stdout.
    pub output_path: Option<PathBuf>,
    /// Where to write the index settings and mappings, if anywhere.
    pub mapping_path: Option<PathBuf>,
    /// Target index named in every bulk action.
    pub index_name: String,
    /// Documents per bulk batch.
    pub batch_size: usize,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from(DEFAULT_DATA_FOLDER),
            disease_file: DEFAULT_DISEASE_FILE.to_string(),
            gene_file: DEFAULT_GENE_FILE.to_string(),
            output_path: None,
            mapping_path: None,
            index_name: INDEX_NAME.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl IndexerConfig {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATA_FOLDER`: Folder holding the exports (default: data)
    /// - `DISEASE_FILE`: Disease export file name
    /// - `GENE_FILE`: Gene export file name
    /// - `OUTPUT_PATH`: Bulk body destination, `-` for stdout (default: -)
    /// - `MAPPING_PATH`: Optional destination for the index mapping
    /// - `INDEX_NAME`: Target index (default: raresource)
    /// - `BATCH_SIZE`: Documents per bulk batch (default: 100)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let batch_size = match lookup("BATCH_SIZE") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(IndexingError::config(format!(
                        "BATCH_SIZE must be a positive integer, got {:?}",
                        value
                    )))
                }
            },
            None => defaults.batch_size,
        };

        let output_path = match lookup("OUTPUT_PATH") {
            Some(path) if path != STDOUT_PATH => Some(PathBuf::from(path)),
            _ => None,
        };

        Ok(Self {
            data_folder: lookup("DATA_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_folder),
            disease_file: lookup("DISEASE_FILE").unwrap_or(defaults.disease_file),
            gene_file: lookup("GENE_FILE").unwrap_or(defaults.gene_file),
            output_path,
            mapping_path: lookup("MAPPING_PATH").map(PathBuf::from),
            index_name: lookup("INDEX_NAME").unwrap_or(defaults.index_name),
            batch_size,
        })
    }

    /// Paths of the two exports.
    pub fn data_source(&self) -> DataSource {
        DataSource::new(
            self.data_folder.join(&self.disease_file),
            self.data_folder.join(&self.gene_file),
        )
    }
}
