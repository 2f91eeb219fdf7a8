//! Dependency initialization and wiring for the indexer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempPath};
use tracing::info;

use crate::config::IndexerConfig;
use crate::IndexingError;
use raresource_ingest::loader::{LoadSummary, LoaderConfig, SearchLoader};
use raresource_ingest::Orchestrator;
use raresource_repository::{get_index_settings, NdjsonBulkSink, SinkConfig, SinkError};

/// Sink the binary writes the bulk body through.
pub type OutputSink = NdjsonBulkSink<Box<dyn Write>>;

/// Bulk body being written to a temporary file next to its destination.
struct StagedOutput {
    temp_path: TempPath,
    destination: PathBuf,
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    orchestrator: Orchestrator<OutputSink>,
    staged_output: Option<StagedOutput>,
    mapping_path: Option<PathBuf>,
}

impl Dependencies {
    /// Initialize all dependencies from the given settings.
    ///
    /// Nothing at `output_path` or `mapping_path` is touched here; a file
    /// output is staged in the same directory until [`Dependencies::run`]
    /// succeeds.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If the output could not be staged
    pub fn new(config: &IndexerConfig) -> Result<Self, IndexingError> {
        let source = config.data_source();

        info!(
            disease_path = %source.disease_path.display(),
            gene_path = %source.gene_path.display(),
            index_name = %config.index_name,
            batch_size = config.batch_size,
            "Initializing dependencies"
        );

        let mut staged_output = None;
        let writer: Box<dyn Write> = match &config.output_path {
            Some(path) => {
                let (file, staged) = stage_output(path).map_err(|e| {
                    IndexingError::config(format!(
                        "Failed to create output file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                staged_output = Some(staged);
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };

        let sink = NdjsonBulkSink::with_config(
            writer,
            config.index_name.clone(),
            SinkConfig::with_max_batch_size(config.batch_size),
        );
        let loader = SearchLoader::with_config(
            sink,
            LoaderConfig {
                batch_size: config.batch_size,
            },
        );
        let orchestrator = Orchestrator::new(source, loader);

        Ok(Self {
            orchestrator,
            staged_output,
            mapping_path: config.mapping_path.clone(),
        })
    }

    /// Run the ingest and publish its outputs.
    ///
    /// The bulk body replaces `output_path` and the index mapping is written
    /// only after every document has been written. On error both paths keep
    /// their previous contents and the staged file is removed.
    pub fn run(self) -> Result<LoadSummary, IndexingError> {
        let Self {
            mut orchestrator,
            staged_output,
            mapping_path,
        } = self;

        let summary = orchestrator.run()?;
        let mut writer = orchestrator.into_sink().into_inner();
        writer.flush()?;
        drop(writer);

        if let Some(staged) = staged_output {
            staged
                .temp_path
                .persist(&staged.destination)
                .map_err(|e| e.error)?;
            info!(path = %staged.destination.display(), "Bulk body written");
        }

        if let Some(path) = mapping_path {
            write_index_settings(&path)?;
            info!(path = %path.display(), "Index mapping written");
        }

        Ok(summary)
    }
}

/// Create the temporary file a bulk body for `destination` is written to.
fn stage_output(destination: &Path) -> io::Result<(File, StagedOutput)> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir)?;
    let file = temp.as_file().try_clone()?;
    let staged = StagedOutput {
        temp_path: temp.into_temp_path(),
        destination: destination.to_path_buf(),
    };
    Ok((file, staged))
}

/// Write the index settings and mappings as pretty-printed JSON.
fn write_index_settings(path: &Path) -> Result<(), IndexingError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &get_index_settings()).map_err(SinkError::from)?;
    writer.flush()?;
    Ok(())
}
