//! RARe-SOURCE indexer.
//!
//! Joins the rare disease and gene exports and writes one bulk index action
//! per gene document. Logs go to stderr so the bulk body can go to stdout.

use std::env;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use raresource_indexer::{Dependencies, IndexerConfig, IndexingError};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Indexer failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), IndexingError> {
    let config = IndexerConfig::from_env()?;
    let deps = Dependencies::new(&config)?;

    let summary = deps.run()?;
    info!(
        documents = summary.documents,
        batches = summary.batches,
        "Indexer finished"
    );

    Ok(())
}

/// Set up the tracing subscriber. `RUST_LOG` picks the filter (default
/// `info`); `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
