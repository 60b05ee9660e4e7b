//! Ingest of downloaded TMDB movie documents
//!
//! Scan a source directory, load documents concurrently, and merge new
//! movies into the catalog and the movie ID cache.

pub mod loader;
pub mod scanner;
pub mod tmdb;

pub use loader::{ImportSummary, LoadOutcome, Loader};
pub use scanner::{FileScanner, ScanError};
pub use tmdb::{extract_record, parse_payload, ExtractError, TmdbMovie};

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use cinemetrics_common::MovieIdCache;
use tracing::info;

use crate::catalog::Catalog;

/// Import settings
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub workers: usize,
    pub cast_limit: usize,
    /// Process at most this many documents (in scan order)
    pub limit: Option<usize>,
    pub show_progress: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            workers: 5,
            cast_limit: 15,
            limit: None,
            show_progress: true,
        }
    }
}

/// Import every movie document under `source`
///
/// Movies already in the catalog are skipped. A movie id that appears in
/// several documents of one run is merged from the first one in scan order;
/// the repeats count as skipped. The ID cache ends up holding every catalog id.
pub async fn import_directory(
    source: &Path,
    catalog: &mut Catalog,
    cache: &mut MovieIdCache,
    options: &ImportOptions,
) -> Result<ImportSummary, ScanError> {
    let mut paths = FileScanner::new().scan(source)?;
    if let Some(limit) = options.limit {
        paths.truncate(limit);
    }

    let mut loader = Loader::new(options.workers, options.cast_limit);
    if !options.show_progress {
        loader = loader.without_progress();
    }

    info!(
        "Starting to process {} movie documents with {} workers",
        paths.len(),
        loader.workers()
    );

    let known: Arc<BTreeSet<i64>> = Arc::new(catalog.movie_ids().collect());
    let (outcomes, mut summary) = loader.load(paths, known).await;

    for outcome in outcomes {
        if let LoadOutcome::Loaded(record) = outcome {
            let movie_id = record.movie.movie_id;
            if catalog.contains(movie_id) {
                summary.processed -= 1;
                summary.skipped += 1;
                continue;
            }
            catalog.insert_record(record);
        }
    }

    cache.extend(catalog.movie_ids());

    log_summary(&summary);
    Ok(summary)
}

/// Emit the end-of-import report
pub fn log_summary(summary: &ImportSummary) {
    info!("Import completed in {:.2} seconds", summary.elapsed.as_secs_f64());
    info!("Successfully processed: {} movies", summary.processed);
    info!("Already known: {} movies", summary.skipped);
    info!("Failed to process: {} documents", summary.failed);
    info!(
        "Average time per document: {:.3} seconds",
        summary.average_per_file().as_secs_f64()
    );
}
