//! Concurrent document loader
//!
//! Reads and extracts movie documents with a bounded number in flight.
//! File reads are async; JSON extraction runs on the blocking pool. Outcomes
//! are logged as they complete and returned in input order.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use cinemetrics_common::models::MovieRecord;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::tmdb::{extract_record, parse_payload, ExtractError};

/// Result of loading one document
#[derive(Debug)]
pub enum LoadOutcome {
    /// Extracted a new movie
    Loaded(MovieRecord),
    /// Movie id was already known
    Skipped { path: PathBuf, movie_id: i64 },
    /// Document could not be read or extracted
    Failed { path: PathBuf, reason: String },
}

/// Counters for one import run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.failed
    }

    /// Average wall time per document (zero for an empty run)
    pub fn average_per_file(&self) -> Duration {
        match self.total() {
            0 => Duration::ZERO,
            n => self.elapsed / n as u32,
        }
    }

    pub fn record(&mut self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded(_) => self.processed += 1,
            LoadOutcome::Skipped { .. } => self.skipped += 1,
            LoadOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Loader settings
#[derive(Debug, Clone)]
pub struct Loader {
    workers: usize,
    cast_limit: usize,
    show_progress: bool,
}

impl Loader {
    /// `workers` is clamped to at least one
    pub fn new(workers: usize, cast_limit: usize) -> Self {
        Self {
            workers: workers.max(1),
            cast_limit,
            show_progress: true,
        }
    }

    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Load every path; ids in `known` are reported as skipped
    ///
    /// The returned outcomes line up with `paths`.
    pub async fn load(
        &self,
        paths: Vec<PathBuf>,
        known: Arc<BTreeSet<i64>>,
    ) -> (Vec<LoadOutcome>, ImportSummary) {
        let started = Instant::now();
        let progress = self.progress_bar(paths.len() as u64);
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let mut join_set = JoinSet::new();

        for (index, path) in paths.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let known = Arc::clone(&known);
            let cast_limit = self.cast_limit;

            join_set.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        let outcome = LoadOutcome::Failed {
                            path,
                            reason: format!("worker pool closed: {}", e),
                        };
                        return (index, outcome);
                    }
                };
                (index, load_one(path, known, cast_limit).await)
            });
        }

        let mut outcomes = Vec::with_capacity(join_set.len());
        let mut summary = ImportSummary::default();

        while let Some(joined) = join_set.join_next().await {
            // An aborted task has lost its index; it sorts last
            let (index, outcome) = match joined {
                Ok(indexed) => indexed,
                Err(e) => (
                    usize::MAX,
                    LoadOutcome::Failed {
                        path: PathBuf::new(),
                        reason: format!("load task aborted: {}", e),
                    },
                ),
            };

            match &outcome {
                LoadOutcome::Loaded(record) => {
                    debug!(movie_id = record.movie.movie_id, "Loaded {}", record.movie.title)
                }
                LoadOutcome::Skipped { movie_id, .. } => {
                    debug!("Movie {} already in catalog, skipping", movie_id)
                }
                LoadOutcome::Failed { path, reason } => {
                    warn!("Failed to load {}: {}", path.display(), reason)
                }
            }

            summary.record(&outcome);
            outcomes.push((index, outcome));
            progress.inc(1);
        }

        progress.finish_and_clear();
        outcomes.sort_by_key(|(index, _)| *index);
        let outcomes = outcomes.into_iter().map(|(_, outcome)| outcome).collect();
        summary.elapsed = started.elapsed();
        (outcomes, summary)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message("Processing movies");
        bar
    }
}

async fn load_one(path: PathBuf, known: Arc<BTreeSet<i64>>, cast_limit: usize) -> LoadOutcome {
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return LoadOutcome::Failed {
                path,
                reason: e.to_string(),
            }
        }
    };

    let extracted = tokio::task::spawn_blocking(move || -> Result<Extracted, ExtractError> {
        let payload = parse_payload(&bytes)?;
        if known.contains(&payload.id) {
            return Ok(Extracted::Known(payload.id));
        }
        extract_record(payload, cast_limit, Utc::now()).map(Extracted::Record)
    })
    .await;

    match extracted {
        Ok(Ok(Extracted::Record(record))) => LoadOutcome::Loaded(record),
        Ok(Ok(Extracted::Known(movie_id))) => LoadOutcome::Skipped { path, movie_id },
        Ok(Err(e)) => LoadOutcome::Failed {
            path,
            reason: e.to_string(),
        },
        Err(e) => LoadOutcome::Failed {
            path,
            reason: format!("extraction task failed: {}", e),
        },
    }
}

enum Extracted {
    Known(i64),
    Record(MovieRecord),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_movie(dir: &std::path::Path, id: i64, title: &str) -> PathBuf {
        let path = dir.join(format!("{}.json", id));
        let body = serde_json::json!({
            "id": id,
            "title": title,
            "release_date": "2010-07-16",
            "budget": 160000000,
            "revenue": 825532764
        });
        fs::write(&path, body.to_string()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_counts_outcomes() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let mut paths = vec![
            write_movie(dir, 27205, "Inception"),
            write_movie(dir, 155, "The Dark Knight"),
            write_movie(dir, 157336, "Interstellar"),
        ];
        let broken = dir.join("broken.json");
        fs::write(&broken, "{").unwrap();
        paths.push(broken);
        paths.push(dir.join("missing.json"));

        let known = Arc::new(BTreeSet::from([155]));
        let (outcomes, summary) = Loader::new(2, 15)
            .without_progress()
            .load(paths, known)
            .await;

        assert_eq!(outcomes.len(), 5);
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.total(), 5);

        let skipped: Vec<i64> = outcomes
            .iter()
            .filter_map(|o| match o {
                LoadOutcome::Skipped { movie_id, .. } => Some(*movie_id),
                _ => None,
            })
            .collect();
        assert_eq!(skipped, vec![155]);
    }

    #[tokio::test]
    async fn test_outcomes_follow_input_order() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let missing = dir.join("missing.json");
        let paths = vec![
            missing.clone(),
            write_movie(dir, 603, "The Matrix"),
            write_movie(dir, 155, "The Dark Knight"),
            write_movie(dir, 27205, "Inception"),
        ];

        let (outcomes, _) = Loader::new(4, 15)
            .without_progress()
            .load(paths, Arc::new(BTreeSet::from([155])))
            .await;

        assert!(matches!(&outcomes[0], LoadOutcome::Failed { path, .. } if *path == missing));
        assert!(matches!(&outcomes[1], LoadOutcome::Loaded(r) if r.movie.movie_id == 603));
        assert!(matches!(outcomes[2], LoadOutcome::Skipped { movie_id: 155, .. }));
        assert!(matches!(&outcomes[3], LoadOutcome::Loaded(r) if r.movie.movie_id == 27205));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let (outcomes, summary) = Loader::new(4, 15)
            .without_progress()
            .load(Vec::new(), Arc::new(BTreeSet::new()))
            .await;
        assert!(outcomes.is_empty());
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.average_per_file(), Duration::ZERO);
    }

    #[test]
    fn test_workers_clamped() {
        assert_eq!(Loader::new(0, 15).workers(), 1);
        assert_eq!(Loader::new(8, 15).workers(), 8);
    }
}
