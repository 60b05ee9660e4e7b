//! CSV export of analysis tables
//!
//! One file per table, header row first. Empty tables still get a header so
//! downstream tooling always finds every file.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::{
    AnalysisResults, BudgetEfficiency, CastPair, FinancialTrend, GenreCorrelation, GenreTrend,
    StudioPerformance,
};
use crate::samples::{BudgetSample, GenrePopularity, StudioMetrics};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A row type with a fixed file name and column order
pub trait Table: Serialize {
    /// File stem of the exported CSV
    const NAME: &'static str;
    /// Column names in field order
    const HEADERS: &'static [&'static str];
}

impl Table for GenreTrend {
    const NAME: &'static str = "genre_trends";
    const HEADERS: &'static [&'static str] =
        &["genre", "year", "movie_count", "avg_popularity", "avg_rating"];
}

impl Table for StudioPerformance {
    const NAME: &'static str = "studio_performance";
    const HEADERS: &'static [&'static str] = &[
        "studio",
        "movie_count",
        "avg_revenue",
        "avg_budget",
        "profit_ratio",
        "genre_diversity",
        "risk",
        "risk_adjusted_return",
    ];
}

impl Table for BudgetEfficiency {
    const NAME: &'static str = "budget_efficiency";
    const HEADERS: &'static [&'static str] =
        &["genre", "title", "budget_millions", "revenue_millions", "efficiency"];
}

impl Table for CastPair {
    const NAME: &'static str = "cast_network";
    const HEADERS: &'static [&'static str] =
        &["actor1", "actor2", "collaboration_count", "avg_revenue"];
}

impl Table for GenreCorrelation {
    const NAME: &'static str = "genre_correlations";
    const HEADERS: &'static [&'static str] =
        &["genre1", "genre2", "co_occurrence", "avg_revenue", "avg_rating"];
}

impl Table for FinancialTrend {
    const NAME: &'static str = "financial_trends";
    const HEADERS: &'static [&'static str] =
        &["year", "avg_budget", "avg_revenue", "avg_roi", "movie_count"];
}

impl Table for GenrePopularity {
    const NAME: &'static str = "genre_popularity";
    const HEADERS: &'static [&'static str] =
        &["year", "horror", "scifi", "action", "drama", "comedy"];
}

impl Table for BudgetSample {
    const NAME: &'static str = "budget_samples";
    const HEADERS: &'static [&'static str] = &["budget", "revenue", "efficiency", "genre"];
}

impl Table for StudioMetrics {
    const NAME: &'static str = "studio_metrics";
    const HEADERS: &'static [&'static str] = &[
        "studio",
        "risk_adjusted_return",
        "profit_ratio",
        "risk",
        "genre_diversity",
    ];
}

/// Write `rows` to `<dir>/<NAME>.csv`
pub fn write_table<T: Table>(dir: &Path, rows: &[T]) -> Result<PathBuf, ExportError> {
    let path = dir.join(format!("{}.csv", T::NAME));
    let file = File::create(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    let csv_err = |source| ExportError::Csv {
        path: path.clone(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(T::HEADERS).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Export all six analysis tables
pub fn export_results(results: &AnalysisResults, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    if results.is_empty() {
        warn!("No analysis results to export, writing header-only files");
    }
    ensure_dir(dir)?;

    let paths = vec![
        write_table(dir, &results.genre_trends)?,
        write_table(dir, &results.studio_performance)?,
        write_table(dir, &results.budget_efficiency)?,
        write_table(dir, &results.cast_network)?,
        write_table(dir, &results.genre_correlations)?,
        write_table(dir, &results.financial_trends)?,
    ];

    info!("All analysis results exported to {}", dir.display());
    Ok(paths)
}

/// Export the three sample datasets
pub fn export_samples(dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    ensure_dir(dir)?;
    Ok(vec![
        write_table(dir, crate::samples::genre_popularity())?,
        write_table(dir, crate::samples::budget_samples())?,
        write_table(dir, crate::samples::studio_metrics())?,
    ])
}
