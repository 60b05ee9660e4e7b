//! Catalog analyses
//!
//! Every analysis is a pure function of a borrowed [`Catalog`] and the
//! configured thresholds. Output rows are ordered deterministically, with
//! ties broken by name or id.

pub mod budget;
pub mod cast_network;
pub mod financial;
pub mod genre_correlations;
pub mod genre_trends;
pub mod report;
pub mod studio;

pub use budget::{budget_efficiency, BudgetEfficiency};
pub use cast_network::{cast_network, CastPair};
pub use financial::{financial_trends, FinancialTrend};
pub use genre_correlations::{genre_correlations, GenreCorrelation};
pub use genre_trends::{genre_trends, GenreTrend};
pub use report::{basic_report, BasicReport};
pub use studio::{studio_performance, StudioPerformance};

use cinemetrics_common::config::AnalysisConfig;
use serde::Serialize;
use tracing::info;

use crate::catalog::Catalog;

/// Output of [`run_comprehensive`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResults {
    pub genre_trends: Vec<GenreTrend>,
    pub studio_performance: Vec<StudioPerformance>,
    pub budget_efficiency: Vec<BudgetEfficiency>,
    pub cast_network: Vec<CastPair>,
    pub genre_correlations: Vec<GenreCorrelation>,
    pub financial_trends: Vec<FinancialTrend>,
}

impl AnalysisResults {
    pub fn is_empty(&self) -> bool {
        self.genre_trends.is_empty()
            && self.studio_performance.is_empty()
            && self.budget_efficiency.is_empty()
            && self.cast_network.is_empty()
            && self.genre_correlations.is_empty()
            && self.financial_trends.is_empty()
    }
}

/// Run all six analyses
pub fn run_comprehensive(catalog: &Catalog, config: &AnalysisConfig) -> AnalysisResults {
    info!("Running Genre Trends Analysis...");
    let genre_trends = genre_trends(catalog);

    info!("Running Studio Performance Analysis...");
    let studio_performance = studio_performance(catalog, config);

    info!("Running Budget Efficiency Analysis...");
    let budget_efficiency = budget_efficiency(catalog, config);

    info!("Running Cast Network Analysis...");
    let cast_network = cast_network(catalog, config);

    info!("Running Genre Correlations Analysis...");
    let genre_correlations = genre_correlations(catalog);

    info!("Running Financial Trends Analysis...");
    let financial_trends = financial_trends(catalog);

    info!("Comprehensive analysis completed successfully");
    AnalysisResults {
        genre_trends,
        studio_performance,
        budget_efficiency,
        cast_network,
        genre_correlations,
        financial_trends,
    }
}

/// Running arithmetic mean that ignores absent values
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    pub(crate) fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub(crate) fn push_opt(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.push(value);
        }
    }

    pub(crate) fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Descending order for optional floats, `None` last
pub(crate) fn desc_nones_last(a: Option<f64>, b: Option<f64>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
