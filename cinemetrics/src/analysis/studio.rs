//! Studio performance: profitability, genre spread and risk
//!
//! Only movies reporting both budget and revenue count. Studios are grouped
//! by name, so companies sharing a name are merged.

use std::collections::{BTreeMap, BTreeSet};

use cinemetrics_common::config::AnalysisConfig;
use serde::Serialize;

use super::Mean;
use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudioPerformance {
    pub studio: String,
    pub movie_count: usize,
    pub avg_revenue: f64,
    pub avg_budget: f64,
    /// Mean of per-movie revenue/budget
    pub profit_ratio: f64,
    /// Distinct genres across the studio's movies over all catalog genres
    pub genre_diversity: f64,
    /// Population standard deviation of per-movie revenue/budget
    pub risk: f64,
    pub risk_adjusted_return: f64,
}

pub fn studio_performance(catalog: &Catalog, config: &AnalysisConfig) -> Vec<StudioPerformance> {
    let mut studios: BTreeMap<String, BTreeSet<i64>> = BTreeMap::new();

    for movie in catalog.movies().filter(|m| m.has_financials()) {
        for company_id in catalog.companies_of(movie.movie_id) {
            if let Some(company) = catalog.company(company_id) {
                studios
                    .entry(company.name.clone())
                    .or_default()
                    .insert(movie.movie_id);
            }
        }
    }

    let total_genres = catalog.genre_count();
    let mut rows: Vec<StudioPerformance> = studios
        .into_iter()
        .filter(|(_, movie_ids)| movie_ids.len() >= config.min_studio_movies)
        .map(|(studio, movie_ids)| {
            let mut revenue = Mean::default();
            let mut budget = Mean::default();
            let mut rois = Vec::with_capacity(movie_ids.len());
            let mut genres = BTreeSet::new();

            for movie in movie_ids.iter().filter_map(|id| catalog.movie(*id)) {
                revenue.push(movie.revenue);
                budget.push(movie.budget);
                rois.extend(movie.roi());
                genres.extend(catalog.genres_of(movie.movie_id));
            }

            let profit_ratio = mean(&rois);
            let spread = std_dev(&rois, profit_ratio);
            let risk = if spread > 0.0 { spread } else { config.default_risk };
            let genre_diversity = if total_genres == 0 {
                0.0
            } else {
                genres.len() as f64 / total_genres as f64
            };

            StudioPerformance {
                studio,
                movie_count: movie_ids.len(),
                avg_revenue: revenue.value().unwrap_or(0.0),
                avg_budget: budget.value().unwrap_or(0.0),
                profit_ratio,
                genre_diversity,
                risk,
                risk_adjusted_return: profit_ratio / risk,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.risk_adjusted_return
            .total_cmp(&a.risk_adjusted_return)
            .then_with(|| a.studio.cmp(&b.studio))
    });
    rows
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
