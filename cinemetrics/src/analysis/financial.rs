//! Budget, revenue and ROI by release year

use std::collections::BTreeMap;

use serde::Serialize;

use super::Mean;
use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialTrend {
    pub year: i32,
    pub avg_budget: f64,
    pub avg_revenue: f64,
    pub avg_roi: f64,
    pub movie_count: usize,
}

#[derive(Default)]
struct Year {
    budget: Mean,
    revenue: Mean,
    roi: Mean,
    movie_count: usize,
}

/// Dated movies reporting both budget and revenue, one row per year
pub fn financial_trends(catalog: &Catalog) -> Vec<FinancialTrend> {
    let mut years: BTreeMap<i32, Year> = BTreeMap::new();

    for movie in catalog.movies().filter(|m| m.has_financials()) {
        let Some(year) = movie.release_year() else {
            continue;
        };
        let entry = years.entry(year).or_default();
        entry.budget.push(movie.budget);
        entry.revenue.push(movie.revenue);
        entry.roi.push_opt(movie.roi());
        entry.movie_count += 1;
    }

    years
        .into_iter()
        .map(|(year, totals)| FinancialTrend {
            year,
            avg_budget: totals.budget.value().unwrap_or(0.0),
            avg_revenue: totals.revenue.value().unwrap_or(0.0),
            avg_roi: totals.roi.value().unwrap_or(0.0),
            movie_count: totals.movie_count,
        })
        .collect()
}
