//! Recurring cast collaborations and their box office

use std::collections::{BTreeMap, BTreeSet};

use cinemetrics_common::config::AnalysisConfig;
use serde::Serialize;

use super::Mean;
use crate::catalog::Catalog;

/// Minimum shared movies for a pair to count as a collaboration
const MIN_COLLABORATIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastPair {
    pub actor1: String,
    pub actor2: String,
    pub collaboration_count: usize,
    /// Average over shared movies with positive revenue
    pub avg_revenue: f64,
}

pub fn cast_network(catalog: &Catalog, config: &AnalysisConfig) -> Vec<CastPair> {
    let mut shared: BTreeMap<(i64, i64), Vec<i64>> = BTreeMap::new();

    for movie_id in catalog.movie_ids() {
        let cast_ids: BTreeSet<i64> = catalog.cast_of(movie_id).iter().map(|c| c.cast_id).collect();
        let cast_ids: Vec<i64> = cast_ids.into_iter().collect();
        for (i, first) in cast_ids.iter().enumerate() {
            for second in &cast_ids[i + 1..] {
                shared.entry((*first, *second)).or_default().push(movie_id);
            }
        }
    }

    let mut rows: Vec<CastPair> = shared
        .into_iter()
        .filter(|(_, movies)| movies.len() >= MIN_COLLABORATIONS)
        .filter_map(|((first, second), movies)| {
            let mut revenue = Mean::default();
            for movie in movies.iter().filter_map(|id| catalog.movie(*id)) {
                if movie.revenue > 0.0 {
                    revenue.push(movie.revenue);
                }
            }
            Some(CastPair {
                actor1: cast_name(catalog, first),
                actor2: cast_name(catalog, second),
                collaboration_count: movies.len(),
                avg_revenue: revenue.value()?,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.avg_revenue
            .total_cmp(&a.avg_revenue)
            .then_with(|| a.actor1.cmp(&b.actor1))
            .then_with(|| a.actor2.cmp(&b.actor2))
    });
    rows.truncate(config.cast_pair_limit);
    rows
}

fn cast_name(catalog: &Catalog, cast_id: i64) -> String {
    catalog
        .cast_member(cast_id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| format!("#{}", cast_id))
}
