//! Genre co-occurrence and the performance of genre blends

use std::collections::BTreeMap;

use serde::Serialize;

use super::Mean;
use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreCorrelation {
    pub genre1: String,
    pub genre2: String,
    /// Movies carrying both genres
    pub co_occurrence: usize,
    /// Averages over shared movies with positive revenue
    pub avg_revenue: f64,
    pub avg_rating: Option<f64>,
}

pub fn genre_correlations(catalog: &Catalog) -> Vec<GenreCorrelation> {
    let mut shared: BTreeMap<(i64, i64), Vec<i64>> = BTreeMap::new();

    for movie_id in catalog.movie_ids() {
        let genre_ids: Vec<i64> = catalog.genres_of(movie_id).collect();
        for (i, first) in genre_ids.iter().enumerate() {
            for second in &genre_ids[i + 1..] {
                shared.entry((*first, *second)).or_default().push(movie_id);
            }
        }
    }

    let mut rows: Vec<GenreCorrelation> = shared
        .into_iter()
        .filter_map(|((first, second), movies)| {
            let mut revenue = Mean::default();
            let mut rating = Mean::default();
            for movie in movies.iter().filter_map(|id| catalog.movie(*id)) {
                if movie.revenue > 0.0 {
                    revenue.push(movie.revenue);
                    rating.push_opt(movie.vote_average);
                }
            }
            Some(GenreCorrelation {
                genre1: catalog.genre(first)?.name.clone(),
                genre2: catalog.genre(second)?.name.clone(),
                co_occurrence: movies.len(),
                avg_revenue: revenue.value()?,
                avg_rating: rating.value(),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.co_occurrence
            .cmp(&a.co_occurrence)
            .then_with(|| a.genre1.cmp(&b.genre1))
            .then_with(|| a.genre2.cmp(&b.genre2))
    });
    rows
}
