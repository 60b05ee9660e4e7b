//! Per-movie budget efficiency, one row per genre the movie carries

use cinemetrics_common::config::AnalysisConfig;
use cinemetrics_common::money::to_millions;
use serde::Serialize;

use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetEfficiency {
    pub genre: String,
    pub title: String,
    pub budget_millions: f64,
    pub revenue_millions: f64,
    /// revenue / budget
    pub efficiency: f64,
}

/// Movies above the budget floor with positive revenue
pub fn budget_efficiency(catalog: &Catalog, config: &AnalysisConfig) -> Vec<BudgetEfficiency> {
    let mut rows: Vec<(i64, f64, BudgetEfficiency)> = Vec::new();

    for movie in catalog
        .movies()
        .filter(|m| m.budget > config.min_budget && m.revenue > 0.0)
    {
        for genre_id in catalog.genres_of(movie.movie_id) {
            let Some(genre) = catalog.genre(genre_id) else {
                continue;
            };
            rows.push((
                movie.movie_id,
                movie.budget,
                BudgetEfficiency {
                    genre: genre.name.clone(),
                    title: movie.title.clone(),
                    budget_millions: to_millions(movie.budget),
                    revenue_millions: to_millions(movie.revenue),
                    efficiency: movie.revenue / movie.budget,
                },
            ));
        }
    }

    rows.sort_by(|(id_a, budget_a, a), (id_b, budget_b, b)| {
        a.genre
            .cmp(&b.genre)
            .then_with(|| budget_a.total_cmp(budget_b))
            .then_with(|| id_a.cmp(id_b))
    });
    rows.into_iter().map(|(_, _, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{catalog_of, MovieBuilder};

    #[test]
    fn test_filters_and_ordering() {
        let catalog = catalog_of(vec![
            MovieBuilder::new(1, "Big")
                .financials(200_000_000.0, 500_000_000.0)
                .genre(28, "Action")
                .genre(12, "Adventure")
                .build(),
            MovieBuilder::new(2, "Mid")
                .financials(50_000_000.0, 200_000_000.0)
                .genre(28, "Action")
                .build(),
            MovieBuilder::new(3, "At Floor")
                .financials(1_000_000.0, 9_000_000.0)
                .genre(28, "Action")
                .build(),
            MovieBuilder::new(4, "No Revenue")
                .financials(5_000_000.0, 0.0)
                .genre(28, "Action")
                .build(),
        ]);

        let rows = budget_efficiency(&catalog, &AnalysisConfig::default());
        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.genre.as_str(), r.title.as_str()))
            .collect();
        assert_eq!(keys, vec![("Action", "Mid"), ("Action", "Big"), ("Adventure", "Big")]);

        assert_eq!(rows[0].budget_millions, 50.0);
        assert_eq!(rows[0].revenue_millions, 200.0);
        assert_eq!(rows[0].efficiency, 4.0);
        assert_eq!(rows[1].efficiency, 2.5);
    }
}
