//! Basic catalog report
//!
//! Three short tables: genre popularity, top studios by average revenue and
//! budget efficiency per genre.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use cinemetrics_common::config::AnalysisConfig;
use cinemetrics_common::money::{format_millions, format_ratio};
use serde::Serialize;

use super::{desc_nones_last, Mean};
use crate::catalog::Catalog;

/// Number of studios listed in the report
const TOP_STUDIOS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenrePopularity {
    pub genre: String,
    pub movie_count: usize,
    pub avg_popularity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudioRevenue {
    pub studio: String,
    pub movie_count: usize,
    pub avg_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreEfficiency {
    pub genre: String,
    pub avg_budget: f64,
    pub avg_revenue: f64,
    pub avg_roi: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BasicReport {
    pub genre_popularity: Vec<GenrePopularity>,
    pub top_studios: Vec<StudioRevenue>,
    pub genre_efficiency: Vec<GenreEfficiency>,
}

pub fn basic_report(catalog: &Catalog, config: &AnalysisConfig) -> BasicReport {
    BasicReport {
        genre_popularity: genre_popularity(catalog),
        top_studios: top_studios(catalog, config.min_basic_studio_movies),
        genre_efficiency: genre_efficiency(catalog),
    }
}

fn genre_popularity(catalog: &Catalog) -> Vec<GenrePopularity> {
    let mut genres: BTreeMap<String, (usize, Mean)> = BTreeMap::new();
    for movie in catalog.movies() {
        for genre in catalog.genres_of(movie.movie_id).filter_map(|id| catalog.genre(id)) {
            let (count, popularity) = genres.entry(genre.name.clone()).or_default();
            *count += 1;
            popularity.push_opt(movie.popularity);
        }
    }

    let mut rows: Vec<GenrePopularity> = genres
        .into_iter()
        .map(|(genre, (movie_count, popularity))| GenrePopularity {
            genre,
            movie_count,
            avg_popularity: popularity.value(),
        })
        .collect();
    rows.sort_by(|a, b| {
        desc_nones_last(a.avg_popularity, b.avg_popularity).then_with(|| a.genre.cmp(&b.genre))
    });
    rows
}

fn top_studios(catalog: &Catalog, min_movies: usize) -> Vec<StudioRevenue> {
    let mut studios: BTreeMap<String, BTreeSet<i64>> = BTreeMap::new();
    for movie in catalog.movies().filter(|m| m.revenue > 0.0) {
        for company in catalog.companies_of(movie.movie_id).filter_map(|id| catalog.company(id)) {
            studios
                .entry(company.name.clone())
                .or_default()
                .insert(movie.movie_id);
        }
    }

    let mut rows: Vec<StudioRevenue> = studios
        .into_iter()
        .filter(|(_, movies)| movies.len() >= min_movies)
        .map(|(studio, movies)| {
            let mut revenue = Mean::default();
            for movie in movies.iter().filter_map(|id| catalog.movie(*id)) {
                revenue.push(movie.revenue);
            }
            StudioRevenue {
                studio,
                movie_count: movies.len(),
                avg_revenue: revenue.value().unwrap_or(0.0),
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.avg_revenue
            .total_cmp(&a.avg_revenue)
            .then_with(|| a.studio.cmp(&b.studio))
    });
    rows.truncate(TOP_STUDIOS);
    rows
}

fn genre_efficiency(catalog: &Catalog) -> Vec<GenreEfficiency> {
    let mut genres: BTreeMap<String, (Mean, Mean, Mean)> = BTreeMap::new();
    for movie in catalog.movies().filter(|m| m.has_financials()) {
        for genre in catalog.genres_of(movie.movie_id).filter_map(|id| catalog.genre(id)) {
            let (budget, revenue, roi) = genres.entry(genre.name.clone()).or_default();
            budget.push(movie.budget);
            revenue.push(movie.revenue);
            roi.push_opt(movie.roi());
        }
    }

    let mut rows: Vec<GenreEfficiency> = genres
        .into_iter()
        .map(|(genre, (budget, revenue, roi))| GenreEfficiency {
            genre,
            avg_budget: budget.value().unwrap_or(0.0),
            avg_revenue: revenue.value().unwrap_or(0.0),
            avg_roi: roi.value().unwrap_or(0.0),
        })
        .collect();
    rows.sort_by(|a, b| b.avg_roi.total_cmp(&a.avg_roi).then_with(|| a.genre.cmp(&b.genre)));
    rows
}

impl fmt::Display for BasicReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Genre Popularity Analysis:")?;
        for row in &self.genre_popularity {
            match row.avg_popularity {
                Some(popularity) => writeln!(
                    f,
                    "{}: {} movies, Avg Popularity: {:.2}",
                    row.genre, row.movie_count, popularity
                )?,
                None => writeln!(
                    f,
                    "{}: {} movies, Avg Popularity: n/a",
                    row.genre, row.movie_count
                )?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Top Studios by Average Revenue:")?;
        for row in &self.top_studios {
            writeln!(
                f,
                "{}: {} movies, Avg Revenue: {}",
                row.studio,
                row.movie_count,
                format_millions(row.avg_revenue)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Budget Efficiency by Genre:")?;
        for row in &self.genre_efficiency {
            writeln!(
                f,
                "{}: Avg Budget: {}, Avg Revenue: {}, ROI: {}",
                row.genre,
                format_millions(row.avg_budget),
                format_millions(row.avg_revenue),
                format_ratio(row.avg_roi)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{catalog_of, MovieBuilder};

    fn catalog() -> Catalog {
        catalog_of(vec![
            MovieBuilder::new(1, "A")
                .financials(10_000_000.0, 50_000_000.0)
                .popularity(40.0)
                .genre(27, "Horror")
                .company(1, "Blumhouse")
                .build(),
            MovieBuilder::new(2, "B")
                .financials(20_000_000.0, 40_000_000.0)
                .popularity(10.0)
                .genre(18, "Drama")
                .company(1, "Blumhouse")
                .build(),
            MovieBuilder::new(3, "C")
                .financials(100_000_000.0, 300_000_000.0)
                .genre(18, "Drama")
                .company(2, "Big Studio")
                .build(),
            MovieBuilder::new(4, "D")
                .genre(99, "Documentary")
                .company(1, "Blumhouse")
                .build(),
        ])
    }

    #[test]
    fn test_genre_popularity_sorted_with_missing_last() {
        let report = basic_report(&catalog(), &AnalysisConfig::default());
        let genres: Vec<_> = report.genre_popularity.iter().map(|r| r.genre.as_str()).collect();
        assert_eq!(genres, vec!["Horror", "Drama", "Documentary"]);
        assert_eq!(report.genre_popularity[1].movie_count, 2);
        assert_eq!(report.genre_popularity[1].avg_popularity, Some(10.0));
    }

    #[test]
    fn test_top_studios_threshold() {
        let config = AnalysisConfig {
            min_basic_studio_movies: 2,
            ..AnalysisConfig::default()
        };
        let report = basic_report(&catalog(), &config);
        assert_eq!(
            report.top_studios,
            vec![StudioRevenue {
                studio: "Blumhouse".to_string(),
                movie_count: 2,
                avg_revenue: 45_000_000.0,
            }]
        );

        let default_report = basic_report(&catalog(), &AnalysisConfig::default());
        assert!(default_report.top_studios.is_empty());
    }

    #[test]
    fn test_genre_efficiency_by_roi() {
        let report = basic_report(&catalog(), &AnalysisConfig::default());
        assert_eq!(report.genre_efficiency.len(), 2);
        assert_eq!(report.genre_efficiency[0].genre, "Horror");
        assert_eq!(report.genre_efficiency[0].avg_roi, 5.0);
        assert_eq!(report.genre_efficiency[1].avg_roi, 2.5);
        assert_eq!(report.genre_efficiency[1].avg_budget, 60_000_000.0);
    }

    #[test]
    fn test_display_lines() {
        let text = basic_report(&catalog(), &AnalysisConfig::default()).to_string();
        assert!(text.contains("Horror: 1 movies, Avg Popularity: 40.00"));
        assert!(text.contains("Documentary: 1 movies, Avg Popularity: n/a"));
        assert!(text.contains("Horror: Avg Budget: $10.00M, Avg Revenue: $50.00M, ROI: 5.00x"));
    }
}
