//! Genre popularity and rating by release year

use std::collections::BTreeMap;

use serde::Serialize;

use super::Mean;
use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreTrend {
    pub genre: String,
    pub year: i32,
    pub movie_count: usize,
    pub avg_popularity: Option<f64>,
    pub avg_rating: Option<f64>,
}

#[derive(Default)]
struct Bucket {
    movie_count: usize,
    popularity: Mean,
    rating: Mean,
}

/// One row per (genre name, release year); undated movies are left out
pub fn genre_trends(catalog: &Catalog) -> Vec<GenreTrend> {
    let mut buckets: BTreeMap<(String, i32), Bucket> = BTreeMap::new();

    for movie in catalog.movies() {
        let Some(year) = movie.release_year() else {
            continue;
        };
        for genre_id in catalog.genres_of(movie.movie_id) {
            let Some(genre) = catalog.genre(genre_id) else {
                continue;
            };
            let bucket = buckets.entry((genre.name.clone(), year)).or_default();
            bucket.movie_count += 1;
            bucket.popularity.push_opt(movie.popularity);
            bucket.rating.push_opt(movie.vote_average);
        }
    }

    buckets
        .into_iter()
        .map(|((genre, year), bucket)| GenreTrend {
            genre,
            year,
            movie_count: bucket.movie_count,
            avg_popularity: bucket.popularity.value(),
            avg_rating: bucket.rating.value(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{catalog_of, MovieBuilder};

    #[test]
    fn test_grouped_by_genre_and_year() {
        let catalog = catalog_of(vec![
            MovieBuilder::new(1, "Scream")
                .released(1996)
                .popularity(20.0)
                .rating(7.0)
                .genre(27, "Horror")
                .build(),
            MovieBuilder::new(2, "Scream 2")
                .released(1997)
                .popularity(10.0)
                .genre(27, "Horror")
                .build(),
            MovieBuilder::new(3, "The Craft")
                .released(1996)
                .popularity(30.0)
                .rating(6.0)
                .genre(27, "Horror")
                .genre(14, "Fantasy")
                .build(),
            MovieBuilder::new(4, "Undated").genre(27, "Horror").build(),
        ]);

        let rows = genre_trends(&catalog);
        assert_eq!(
            rows,
            vec![
                GenreTrend {
                    genre: "Fantasy".to_string(),
                    year: 1996,
                    movie_count: 1,
                    avg_popularity: Some(30.0),
                    avg_rating: Some(6.0),
                },
                GenreTrend {
                    genre: "Horror".to_string(),
                    year: 1996,
                    movie_count: 2,
                    avg_popularity: Some(25.0),
                    avg_rating: Some(6.5),
                },
                GenreTrend {
                    genre: "Horror".to_string(),
                    year: 1997,
                    movie_count: 1,
                    avg_popularity: Some(10.0),
                    avg_rating: None,
                },
            ]
        );
    }
}
