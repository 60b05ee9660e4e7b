//! In-memory movie catalog
//!
//! Relational layout: entity maps keyed by id plus relation maps keyed by
//! movie id. Movie rows are replaced on re-insert; shared entities and
//! relations keep the first value written.
//!
//! The catalog is persisted as a single JSON snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use cinemetrics_common::models::{
    CastCredit, CastMember, Genre, Movie, MovieRecord, ProductionCompany,
};
use cinemetrics_common::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    movies: BTreeMap<i64, Movie>,
    genres: BTreeMap<i64, Genre>,
    companies: BTreeMap<i64, ProductionCompany>,
    cast_members: BTreeMap<i64, CastMember>,
    movie_genres: BTreeMap<i64, BTreeSet<i64>>,
    movie_companies: BTreeMap<i64, BTreeSet<i64>>,
    movie_cast: BTreeMap<i64, Vec<CastCredit>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one extracted movie into the catalog
    pub fn insert_record(&mut self, record: MovieRecord) {
        let movie_id = record.movie.movie_id;

        for genre in record.genres {
            self.movie_genres
                .entry(movie_id)
                .or_default()
                .insert(genre.genre_id);
            self.genres.entry(genre.genre_id).or_insert(genre);
        }

        for company in record.production_companies {
            self.movie_companies
                .entry(movie_id)
                .or_default()
                .insert(company.company_id);
            self.companies.entry(company.company_id).or_insert(company);
        }

        let credits = self.movie_cast.entry(movie_id).or_default();
        for (member, credit) in record.cast {
            if !credits.iter().any(|c| c.cast_id == credit.cast_id) {
                credits.push(credit);
            }
            self.cast_members.entry(member.cast_id).or_insert(member);
        }
        if credits.is_empty() {
            self.movie_cast.remove(&movie_id);
        }

        debug!(movie_id, title = %record.movie.title, "Inserted movie");
        self.movies.insert(movie_id, record.movie);
    }

    pub fn contains(&self, movie_id: i64) -> bool {
        self.movies.contains_key(&movie_id)
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    pub fn genre_count(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movie(&self, movie_id: i64) -> Option<&Movie> {
        self.movies.get(&movie_id)
    }

    /// Movies in id order
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.values()
    }

    pub fn movie_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.movies.keys().copied()
    }

    pub fn genre(&self, genre_id: i64) -> Option<&Genre> {
        self.genres.get(&genre_id)
    }

    pub fn company(&self, company_id: i64) -> Option<&ProductionCompany> {
        self.companies.get(&company_id)
    }

    pub fn cast_member(&self, cast_id: i64) -> Option<&CastMember> {
        self.cast_members.get(&cast_id)
    }

    /// Genre ids linked to a movie
    pub fn genres_of(&self, movie_id: i64) -> impl Iterator<Item = i64> + '_ {
        self.movie_genres
            .get(&movie_id)
            .into_iter()
            .flat_map(|ids| ids.iter().copied())
    }

    /// Company ids linked to a movie
    pub fn companies_of(&self, movie_id: i64) -> impl Iterator<Item = i64> + '_ {
        self.movie_companies
            .get(&movie_id)
            .into_iter()
            .flat_map(|ids| ids.iter().copied())
    }

    /// Cast credits of a movie in billing order
    pub fn cast_of(&self, movie_id: i64) -> &[CastCredit] {
        self.movie_cast
            .get(&movie_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Load a snapshot; a missing file yields an empty catalog
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No catalog snapshot at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        info!(
            "Loaded catalog from {}: {} movies, {} genres",
            path.display(),
            catalog.movie_count(),
            catalog.genre_count()
        );
        Ok(catalog)
    }

    /// Save a snapshot (temp file + rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string(self)?;
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, path)?;

        info!(
            "Saved catalog to {}: {} movies",
            path.display(),
            self.movie_count()
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Builders for catalog fixtures shared by analysis tests

    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    pub struct MovieBuilder {
        record: MovieRecord,
    }

    impl MovieBuilder {
        pub fn new(movie_id: i64, title: &str) -> Self {
            Self {
                record: MovieRecord {
                    movie: Movie {
                        movie_id,
                        title: title.to_string(),
                        original_title: None,
                        overview: None,
                        release_date: None,
                        budget: 0.0,
                        revenue: 0.0,
                        runtime: None,
                        popularity: None,
                        vote_average: None,
                        vote_count: None,
                        poster_path: None,
                        backdrop_path: None,
                        status: None,
                        original_language: None,
                        tagline: None,
                        imdb_id: None,
                        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                    },
                    genres: Vec::new(),
                    production_companies: Vec::new(),
                    cast: Vec::new(),
                },
            }
        }

        pub fn released(mut self, year: i32) -> Self {
            self.record.movie.release_date = NaiveDate::from_ymd_opt(year, 6, 1);
            self
        }

        pub fn financials(mut self, budget: f64, revenue: f64) -> Self {
            self.record.movie.budget = budget;
            self.record.movie.revenue = revenue;
            self
        }

        pub fn popularity(mut self, popularity: f64) -> Self {
            self.record.movie.popularity = Some(popularity);
            self
        }

        pub fn rating(mut self, vote_average: f64) -> Self {
            self.record.movie.vote_average = Some(vote_average);
            self
        }

        pub fn genre(mut self, genre_id: i64, name: &str) -> Self {
            self.record.genres.push(Genre {
                genre_id,
                name: name.to_string(),
            });
            self
        }

        pub fn company(mut self, company_id: i64, name: &str) -> Self {
            self.record.production_companies.push(ProductionCompany {
                company_id,
                name: name.to_string(),
                origin_country: None,
            });
            self
        }

        pub fn cast(mut self, cast_id: i64, name: &str) -> Self {
            let order_position = self.record.cast.len() as u32;
            self.record.cast.push((
                CastMember {
                    cast_id,
                    name: name.to_string(),
                    gender: None,
                    profile_path: None,
                },
                CastCredit {
                    cast_id,
                    character: None,
                    order_position,
                },
            ));
            self
        }

        pub fn build(self) -> MovieRecord {
            self.record
        }
    }

    pub fn catalog_of(records: Vec<MovieRecord>) -> Catalog {
        let mut catalog = Catalog::new();
        for record in records {
            catalog.insert_record(record);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::MovieBuilder;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_insert_links_entities() {
        let mut catalog = Catalog::new();
        catalog.insert_record(
            MovieBuilder::new(1, "Alien")
                .genre(27, "Horror")
                .genre(878, "Science Fiction")
                .company(4, "Brandywine")
                .cast(10, "Sigourney Weaver")
                .build(),
        );

        assert!(catalog.contains(1));
        assert_eq!(catalog.movie_count(), 1);
        assert_eq!(catalog.genre_count(), 2);
        assert_eq!(catalog.genres_of(1).collect::<Vec<_>>(), vec![27, 878]);
        assert_eq!(catalog.companies_of(1).collect::<Vec<_>>(), vec![4]);
        assert_eq!(catalog.cast_of(1).len(), 1);
        assert_eq!(catalog.cast_of(2).len(), 0);
    }

    #[test]
    fn test_movie_replaced_but_shared_entities_kept() {
        let mut catalog = Catalog::new();
        catalog.insert_record(MovieBuilder::new(1, "Old Title").genre(18, "Drama").build());
        catalog.insert_record(MovieBuilder::new(1, "New Title").genre(18, "Renamed").build());

        assert_eq!(catalog.movie(1).unwrap().title, "New Title");
        assert_eq!(catalog.genre(18).unwrap().name, "Drama");
        assert_eq!(catalog.genres_of(1).count(), 1);
    }

    #[test]
    fn test_duplicate_cast_credit_ignored() {
        let mut catalog = Catalog::new();
        catalog.insert_record(
            MovieBuilder::new(1, "Twins")
                .cast(5, "Actor")
                .cast(5, "Actor")
                .build(),
        );
        assert_eq!(catalog.cast_of(1).len(), 1);
        assert_eq!(catalog.cast_of(1)[0].order_position, 0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");

        let mut catalog = Catalog::new();
        catalog.insert_record(
            MovieBuilder::new(550, "Fight Club")
                .released(1999)
                .financials(63_000_000.0, 100_853_753.0)
                .genre(18, "Drama")
                .company(508, "Regency Enterprises")
                .cast(819, "Edward Norton")
                .cast(287, "Brad Pitt")
                .build(),
        );
        catalog.save(&path).unwrap();

        let loaded = Catalog::load(&path).unwrap();
        assert_eq!(loaded.movie(550), catalog.movie(550));
        assert_eq!(loaded.cast_of(550), catalog.cast_of(550));
        assert_eq!(loaded.company(508).unwrap().name, "Regency Enterprises");
    }

    #[test]
    fn test_load_missing_snapshot_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = Catalog::load(&temp_dir.path().join("absent.json")).unwrap();
        assert!(catalog.is_empty());
    }
}
