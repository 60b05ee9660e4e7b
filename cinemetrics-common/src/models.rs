//! Catalog domain models
//!
//! Movies are keyed by their TMDB id. Genres, production companies and cast
//! members are shared entities referenced from movies by id.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A movie as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Production budget in USD (0 when unknown)
    pub budget: f64,
    /// Box office revenue in USD (0 when unknown)
    pub revenue: f64,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub status: Option<String>,
    pub original_language: Option<String>,
    pub tagline: Option<String>,
    pub imdb_id: Option<String>,
    /// When this record was extracted
    pub created_at: DateTime<Utc>,
}

impl Movie {
    /// Release year, if the release date is known
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }

    /// Both budget and revenue are reported
    pub fn has_financials(&self) -> bool {
        self.budget > 0.0 && self.revenue > 0.0
    }

    /// Revenue over budget; `None` without a positive budget
    pub fn roi(&self) -> Option<f64> {
        if self.budget > 0.0 {
            Some(self.revenue / self.budget)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub genre_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub company_id: i64,
    pub name: String,
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub cast_id: i64,
    pub name: String,
    pub gender: Option<u8>,
    pub profile_path: Option<String>,
}

/// A cast member's billing in one movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastCredit {
    pub cast_id: i64,
    pub character: Option<String>,
    /// Zero-based billing position
    pub order_position: u32,
}

/// One extracted movie with everything linked to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub movie: Movie,
    pub genres: Vec<Genre>,
    pub production_companies: Vec<ProductionCompany>,
    /// Cast members in billing order, paired with their credit
    pub cast: Vec<(CastMember, CastCredit)>,
}
