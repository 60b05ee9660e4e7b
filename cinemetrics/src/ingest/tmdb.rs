//! TMDB movie-detail payloads
//!
//! Mirrors the `/movie/{id}?append_to_response=credits` response closely
//! enough to extract a [`MovieRecord`]. Unknown fields are ignored.

use chrono::{DateTime, NaiveDate, Utc};
use cinemetrics_common::models::{
    CastCredit, CastMember, Genre, Movie, MovieRecord, ProductionCompany,
};
use serde::Deserialize;
use thiserror::Error;

/// Extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Document is not valid JSON or does not match the payload shape
    #[error("Malformed movie payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A field the catalog requires is absent
    #[error("Movie {movie_id}: missing required field '{field}'")]
    MissingField { movie_id: i64, field: &'static str },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u32>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub production_companies: Vec<TmdbCompany>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCompany {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub gender: Option<u8>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
}

/// Parse a raw document
pub fn parse_payload(bytes: &[u8]) -> Result<TmdbMovie, ExtractError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Turn a payload into a catalog record
///
/// Keeps the first `cast_limit` cast members in billing order. Empty or
/// unparseable release dates become `None`; absent money fields become 0.
pub fn extract_record(
    payload: TmdbMovie,
    cast_limit: usize,
    now: DateTime<Utc>,
) -> Result<MovieRecord, ExtractError> {
    let movie_id = payload.id;
    let title = non_empty(payload.title).ok_or(ExtractError::MissingField {
        movie_id,
        field: "title",
    })?;

    let release_date = non_empty(payload.release_date).and_then(|raw| {
        match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(movie_id, release_date = %raw, "Unparseable release date: {}", e);
                None
            }
        }
    });

    let movie = Movie {
        movie_id,
        title,
        original_title: non_empty(payload.original_title),
        overview: non_empty(payload.overview),
        release_date,
        budget: payload.budget.unwrap_or(0.0),
        revenue: payload.revenue.unwrap_or(0.0),
        runtime: payload.runtime,
        popularity: payload.popularity,
        vote_average: payload.vote_average,
        vote_count: payload.vote_count,
        poster_path: non_empty(payload.poster_path),
        backdrop_path: non_empty(payload.backdrop_path),
        status: non_empty(payload.status),
        original_language: non_empty(payload.original_language),
        tagline: non_empty(payload.tagline),
        imdb_id: non_empty(payload.imdb_id),
        created_at: now,
    };

    let genres = payload
        .genres
        .into_iter()
        .map(|g| Genre {
            genre_id: g.id,
            name: g.name,
        })
        .collect();

    let production_companies = payload
        .production_companies
        .into_iter()
        .map(|c| ProductionCompany {
            company_id: c.id,
            name: c.name,
            origin_country: non_empty(c.origin_country),
        })
        .collect();

    let cast = payload
        .credits
        .unwrap_or_default()
        .cast
        .into_iter()
        .take(cast_limit)
        .enumerate()
        .map(|(position, member)| {
            let credit = CastCredit {
                cast_id: member.id,
                character: non_empty(member.character),
                order_position: position as u32,
            };
            let member = CastMember {
                cast_id: member.id,
                name: member.name,
                gender: member.gender,
                profile_path: non_empty(member.profile_path),
            };
            (member, credit)
        })
        .collect();

    Ok(MovieRecord {
        movie,
        genres,
        production_companies,
        cast,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
