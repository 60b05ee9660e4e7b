//! # Cinemetrics Common Library
//!
//! Shared code for the cinemetrics workspace including:
//! - Catalog domain models (movies, genres, studios, cast)
//! - Configuration loading and root folder resolution
//! - Movie ID cache persistence
//! - Money and ratio formatting helpers

pub mod config;
pub mod error;
pub mod id_cache;
pub mod models;
pub mod money;

pub use error::{Error, Result};
pub use id_cache::MovieIdCache;
