//! cinemetrics - offline movie catalog analytics
//!
//! Imports downloaded TMDB movie documents into a JSON catalog snapshot,
//! runs the catalog analyses, and exports the result tables as CSV. Also
//! carries three fixed sample datasets in chart-ready form.

pub mod analysis;
pub mod catalog;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod samples;

pub use analysis::{run_comprehensive, AnalysisResults};
pub use catalog::Catalog;
