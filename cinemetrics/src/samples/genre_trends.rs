//! Genre popularity scores, 2015-2024

use cinemetrics_common::money::percent_change;
use serde::Serialize;

use super::{Chart, ChartKind, Point, Series};

/// Genre names in column order
pub const GENRES: [&str; 5] = ["Horror", "Sci-Fi", "Action", "Drama", "Comedy"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenrePopularity {
    pub year: i32,
    pub horror: f64,
    pub scifi: f64,
    pub action: f64,
    pub drama: f64,
    pub comedy: f64,
}

impl GenrePopularity {
    /// Scores in [`GENRES`] order
    pub fn scores(&self) -> [f64; 5] {
        [self.horror, self.scifi, self.action, self.drama, self.comedy]
    }
}

const fn row(
    year: i32,
    horror: f64,
    scifi: f64,
    action: f64,
    drama: f64,
    comedy: f64,
) -> GenrePopularity {
    GenrePopularity {
        year,
        horror,
        scifi,
        action,
        drama,
        comedy,
    }
}

static GENRE_POPULARITY: [GenrePopularity; 10] = [
    row(2015, 62.4, 71.8, 85.2, 58.9, 66.1),
    row(2016, 65.1, 73.5, 83.7, 57.6, 64.8),
    row(2017, 70.3, 75.2, 84.9, 56.8, 63.2),
    row(2018, 72.8, 78.9, 86.4, 55.1, 61.7),
    row(2019, 76.5, 80.1, 88.2, 54.7, 60.3),
    row(2020, 74.2, 76.4, 79.5, 59.8, 58.9),
    row(2021, 79.6, 82.7, 83.1, 57.2, 57.4),
    row(2022, 83.1, 84.9, 86.8, 55.9, 56.2),
    row(2023, 86.7, 83.2, 85.4, 54.3, 55.8),
    row(2024, 89.4, 85.6, 84.1, 53.8, 54.9),
];

pub fn genre_popularity() -> &'static [GenrePopularity] {
    &GENRE_POPULARITY
}

pub fn chart() -> Chart {
    let rows = genre_popularity();
    let series = GENRES
        .iter()
        .enumerate()
        .map(|(column, name)| Series {
            name: name.to_string(),
            points: rows
                .iter()
                .map(|r| Point {
                    x: f64::from(r.year),
                    y: r.scores()[column],
                    label: None,
                })
                .collect(),
        })
        .collect();

    Chart {
        kind: ChartKind::Line,
        title: "Genre Popularity Trends".to_string(),
        x_label: "Year".to_string(),
        y_label: "Popularity score".to_string(),
        series,
        summary: summary(rows),
    }
}

fn summary(rows: &[GenrePopularity]) -> Vec<String> {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Vec::new();
    };

    let changes: Vec<(&str, f64, f64, Option<f64>)> = GENRES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let from = first.scores()[i];
            let to = last.scores()[i];
            (*name, from, to, percent_change(from, to))
        })
        .collect();

    let mut lines = Vec::new();

    if let Some((name, from, to, Some(pct))) = changes
        .iter()
        .filter(|c| c.3.is_some())
        .max_by(|a, b| a.3.unwrap_or(0.0).total_cmp(&b.3.unwrap_or(0.0)))
    {
        lines.push(format!(
            "{} shows the strongest growth: {:.1} to {:.1} ({:+.1}%) between {} and {}",
            name, from, to, pct, first.year, last.year
        ));
    }

    if let Some((name, score)) = GENRES
        .iter()
        .zip(last.scores())
        .max_by(|a, b| a.1.total_cmp(&b.1))
    {
        lines.push(format!("Most popular genre in {}: {} ({:.1})", last.year, name, score));
    }

    let declining: Vec<&str> = changes
        .iter()
        .filter(|c| c.3.map(|p| p < 0.0).unwrap_or(false))
        .map(|c| c.0)
        .collect();
    if !declining.is_empty() {
        lines.push(format!("Declining since {}: {}", first.year, declining.join(", ")));
    }

    lines
}
