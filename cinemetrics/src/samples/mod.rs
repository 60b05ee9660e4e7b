//! Hand-authored sample datasets and their chart-ready form
//!
//! Each dataset is a fixed array compiled into the binary. A dataset maps to
//! a [`Chart`]: typed series of points plus summary text derived from the
//! same array. Drawing the chart is left to whatever consumes the JSON.

pub mod budget_efficiency;
pub mod genre_trends;
pub mod studio_returns;

pub use budget_efficiency::{budget_samples, BudgetSample, GENRE_BUCKETS};
pub use genre_trends::{genre_popularity, GenrePopularity, GENRES};
pub use studio_returns::{studio_metrics, StudioMetrics};

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// Selectable sample dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleSet {
    GenreTrends,
    BudgetEfficiency,
    StudioReturns,
}

impl SampleSet {
    pub const ALL: [SampleSet; 3] = [
        SampleSet::GenreTrends,
        SampleSet::BudgetEfficiency,
        SampleSet::StudioReturns,
    ];

    pub fn chart(self) -> Chart {
        match self {
            SampleSet::GenreTrends => genre_trends::chart(),
            SampleSet::BudgetEfficiency => budget_efficiency::chart(),
            SampleSet::StudioReturns => studio_returns::chart(),
        }
    }

    /// Number of rows in the underlying dataset
    pub fn row_count(self) -> usize {
        match self {
            SampleSet::GenreTrends => genre_popularity().len(),
            SampleSet::BudgetEfficiency => budget_samples().len(),
            SampleSet::StudioReturns => studio_metrics().len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Scatter,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub summary: Vec<String>,
}

impl Chart {
    /// Total points across all series
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        writeln!(f, "x: {}, y: {}", self.x_label, self.y_label)?;
        for series in &self.series {
            let points: Vec<String> = series
                .points
                .iter()
                .map(|p| match &p.label {
                    Some(label) => format!("{} {:.2}", label, p.y),
                    None => format!("({}, {:.2})", p.x, p.y),
                })
                .collect();
            writeln!(f, "  {}: {}", series.name, points.join(", "))?;
        }
        writeln!(f)?;
        for line in &self.summary {
            writeln!(f, "- {}", line)?;
        }
        Ok(())
    }
}

/// Pearson correlation; `None` with fewer than two points or zero variance
pub(crate) fn correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}
