//! Budget vs. revenue observations across four genre buckets
//!
//! Amounts are in millions of USD.

use cinemetrics_common::money::format_ratio;
use serde::Serialize;

use super::{correlation, Chart, ChartKind, Point, Series};

pub const GENRE_BUCKETS: [&str; 4] = ["Horror", "Action", "Drama", "Sci-Fi"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetSample {
    pub budget: f64,
    pub revenue: f64,
    /// revenue / budget
    pub efficiency: f64,
    pub genre: &'static str,
}

const fn sample(
    genre: &'static str,
    budget: f64,
    revenue: f64,
    efficiency: f64,
) -> BudgetSample {
    BudgetSample {
        budget,
        revenue,
        efficiency,
        genre,
    }
}

static BUDGET_SAMPLES: [BudgetSample; 20] = [
    sample("Horror", 5.0, 78.0, 15.6),
    sample("Horror", 10.0, 101.0, 10.1),
    sample("Horror", 15.0, 96.0, 6.4),
    sample("Horror", 3.5, 52.5, 15.0),
    sample("Horror", 20.0, 88.0, 4.4),
    sample("Action", 150.0, 525.0, 3.5),
    sample("Action", 200.0, 780.0, 3.9),
    sample("Action", 120.0, 300.0, 2.5),
    sample("Action", 250.0, 1100.0, 4.4),
    sample("Action", 90.0, 243.0, 2.7),
    sample("Drama", 25.0, 60.0, 2.4),
    sample("Drama", 40.0, 82.0, 2.05),
    sample("Drama", 15.0, 48.0, 3.2),
    sample("Drama", 60.0, 96.0, 1.6),
    sample("Drama", 30.0, 57.0, 1.9),
    sample("Sci-Fi", 160.0, 640.0, 4.0),
    sample("Sci-Fi", 100.0, 310.0, 3.1),
    sample("Sci-Fi", 180.0, 486.0, 2.7),
    sample("Sci-Fi", 60.0, 222.0, 3.7),
    sample("Sci-Fi", 200.0, 900.0, 4.5),
];

pub fn budget_samples() -> &'static [BudgetSample] {
    &BUDGET_SAMPLES
}

pub fn chart() -> Chart {
    let samples = budget_samples();
    let series = GENRE_BUCKETS
        .iter()
        .map(|genre| Series {
            name: genre.to_string(),
            points: samples
                .iter()
                .filter(|s| s.genre == *genre)
                .map(|s| Point {
                    x: s.budget,
                    y: s.revenue,
                    label: None,
                })
                .collect(),
        })
        .collect();

    Chart {
        kind: ChartKind::Scatter,
        title: "Budget Efficiency by Genre".to_string(),
        x_label: "Budget ($M)".to_string(),
        y_label: "Revenue ($M)".to_string(),
        series,
        summary: summary(samples),
    }
}

/// Average efficiency per bucket, in bucket order
pub fn average_efficiency(samples: &[BudgetSample]) -> Vec<(&'static str, f64)> {
    GENRE_BUCKETS
        .iter()
        .filter_map(|genre| {
            let values: Vec<f64> = samples
                .iter()
                .filter(|s| s.genre == *genre)
                .map(|s| s.efficiency)
                .collect();
            if values.is_empty() {
                None
            } else {
                Some((*genre, values.iter().sum::<f64>() / values.len() as f64))
            }
        })
        .collect()
}

fn summary(samples: &[BudgetSample]) -> Vec<String> {
    let averages = average_efficiency(samples);
    let mut lines = Vec::new();

    if let Some((genre, best)) = averages.iter().max_by(|a, b| a.1.total_cmp(&b.1)) {
        lines.push(format!(
            "Most efficient genre: {} (average {})",
            genre,
            format_ratio(*best)
        ));
    }
    if let Some((genre, worst)) = averages.iter().min_by(|a, b| a.1.total_cmp(&b.1)) {
        lines.push(format!(
            "Least efficient genre: {} (average {})",
            genre,
            format_ratio(*worst)
        ));
    }

    let budgets: Vec<f64> = samples.iter().map(|s| s.budget).collect();
    let efficiencies: Vec<f64> = samples.iter().map(|s| s.efficiency).collect();
    if let Some(r) = correlation(&budgets, &efficiencies) {
        let trend = if r < 0.0 { "falls" } else { "rises" };
        lines.push(format!("Efficiency {} as budget grows (r = {:.2})", trend, r));
    }

    lines
}
