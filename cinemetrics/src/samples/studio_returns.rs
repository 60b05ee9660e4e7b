//! Studio risk-adjusted returns

use cinemetrics_common::money::format_ratio;
use serde::Serialize;

use super::{Chart, ChartKind, Point, Series};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StudioMetrics {
    pub studio: &'static str,
    /// profit_ratio / risk
    pub risk_adjusted_return: f64,
    pub profit_ratio: f64,
    pub risk: f64,
    /// Share of all genres the studio releases in (0..=1)
    pub genre_diversity: f64,
}

const fn studio(
    studio: &'static str,
    risk_adjusted_return: f64,
    profit_ratio: f64,
    risk: f64,
    genre_diversity: f64,
) -> StudioMetrics {
    StudioMetrics {
        studio,
        risk_adjusted_return,
        profit_ratio,
        risk,
        genre_diversity,
    }
}

// Ordered by risk-adjusted return, highest first
static STUDIO_METRICS: [StudioMetrics; 8] = [
    studio("Blumhouse", 4.0, 6.8, 1.7, 0.35),
    studio("Marvel Studios", 3.0, 3.9, 1.3, 0.45),
    studio("A24", 2.8, 4.2, 1.5, 0.62),
    studio("Pixar", 2.5, 3.5, 1.4, 0.30),
    studio("Warner Bros.", 2.0, 2.9, 1.45, 0.85),
    studio("Universal Pictures", 1.8, 2.7, 1.5, 0.80),
    studio("Paramount", 1.6, 2.2, 1.375, 0.75),
    studio("Sony Pictures", 1.4, 2.1, 1.5, 0.78),
];

pub fn studio_metrics() -> &'static [StudioMetrics] {
    &STUDIO_METRICS
}

pub fn chart() -> Chart {
    let studios = studio_metrics();
    let points = studios
        .iter()
        .enumerate()
        .map(|(i, s)| Point {
            x: i as f64,
            y: s.risk_adjusted_return,
            label: Some(s.studio.to_string()),
        })
        .collect();

    Chart {
        kind: ChartKind::Bar,
        title: "Studio Risk-Adjusted Returns".to_string(),
        x_label: "Studio".to_string(),
        y_label: "Risk-adjusted return".to_string(),
        series: vec![Series {
            name: "risk_adjusted_return".to_string(),
            points,
        }],
        summary: summary(studios),
    }
}

fn summary(studios: &[StudioMetrics]) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(top) = studios
        .iter()
        .max_by(|a, b| a.risk_adjusted_return.total_cmp(&b.risk_adjusted_return))
    {
        lines.push(format!(
            "Best risk-adjusted return: {} ({:.2}, profit ratio {} at risk {:.2})",
            top.studio,
            top.risk_adjusted_return,
            format_ratio(top.profit_ratio),
            top.risk
        ));
    }

    if let Some(diverse) = studios
        .iter()
        .max_by(|a, b| a.genre_diversity.total_cmp(&b.genre_diversity))
    {
        lines.push(format!(
            "Most diversified slate: {} ({:.0}% of genres)",
            diverse.studio,
            diverse.genre_diversity * 100.0
        ));
    }

    if let Some(safest) = studios.iter().min_by(|a, b| a.risk.total_cmp(&b.risk)) {
        lines.push(format!("Lowest risk: {} ({:.2})", safest.studio, safest.risk));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_adjusted_return_consistent() {
        for s in studio_metrics() {
            assert!(s.risk > 0.0, "{}", s.studio);
            assert!(
                (s.risk_adjusted_return - s.profit_ratio / s.risk).abs() <= 0.01,
                "{}",
                s.studio
            );
            assert!((0.0..=1.0).contains(&s.genre_diversity), "{}", s.studio);
        }
    }

    #[test]
    fn test_ordered_by_risk_adjusted_return() {
        for pair in studio_metrics().windows(2) {
            assert!(pair[0].risk_adjusted_return >= pair[1].risk_adjusted_return);
        }
    }

    #[test]
    fn test_bar_per_studio() {
        let chart = chart();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.point_count(), studio_metrics().len());
        assert_eq!(chart.series[0].points[0].label.as_deref(), Some("Blumhouse"));
    }

    #[test]
    fn test_summary() {
        let lines = chart().summary;
        assert_eq!(
            lines[0],
            "Best risk-adjusted return: Blumhouse (4.00, profit ratio 6.80x at risk 1.70)"
        );
        assert_eq!(lines[1], "Most diversified slate: Warner Bros. (85% of genres)");
        assert_eq!(lines[2], "Lowest risk: Marvel Studios (1.30)");
    }
}
