//! Money and ratio display formatting
//!
//! Report lines show dollar amounts in millions (`$123.45M`) and
//! revenue/budget ratios as multipliers (`2.50x`).

const MILLION: f64 = 1_000_000.0;

/// Convert USD to millions
pub fn to_millions(amount: f64) -> f64 {
    amount / MILLION
}

/// Format USD as millions with two decimals
///
/// # Examples
///
/// ```
/// use cinemetrics_common::money::format_millions;
///
/// assert_eq!(format_millions(123_450_000.0), "$123.45M");
/// assert_eq!(format_millions(0.0), "$0.00M");
/// assert_eq!(format_millions(-2_500_000.0), "-$2.50M");
/// ```
pub fn format_millions(amount: f64) -> String {
    let millions = to_millions(amount);
    if millions < 0.0 {
        format!("-${:.2}M", millions.abs())
    } else {
        format!("${:.2}M", millions)
    }
}

/// Format a ratio as a multiplier
///
/// ```
/// use cinemetrics_common::money::format_ratio;
///
/// assert_eq!(format_ratio(2.5), "2.50x");
/// ```
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.2}x", ratio)
}

/// Signed percentage change from `from` to `to`; `None` when `from` is zero
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        None
    } else {
        Some((to - from) / from * 100.0)
    }
}
