//! Sparklines, day-over-day deltas and dollar amounts
//!
//! These are the cell-level helpers every formatter shares.

use awscost_core::types::DailyCostSeries;

/// Bar glyphs from lowest to highest
///
/// The full block is left out because Slack renders it taller than the rest.
pub const SPARKS: [char; 7] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇'];

/// Shown instead of a percentage when there is nothing to compare against
pub const DELTA_PLACEHOLDER: &str = " (--    %)";

/// Render a series as one bar glyph per day, scaled to its own min and max
///
/// A flat series renders every point with the highest glyph.
///
/// # Examples
/// ```
/// use awscost_render::sparkline::sparkline;
///
/// assert_eq!(sparkline(&[1.0, 7.0]), "▁▇");
/// assert_eq!(sparkline(&[3.0, 3.0, 3.0]), "▇▇▇");
/// assert_eq!(sparkline(&[0.0, 3.0, 6.0]), "▁▄▇");
/// ```
pub fn sparkline(points: &[f64]) -> String {
    let lower = points.iter().copied().fold(f64::INFINITY, f64::min);
    let upper = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = upper - lower;
    let top = SPARKS.len() - 1;

    points
        .iter()
        .map(|point| {
            let scaled = if width == 0.0 {
                1.0
            } else {
                (point - lower) / width
            };
            let which = ((scaled * top as f64).floor().max(0.0) as usize).min(top);
            SPARKS[which]
        })
        .collect()
}

/// Sparkline for a cost series
pub fn series_sparkline(series: &DailyCostSeries) -> String {
    sparkline(series.values())
}

/// Percentage change from the day before yesterday to yesterday
///
/// Formatted as `" (+12.34%)"` with the sign always shown; falls back to
/// [`DELTA_PLACEHOLDER`] with fewer than two days or a zero base.
///
/// # Examples
/// ```
/// use awscost_render::sparkline::delta;
/// use awscost_core::types::DailyCostSeries;
///
/// assert_eq!(delta(&DailyCostSeries::from(vec![5.0, 10.0])), " (+100.00%)");
/// assert_eq!(delta(&DailyCostSeries::from(vec![10.0, 0.0])), " (-100.00%)");
/// assert_eq!(delta(&DailyCostSeries::from(vec![0.0, 10.0])), " (--    %)");
/// ```
pub fn delta(series: &DailyCostSeries) -> String {
    match series.day_before_yesterday() {
        Some(previous) if previous != 0.0 => {
            let change = (series.yesterday() - previous) / previous * 100.0;
            format!(" ({change:+6.2}%)")
        }
        _ => DELTA_PLACEHOLDER.to_string(),
    }
}

/// Dollar amount with two decimals
pub fn dollars(amount: f64) -> String {
    format!("${amount:.2}")
}
