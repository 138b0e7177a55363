//! Window statistics and their display formatting.

use serde::Serialize;

use crate::{DurationLabel, PriceSeries};

/// Derived statistics for one display window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub open_at_start: f64,
    pub close_at_start: f64,
    pub open_at_end: f64,
    pub close_at_end: f64,
    /// Sum of session volumes. `u128` so that no window can overflow it.
    pub total_volume: u128,
    /// Percent change from first to last close; 0 when the first close is 0.
    pub percent_change: f64,
}

/// Summarize a window, or `None` when it holds no sessions.
pub fn summarize(window: &PriceSeries) -> Option<WindowSummary> {
    let first = window.first()?;
    let last = window.last()?;

    let total_volume = window.iter().map(|point| u128::from(point.volume)).sum();
    let percent_change = if first.close == 0.0 {
        0.0
    } else {
        (last.close - first.close) / first.close * 100.0
    };

    Some(WindowSummary {
        open_at_start: first.open,
        close_at_start: first.close,
        open_at_end: last.open,
        close_at_end: last.close,
        total_volume,
        percent_change,
    })
}

/// One metric/value line of the analytics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub metric: &'static str,
    pub value: String,
}

/// Heading shown above the analytics table.
pub fn heading(label: DurationLabel) -> String {
    format!("Analytics for {}", label.display_name())
}

pub fn summary_rows(summary: &WindowSummary) -> Vec<SummaryRow> {
    [
        ("Opening Price at start of period", format_money(summary.open_at_start)),
        ("Closing Price at start of period", format_money(summary.close_at_start)),
        ("Opening Price at end of period", format_money(summary.open_at_end)),
        ("Closing Price at end of period", format_money(summary.close_at_end)),
        ("Total Volume Traded", format_volume(summary.total_volume)),
        ("Percentage Change over period", format_percent(summary.percent_change)),
    ]
    .into_iter()
    .map(|(metric, value)| SummaryRow { metric, value })
    .collect()
}

pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Thousands-separated integer, e.g. `1,234,567`.
pub fn format_volume(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
