//! Duration-window selection over a date-ordered series.

use std::str::FromStr;

use crate::{DashboardError, DurationLabel, PriceSeries, WindowRule};

/// Select the sub-series a duration label refers to.
///
/// The result is always a contiguous suffix of `series` in its original
/// order. `YTD` anchors on the year of the *first* session in the series,
/// not on today's date.
pub fn filter(series: &PriceSeries, label: DurationLabel) -> PriceSeries {
    let points = series.points();
    match label.rule() {
        WindowRule::TailCount(count) => {
            let start = points.len().saturating_sub(count);
            PriceSeries::from_ordered(&points[start..])
        }
        WindowRule::SinceYearStart => {
            let Some(first) = series.first() else {
                return PriceSeries::empty();
            };
            let cutoff = first.date.start_of_year();
            let start = points.partition_point(|point| point.date < cutoff);
            PriceSeries::from_ordered(&points[start..])
        }
        WindowRule::Unbounded => series.clone(),
    }
}

/// Like [`filter`], parsing the label first.
pub fn filter_by_label(series: &PriceSeries, label: &str) -> Result<PriceSeries, DashboardError> {
    let label = DurationLabel::from_str(label)?;
    Ok(filter(series, label))
}
