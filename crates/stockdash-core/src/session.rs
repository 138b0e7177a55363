//! Explicit dashboard state and the view pipeline.
//!
//! The session owns the two pieces of state that survive a redraw: the
//! loaded series and the selected duration. Everything else is recomputed
//! from them by [`DashboardSession::view`].

use std::str::FromStr;

use serde::Serialize;

use crate::chart::{build_chart, ChartSpec};
use crate::summary::{heading, summarize, summary_rows, SummaryRow, WindowSummary};
use crate::window::filter;
use crate::{DashboardError, DurationLabel, Market, PriceSeries, Ticker};

pub const NO_DATA_MESSAGE: &str = "No data available for the selected duration.";

/// A fetched (or cached) series together with what it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSeries {
    pub ticker: Ticker,
    /// `None` when the series came from the local cache.
    pub market: Option<Market>,
    pub series: PriceSeries,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    loaded: Option<LoadedSeries>,
    selected: DurationLabel,
}

impl DashboardSession {
    pub fn new(default_duration: DurationLabel) -> Self {
        Self {
            loaded: None,
            selected: default_duration,
        }
    }

    pub fn selected_duration(&self) -> DurationLabel {
        self.selected
    }

    pub fn loaded(&self) -> Option<&LoadedSeries> {
        self.loaded.as_ref()
    }

    pub fn set_duration(&mut self, label: DurationLabel) {
        self.selected = label;
    }

    /// Select a duration by its label. Unknown labels leave the current
    /// selection untouched.
    pub fn select_duration(&mut self, raw: &str) -> Result<DurationLabel, DashboardError> {
        let label = DurationLabel::from_str(raw)?;
        self.selected = label;
        Ok(label)
    }

    /// Replace the loaded series. The selected duration is kept.
    pub fn load(&mut self, loaded: LoadedSeries) {
        self.loaded = Some(loaded);
    }

    /// Render the current state, or `None` before anything was loaded.
    pub fn view(&self) -> Result<Option<DashboardView>, DashboardError> {
        let Some(loaded) = &self.loaded else {
            return Ok(None);
        };

        let window = filter(&loaded.series, self.selected);
        let content = match summarize(&window) {
            Some(summary) => WindowContent::Data {
                rows: summary_rows(&summary),
                chart: build_chart(&window)?,
                summary,
            },
            None => WindowContent::NoData {
                message: NO_DATA_MESSAGE,
            },
        };

        Ok(Some(DashboardView {
            ticker: loaded.ticker.clone(),
            market: loaded.market,
            duration: self.selected,
            heading: heading(self.selected),
            sessions: window.len(),
            content,
        }))
    }
}

/// Everything the presentation layer needs for one redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub ticker: Ticker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market: Option<Market>,
    pub duration: DurationLabel,
    pub heading: String,
    pub sessions: usize,
    pub content: WindowContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WindowContent {
    Data {
        summary: WindowSummary,
        rows: Vec<SummaryRow>,
        chart: ChartSpec,
    },
    NoData {
        message: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, PricePoint, TradeDate};

    fn loaded(closes: &[f64]) -> LoadedSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(index, close)| {
                PricePoint::new(
                    TradeDate::from_ymd(2024, 2, 1 + index as u8).expect("date"),
                    *close,
                    *close,
                    *close,
                    *close,
                    10,
                )
                .expect("point")
            })
            .collect();
        LoadedSeries {
            ticker: Ticker::parse("AAPL").expect("valid"),
            market: Some(Market::Nasdaq),
            series: PriceSeries::new(points).expect("series"),
        }
    }

    #[test]
    fn nothing_to_view_before_load() {
        let session = DashboardSession::default();
        assert_eq!(session.selected_duration(), DurationLabel::FiveDays);
        assert!(session.view().expect("view").is_none());
    }

    #[test]
    fn unknown_label_keeps_previous_selection() {
        let mut session = DashboardSession::default();
        session.select_duration("1M").expect("valid label");

        let error = session.select_duration("10D").expect_err("must fail");

        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert_eq!(session.selected_duration(), DurationLabel::OneMonth);
    }

    #[test]
    fn view_follows_selected_duration() {
        let mut session = DashboardSession::new(DurationLabel::OneDay);
        session.load(loaded(&[10.0, 11.0, 12.0]));

        let view = session.view().expect("view").expect("loaded");
        assert_eq!(view.sessions, 1);
        assert_eq!(view.heading, "Analytics for 1 Day");

        session.set_duration(DurationLabel::Max);
        let view = session.view().expect("view").expect("loaded");
        assert_eq!(view.sessions, 3);
        let WindowContent::Data { summary, rows, chart } = view.content else {
            panic!("expected data");
        };
        assert_eq!(summary.close_at_end, 12.0);
        assert_eq!(rows.len(), 6);
        assert_eq!(chart.data.len(), 3);
    }

    #[test]
    fn reloading_keeps_selected_duration() {
        let mut session = DashboardSession::default();
        session.select_duration("YTD").expect("valid");
        session.load(loaded(&[1.0]));
        session.load(loaded(&[1.0, 2.0]));

        assert_eq!(session.selected_duration(), DurationLabel::YearToDate);
        assert_eq!(session.loaded().expect("loaded").series.len(), 2);
    }

    #[test]
    fn empty_series_reports_no_data() {
        let mut session = DashboardSession::default();
        session.load(LoadedSeries {
            series: PriceSeries::empty(),
            ..loaded(&[1.0])
        });

        let view = session.view().expect("view").expect("loaded");
        assert_eq!(
            view.content,
            WindowContent::NoData {
                message: NO_DATA_MESSAGE
            }
        );
    }
}
