//! # Stockdash Core
//!
//! Domain types and pure view logic for the stockdash price dashboard.
//!
//! ## Overview
//!
//! - **Catalogs** of markets and display durations
//! - **Window filter** selecting a duration's sessions from a full series
//! - **Summary calculator** for open/close/volume/percent-change statistics
//! - **Chart builder** producing a declarative line-chart description
//! - **Price sources** (Yahoo Finance, offline fixture) and a JSON **store**
//! - **Session** state threading the loaded series and selected duration
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Price source implementations |
//! | [`chart`] | Line-chart spec with padded y domain |
//! | [`config`] | `stockdash.toml` loading |
//! | [`domain`] | Ticker, market, duration and price types |
//! | [`error`] | Validation errors and the dashboard error taxonomy |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`session`] | Session state and view pipeline |
//! | [`source`] | Price source trait |
//! | [`store`] | Per-ticker JSON persistence |
//! | [`summary`] | Window statistics and formatting |
//! | [`window`] | Duration window filter |
//!
//! ## Quick Start
//!
//! ```rust
//! use stockdash_core::{
//!     build_chart, filter, summarize, DurationLabel, PricePoint, PriceSeries, TradeDate,
//! };
//!
//! let series = PriceSeries::new(vec![
//!     PricePoint::new(TradeDate::parse("2024-01-02")?, 100.0, 103.0, 99.0, 100.0, 1_000)?,
//!     PricePoint::new(TradeDate::parse("2024-01-03")?, 102.0, 103.0, 98.0, 99.0, 500)?,
//! ])?;
//!
//! let window = filter(&series, DurationLabel::FiveDays);
//! let summary = summarize(&window).expect("window has sessions");
//! assert_eq!(summary.total_volume, 1_500);
//! assert!((summary.percent_change + 1.0).abs() < 1e-9);
//!
//! let chart = build_chart(&window)?;
//! assert_eq!(chart.data.len(), 2);
//! # Ok::<(), stockdash_core::ValidationError>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations outside the pure core return [`DashboardError`],
//! whose [`ErrorKind`] separates user mistakes from everything else:
//!
//! ```rust
//! use stockdash_core::{DashboardError, ErrorKind};
//!
//! fn describe(error: &DashboardError) -> String {
//!     match error.kind() {
//!         ErrorKind::InvalidInput => error.message().to_owned(),
//!         ErrorKind::Unexpected => format!("An unexpected error occurred: {error}"),
//!     }
//! }
//! ```

pub mod adapters;
pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod session;
pub mod source;
pub mod store;
pub mod summary;
pub mod window;

// Adapter implementations
pub use adapters::{FixtureSource, YahooAdapter};

// Chart
pub use chart::{build_chart, close_domain, ChartPoint, ChartSpec, ValueDomain};

// Configuration
pub use config::{Config, ConfigError};

// Domain models
pub use domain::{
    duration_catalog, DurationLabel, DurationSpec, Market, PricePoint, PriceSeries, Ticker,
    TradeDate, WindowRule,
};

// Error types
pub use error::{DashboardError, ErrorKind, ValidationError};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Session
pub use session::{DashboardSession, DashboardView, LoadedSeries, WindowContent, NO_DATA_MESSAGE};

// Sources and persistence
pub use source::PriceSource;
pub use store::SeriesStore;

// Summary
pub use summary::{summarize, summary_rows, SummaryRow, WindowSummary};

// Window filter
pub use window::{filter, filter_by_label};
