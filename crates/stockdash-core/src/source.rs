//! Price source contract.
//!
//! A source turns a ticker and a market into the full daily history for
//! that instrument. Sources never retry; a failure is final for the action
//! that triggered it.

use std::future::Future;
use std::pin::Pin;

use crate::{DashboardError, Market, PriceSeries, Ticker};

pub type SourceFuture<'a> =
    Pin<Box<dyn Future<Output = Result<PriceSeries, DashboardError>> + Send + 'a>>;

pub trait PriceSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the full daily history.
    ///
    /// Returns `InvalidInput` when the source has no sessions for the
    /// ticker, so a successful result is never empty.
    fn fetch_series<'a>(&'a self, ticker: &'a Ticker, market: Market) -> SourceFuture<'a>;
}

/// The message shown when a ticker has no history on a market.
pub fn no_data_error(ticker: &Ticker, market: Market) -> DashboardError {
    DashboardError::invalid_input(format!(
        "No data found for ticker: {ticker} in market: {market}"
    ))
}
