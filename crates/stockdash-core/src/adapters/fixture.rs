use std::collections::BTreeSet;

use time::{Date, Duration, Month, Weekday};

use crate::source::{no_data_error, PriceSource, SourceFuture};
use crate::{DashboardError, Market, PricePoint, PriceSeries, Ticker, TradeDate};

/// Default number of weekday sessions, a little over three years.
pub const DEFAULT_FIXTURE_SESSIONS: usize = 800;

/// Deterministic offline source used by `--mock` and tests.
///
/// Sessions are consecutive weekdays ending on 2024-12-31; prices are
/// derived from the ticker text so different tickers get different lines.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    sessions: usize,
    unlisted: BTreeSet<String>,
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_SESSIONS)
    }
}

impl FixtureSource {
    pub fn new(sessions: usize) -> Self {
        Self {
            sessions,
            unlisted: BTreeSet::new(),
        }
    }

    /// Treat `ticker` as having no history on any market.
    pub fn with_unlisted(mut self, ticker: &str) -> Self {
        self.unlisted.insert(ticker.trim().to_ascii_uppercase());
        self
    }

    pub fn series_for(&self, ticker: &Ticker, market: Market) -> Result<PriceSeries, DashboardError> {
        if self.sessions == 0 || self.unlisted.contains(ticker.as_str()) {
            return Err(no_data_error(ticker, market));
        }

        let seed = ticker_seed(ticker);
        let dates = weekdays_ending(last_session(), self.sessions);
        let points = dates
            .into_iter()
            .enumerate()
            .map(|(index, date)| {
                let base = 90.0 + ((seed + index as u64) % 350) as f64 / 10.0;
                PricePoint::new(
                    TradeDate::from_date(date),
                    base,
                    base + 1.20,
                    base - 0.80,
                    base + 0.30,
                    20_000 + (index as u64) * 25,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceSeries::new(points)?)
    }
}

impl PriceSource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn fetch_series<'a>(&'a self, ticker: &'a Ticker, market: Market) -> SourceFuture<'a> {
        Box::pin(async move {
            let result = self.series_for(ticker, market);
            if let Err(error) = &result {
                log::error!("Error occurred while fetching fixture data: {error}");
            }
            result
        })
    }
}

fn last_session() -> Date {
    Date::from_calendar_date(2024, Month::December, 31).unwrap_or(Date::MIN)
}

fn weekdays_ending(last: Date, count: usize) -> Vec<Date> {
    let mut dates = Vec::with_capacity(count);
    let mut cursor = last;
    while dates.len() < count {
        if !matches!(cursor.weekday(), Weekday::Saturday | Weekday::Sunday) {
            dates.push(cursor);
        }
        cursor = cursor - Duration::days(1);
    }
    dates.reverse();
    dates
}

fn ticker_seed(ticker: &Ticker) -> u64 {
    ticker.as_str().bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}
