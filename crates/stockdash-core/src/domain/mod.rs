//! # Domain Models
//!
//! Canonical types for the dashboard.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated exchange ticker |
//! | [`Market`] | Exchange venue and its provider suffix |
//! | [`DurationLabel`] | Display window label (1D, 5D, ..., Max) |
//! | [`WindowRule`] | How a label selects its window |
//! | [`TradeDate`] | Session calendar date |
//! | [`PricePoint`] | One OHLCV session |
//! | [`PriceSeries`] | Date-ordered sessions |
//!
//! Construction validates invariants, so a [`PriceSeries`] in hand is always
//! strictly ordered by date with finite, non-negative prices.

mod duration;
mod market;
mod price;
mod ticker;

pub use duration::{duration_catalog, DurationLabel, DurationSpec, WindowRule};
pub use market::Market;
pub use price::{PricePoint, PriceSeries, TradeDate};
pub use ticker::Ticker;
