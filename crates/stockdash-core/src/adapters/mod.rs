//! Price source implementations.
//!
//! | Adapter | Description |
//! |---------|-------------|
//! | [`YahooAdapter`] | Yahoo Finance chart API, full daily history |
//! | [`FixtureSource`] | Deterministic offline history for `--mock` and tests |

mod fixture;
mod yahoo;

pub use fixture::{FixtureSource, DEFAULT_FIXTURE_SESSIONS};
pub use yahoo::YahooAdapter;
