use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Ticker, ValidationError};

/// Exchange venues the dashboard can fetch from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "NSE")]
    Nse,
    #[serde(rename = "BSE")]
    Bse,
    #[serde(rename = "NYSE")]
    Nyse,
    #[serde(rename = "NASDAQ")]
    Nasdaq,
}

impl Market {
    pub const ALL: [Self; 4] = [Self::Nse, Self::Bse, Self::Nyse, Self::Nasdaq];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nse => "NSE",
            Self::Bse => "BSE",
            Self::Nyse => "NYSE",
            Self::Nasdaq => "NASDAQ",
        }
    }

    /// Suffix the upstream provider expects after the ticker.
    pub const fn provider_suffix(self) -> &'static str {
        match self {
            Self::Nse => ".NS",
            Self::Bse => ".BO",
            Self::Nyse | Self::Nasdaq => "",
        }
    }

    pub fn provider_symbol(self, ticker: &Ticker) -> String {
        format!("{}{}", ticker.as_str(), self.provider_suffix())
    }
}

impl Default for Market {
    fn default() -> Self {
        Self::Nse
    }
}

impl Display for Market {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Market {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NSE" => Ok(Self::Nse),
            "BSE" => Ok(Self::Bse),
            "NYSE" => Ok(Self::Nyse),
            "NASDAQ" => Ok(Self::Nasdaq),
            _ => Err(ValidationError::InvalidMarket {
                value: value.trim().to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_provider_symbols() {
        let ticker = Ticker::parse("tcs").expect("valid");
        assert_eq!(Market::Nse.provider_symbol(&ticker), "TCS.NS");
        assert_eq!(Market::Bse.provider_symbol(&ticker), "TCS.BO");
        assert_eq!(Market::Nyse.provider_symbol(&ticker), "TCS");
        assert_eq!(Market::Nasdaq.provider_symbol(&ticker), "TCS");
    }

    #[test]
    fn parses_market_codes_case_insensitively() {
        assert_eq!(Market::from_str("nasdaq").expect("must parse"), Market::Nasdaq);
    }

    #[test]
    fn rejects_unknown_market() {
        let err = Market::from_str("LSE").expect_err("must fail");
        assert_eq!(err.to_string(), "Invalid market selected: LSE");
    }
}
