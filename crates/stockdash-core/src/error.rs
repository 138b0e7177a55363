use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Validation and contract errors exposed by `stockdash-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter: '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("Invalid market selected: {value}")]
    InvalidMarket { value: String },
    #[error("invalid duration '{value}', expected one of 1D, 5D, 1W, 1M, YTD, 1Y, 3Y, Max")]
    InvalidDuration { value: String },

    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("price points must be strictly increasing by date (violation at index {index})")]
    UnorderedSeries { index: usize },
    #[error("window is empty")]
    EmptyWindow,
}

/// Error taxonomy surfaced to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unrecognised market, ticker without data, unknown duration label.
    InvalidInput,
    /// Everything else: transport, parsing, filesystem.
    Unexpected,
}

/// Structured error returned by sources, the store and the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardError {
    kind: ErrorKind,
    message: String,
}

impl DashboardError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unexpected,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn is_invalid_input(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidInput)
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ErrorKind::InvalidInput => "dashboard.invalid_input",
            ErrorKind::Unexpected => "dashboard.unexpected",
        }
    }
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DashboardError {}

impl From<ValidationError> for DashboardError {
    fn from(value: ValidationError) -> Self {
        Self::invalid_input(value.to_string())
    }
}
