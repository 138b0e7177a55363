use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// How a duration label selects its window from a full series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowRule {
    /// The last `n` sessions.
    TailCount(usize),
    /// Sessions dated on or after January 1 of the first session's year.
    SinceYearStart,
    /// The whole series.
    Unbounded,
}

/// Closed set of display windows offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationLabel {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "5D")]
    FiveDays,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "3Y")]
    ThreeYears,
    #[serde(rename = "Max")]
    Max,
}

impl DurationLabel {
    pub const ALL: [Self; 8] = [
        Self::OneDay,
        Self::FiveDays,
        Self::OneWeek,
        Self::OneMonth,
        Self::YearToDate,
        Self::OneYear,
        Self::ThreeYears,
        Self::Max,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::FiveDays => "5D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::YearToDate => "YTD",
            Self::OneYear => "1Y",
            Self::ThreeYears => "3Y",
            Self::Max => "Max",
        }
    }

    /// Long name used in headings ("Analytics for 5 Days").
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::OneDay => "1 Day",
            Self::FiveDays => "5 Days",
            Self::OneWeek => "1 Week",
            Self::OneMonth => "1 Month",
            Self::YearToDate => "Year to Date",
            Self::OneYear => "1 Year",
            Self::ThreeYears => "3 Year",
            Self::Max => "Max Duration",
        }
    }

    // Tail counts are session rows, not calendar days.
    pub const fn rule(self) -> WindowRule {
        match self {
            Self::OneDay => WindowRule::TailCount(1),
            Self::FiveDays => WindowRule::TailCount(5),
            Self::OneWeek => WindowRule::TailCount(7),
            Self::OneMonth => WindowRule::TailCount(30),
            Self::YearToDate => WindowRule::SinceYearStart,
            Self::OneYear => WindowRule::TailCount(365),
            Self::ThreeYears => WindowRule::TailCount(1095),
            Self::Max => WindowRule::Unbounded,
        }
    }

    pub fn spec(self) -> DurationSpec {
        DurationSpec {
            label: self,
            display_name: self.display_name(),
            rule: self.rule(),
        }
    }
}

impl Default for DurationLabel {
    fn default() -> Self {
        Self::FiveDays
    }
}

impl Display for DurationLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationLabel {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::InvalidDuration {
                value: trimmed.to_owned(),
            })
    }
}

/// One entry of the duration catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationSpec {
    pub label: DurationLabel,
    pub display_name: &'static str,
    pub rule: WindowRule,
}

/// The full catalog in display order.
pub fn duration_catalog() -> Vec<DurationSpec> {
    DurationLabel::ALL.into_iter().map(DurationLabel::spec).collect()
}
