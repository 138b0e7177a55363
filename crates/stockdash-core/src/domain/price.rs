use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month};

use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date of a trading session, serialized as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidDate {
            value: format!("{year:04}-{month:02}-{day:02}"),
        };
        let month = Month::try_from(month).map_err(|_| invalid())?;
        Date::from_calendar_date(year, month, day)
            .map(Self)
            .map_err(|_| invalid())
    }

    /// Parse a strict `YYYY-MM-DD` date.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let invalid = || ValidationError::InvalidDate {
            value: input.to_owned(),
        };

        // `[year]` would otherwise accept an explicit sign.
        if input.starts_with(['+', '-']) {
            return Err(invalid());
        }
        Date::parse(input, DATE_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }

    /// January 1 of this date's year.
    pub fn start_of_year(self) -> Self {
        // January 1 exists for every year `Date` can represent.
        Self(Date::from_ordinal_date(self.0.year(), 1).unwrap_or(self.0))
    }
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = self.0.format(DATE_FORMAT).map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

impl FromStr for TradeDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for TradeDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TradeDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// One trading session of OHLCV data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradeDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PricePoint {
    pub fn new(
        date: TradeDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_price("open", open)?;
        validate_price("high", high)?;
        validate_price("low", low)?;
        validate_price("close", close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_price("open", self.open)?;
        validate_price("high", self.high)?;
        validate_price("low", self.low)?;
        validate_price("close", self.close)
    }
}

/// Sessions ordered strictly by date. An empty series means "no data".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, rejecting out-of-order or duplicated dates.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, ValidationError> {
        for point in &points {
            point.validate()?;
        }
        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[0].date >= pair[1].date)
        {
            return Err(ValidationError::UnorderedSeries { index: index + 1 });
        }

        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Copy a contiguous run of an already ordered series.
    pub(crate) fn from_ordered(points: &[PricePoint]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PricePoint> {
        self.points.iter()
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = ValidationError;

    fn try_from(value: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(value: PriceSeries) -> Self {
        value.points
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PricePoint;
    type IntoIter = std::slice::Iter<'a, PricePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, close: f64) -> PricePoint {
        PricePoint::new(TradeDate::parse(date).expect("date"), close, close, close, close, 10)
            .expect("point")
    }

    #[test]
    fn trade_date_round_trips_through_text() {
        let date = TradeDate::parse("2024-03-07").expect("must parse");
        assert_eq!(date.to_string(), "2024-03-07");
        assert_eq!(date.year(), 2024);
        assert_eq!(date.start_of_year().to_string(), "2024-01-01");
    }

    #[test]
    fn rejects_malformed_dates() {
        for raw in [
            "2024-13-01",
            "2024-02-30",
            "24-01-01",
            "2024/01/01",
            "2024-1-1",
            "2024-01-+1",
            "+024-01-01",
            "+2024-01-01",
            "-2024-01-01",
            "2024-01-01T00:00",
        ] {
            assert!(
                matches!(TradeDate::parse(raw), Err(ValidationError::InvalidDate { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_negative_and_non_finite_prices() {
        let date = TradeDate::parse("2024-01-02").expect("date");
        assert!(matches!(
            PricePoint::new(date, -1.0, 1.0, 1.0, 1.0, 0),
            Err(ValidationError::NegativeValue { field: "open" })
        ));
        assert!(matches!(
            PricePoint::new(date, 1.0, 1.0, 1.0, f64::NAN, 0),
            Err(ValidationError::NonFiniteValue { field: "close" })
        ));
    }

    #[test]
    fn rejects_unordered_or_duplicate_dates() {
        let err = PriceSeries::new(vec![
            point("2024-01-03", 1.0),
            point("2024-01-02", 1.0),
        ])
        .expect_err("must fail");
        assert_eq!(err, ValidationError::UnorderedSeries { index: 1 });

        let err = PriceSeries::new(vec![
            point("2024-01-02", 1.0),
            point("2024-01-03", 1.0),
            point("2024-01-03", 2.0),
        ])
        .expect_err("must fail");
        assert_eq!(err, ValidationError::UnorderedSeries { index: 2 });
    }

    #[test]
    fn series_serializes_as_record_array() {
        let series = PriceSeries::new(vec![point("2024-01-02", 5.5)]).expect("series");
        let json = serde_json::to_value(&series).expect("serialize");
        assert_eq!(json[0]["date"], "2024-01-02");
        assert_eq!(json[0]["close"], 5.5);
        assert_eq!(json[0]["volume"], 10);

        let back: PriceSeries = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, series);
    }
}
