//! Declarative line-chart description for a price window.
//!
//! The builder only describes the chart; drawing it is left to whatever
//! front end consumes the [`ChartSpec`].

use serde::Serialize;

use crate::{PriceSeries, TradeDate, ValidationError};

/// Fraction of the close range added above and below the line.
pub const DOMAIN_PADDING_RATIO: f64 = 0.1;
/// Padding used for a flat series, as a fraction of the close value.
pub const FLAT_PADDING_RATIO: f64 = 0.01;
/// Padding used for a flat series sitting at zero.
pub const FLAT_PADDING_FLOOR: f64 = 1.0;
pub const CHART_HEIGHT: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Temporal,
    Quantitative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
}

/// Closed value range of a quantitative axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    pub fn height(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub field: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<ValueDomain>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TooltipField {
    pub field: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: TradeDate,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub mark: MarkKind,
    pub width: &'static str,
    pub height: u32,
    pub view_stroke_width: u32,
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub tooltip: Vec<TooltipField>,
    pub data: Vec<ChartPoint>,
}

impl ChartSpec {
    pub fn y_domain(&self) -> Option<ValueDomain> {
        self.y.domain
    }
}

/// Build the closing-price line chart for a non-empty window.
pub fn build_chart(window: &PriceSeries) -> Result<ChartSpec, ValidationError> {
    let domain = close_domain(window).ok_or(ValidationError::EmptyWindow)?;

    Ok(ChartSpec {
        mark: MarkKind::Line,
        width: "container",
        height: CHART_HEIGHT,
        view_stroke_width: 0,
        x: AxisSpec {
            field: "date",
            field_type: FieldType::Temporal,
            title: "Date",
            sort: Some(SortOrder::Ascending),
            domain: None,
        },
        y: AxisSpec {
            field: "close",
            field_type: FieldType::Quantitative,
            title: "Closing Price",
            sort: None,
            domain: Some(domain),
        },
        tooltip: vec![
            TooltipField {
                field: "date",
                field_type: FieldType::Temporal,
            },
            TooltipField {
                field: "close",
                field_type: FieldType::Quantitative,
            },
        ],
        data: window
            .iter()
            .map(|point| ChartPoint {
                date: point.date,
                close: point.close,
            })
            .collect(),
    })
}

/// Padded vertical domain over the window's closes.
pub fn close_domain(window: &PriceSeries) -> Option<ValueDomain> {
    let mut closes = window.iter().map(|point| point.close);
    let first = closes.next()?;
    let (min, max) = closes.fold((first, first), |(min, max), close| {
        (min.min(close), max.max(close))
    });

    let range = max - min;
    let padding = if range > 0.0 {
        range * DOMAIN_PADDING_RATIO
    } else if min != 0.0 {
        min.abs() * FLAT_PADDING_RATIO
    } else {
        FLAT_PADDING_FLOOR
    };

    Some(ValueDomain {
        min: min - padding,
        max: max + padding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PricePoint;

    fn window(closes: &[f64]) -> PriceSeries {
        let points = closes
            .iter()
            .enumerate()
            .map(|(index, close)| {
                PricePoint::new(
                    TradeDate::from_ymd(2024, 1, 2 + index as u8).expect("date"),
                    *close,
                    *close,
                    *close,
                    *close,
                    100,
                )
                .expect("point")
            })
            .collect();
        PriceSeries::new(points).expect("series")
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn pads_domain_by_ten_percent_of_range() {
        let chart = build_chart(&window(&[100.0, 90.0, 110.0, 95.0])).expect("chart");
        let domain = chart.y_domain().expect("domain");
        assert_close(domain.min, 88.0);
        assert_close(domain.max, 112.0);
    }

    #[test]
    fn flat_series_gets_non_zero_height() {
        let domain = close_domain(&window(&[50.0, 50.0, 50.0])).expect("domain");
        assert_close(domain.min, 49.5);
        assert_close(domain.max, 50.5);
        assert!(domain.height() > 0.0);

        let domain = close_domain(&window(&[0.0])).expect("domain");
        assert_close(domain.min, -1.0);
        assert_close(domain.max, 1.0);
    }

    #[test]
    fn empty_window_is_rejected() {
        let err = build_chart(&PriceSeries::empty()).expect_err("must fail");
        assert_eq!(err, ValidationError::EmptyWindow);
    }

    #[test]
    fn describes_axes_tooltip_and_data() {
        let chart = build_chart(&window(&[10.0, 12.0])).expect("chart");

        assert_eq!(chart.x.field, "date");
        assert_eq!(chart.x.field_type, FieldType::Temporal);
        assert_eq!(chart.x.sort, Some(SortOrder::Ascending));
        assert_eq!(chart.y.title, "Closing Price");
        assert_eq!(chart.tooltip.len(), 2);
        assert_eq!(chart.data.len(), 2);
        assert_eq!(chart.data[1].close, 12.0);

        let json = serde_json::to_value(&chart).expect("serialize");
        assert_eq!(json["mark"], "line");
        assert_eq!(json["x"]["type"], "temporal");
        assert_eq!(json["data"][0]["date"], "2024-01-02");
        assert!(json["x"].get("domain").is_none());
    }
}
