use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use time::OffsetDateTime;

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::source::{no_data_error, PriceSource, SourceFuture};
use crate::{DashboardError, Market, PricePoint, PriceSeries, Ticker, TradeDate};

const CHART_ENDPOINT: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const REFERER: &str = "https://finance.yahoo.com/";

/// Daily history from the Yahoo Finance chart API.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl Default for YahooAdapter {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::default()))
    }
}

impl YahooAdapter {
    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn chart_url(ticker: &Ticker, market: Market) -> String {
        format!(
            "{CHART_ENDPOINT}/{}?range=max&interval=1d",
            urlencoding::encode(&market.provider_symbol(ticker))
        )
    }

    async fn fetch_history(
        &self,
        ticker: &Ticker,
        market: Market,
    ) -> Result<PriceSeries, DashboardError> {
        let request = HttpRequest::get(Self::chart_url(ticker, market))
            .with_header("referer", REFERER)
            .with_timeout_ms(self.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|e| {
            DashboardError::unexpected(format!("yahoo transport error: {}", e.message()))
        })?;

        // Yahoo answers unknown symbols with 404 and a chart-level error body.
        if response.status == 404 {
            return Err(no_data_error(ticker, market));
        }
        if !response.is_success() {
            return Err(DashboardError::unexpected(format!(
                "yahoo returned status {}",
                response.status
            )));
        }

        let chart: YahooChartResponse = serde_json::from_str(&response.body).map_err(|e| {
            DashboardError::unexpected(format!("failed to parse yahoo chart: {e}"))
        })?;

        if let Some(error) = chart.chart.error {
            if error.code.eq_ignore_ascii_case("not found") {
                return Err(no_data_error(ticker, market));
            }
            return Err(DashboardError::unexpected(format!(
                "yahoo chart API error: {}: {}",
                error.code, error.description
            )));
        }

        let Some(result) = chart.chart.result.and_then(|results| results.into_iter().next())
        else {
            return Err(no_data_error(ticker, market));
        };

        let series = normalize_chart(result)?;
        if series.is_empty() {
            return Err(no_data_error(ticker, market));
        }
        Ok(series)
    }
}

impl PriceSource for YahooAdapter {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn fetch_series<'a>(&'a self, ticker: &'a Ticker, market: Market) -> SourceFuture<'a> {
        Box::pin(async move {
            log::info!("fetching daily history for {ticker} on {market} from yahoo");
            let result = self.fetch_history(ticker, market).await;
            match &result {
                Ok(series) => log::info!("received {} sessions for {ticker}", series.len()),
                Err(error) => log::error!(
                    "Error occurred while fetching stock data from Yahoo Finance: {error}"
                ),
            }
            result
        })
    }
}

fn normalize_chart(result: YahooChartResult) -> Result<PriceSeries, DashboardError> {
    let offset = result.meta.and_then(|meta| meta.gmtoffset).unwrap_or(0);
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(PriceSeries::empty());
    };

    // Keyed by date so a repeated session (Yahoo's live bar) keeps the later row.
    let mut sessions = BTreeMap::new();
    for (i, &ts_value) in result.timestamp.iter().enumerate() {
        let (Some(Some(open)), Some(Some(high)), Some(Some(low)), Some(Some(close))) = (
            quote.open.get(i),
            quote.high.get(i),
            quote.low.get(i),
            quote.close.get(i),
        ) else {
            continue;
        };

        let local = OffsetDateTime::from_unix_timestamp(ts_value.saturating_add(offset))
            .map_err(|e| DashboardError::unexpected(format!("invalid timestamp: {e}")))?;
        let date = TradeDate::from_date(local.date());
        let volume = quote
            .volume
            .get(i)
            .copied()
            .flatten()
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(0);

        match PricePoint::new(date, *open, *high, *low, *close, volume) {
            Ok(point) => {
                sessions.insert(date, point);
            }
            Err(error) => log::debug!("skipping yahoo session {date}: {error}"),
        }
    }

    Ok(PriceSeries::new(sessions.into_values().collect())?)
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartMeta {
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}
