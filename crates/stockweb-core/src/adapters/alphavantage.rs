use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::source::{PriceRequest, PriceSource, SourceError};
use crate::throttling::RequestBudget;
use crate::{ClosePoint, PriceSeries, TradingDate, ValidationError};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// How much history `TIME_SERIES_DAILY` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputSize {
    /// Latest 100 sessions.
    #[default]
    Compact,
    /// Full history (premium keys only on the current Alpha Vantage plans).
    Full,
}

impl OutputSize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Full => "full",
        }
    }
}

impl Display for OutputSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputSize {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            _ => Err(ValidationError::InvalidOutputSize {
                value: value.to_owned(),
            }),
        }
    }
}

/// Connection settings for the Alpha Vantage REST API.
#[derive(Clone)]
pub struct AlphaVantageConfig {
    pub api_key: String,
    pub base_url: String,
    pub output_size: OutputSize,
    pub timeout_ms: u64,
    pub quota_limit: u32,
    pub quota_window: Duration,
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        Self {
            api_key: String::from("demo"),
            base_url: String::from(DEFAULT_BASE_URL),
            output_size: OutputSize::Compact,
            timeout_ms: 5_000,
            quota_limit: 5,
            quota_window: Duration::from_secs(60),
        }
    }
}

impl std::fmt::Debug for AlphaVantageConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("output_size", &self.output_size)
            .field("timeout_ms", &self.timeout_ms)
            .field("quota_limit", &self.quota_limit)
            .field("quota_window", &self.quota_window)
            .finish()
    }
}

/// Daily closing prices from Alpha Vantage `TIME_SERIES_DAILY`.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    config: AlphaVantageConfig,
    http_client: Arc<dyn HttpClient>,
    budget: RequestBudget,
}

impl AlphaVantageAdapter {
    pub fn new(config: AlphaVantageConfig) -> Self {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(config: AlphaVantageConfig, http_client: Arc<dyn HttpClient>) -> Self {
        let budget = RequestBudget::new(config.quota_window, config.quota_limit);
        Self {
            config,
            http_client,
            budget,
        }
    }

    pub fn config(&self) -> &AlphaVantageConfig {
        &self.config
    }

    fn endpoint(&self, req: &PriceRequest) -> String {
        format!(
            "{}?function=TIME_SERIES_DAILY&symbol={}&outputsize={}&apikey={}",
            self.config.base_url,
            urlencoding::encode(req.symbol.as_str()),
            self.config.output_size,
            urlencoding::encode(&self.config.api_key),
        )
    }

    async fn fetch_daily_closes(&self, req: &PriceRequest) -> Result<PriceSeries, SourceError> {
        if let Err(delay) = self.budget.acquire() {
            return Err(SourceError::rate_limited(format!(
                "alphavantage request budget exhausted; retry in {:.2}s",
                delay.as_secs_f64()
            )));
        }

        debug!(
            symbol = %req.symbol,
            output_size = %self.config.output_size,
            "requesting alphavantage daily series"
        );

        let request = HttpRequest::get(self.endpoint(req))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.retryable() {
                SourceError::unavailable(format!(
                    "alphavantage transport error: {}",
                    error.message()
                ))
            } else {
                SourceError::internal(format!("alphavantage transport error: {}", error.message()))
            }
        })?;

        if !response.is_success() {
            return Err(SourceError::unavailable(format!(
                "alphavantage returned status {}",
                response.status
            )));
        }

        let series = parse_daily_series(&response.body)?;
        let selected = series.within(&req.range);
        debug!(
            symbol = %req.symbol,
            received = series.len(),
            selected = selected.len(),
            "parsed alphavantage daily series"
        );

        Ok(selected)
    }
}

impl PriceSource for AlphaVantageAdapter {
    fn id(&self) -> &'static str {
        "alphavantage"
    }

    fn daily_closes<'a>(
        &'a self,
        req: PriceRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            if self.config.api_key.trim().is_empty() {
                return Err(SourceError::invalid_request(
                    "alphavantage api key must not be empty",
                ));
            }

            self.fetch_daily_closes(&req).await
        })
    }
}

/// Parses a `TIME_SERIES_DAILY` body into chronological closes.
///
/// Alpha Vantage answers HTTP 200 for application errors, so the payload is
/// inspected for its error keys before looking for the series.
pub fn parse_daily_series(body: &str) -> Result<PriceSeries, SourceError> {
    let payload: DailySeriesResponse = serde_json::from_str(body).map_err(|e| {
        SourceError::internal(format!("failed to parse alphavantage response: {e}"))
    })?;

    if let Some(message) = payload.error_message {
        warn!(%message, "alphavantage rejected the request");
        return Err(SourceError::upstream(format!(
            "alphavantage api error: {message}"
        )));
    }

    if let Some(message) = payload.note.or(payload.information) {
        warn!(%message, "alphavantage rate limit reached");
        return Err(SourceError::rate_limited(format!(
            "alphavantage rate limit exceeded: {message}"
        )));
    }

    let time_series = payload.time_series.ok_or_else(|| {
        SourceError::upstream("no time series data in alphavantage response")
    })?;

    let points = time_series
        .into_iter()
        .map(|(date, bar)| {
            let date = TradingDate::parse(&date).map_err(|e| {
                SourceError::internal(format!("invalid alphavantage session date: {e}"))
            })?;
            let close = bar
                .close
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|close| close.is_finite())
                .ok_or_else(|| {
                    SourceError::internal(format!(
                        "invalid alphavantage close '{}' on {date}",
                        bar.close
                    ))
                })?;
            Ok::<_, SourceError>(ClosePoint::new(date, close))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PriceSeries::from_points(points))
}

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Error Message", default)]
    error_message: Option<String>,
    #[serde(rename = "Note", default)]
    note: Option<String>,
    #[serde(rename = "Information", default)]
    information: Option<String>,
    #[serde(rename = "Time Series (Daily)", default)]
    time_series: Option<BTreeMap<String, DailyBar>>,
}

#[derive(Debug, Deserialize)]
struct DailyBar {
    #[serde(rename = "4. close")]
    close: String,
}
