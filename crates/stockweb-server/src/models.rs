//! Request and response bodies of the JSON API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stockweb_core::{
    DateRange, PriceRequest, PriceSeries, RegressionResult, ResistanceSupport, Symbol,
};

use crate::error::ApiError;

pub const EMPTY_PAYLOAD: &str = "Payload cannot be null or empty";

/// Body shared by every price endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuery {
    /// Ticker symbol, e.g. `"IBM"`.
    pub company: Option<String>,
    /// First session to include, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Last session to include, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

impl StockQuery {
    pub fn is_empty(&self) -> bool {
        self.company.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn into_price_request(self) -> Result<PriceRequest, ApiError> {
        if self.is_empty() {
            return Err(ApiError::invalid_input(EMPTY_PAYLOAD));
        }
        self.validate()
    }

    fn validate(self) -> Result<PriceRequest, ApiError> {
        let company = required(self.company, "Company symbol is required")?;
        let start_date = required(self.start_date, "Start date is required")?;
        let end_date = required(self.end_date, "End date is required")?;

        let symbol = Symbol::parse(&company)?;
        let range = DateRange::parse(&start_date, &end_date)?;
        Ok(PriceRequest::new(symbol, range))
    }
}

/// Body of `/calculateMovingAverage`.
#[derive(Debug, Default, Deserialize)]
pub struct MovingAverageQuery {
    #[serde(flatten)]
    pub stock: StockQuery,
    /// Window length in sessions; a JSON number or a numeric string.
    pub period: Option<PeriodValue>,
}

impl MovingAverageQuery {
    pub fn into_parts(self) -> Result<(PriceRequest, usize), ApiError> {
        if self.stock.is_empty() && self.period.is_none() {
            return Err(ApiError::invalid_input(EMPTY_PAYLOAD));
        }

        let request = self.stock.validate()?;
        let period = self
            .period
            .ok_or_else(|| ApiError::invalid_input("Period is required"))?
            .into_period()?;
        Ok((request, period))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PeriodValue {
    Integer(i64),
    Fractional(f64),
    Text(String),
}

impl PeriodValue {
    fn into_period(self) -> Result<usize, ApiError> {
        let value = match self {
            Self::Integer(value) => value,
            Self::Fractional(_) => return Err(ApiError::invalid_input("Period must be an integer")),
            Self::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| ApiError::invalid_input("Period must be an integer"))?,
        };

        usize::try_from(value)
            .ok()
            .filter(|period| *period > 0)
            .ok_or_else(|| ApiError::invalid_input("Period must be a positive integer"))
    }
}

fn required(value: Option<String>, message: &'static str) -> Result<String, ApiError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::invalid_input(message))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDataResponse {
    /// Close per session date, oldest first.
    pub closing_prices: BTreeMap<String, f64>,
}

impl StockDataResponse {
    pub fn from_series(series: &PriceSeries) -> Self {
        Self {
            closing_prices: series
                .points()
                .iter()
                .map(|point| (point.date.to_string(), point.close))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardDeviationResponse {
    pub standard_deviation: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRegressionResponse {
    #[serde(flatten)]
    pub regression: RegressionResult,
    pub stock_prices: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResistanceSupportResponse {
    pub resistance_and_support: ResistanceSupport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovingAverageResponse {
    pub moving_average: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub source: &'static str,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
