//! Endpoint handlers.
//!
//! Each price endpoint validates its body, loads the closing prices for the
//! requested range and runs one statistic over them. Validation and
//! statistics failures answer 400; market-data failures answer 500.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use stockweb_core::{stats, CoreError, PriceRequest, PriceSeries, PriceSource};
use tracing::info;

use crate::error::{Action, ApiError};
use crate::models::{
    HealthResponse, LineRegressionResponse, MovingAverageQuery, MovingAverageResponse,
    ResistanceSupportResponse, StandardDeviationResponse, StockDataResponse, StockQuery,
    EMPTY_PAYLOAD,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn PriceSource>,
    started_at: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self {
            source,
            started_at: Instant::now(),
        }
    }
}

/// A JSON body that may be absent, `null`, or malformed.
type Payload<T> = Result<Json<Option<T>>, JsonRejection>;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        source: state.source.id(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

pub async fn stock_data(
    State(state): State<AppState>,
    payload: Payload<StockQuery>,
) -> Result<Json<StockDataResponse>, ApiError> {
    let request = body(payload)?.into_price_request()?;

    respond(Action::FetchStockData, async {
        let series = load_series(&state, request).await?;
        Ok::<_, CoreError>(StockDataResponse::from_series(&series))
    })
    .await
}

pub async fn standard_deviation(
    State(state): State<AppState>,
    payload: Payload<StockQuery>,
) -> Result<Json<StandardDeviationResponse>, ApiError> {
    let request = body(payload)?.into_price_request()?;

    respond(Action::StandardDeviation, async {
        let closes = load_series(&state, request).await?.closes();
        Ok::<_, CoreError>(StandardDeviationResponse {
            standard_deviation: stats::standard_deviation(&closes)?,
        })
    })
    .await
}

pub async fn line_regression(
    State(state): State<AppState>,
    payload: Payload<StockQuery>,
) -> Result<Json<LineRegressionResponse>, ApiError> {
    let request = body(payload)?.into_price_request()?;

    respond(Action::LineRegression, async {
        let closes = load_series(&state, request).await?.closes();
        Ok::<_, CoreError>(LineRegressionResponse {
            regression: stats::linear_regression(&closes)?,
            stock_prices: closes,
        })
    })
    .await
}

pub async fn resistance_and_support(
    State(state): State<AppState>,
    payload: Payload<StockQuery>,
) -> Result<Json<ResistanceSupportResponse>, ApiError> {
    let request = body(payload)?.into_price_request()?;

    respond(Action::ResistanceAndSupport, async {
        let closes = load_series(&state, request).await?.closes();
        Ok::<_, CoreError>(ResistanceSupportResponse {
            resistance_and_support: stats::resistance_and_support(&closes)?,
        })
    })
    .await
}

pub async fn moving_average(
    State(state): State<AppState>,
    payload: Payload<MovingAverageQuery>,
) -> Result<Json<MovingAverageResponse>, ApiError> {
    let (request, period) = body(payload)?.into_parts()?;

    respond(Action::MovingAverage, async {
        let closes = load_series(&state, request).await?.closes();
        Ok::<_, CoreError>(MovingAverageResponse {
            moving_average: stats::moving_average(&closes, period)?,
        })
    })
    .await
}

fn body<T>(payload: Payload<T>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(Some(body))) => Ok(body),
        Ok(Json(None)) => Err(ApiError::invalid_input(EMPTY_PAYLOAD)),
        Err(rejection) => Err(ApiError::invalid_input(rejection.body_text())),
    }
}

async fn load_series(state: &AppState, request: PriceRequest) -> Result<PriceSeries, CoreError> {
    let symbol = request.symbol.clone();
    let range = request.range;
    let series = state.source.daily_closes(request).await?;

    info!(
        source = state.source.id(),
        %symbol,
        start = %range.start(),
        end = %range.end(),
        sessions = series.len(),
        "loaded closing prices"
    );
    Ok(series)
}

async fn respond<T>(
    action: Action,
    work: impl Future<Output = Result<T, CoreError>>,
) -> Result<Json<T>, ApiError> {
    work.await
        .map(Json)
        .map_err(|error| ApiError::from_core(action, error))
}
