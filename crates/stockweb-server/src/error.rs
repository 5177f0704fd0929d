use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use stockweb_core::{CoreError, SourceError, StatsError, ValidationError};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorBody;

/// Endpoint operation, used in logs and in the generic 500 message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FetchStockData,
    StandardDeviation,
    LineRegression,
    ResistanceAndSupport,
    MovingAverage,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchStockData => "fetch stock data",
            Self::StandardDeviation => "calculate standard deviation",
            Self::LineRegression => "calculate line regression",
            Self::ResistanceAndSupport => "calculate resistance and support",
            Self::MovingAverage => "calculate moving average",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request failure as seen by an HTTP client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400: the caller sent something the statistics cannot be computed from.
    #[error("{0}")]
    InvalidInput(String),

    /// 500: the market-data provider could not supply prices.
    #[error("failed to {action}: {source}")]
    Upstream { action: Action, source: SourceError },
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn from_core(action: Action, error: CoreError) -> Self {
        match error {
            CoreError::Validation(error) => error.into(),
            CoreError::Stats(error) => error.into(),
            CoreError::Source(source) => Self::Upstream { action, source },
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidInput(error.to_string())
    }
}

impl From<StatsError> for ApiError {
    fn from(error: StatsError) -> Self {
        Self::InvalidInput(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::InvalidInput(message) => {
                warn!(%message, "invalid input");
                message
            }
            Self::Upstream { action, source } => {
                error!(
                    %action,
                    code = source.code(),
                    retryable = source.retryable(),
                    error = source.message(),
                    "market data request failed"
                );
                format!("Failed to {action}")
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Fatal startup or serve-loop failure.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl ServerError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Bind { .. } => 10,
            Self::Serve(_) => 11,
        }
    }
}
