//! # Stockweb Server
//!
//! JSON-over-HTTP front end for [`stockweb_core`]: every endpoint takes a
//! ticker and an ISO date range, loads the daily closes from Alpha Vantage
//! and returns one statistic.
//!
//! | Route | Response |
//! |-------|----------|
//! | `POST /stockData` | `{"closingPrices": {"YYYY-MM-DD": close}}` |
//! | `POST /calculateStandardDeviation` | `{"standardDeviation": f64}` |
//! | `POST /calculateLineRegression` | `{"b0": f64, "b1": f64, "stockPrices": [f64]}` |
//! | `POST /calculateResistanceAndSupport` | `{"resistanceAndSupport": {...}}` |
//! | `POST /calculateMovingAverage` | `{"movingAverage": [f64]}` |
//! | `GET /health` | `{"status": "ok", ...}` |
//!
//! Failures answer `{"error": message}` with status 400 for bad input and
//! 500 when the market-data provider fails.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;

pub use config::ServerConfig;
pub use error::{Action, ApiError, ServerError};
pub use handlers::AppState;
pub use server::{router, serve, ROUTES};
