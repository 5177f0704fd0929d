//! # Stockweb Core
//!
//! Closing-price statistics and the market-data client behind the stockweb
//! HTTP API.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`stats`] | Standard deviation, linear regression, moving average, resistance/support |
//! | [`domain`] | Symbol, trading date, date range and price series types |
//! | [`source`] | `PriceSource` trait, requests and structured errors |
//! | [`adapters`] | Alpha Vantage `TIME_SERIES_DAILY` adapter |
//! | [`http_client`] | HTTP transport abstraction (reqwest in production) |
//! | [`throttling`] | Provider request budget |
//! | [`error`] | Core error types |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  HTTP handler   │
//! └────────┬────────┘
//!          │ PriceRequest
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  PriceSource    │────▶│ Request budget   │
//! │ (Alpha Vantage) │     └──────────────────┘
//! └────────┬────────┘     ┌──────────────────┐
//!          ├─────────────▶│ HTTP client      │
//!          │              └──────────────────┘
//!          ▼ PriceSeries (oldest first)
//! ┌─────────────────┐
//! │  stats::*       │
//! └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stockweb_core::stats;
//!
//! let closes = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let fit = stats::linear_regression(&closes)?;
//! assert!((fit.slope - 1.0).abs() < 1e-12);
//!
//! assert!(stats::standard_deviation(&closes[..1]).is_err());
//! # Ok::<(), stockweb_core::StatsError>(())
//! ```
//!
//! ## Security
//!
//! - The Alpha Vantage key comes from configuration and never appears in logs
//!   or `Debug` output
//! - Tickers are validated before they are placed in an upstream URL

pub mod adapters;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod source;
pub mod stats;
pub mod throttling;

pub use adapters::{AlphaVantageAdapter, AlphaVantageConfig, OutputSize};

pub use domain::{ClosePoint, DateRange, PriceSeries, Symbol, TradingDate};

pub use error::{CoreError, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use source::{PriceRequest, PriceSource, SourceError, SourceErrorKind};

pub use stats::{RegressionResult, ResistanceSupport, StatsError};

pub use throttling::RequestBudget;
