//! # Domain Models
//!
//! Request and series types shared by the market-data client and the HTTP
//! layer.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, uppercase company ticker |
//! | [`TradingDate`] | ISO-8601 calendar date of a session |
//! | [`DateRange`] | Inclusive start/end window |
//! | [`ClosePoint`] | One dated closing price |
//! | [`PriceSeries`] | Chronological closes with unique dates |
//!
//! Constructors validate their invariants and return [`ValidationError`]
//! on bad input:
//!
//! ```rust
//! use stockweb_core::{DateRange, ValidationError};
//!
//! let err = DateRange::parse("2024-02-01", "2024-01-01").unwrap_err();
//! assert!(matches!(err, ValidationError::InvertedDateRange { .. }));
//! ```
//!
//! [`ValidationError`]: crate::ValidationError

mod date;
mod series;
mod symbol;

pub use date::{DateRange, TradingDate};
pub use series::{ClosePoint, PriceSeries};
pub use symbol::Symbol;
