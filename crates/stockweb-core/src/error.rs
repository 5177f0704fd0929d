use thiserror::Error;

use crate::source::SourceError;
use crate::stats::StatsError;

/// Validation errors for request inputs accepted by `stockweb-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be ISO-8601 YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("start date {start} must not be after end date {end}")]
    InvertedDateRange { start: String, end: String },

    #[error("invalid output size '{value}', expected one of compact, full")]
    InvalidOutputSize { value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Source(#[from] SourceError),
}
