//! Descriptive statistics over a closing-price series.
//!
//! Every function takes prices oldest first and validates its preconditions
//! before computing anything: a series that is too short, a window that does
//! not fit, or a non-finite price is rejected with [`StatsError`] instead of
//! producing `NaN` or infinity. Finite prices large enough to overflow the
//! intermediate sums are rejected the same way.
//!
//! | Function | Minimum length | Output |
//! |----------|----------------|--------|
//! | [`standard_deviation`] | 2 | sample standard deviation (n − 1) |
//! | [`linear_regression`] | 2 | least-squares intercept and slope over t = 1..n |
//! | [`moving_average`] | `period` | one mean per sliding window |
//! | [`resistance_and_support`] | 1 | max/min and index-floor quartiles |
//!
//! ```rust
//! use stockweb_core::stats;
//!
//! let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(stats::moving_average(&prices, 3).unwrap(), vec![2.0, 3.0, 4.0]);
//! ```

use serde::Serialize;
use thiserror::Error;

/// Rejection reasons for statistics inputs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    #[error("price series must not be empty")]
    EmptySeries,
    #[error("price series needs at least {required} closing prices, got {actual}")]
    TooShort { required: usize, actual: usize },
    #[error("period must be between 1 and {len}, got {period}")]
    InvalidPeriod { period: usize, len: usize },
    #[error("closing price at position {index} is not a finite number")]
    NonFiniteValue { index: usize },
    #[error("{statistic} is out of range for these closing prices")]
    NonFiniteResult { statistic: &'static str },
}

/// Least-squares line `price = b0 + b1 * t`, with `t` counting trading days from 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionResult {
    #[serde(rename = "b0")]
    pub intercept: f64,
    #[serde(rename = "b1")]
    pub slope: f64,
}

/// Price ceilings and floors over the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResistanceSupport {
    pub major_resistance: f64,
    pub major_support: f64,
    pub minor_resistance: f64,
    pub minor_support: f64,
}

/// Sample standard deviation, dividing the squared deviations by `n - 1`.
pub fn standard_deviation(prices: &[f64]) -> Result<f64, StatsError> {
    ensure_min_len(prices, 2)?;
    ensure_finite(prices)?;

    let mean = mean(prices);
    let sum_squared_deviations = prices
        .iter()
        .map(|price| (price - mean).powi(2))
        .sum::<f64>();

    let deviation = (sum_squared_deviations / (prices.len() - 1) as f64).sqrt();
    ensure_finite_result("standard deviation", deviation)
}

/// Ordinary least-squares fit of the prices against their 1-based position.
///
/// With `t̄ = (n + 1) / 2` and `ȳ` the mean price:
/// `b1 = Σ(t − t̄)(y − ȳ) / Σ(t − t̄)²` and `b0 = ȳ − b1·t̄`.
pub fn linear_regression(prices: &[f64]) -> Result<RegressionResult, StatsError> {
    ensure_min_len(prices, 2)?;
    ensure_finite(prices)?;

    let n = prices.len() as f64;
    let t_bar = (n + 1.0) / 2.0;
    let y_bar = mean(prices);

    let (numerator, denominator) = prices.iter().enumerate().fold(
        (0.0, 0.0),
        |(numerator, denominator), (index, price)| {
            let dt = (index + 1) as f64 - t_bar;
            (numerator + dt * (price - y_bar), denominator + dt * dt)
        },
    );

    let slope = ensure_finite_result("regression slope", numerator / denominator)?;
    let intercept = ensure_finite_result("regression intercept", y_bar - slope * t_bar)?;
    Ok(RegressionResult { intercept, slope })
}

/// Simple moving average with stride 1; yields `len - period + 1` values.
pub fn moving_average(prices: &[f64], period: usize) -> Result<Vec<f64>, StatsError> {
    if prices.is_empty() {
        return Err(StatsError::EmptySeries);
    }
    if period == 0 || period > prices.len() {
        return Err(StatsError::InvalidPeriod {
            period,
            len: prices.len(),
        });
    }
    ensure_finite(prices)?;

    prices
        .windows(period)
        .map(|window| {
            ensure_finite_result("moving average", window.iter().sum::<f64>() / period as f64)
        })
        .collect()
}

/// Major levels are the extremes; minor levels are the sorted prices at
/// positions `n / 4` and `3n / 4` (floored, no interpolation).
pub fn resistance_and_support(prices: &[f64]) -> Result<ResistanceSupport, StatsError> {
    ensure_min_len(prices, 1)?;
    ensure_finite(prices)?;

    let (min, max) = prices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &price| {
            (min.min(price), max.max(price))
        });

    let mut sorted = prices.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();

    Ok(ResistanceSupport {
        major_resistance: max,
        major_support: min,
        minor_resistance: sorted[3 * n / 4],
        minor_support: sorted[n / 4],
    })
}

fn mean(prices: &[f64]) -> f64 {
    prices.iter().sum::<f64>() / prices.len() as f64
}

fn ensure_min_len(prices: &[f64], required: usize) -> Result<(), StatsError> {
    match prices.len() {
        0 => Err(StatsError::EmptySeries),
        actual if actual < required => Err(StatsError::TooShort { required, actual }),
        _ => Ok(()),
    }
}

fn ensure_finite(prices: &[f64]) -> Result<(), StatsError> {
    match prices.iter().position(|price| !price.is_finite()) {
        Some(index) => Err(StatsError::NonFiniteValue { index }),
        None => Ok(()),
    }
}

fn ensure_finite_result(statistic: &'static str, value: f64) -> Result<f64, StatsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::NonFiniteResult { statistic })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAMP: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn standard_deviation_of_ramp_uses_sample_estimator() {
        let value = standard_deviation(&RAMP).expect("valid series");
        assert_close(value, 2.5_f64.sqrt());
    }

    #[test]
    fn standard_deviation_of_constant_series_is_zero() {
        assert_eq!(standard_deviation(&[7.5; 6]), Ok(0.0));
    }

    #[test]
    fn standard_deviation_rejects_single_price() {
        assert_eq!(
            standard_deviation(&[10.0]),
            Err(StatsError::TooShort {
                required: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn standard_deviation_rejects_empty_series() {
        assert_eq!(standard_deviation(&[]), Err(StatsError::EmptySeries));
    }

    #[test]
    fn regression_on_ramp_has_unit_slope_and_zero_intercept() {
        let fit = linear_regression(&RAMP).expect("valid series");
        assert_close(fit.slope, 1.0);
        assert_close(fit.intercept, 0.0);
    }

    #[test]
    fn regression_recovers_line_coefficients() {
        let prices = (1..=30_i32)
            .map(|t| 12.5 - 0.75 * f64::from(t))
            .collect::<Vec<_>>();

        let fit = linear_regression(&prices).expect("valid series");
        assert_close(fit.intercept, 12.5);
        assert_close(fit.slope, -0.75);
    }

    #[test]
    fn regression_rejects_degenerate_single_point() {
        assert!(matches!(
            linear_regression(&[3.0]),
            Err(StatsError::TooShort { .. })
        ));
    }

    #[test]
    fn regression_serializes_as_b0_b1() {
        let fit = RegressionResult {
            intercept: 1.5,
            slope: 0.25,
        };
        let json = serde_json::to_value(fit).expect("serializable");
        assert_eq!(json, serde_json::json!({ "b0": 1.5, "b1": 0.25 }));
    }

    #[test]
    fn moving_average_of_ramp() {
        assert_eq!(moving_average(&RAMP, 3), Ok(vec![2.0, 3.0, 4.0]));
    }

    #[test]
    fn moving_average_with_full_period_is_overall_mean() {
        assert_eq!(moving_average(&RAMP, 5), Ok(vec![3.0]));
    }

    #[test]
    fn moving_average_with_unit_period_echoes_input() {
        assert_eq!(moving_average(&RAMP, 1), Ok(RAMP.to_vec()));
    }

    #[test]
    fn moving_average_rejects_period_outside_series() {
        assert_eq!(
            moving_average(&RAMP, 0),
            Err(StatsError::InvalidPeriod { period: 0, len: 5 })
        );
        assert_eq!(
            moving_average(&RAMP, 6),
            Err(StatsError::InvalidPeriod { period: 6, len: 5 })
        );
    }

    #[test]
    fn resistance_and_support_uses_index_floor_quartiles() {
        let levels = resistance_and_support(&[4.0, 1.0, 5.0, 3.0, 2.0]).expect("valid series");

        assert_eq!(levels.major_resistance, 5.0);
        assert_eq!(levels.major_support, 1.0);
        assert_eq!(levels.minor_resistance, 4.0);
        assert_eq!(levels.minor_support, 2.0);
    }

    #[test]
    fn resistance_and_support_of_single_price_collapses() {
        let levels = resistance_and_support(&[9.0]).expect("valid series");
        assert_eq!(levels.major_support, 9.0);
        assert_eq!(levels.minor_support, 9.0);
        assert_eq!(levels.minor_resistance, 9.0);
        assert_eq!(levels.major_resistance, 9.0);
    }

    #[test]
    fn resistance_and_support_serializes_with_pascal_case_keys() {
        let levels = resistance_and_support(&RAMP).expect("valid series");
        let json = serde_json::to_value(levels).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "MajorResistance": 5.0,
                "MajorSupport": 1.0,
                "MinorResistance": 4.0,
                "MinorSupport": 2.0,
            })
        );
    }

    #[test]
    fn resistance_and_support_rejects_empty_series() {
        assert_eq!(resistance_and_support(&[]), Err(StatsError::EmptySeries));
    }

    #[test]
    fn non_finite_prices_are_rejected_everywhere() {
        let prices = [1.0, f64::NAN, 3.0];
        let expected = StatsError::NonFiniteValue { index: 1 };

        assert_eq!(standard_deviation(&prices), Err(expected));
        assert_eq!(linear_regression(&prices), Err(expected));
        assert_eq!(moving_average(&prices, 2), Err(expected));
        assert_eq!(resistance_and_support(&prices), Err(expected));
    }

    #[test]
    fn overflowing_prices_are_rejected_instead_of_returning_infinity() {
        let huge = [f64::MAX; 3];

        assert_eq!(
            standard_deviation(&huge),
            Err(StatsError::NonFiniteResult {
                statistic: "standard deviation"
            })
        );
        assert!(matches!(
            linear_regression(&huge),
            Err(StatsError::NonFiniteResult { .. })
        ));
        assert_eq!(
            moving_average(&huge, 2),
            Err(StatsError::NonFiniteResult {
                statistic: "moving average"
            })
        );
    }

    #[test]
    fn squared_deviation_overflow_is_rejected() {
        assert!(matches!(
            standard_deviation(&[1e200, -1e200]),
            Err(StatsError::NonFiniteResult { .. })
        ));
    }

    #[test]
    fn extreme_prices_still_have_finite_levels() {
        let levels = resistance_and_support(&[f64::MAX, 1.0, f64::MAX]).expect("valid series");
        assert_eq!(levels.major_resistance, f64::MAX);
        assert_eq!(levels.major_support, 1.0);
    }
}
