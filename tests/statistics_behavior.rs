//! Behavior tests for the closing-price statistics.
//!
//! These tests pin down the numeric contract of each statistic: the reference
//! scenario over `[1, 2, 3, 4, 5]`, the ordering of support and resistance
//! levels, and the failure modes for series that cannot be summarized.

use stockweb_core::stats::{
    linear_regression, moving_average, resistance_and_support, standard_deviation,
};
use stockweb_core::StatsError;

const TOLERANCE: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Deterministic, irregular price path without pulling in an RNG.
fn sawtooth(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| 100.0 + ((i * 37) % 23) as f64 - ((i * 11) % 7) as f64 * 0.5)
        .collect()
}

// =============================================================================
// Reference scenario
// =============================================================================

#[test]
fn when_prices_rise_by_one_each_day_every_statistic_matches_reference_values() {
    // Given: five sessions closing at 1..=5
    let prices = [1.0, 2.0, 3.0, 4.0, 5.0];

    // When: each statistic is computed
    let deviation = standard_deviation(&prices).expect("five prices");
    let fit = linear_regression(&prices).expect("five prices");
    let average = moving_average(&prices, 3).expect("period fits");
    let levels = resistance_and_support(&prices).expect("non-empty");

    // Then: the values match the hand-computed results
    assert_close(deviation, 2.5_f64.sqrt());
    assert!((deviation - 1.5811).abs() < 1e-4);
    assert_close(fit.intercept, 0.0);
    assert_close(fit.slope, 1.0);
    assert_eq!(average, vec![2.0, 3.0, 4.0]);
    assert_eq!(levels.major_resistance, 5.0);
    assert_eq!(levels.major_support, 1.0);
    assert_eq!(levels.minor_resistance, 4.0);
    assert_eq!(levels.minor_support, 2.0);
}

// =============================================================================
// Standard deviation
// =============================================================================

#[test]
fn when_all_prices_are_equal_deviation_is_zero() {
    // Given: a flat series
    let prices = [42.5; 12];

    // When / Then: there is no dispersion
    assert_eq!(standard_deviation(&prices).expect("twelve prices"), 0.0);
}

#[test]
fn deviation_is_never_negative() {
    for len in 2..40 {
        let prices = sawtooth(len);
        let deviation = standard_deviation(&prices).expect("at least two prices");
        assert!(deviation >= 0.0, "len {len} gave {deviation}");
    }
}

#[test]
fn when_only_one_price_is_available_deviation_is_rejected() {
    // Given: a single session
    let prices = [10.0];

    // When: the deviation is requested
    let result = standard_deviation(&prices);

    // Then: the series is reported as too short rather than dividing by zero
    assert_eq!(
        result,
        Err(StatsError::TooShort {
            required: 2,
            actual: 1
        })
    );
}

// =============================================================================
// Linear regression
// =============================================================================

#[test]
fn when_prices_are_perfectly_linear_regression_recovers_the_line() {
    // Given: price = 12.5 - 0.75 * t for t = 1..=30
    let prices: Vec<f64> = (1..=30_i32).map(|t| 12.5 - 0.75 * f64::from(t)).collect();

    // When: the line is fitted
    let fit = linear_regression(&prices).expect("thirty prices");

    // Then: intercept and slope are recovered
    assert!((fit.intercept - 12.5).abs() < 1e-9);
    assert!((fit.slope + 0.75).abs() < 1e-9);
}

#[test]
fn regression_needs_two_points() {
    assert!(matches!(
        linear_regression(&[3.0]),
        Err(StatsError::TooShort { .. })
    ));
    assert_eq!(linear_regression(&[]), Err(StatsError::EmptySeries));
}

// =============================================================================
// Moving average
// =============================================================================

#[test]
fn moving_average_yields_one_mean_per_window() {
    let prices = sawtooth(25);

    for period in 1..=prices.len() {
        // When: the average is computed for every admissible period
        let averages = moving_average(&prices, period).expect("period fits");

        // Then: there is one output per window, each equal to that window's mean
        assert_eq!(averages.len(), prices.len() - period + 1);
        for (start, average) in averages.iter().enumerate() {
            let window = &prices[start..start + period];
            let mean = window.iter().sum::<f64>() / period as f64;
            assert!((average - mean).abs() < 1e-9);
        }
    }
}

#[test]
fn when_period_spans_the_whole_series_result_is_the_overall_mean() {
    let prices = [3.0, 9.0, 6.0, 12.0];

    let averages = moving_average(&prices, prices.len()).expect("period fits");

    assert_eq!(averages.len(), 1);
    assert_close(averages[0], 7.5);
}

#[test]
fn when_period_does_not_fit_moving_average_fails() {
    // Given: three sessions
    let prices = [1.0, 2.0, 3.0];

    // When / Then: zero and oversized windows are rejected, never an empty result
    assert_eq!(
        moving_average(&prices, 0),
        Err(StatsError::InvalidPeriod { period: 0, len: 3 })
    );
    assert_eq!(
        moving_average(&prices, 4),
        Err(StatsError::InvalidPeriod { period: 4, len: 3 })
    );
}

// =============================================================================
// Resistance and support
// =============================================================================

#[test]
fn support_and_resistance_levels_are_ordered() {
    for len in 4..60 {
        // Given: an irregular series of at least four sessions
        let prices = sawtooth(len);

        // When: levels are computed
        let levels = resistance_and_support(&prices).expect("non-empty");

        // Then: floors sit below ceilings
        assert!(levels.major_support <= levels.minor_support, "len {len}");
        assert!(levels.minor_support <= levels.minor_resistance, "len {len}");
        assert!(levels.minor_resistance <= levels.major_resistance, "len {len}");
    }
}

#[test]
fn levels_ignore_input_order() {
    let shuffled = [4.0, 1.0, 5.0, 3.0, 2.0];
    let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];

    assert_eq!(
        resistance_and_support(&shuffled),
        resistance_and_support(&sorted)
    );
}

#[test]
fn when_a_price_is_not_finite_every_statistic_rejects_the_series() {
    let prices = [1.0, 2.0, f64::NAN, 4.0];

    assert_eq!(
        standard_deviation(&prices),
        Err(StatsError::NonFiniteValue { index: 2 })
    );
    assert!(linear_regression(&prices).is_err());
    assert!(moving_average(&prices, 2).is_err());
    assert!(resistance_and_support(&prices).is_err());
}

// =============================================================================
// Purity
// =============================================================================

#[test]
fn repeated_calls_produce_bit_identical_results() {
    let prices = sawtooth(50);

    let first = (
        standard_deviation(&prices).expect("valid"),
        linear_regression(&prices).expect("valid"),
        moving_average(&prices, 7).expect("valid"),
        resistance_and_support(&prices).expect("valid"),
    );
    let second = (
        standard_deviation(&prices).expect("valid"),
        linear_regression(&prices).expect("valid"),
        moving_average(&prices, 7).expect("valid"),
        resistance_and_support(&prices).expect("valid"),
    );

    assert_eq!(first.0.to_bits(), second.0.to_bits());
    assert_eq!(first.1.intercept.to_bits(), second.1.intercept.to_bits());
    assert_eq!(first.1.slope.to_bits(), second.1.slope.to_bits());
    assert_eq!(first.2, second.2);
    assert_eq!(first.3, second.3);
}
