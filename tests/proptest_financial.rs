//! Property-based tests for the statistical pipeline
//!
//! These tests use proptest to verify invariants across many random inputs,
//! catching edge cases that unit tests might miss.

use pairs_signal::math::{mean_std, zscore};
use pairs_signal::strategy::{compute_pnl, generate_signals, hedge_ratio, Position};
use pairs_signal::TimeSeries;
use proptest::prelude::*;

/// Values with a usable spread (sample std well away from zero)
fn spread_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0f64..1000.0f64, 3..100).prop_filter("needs variance", |v| {
        mean_std(v).map(|(_, s)| s > 1.0).unwrap_or(false)
    })
}

/// Thresholds satisfying `0 <= exit < entry`
fn thresholds() -> impl Strategy<Value = (f64, f64)> {
    (0.1f64..4.0, 0.0f64..1.0).prop_map(|(entry, frac)| (entry, entry * frac * 0.99))
}

proptest! {
    /// Standardized series has mean 0 and sample std 1
    #[test]
    fn zscore_has_unit_moments(values in spread_values()) {
        let z = zscore(&TimeSeries::from_values("s", values.clone())).unwrap();
        prop_assert_eq!(z.len(), values.len());
        let (mean, std) = mean_std(z.values()).unwrap();
        prop_assert!(mean.abs() < 1e-9, "mean = {}", mean);
        prop_assert!((std - 1.0).abs() < 1e-9, "std = {}", std);
    }

    /// Shifting and positively scaling the input leaves the z-score unchanged
    #[test]
    fn zscore_is_affine_invariant(values in spread_values(), shift in -100.0f64..100.0, scale in 0.5f64..5.0) {
        let a = zscore(&TimeSeries::from_values("a", values.clone())).unwrap();
        let moved: Vec<f64> = values.iter().map(|v| v * scale + shift).collect();
        let b = zscore(&TimeSeries::from_values("b", moved)).unwrap();
        for (x, y) in a.values().iter().zip(b.values()) {
            prop_assert!((x - y).abs() < 1e-6);
        }
    }

    /// Position at t is the last signal set strictly before t, Flat if none
    #[test]
    fn position_is_lagged_forward_fill(
        z in prop::collection::vec(-5.0f64..5.0, 0..200),
        (entry, exit) in thresholds()
    ) {
        let table = generate_signals(&TimeSeries::from_values("z", z), entry, exit).unwrap();
        let mut carried = Position::Flat;
        for row in &table.rows {
            prop_assert_eq!(row.position, carried);
            if let Some(signal) = row.signal {
                carried = signal;
            }
        }
    }

    /// Flags never contradict each other under valid thresholds
    #[test]
    fn flags_are_consistent(
        z in prop::collection::vec(-5.0f64..5.0, 1..100),
        (entry, exit) in thresholds()
    ) {
        let table = generate_signals(&TimeSeries::from_values("z", z), entry, exit).unwrap();
        for row in &table.rows {
            prop_assert!(!(row.long_entry && row.short_entry));
            prop_assert!(!(row.exit && (row.long_entry || row.short_entry)));
            prop_assert_eq!(row.signal.is_some(), row.long_entry || row.short_entry || row.exit);
        }
    }

    /// pnl[t] = position[t] * (spread[t] - spread[t-1]), pnl[0] = 0
    #[test]
    fn pnl_identity(
        spread in prop::collection::vec(-100.0f64..100.0, 1..150),
        z in prop::collection::vec(-3.0f64..3.0, 150)
    ) {
        let n = spread.len();
        let spread = TimeSeries::from_values("s", spread);
        let z = TimeSeries::from_values("z", z[..n].to_vec());
        let signals = generate_signals(&z, 1.0, 0.3).unwrap();
        let table = compute_pnl(&spread, &signals).unwrap();

        prop_assert_eq!(table.rows[0].pnl, Some(0.0));
        for t in 1..n {
            let expected = table.rows[t].position.as_f64() * (spread.values()[t] - spread.values()[t - 1]);
            let actual = table.rows[t].pnl.unwrap();
            prop_assert!((actual - expected).abs() < 1e-12);
        }
    }

    /// Same input, bit-identical output
    #[test]
    fn pipeline_is_deterministic(values in spread_values()) {
        let spread = TimeSeries::from_values("s", values);
        let run = || {
            let z = zscore(&spread).unwrap();
            let signals = generate_signals(&z, 1.0, 0.3).unwrap();
            compute_pnl(&spread, &signals).unwrap()
        };
        prop_assert_eq!(run(), run());
    }

    /// Exact linear relation recovers its slope
    #[test]
    fn hedge_ratio_recovers_exact_slope(
        x in prop::collection::vec(1.0f64..500.0, 3..100),
        slope in -5.0f64..5.0,
        intercept in -50.0f64..50.0
    ) {
        prop_assume!(mean_std(&x).map(|(_, s)| s > 10.0).unwrap_or(false));
        let y: Vec<f64> = x.iter().map(|v| intercept + slope * v).collect();
        let beta = hedge_ratio(&TimeSeries::from_values("y", y), &TimeSeries::from_values("x", x)).unwrap();
        prop_assert!((beta - slope).abs() < 1e-4, "beta = {}, slope = {}", beta, slope);
    }
}

#[test]
fn test_zscore_constant_series_fails() {
    let s = TimeSeries::from_values("flat", vec![3.0; 20]);
    assert!(zscore(&s).is_err());
}

#[test]
fn test_zscore_keeps_missing() {
    let s = TimeSeries::from_values("s", vec![1.0, f64::NAN, 3.0, 5.0]);
    let z = zscore(&s).unwrap();
    assert!(z.values()[1].is_nan());
    assert_eq!(z.index(), s.index());
}
