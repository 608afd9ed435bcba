//! Augmented Dickey-Fuller unit-root test.
//!
//! Regression with a constant term:
//!
//! ```text
//! Δy[t] = c + γ·y[t-1] + Σ δ_i·Δy[t-i] + ε,   i = 1..p
//! ```
//!
//! H0: γ = 0 (unit root, non-stationary). The lag order `p` is picked by
//! minimum AIC over `0..=maxlag`, all candidates fitted on the sample trimmed
//! for `maxlag` so their likelihoods are comparable. The chosen model is then
//! re-fitted on the longer sample trimmed only for `p`.
//!
//! p-values follow MacKinnon (1994) approximate response surfaces, critical
//! values MacKinnon (2010) finite-sample surfaces, both for the
//! constant-only, single-series case.

use super::ols::{ols, OlsFit};
use crate::error::{AnalysisError, Result};
use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

/// Smallest series for which any lag order fits (`n/2 - 2 >= 0`)
pub const MIN_OBSERVATIONS: usize = 4;

// MacKinnon (1994), constant only, N = 1
const TAU_MAX: f64 = 2.74;
const TAU_MIN: f64 = -18.83;
const TAU_STAR: f64 = -1.61;
const TAU_SMALL_P: [f64; 3] = [2.1659, 1.4412, 0.038269];
const TAU_LARGE_P: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

// MacKinnon (2010), constant only, N = 1: b0 + b1/T + b2/T² + b3/T³
const CRIT_1PCT: [f64; 4] = [-3.43035, -6.5393, -16.786, -79.433];
const CRIT_5PCT: [f64; 4] = [-2.86154, -2.8903, -4.234, -40.04];
const CRIT_10PCT: [f64; 4] = [-2.56677, -1.5384, -2.809, 0.0];

/// Finite-sample ADF critical values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalValues {
    pub one_percent: f64,
    pub five_percent: f64,
    pub ten_percent: f64,
}

impl CriticalValues {
    /// Critical values for a regression with `nobs` observations.
    pub fn for_nobs(nobs: usize) -> Self {
        let surface = |b: &[f64; 4]| {
            let t = nobs as f64;
            b[0] + b[1] / t + b[2] / t.powi(2) + b[3] / t.powi(3)
        };
        Self {
            one_percent: surface(&CRIT_1PCT),
            five_percent: surface(&CRIT_5PCT),
            ten_percent: surface(&CRIT_10PCT),
        }
    }
}

/// Full output of one ADF run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdfReport {
    /// t-statistic of γ (more negative = more stationary)
    pub statistic: f64,
    /// MacKinnon approximate p-value
    pub p_value: f64,
    /// Number of lagged differences in the final regression
    pub used_lag: usize,
    /// Observations in the final regression
    pub nobs: usize,
    pub critical_values: CriticalValues,
}

/// Default maximum lag: `ceil(12·(n/100)^¼)`, capped so the regression keeps
/// residual degrees of freedom. `None` when the series is too short.
pub fn default_max_lag(n: usize) -> Option<usize> {
    let schwert = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as i64;
    let cap = (n / 2) as i64 - 2;
    let maxlag = schwert.min(cap);
    (maxlag >= 0).then_some(maxlag as usize)
}

/// Run the ADF test on a series without missing values.
///
/// # Errors
/// - `InsufficientData` when fewer than [`MIN_OBSERVATIONS`] values are given
/// - `NonFinite` when the input or the statistic is not finite
/// - `DegenerateSeries` when the series is constant
pub fn adf_test(series: &[f64]) -> Result<AdfReport> {
    let n = series.len();

    if let Some(pos) = series.iter().position(|v| !v.is_finite()) {
        return Err(AnalysisError::NonFinite(format!(
            "ADF input contains {} at position {}",
            series[pos], pos
        )));
    }
    let Some(maxlag) = default_max_lag(n) else {
        return Err(AnalysisError::InsufficientData {
            expected: MIN_OBSERVATIONS,
            actual: n,
        });
    };
    if series.iter().all(|v| *v == series[0]) {
        return Err(AnalysisError::DegenerateSeries(
            "ADF test is undefined for a constant series".to_string(),
        ));
    }

    let diffs: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();

    // Lag selection on the common sample
    let mut best: Option<(f64, usize)> = None;
    for lags in 0..=maxlag {
        let (y, x) = design(series, &diffs, maxlag, lags);
        let aic = ols(&y, &x)?.aic();
        match best {
            _ if aic.is_nan() => {}
            Some((best_aic, _)) if aic >= best_aic => {}
            _ => best = Some((aic, lags)),
        }
    }
    let used_lag = best.map(|(_, lags)| lags).unwrap_or(0);

    let (y, x) = design(series, &diffs, used_lag, used_lag);
    let fit: OlsFit = ols(&y, &x)?;
    let statistic = fit.t_value(1);

    if !statistic.is_finite() {
        return Err(AnalysisError::NonFinite(format!(
            "ADF statistic is {} (perfectly fitted differences)",
            statistic
        )));
    }

    let p_value = mackinnon_p_value(statistic)?;

    debug!(
        statistic = format!("{:.4}", statistic),
        p_value = format!("{:.4}", p_value),
        used_lag,
        maxlag,
        nobs = fit.nobs,
        "ADF test complete"
    );

    Ok(AdfReport {
        statistic,
        p_value,
        used_lag,
        nobs: fit.nobs,
        critical_values: CriticalValues::for_nobs(fit.nobs),
    })
}

/// Build regressand and design for a sample starting at difference index
/// `start` with `lags` lagged differences. Columns: `[1, y[t-1], Δy[t-1..=t-lags]]`.
fn design(series: &[f64], diffs: &[f64], start: usize, lags: usize) -> (DVector<f64>, DMatrix<f64>) {
    let rows = diffs.len() - start;
    let cols = 2 + lags;

    let y = DVector::from_iterator(rows, diffs[start..].iter().copied());
    let x = DMatrix::from_fn(rows, cols, |r, c| {
        let t = start + r;
        match c {
            0 => 1.0,
            1 => series[t],
            lag => diffs[t - (lag - 1)],
        }
    });
    (y, x)
}

/// MacKinnon (1994) approximate p-value for the ADF statistic.
pub fn mackinnon_p_value(statistic: f64) -> Result<f64> {
    if statistic > TAU_MAX {
        return Ok(1.0);
    }
    if statistic < TAU_MIN {
        return Ok(0.0);
    }

    let poly = |coefs: &[f64]| {
        coefs
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * statistic + c)
    };
    let z = if statistic <= TAU_STAR {
        poly(&TAU_SMALL_P)
    } else {
        poly(&TAU_LARGE_P)
    };

    let normal =
        Normal::new(0.0, 1.0).map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
    Ok(normal.cdf(z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::StandardNormal;

    fn white_noise(seed: u64, n: usize) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.sample::<f64, _>(StandardNormal)).collect()
    }

    fn random_walk(seed: u64, n: usize) -> Vec<f64> {
        let mut level = 100.0;
        white_noise(seed, n)
            .into_iter()
            .map(|e| {
                level += e;
                level
            })
            .collect()
    }

    #[test]
    fn test_default_max_lag() {
        assert_eq!(default_max_lag(3), None);
        assert_eq!(default_max_lag(4), Some(0));
        assert_eq!(default_max_lag(10), Some(3));
        // ceil(12 * 1) = 12 for exactly 100 observations
        assert_eq!(default_max_lag(100), Some(12));
        assert_eq!(default_max_lag(250), Some(16));
    }

    #[test]
    fn test_mackinnon_five_percent() {
        // The 5% asymptotic critical value maps to roughly p = 0.05
        let p = mackinnon_p_value(-2.86).unwrap();
        assert!((p - 0.05).abs() < 0.005, "p = {}", p);
    }

    #[test]
    fn test_mackinnon_bounds_and_monotonic() {
        assert_eq!(mackinnon_p_value(3.0).unwrap(), 1.0);
        assert_eq!(mackinnon_p_value(-20.0).unwrap(), 0.0);

        let mut prev = 0.0;
        for i in 0..200 {
            let stat = -18.0 + i as f64 * 0.1;
            let p = mackinnon_p_value(stat).unwrap();
            assert!(p >= prev - 1e-3, "p-value should rise with the statistic");
            prev = p;
        }
    }

    #[test]
    fn test_mackinnon_continuous_at_switch() {
        let below = mackinnon_p_value(TAU_STAR).unwrap();
        let above = mackinnon_p_value(TAU_STAR + 1e-9).unwrap();
        assert!((below - above).abs() < 1e-2);
    }

    #[test]
    fn test_critical_values_order() {
        let cv = CriticalValues::for_nobs(200);
        assert!(cv.one_percent < cv.five_percent);
        assert!(cv.five_percent < cv.ten_percent);
        assert!((cv.five_percent + 2.876).abs() < 0.01);
    }

    #[test]
    fn test_white_noise_is_stationary() {
        let report = adf_test(&white_noise(7, 300)).unwrap();
        assert!(report.p_value < 0.01, "p = {}", report.p_value);
        assert!(report.statistic < report.critical_values.one_percent);
    }

    #[test]
    fn test_random_walks_are_mostly_non_stationary() {
        // Nominal false-rejection rate at 5% is 2.5 of 50
        let rejected = (0..50)
            .map(|seed| adf_test(&random_walk(seed, 500)).unwrap())
            .filter(|r| r.p_value < 0.05)
            .count();
        assert!(rejected <= 5, "{} of 50 random walks rejected", rejected);
    }

    #[test]
    fn test_alternating_series_is_extreme_not_degenerate() {
        // Differences are fitted almost exactly; the statistic blows up
        // but stays finite, so the series reads as strongly stationary.
        let series: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let report = adf_test(&series).unwrap();
        assert!(report.statistic < TAU_MIN, "stat = {}", report.statistic);
        assert_eq!(report.p_value, 0.0);
    }

    #[test]
    fn test_mean_reverting_ar1() {
        // y[t] = 0.3 * y[t-1] + noise
        let noise = white_noise(11, 200);
        let mut current = 10.0;
        let series: Vec<f64> = noise
            .iter()
            .map(|e| {
                current = 0.3 * current + e;
                current
            })
            .collect();
        let report = adf_test(&series).unwrap();
        assert!(report.statistic < -2.86);
    }

    #[test]
    fn test_too_short() {
        let err = adf_test(&[1.0, 2.0, 1.5]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_constant_series() {
        let err = adf_test(&[5.0; 50]).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateSeries(_)));
    }

    #[test]
    fn test_non_finite_input() {
        let mut series = white_noise(3, 50);
        series[10] = f64::NAN;
        assert!(matches!(adf_test(&series), Err(AnalysisError::NonFinite(_))));
    }

    #[test]
    fn test_used_lag_within_bounds() {
        let series = random_walk(5, 120);
        let report = adf_test(&series).unwrap();
        let maxlag = default_max_lag(120).unwrap();
        assert!(report.used_lag <= maxlag);
        assert_eq!(report.nobs, 120 - 1 - report.used_lag);
    }
}
