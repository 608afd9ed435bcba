//! Full-sample z-score standardization.
//!
//! Mean and sample standard deviation are taken over the whole provided
//! window. Used naively on an expanding backtest this leaks future
//! information; walk-forward callers must recompute over a trailing window.

use crate::error::{AnalysisError, Result};
use crate::types::TimeSeries;

/// Mean and sample (n-1) standard deviation of the non-missing values.
///
/// # Errors
/// `InsufficientData` when fewer than two values are present.
pub fn mean_std(values: &[f64]) -> Result<(f64, f64)> {
    let valid: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if valid.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            expected: 2,
            actual: valid.len(),
        });
    }

    let n = valid.len() as f64;
    let mean = valid.iter().sum::<f64>() / n;
    let variance = valid.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Ok((mean, variance.sqrt()))
}

/// Standardize a series: `(x - mean) / std`.
///
/// Missing inputs stay missing; the output keeps the input index.
///
/// # Errors
/// - `InsufficientData` with fewer than two non-missing values
/// - `DegenerateSeries` when the standard deviation is zero
/// - `NonFinite` when mean or deviation overflow
pub fn zscore(series: &TimeSeries) -> Result<TimeSeries> {
    let (mean, std_dev) = mean_std(series.values())?;

    if !mean.is_finite() || !std_dev.is_finite() {
        return Err(AnalysisError::NonFinite(format!(
            "{}: mean {} / std {}",
            series.name(),
            mean,
            std_dev
        )));
    }
    if std_dev == 0.0 {
        return Err(AnalysisError::DegenerateSeries(format!(
            "{} has zero standard deviation",
            series.name()
        )));
    }

    let values = series
        .values()
        .iter()
        .map(|v| (v - mean) / std_dev)
        .collect();
    Ok(series.with_values(format!("{} z-score", series.name()), values))
}
