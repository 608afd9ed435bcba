use crate::error::{AnalysisError, Result};
use crate::math::simple_regression;
use crate::types::TimeSeries;
use tracing::debug;

/// OLS slope of `y` on `[1, x]`; the intercept is discarded.
///
/// Rows where either leg is missing are dropped jointly. The regression goes
/// through a pseudo-inverse, so perfectly collinear input still returns a
/// coefficient.
pub fn hedge_ratio(y: &TimeSeries, x: &TimeSeries) -> Result<f64> {
    y.ensure_aligned(x)?;

    let (ys, xs): (Vec<f64>, Vec<f64>) = y
        .values()
        .iter()
        .zip(x.values())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(a, b)| (*a, *b))
        .unzip();

    if ys.len() < 2 {
        return Err(AnalysisError::InsufficientData {
            expected: 2,
            actual: ys.len(),
        });
    }
    if ys.len() < y.len() {
        debug!(
            y = y.name(),
            x = x.name(),
            dropped = y.len() - ys.len(),
            "Dropped incomplete rows before hedge regression"
        );
    }

    let (_intercept, beta) = simple_regression(&ys, &xs)?;
    if !beta.is_finite() {
        return Err(AnalysisError::NonFinite(format!(
            "hedge ratio of {} on {} is {}",
            y.name(),
            x.name(),
            beta
        )));
    }
    Ok(beta)
}

/// `y - beta * x` on the shared index.
pub fn hedged_spread(y: &TimeSeries, x: &TimeSeries, beta: f64) -> Result<TimeSeries> {
    y.ensure_aligned(x)?;
    let values = y
        .values()
        .iter()
        .zip(x.values())
        .map(|(a, b)| a - beta * b)
        .collect();
    Ok(y.with_values(format!("{}-{:.4}*{}", y.name(), beta, x.name()), values))
}
