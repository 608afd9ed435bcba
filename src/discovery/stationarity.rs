//! Stationarity test for spread series

use crate::error::Result;
use crate::math::adf::{adf_test, AdfReport, CriticalValues};
use crate::types::TimeSeries;
use serde::Serialize;
use tracing::debug;

/// Default significance level for the ADF test
pub const DEFAULT_PVAL_THRESHOLD: f64 = 0.05;

/// Outcome of the stationarity test on one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationarityResult {
    /// `p_value < threshold`
    pub is_stationary: bool,
    pub p_value: f64,
    /// ADF t-statistic
    pub statistic: f64,
    pub used_lag: usize,
    pub nobs: usize,
    pub critical_values: CriticalValues,
}

impl StationarityResult {
    fn from_report(report: AdfReport, threshold: f64) -> Self {
        Self {
            is_stationary: report.p_value < threshold,
            p_value: report.p_value,
            statistic: report.statistic,
            used_lag: report.used_lag,
            nobs: report.nobs,
            critical_values: report.critical_values,
        }
    }
}

/// Run the ADF test on `series` after dropping missing values.
///
/// Short or constant input is an error, never a silent "not stationary".
pub fn test_stationarity(series: &TimeSeries, threshold: f64) -> Result<StationarityResult> {
    let clean = series.dropna();
    if clean.len() < series.len() {
        debug!(
            series = series.name(),
            dropped = series.len() - clean.len(),
            "Dropped missing values before ADF"
        );
    }

    let report = adf_test(clean.values())?;
    Ok(StationarityResult::from_report(report, threshold))
}
