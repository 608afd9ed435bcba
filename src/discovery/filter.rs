//! Statistical filtering for pair candidates
//!
//! Correlation screening produces candidate pairs from a price table; the
//! stationarity filter keeps the candidates whose raw spread passes the ADF
//! test.

use super::stationarity::test_stationarity;
use crate::error::Result;
use crate::types::PriceTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Maximum safe price ratio for correlation calculations.
/// Beyond this ratio, f64 precision loss may affect results.
const MAX_PRICE_RATIO: f64 = 1e9;

/// A pair that passed correlation screening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCandidate {
    /// First instrument (leg A)
    pub ticker1: String,
    /// Second instrument (leg B)
    pub ticker2: String,
    /// Pearson correlation coefficient
    pub correlation: f64,
}

impl PairCandidate {
    pub fn new(ticker1: impl Into<String>, ticker2: impl Into<String>, correlation: f64) -> Self {
        Self {
            ticker1: ticker1.into(),
            ticker2: ticker2.into(),
            correlation,
        }
    }
}

/// A candidate whose spread is stationary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationaryPair {
    #[serde(rename = "Ticker1")]
    pub ticker1: String,
    #[serde(rename = "Ticker2")]
    pub ticker2: String,
    #[serde(rename = "Correlation")]
    pub correlation: f64,
    #[serde(rename = "ADF p-value")]
    pub adf_p_value: f64,
}

/// Result table of the stationarity filter, rows in candidate order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PairTable {
    pub rows: Vec<StationaryPair>,
}

impl PairTable {
    /// Column names, present even when the table has no rows.
    pub const COLUMNS: [&'static str; 4] = ["Ticker1", "Ticker2", "Correlation", "ADF p-value"];

    pub fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Calculate Pearson correlation coefficient between two price series
///
/// Only positions where both values are finite take part. Returns a value in
/// [-1.0, 1.0], or None if calculation fails.
///
/// # Precision Guard
/// Returns None if the price ratio exceeds MAX_PRICE_RATIO.
///
/// # Mathematical Definition
/// r = Σ[(xi - x̄)(yi - ȳ)] / √[Σ(xi - x̄)² × Σ(yi - ȳ)²]
pub fn calculate_correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }

    let (a, b): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(x, y)| (*x, *y))
        .unzip();

    if a.len() < 2 {
        return None;
    }

    let mean_a: f64 = a.iter().sum::<f64>() / a.len() as f64;
    let mean_b: f64 = b.iter().sum::<f64>() / b.len() as f64;

    if mean_b != 0.0 {
        let ratio = (mean_a / mean_b).abs();
        if !(1.0 / MAX_PRICE_RATIO..=MAX_PRICE_RATIO).contains(&ratio) {
            warn!(
                ratio = format!("{:.2e}", ratio),
                limit = format!("{:.2e}", MAX_PRICE_RATIO),
                "Price ratio exceeds safe bounds for correlation calculation"
            );
            return None;
        }
    }

    let mut covariance = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;

    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }

    let correlation = covariance / (var_a.sqrt() * var_b.sqrt());

    if correlation.is_finite() {
        Some(correlation.clamp(-1.0, 1.0))
    } else {
        None
    }
}

/// Screen every unordered column pair of `table` for correlation.
///
/// Pairs are enumerated in column order (i < j) and returned in that order.
#[instrument(skip(table), fields(instruments = table.columns().len()))]
pub fn screen_correlated_pairs(table: &PriceTable, min_correlation: f64) -> Vec<PairCandidate> {
    let symbols = table.columns();
    let mut results = Vec::new();

    for i in 0..symbols.len() {
        for j in (i + 1)..symbols.len() {
            let sym_a = &symbols[i];
            let sym_b = &symbols[j];

            let (Ok(series_a), Ok(series_b)) = (table.prices(sym_a), table.prices(sym_b)) else {
                continue;
            };

            let Some(correlation) = calculate_correlation(series_a, series_b) else {
                debug!(pair = format!("{}-{}", sym_a, sym_b), "Correlation undefined");
                continue;
            };

            if correlation < min_correlation {
                debug!(
                    pair = format!("{}-{}", sym_a, sym_b),
                    corr = correlation,
                    "Correlation too low"
                );
                continue;
            }

            results.push(PairCandidate::new(sym_a.clone(), sym_b.clone(), correlation));
        }
    }

    info!(
        candidates = results.len(),
        min_corr = min_correlation,
        "Correlation screening complete"
    );
    results
}

/// Keep the candidates whose spread `ticker1 - ticker2` is stationary.
///
/// Output keeps input order. An empty candidate list yields an empty table.
///
/// # Errors
/// Unknown instruments and stationarity test failures (short or constant
/// spreads) propagate; they are never treated as "not stationary".
#[instrument(skip(table, candidates), fields(candidates = candidates.len()))]
pub fn filter_stationary_pairs(
    table: &PriceTable,
    candidates: &[PairCandidate],
    pval_threshold: f64,
) -> Result<PairTable> {
    let mut rows = Vec::new();
    let mut rejected_adf = 0u32;

    for candidate in candidates {
        let pair = format!("{}-{}", candidate.ticker1, candidate.ticker2);
        let spread = table
            .series(&candidate.ticker1)?
            .difference(&table.series(&candidate.ticker2)?)?;

        let result = test_stationarity(&spread, pval_threshold).map_err(|e| {
            warn!(pair = %pair, error = %e, "Stationarity test failed");
            e
        })?;

        if !result.is_stationary {
            debug!(
                pair = %pair,
                p_value = format!("{:.4}", result.p_value),
                threshold = pval_threshold,
                "Failed ADF test (spread is non-stationary)"
            );
            rejected_adf += 1;
            continue;
        }

        info!(
            pair = %pair,
            correlation = format!("{:.3}", candidate.correlation),
            p_value = format!("{:.4}", result.p_value),
            "Stationary pair found"
        );

        rows.push(StationaryPair {
            ticker1: candidate.ticker1.clone(),
            ticker2: candidate.ticker2.clone(),
            correlation: candidate.correlation,
            adf_p_value: result.p_value,
        });
    }

    info!(
        stationary_pairs = rows.len(),
        rejected_adf = rejected_adf,
        "Filtering complete"
    );
    Ok(PairTable { rows })
}
