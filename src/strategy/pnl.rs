//! Per-period P&L of the lagged position and its summary statistics.

use super::signals::SignalTable;
use crate::error::{AnalysisError, Result};
use crate::math::mean_std;
use crate::types::TimeSeries;
use serde::Serialize;
use tracing::debug;

/// Trading days per year for Sharpe annualization
pub const ANNUALIZATION_FACTOR: f64 = 252.0;

/// Fill `pnl[t] = position[t] * (spread[t] - spread[t-1])`.
///
/// The first change is zero and a change touching a missing spread value
/// counts as zero.
///
/// # Errors
/// `Misaligned` unless spread and table carry exactly the same timestamps.
pub fn compute_pnl(spread: &TimeSeries, signals: &SignalTable) -> Result<SignalTable> {
    if spread.len() != signals.len()
        || spread
            .index()
            .iter()
            .zip(&signals.rows)
            .any(|(ts, row)| *ts != row.timestamp)
    {
        return Err(AnalysisError::Misaligned {
            left: spread.name().to_string(),
            right: "signal table".to_string(),
        });
    }

    let changes = spread.diff_filled();
    let rows = signals
        .rows
        .iter()
        .zip(changes)
        .map(|(row, change)| {
            let mut row = *row;
            row.pnl = Some(row.position.as_f64() * change);
            row
        })
        .collect();

    Ok(SignalTable { rows })
}

/// Aggregate performance of one P&L run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PnlSummary {
    pub total_pnl: f64,
    pub periods: usize,
    /// Transitions into a non-flat position, flips included
    pub trades: usize,
    /// Largest peak-to-trough drop of cumulative pnl
    pub max_drawdown: f64,
    /// Annualized Sharpe ratio of per-period pnl
    pub sharpe_ratio: f64,
}

impl PnlSummary {
    pub fn from_table(table: &SignalTable) -> Self {
        let pnl = table.pnl_values();

        let mut trades = 0;
        let mut previous = None;
        for row in &table.rows {
            let position = row.position;
            if !position.is_flat() && previous != Some(position) {
                trades += 1;
            }
            previous = Some(position);
        }

        let mut cumulative = 0.0;
        let mut peak = 0.0_f64;
        let mut max_drawdown = 0.0_f64;
        for p in &pnl {
            cumulative += p;
            peak = peak.max(cumulative);
            max_drawdown = max_drawdown.max(peak - cumulative);
        }

        let summary = Self {
            total_pnl: pnl.iter().sum(),
            periods: pnl.len(),
            trades,
            max_drawdown,
            sharpe_ratio: calculate_sharpe_ratio(&pnl),
        };
        debug!(?summary, "P&L summary");
        summary
    }
}

fn calculate_sharpe_ratio(pnl: &[f64]) -> f64 {
    let Ok((mean, std_dev)) = mean_std(pnl) else {
        return 0.0;
    };

    if !std_dev.is_finite() || std_dev.abs() < f64::EPSILON {
        return 0.0;
    }

    (mean / std_dev) * ANNUALIZATION_FACTOR.sqrt()
}
