use super::hedge::{hedge_ratio, hedged_spread};
use super::pnl::{compute_pnl, PnlSummary};
use super::signals::{generate_signals, SignalTable};
use crate::config::StrategyConfig;
use crate::discovery::{test_stationarity, StationarityResult};
use crate::error::Result;
use crate::math::zscore;
use crate::types::{PriceTable, TimeSeries};
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Everything computed for one pair.
#[derive(Debug, Clone, Serialize)]
pub struct PairBacktest {
    pub leg_y: String,
    pub leg_x: String,
    pub hedge_ratio: f64,
    /// ADF verdict on the hedged spread
    pub stationarity: StationarityResult,
    pub spread: TimeSeries,
    pub zscore: TimeSeries,
    pub signals: SignalTable,
    pub summary: PnlSummary,
}

/// Hedge ratio, hedged spread, z-score, signals and P&L for `leg_y` against
/// `leg_x`.
///
/// A spread that fails the stationarity test is still traded; the verdict
/// is reported alongside the result.
#[instrument(skip(table, config), fields(rows = table.len()))]
pub fn run_pair_pipeline(
    table: &PriceTable,
    leg_y: &str,
    leg_x: &str,
    config: &StrategyConfig,
) -> Result<PairBacktest> {
    config.validate()?;

    let y = table.series(leg_y)?;
    let x = table.series(leg_x)?;

    let beta = hedge_ratio(&y, &x)?;
    let spread = hedged_spread(&y, &x, beta)?;
    let stationarity = test_stationarity(&spread, config.pval_threshold)?;
    if !stationarity.is_stationary {
        warn!(
            p_value = stationarity.p_value,
            threshold = config.pval_threshold,
            "Hedged spread is not stationary"
        );
    }

    let z = zscore(&spread)?;
    let signals = generate_signals(&z, config.entry_threshold, config.exit_threshold)?;
    let signals = compute_pnl(&spread, &signals)?;
    let summary = PnlSummary::from_table(&signals);

    info!(
        hedge_ratio = beta,
        p_value = stationarity.p_value,
        total_pnl = summary.total_pnl,
        trades = summary.trades,
        sharpe = summary.sharpe_ratio,
        "Pair pipeline complete"
    );

    Ok(PairBacktest {
        leg_y: leg_y.to_string(),
        leg_x: leg_x.to_string(),
        hedge_ratio: beta,
        stationarity,
        spread,
        zscore: z,
        signals,
        summary,
    })
}
