//! Backtest command handler.
//!
//! Implements the `backtest` subcommand: runs the full pair pipeline on a
//! price file and reports the stationarity verdict, hedge ratio and P&L.

use crate::cli::BacktestCliConfig;
use crate::data::{load_price_table, write_signal_csv};
use crate::strategy::run_pair_pipeline;

use tracing::{error, info, warn};

/// Run a pair backtest with the provided CLI configuration.
///
/// # Errors
/// Returns error if data loading or any pipeline stage fails.
pub fn run_backtest(config: BacktestCliConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- Running Backtest ---");
    info!(
        prices = %config.prices.display(),
        leg_y = %config.leg_y,
        leg_x = %config.leg_x,
        entry = config.strategy.entry_threshold,
        exit = config.strategy.exit_threshold,
        "Backtest configuration"
    );

    let table = load_price_table(&config.prices)?;
    let result = match run_pair_pipeline(&table, &config.leg_y, &config.leg_x, &config.strategy) {
        Ok(result) => result,
        Err(e) => {
            error!("Backtest failed: {}", e);
            return Err(e.into());
        }
    };

    let verdict = if result.stationarity.is_stationary {
        "stationary"
    } else {
        "NOT stationary"
    };
    if !result.stationarity.is_stationary {
        warn!("Signals on a non-stationary spread are unlikely to mean-revert");
    }

    let cv = result.stationarity.critical_values;
    println!("\n--- Backtest Results: {}/{} ---", result.leg_y, result.leg_x);
    println!("Hedge Ratio:     {:.4}", result.hedge_ratio);
    println!(
        "ADF Statistic:   {:.4} (lag {}, nobs {})",
        result.stationarity.statistic, result.stationarity.used_lag, result.stationarity.nobs
    );
    println!(
        "Critical Values: 1% {:.3} | 5% {:.3} | 10% {:.3}",
        cv.one_percent, cv.five_percent, cv.ten_percent
    );
    println!(
        "ADF p-value:     {:.4} ({})",
        result.stationarity.p_value, verdict
    );
    println!("Periods:         {}", result.summary.periods);
    println!("Total Trades:    {}", result.summary.trades);
    println!("Total P&L:       {:.4}", result.summary.total_pnl);
    println!("Max Drawdown:    {:.4}", result.summary.max_drawdown);
    println!("Sharpe Ratio:    {:.2}", result.summary.sharpe_ratio);
    println!("------------------------");

    if let Some(output) = &config.output {
        write_signal_csv(output, &result)?;
        info!(path = %output.display(), "Signal table saved");
    }

    Ok(())
}
