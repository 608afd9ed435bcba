//! Pair screening command handler.
//!
//! Implements the `screen` subcommand: correlation screen over every
//! instrument pair in a price file, then the ADF filter on each spread.

use crate::cli::ScreenCliConfig;
use crate::data::{load_price_table, write_pairs_json};
use crate::discovery::{filter_stationary_pairs, screen_correlated_pairs};

use tracing::{error, info, warn};

/// Run the screen and print the stationary pairs.
///
/// # Errors
/// Returns error if the price file cannot be read or a pair fails the ADF test.
pub fn run_screen(config: ScreenCliConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("--- Pairs Signal: Pair Screen ---");
    info!(
        prices = %config.prices.display(),
        min_corr = config.strategy.min_correlation,
        pval = config.strategy.pval_threshold,
        "Configuration loaded"
    );

    let table = load_price_table(&config.prices)?;
    let candidates = screen_correlated_pairs(&table, config.strategy.min_correlation);
    info!(candidates = candidates.len(), "Correlation screen complete");

    let pairs = match filter_stationary_pairs(&table, &candidates, config.strategy.pval_threshold)
    {
        Ok(pairs) => pairs,
        Err(e) => {
            error!("Stationarity filter failed: {}", e);
            return Err(e.into());
        }
    };

    if pairs.is_empty() {
        warn!("No stationary pairs found");
    } else {
        println!(
            "\n{:<24} | {:>11} | {:>11}",
            "Pair", "Correlation", "ADF p-value"
        );
        println!("{}", "-".repeat(52));
        for pair in &pairs.rows {
            println!(
                "{:<24} | {:>11.4} | {:>11.4}",
                format!("{}/{}", pair.ticker1, pair.ticker2),
                pair.correlation,
                pair.adf_p_value
            );
        }
    }

    if let Some(output) = &config.output {
        write_pairs_json(output, &pairs)?;
        info!(path = %output.display(), pairs = pairs.len(), "Results saved");
    }

    Ok(())
}
