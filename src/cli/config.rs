//! CLI configuration structs bridging CLI arguments to domain types.
//!
//! Each command layers its flags over a base [`StrategyConfig`] (defaults
//! or a config file) and validates the result before any data is read.

use crate::config::StrategyConfig;
use crate::error::Result;
use std::path::PathBuf;

/// Resolved configuration for the `screen` command.
#[derive(Debug, Clone)]
pub struct ScreenCliConfig {
    pub prices: PathBuf,
    pub output: Option<PathBuf>,
    pub strategy: StrategyConfig,
}

impl ScreenCliConfig {
    pub fn resolve(
        base: StrategyConfig,
        prices: PathBuf,
        min_correlation: Option<f64>,
        pval_threshold: Option<f64>,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        let strategy = StrategyConfig {
            min_correlation: min_correlation.unwrap_or(base.min_correlation),
            pval_threshold: pval_threshold.unwrap_or(base.pval_threshold),
            ..base
        };
        strategy.validate()?;
        Ok(Self {
            prices,
            output,
            strategy,
        })
    }
}

/// Resolved configuration for the `backtest` command.
#[derive(Debug, Clone)]
pub struct BacktestCliConfig {
    pub prices: PathBuf,
    pub leg_y: String,
    pub leg_x: String,
    pub output: Option<PathBuf>,
    pub strategy: StrategyConfig,
}

impl BacktestCliConfig {
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        base: StrategyConfig,
        prices: PathBuf,
        leg_y: String,
        leg_x: String,
        entry: Option<f64>,
        exit: Option<f64>,
        pval_threshold: Option<f64>,
        output: Option<PathBuf>,
    ) -> Result<Self> {
        let strategy = StrategyConfig {
            entry_threshold: entry.unwrap_or(base.entry_threshold),
            exit_threshold: exit.unwrap_or(base.exit_threshold),
            pval_threshold: pval_threshold.unwrap_or(base.pval_threshold),
            ..base
        };
        strategy.validate()?;
        Ok(Self {
            prices,
            leg_y,
            leg_x,
            output,
            strategy,
        })
    }
}
