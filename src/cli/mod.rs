//! CLI argument parsing using clap.
//!
//! This module defines the command-line interface for the pairs signal
//! generator, including all subcommands and their arguments.

mod config;

pub use config::{BacktestCliConfig, ScreenCliConfig};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pairs Signal - stationarity screening and z-score signals for instrument pairs
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Set the verbosity level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub verbose: String,

    /// JSON file with strategy thresholds; flags given on the command line win
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Find correlated pairs whose spread is stationary
    Screen {
        /// Price CSV (timestamp column followed by one column per instrument)
        #[arg(long)]
        prices: PathBuf,
        /// Minimum Pearson correlation threshold
        #[arg(long)]
        min_correlation: Option<f64>,
        /// ADF p-value below which a spread counts as stationary
        #[arg(long)]
        pval_threshold: Option<f64>,
        /// Write the stationary pairs to this JSON file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run the hedge/z-score/signal/P&L pipeline on one pair
    Backtest {
        /// Price CSV (timestamp column followed by one column per instrument)
        #[arg(long)]
        prices: PathBuf,
        /// Dependent leg (regressed on the other)
        #[arg(long)]
        leg_y: String,
        /// Independent leg
        #[arg(long)]
        leg_x: String,
        /// Z-score entry threshold
        #[arg(long)]
        entry: Option<f64>,
        /// Z-score exit threshold
        #[arg(long)]
        exit: Option<f64>,
        /// ADF p-value threshold for the stationarity verdict
        #[arg(long)]
        pval_threshold: Option<f64>,
        /// Write the signal table to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_screen() {
        let cli = Cli::try_parse_from([
            "pairs-signal",
            "screen",
            "--prices",
            "p.csv",
            "--min-correlation",
            "0.9",
        ])
        .unwrap();
        assert_eq!(cli.verbose, "info");
        match cli.command {
            Commands::Screen {
                prices,
                min_correlation,
                pval_threshold,
                output,
            } => {
                assert_eq!(prices, PathBuf::from("p.csv"));
                assert_eq!(min_correlation, Some(0.9));
                assert_eq!(pval_threshold, None);
                assert!(output.is_none());
            }
            _ => panic!("expected screen"),
        }
    }

    #[test]
    fn test_parse_backtest_with_globals() {
        let cli = Cli::try_parse_from([
            "pairs-signal",
            "backtest",
            "--prices",
            "p.csv",
            "--leg-y",
            "AAA",
            "--leg-x",
            "BBB",
            "--entry",
            "2.0",
            "--verbose",
            "debug",
            "--config",
            "cfg.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, "debug");
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
        assert!(matches!(
            cli.command,
            Commands::Backtest { entry: Some(e), exit: None, .. } if e == 2.0
        ));
    }

    #[test]
    fn test_backtest_requires_legs() {
        assert!(Cli::try_parse_from(["pairs-signal", "backtest", "--prices", "p.csv"]).is_err());
    }
}
