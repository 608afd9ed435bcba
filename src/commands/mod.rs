//! CLI command handlers.
//!
//! This module contains the implementation for each CLI subcommand,
//! delegating to the discovery and strategy pipelines.

mod backtest;
mod screen;

pub use backtest::run_backtest;
pub use screen::run_screen;
