//! Pairs-trading signal generation.
//!
//! Screens instrument pairs for a stationary spread, estimates a hedge
//! ratio, standardizes the spread and turns it into lagged mean-reversion
//! positions with their P&L.

pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod discovery;
pub mod error;
pub mod math;
pub mod observability;
pub mod strategy;
pub mod types;

pub use config::StrategyConfig;
pub use error::{AnalysisError, DataError, Result};
pub use types::{PriceTable, TimeSeries, Timestamp};
