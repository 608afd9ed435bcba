//! Pair Discovery Module
//!
//! Screens a price table for correlated instrument pairs and keeps those
//! whose spread passes the Augmented Dickey-Fuller stationarity test.
//!
//! # Example
//!
//! ```no_run
//! use pairs_signal::data::load_price_table;
//! use pairs_signal::discovery::{filter_stationary_pairs, screen_correlated_pairs};
//!
//! let table = load_price_table("prices.csv")?;
//! let candidates = screen_correlated_pairs(&table, 0.8);
//! let pairs = filter_stationary_pairs(&table, &candidates, 0.05)?;
//! for row in &pairs.rows {
//!     println!("{}/{} p={:.4}", row.ticker1, row.ticker2, row.adf_p_value);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod filter;
pub mod stationarity;

pub use filter::{
    calculate_correlation, filter_stationary_pairs, screen_correlated_pairs, PairCandidate,
    PairTable, StationaryPair,
};
pub use stationarity::{test_stationarity, StationarityResult, DEFAULT_PVAL_THRESHOLD};
