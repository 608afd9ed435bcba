//! Mathematical utilities for the pairs pipeline.
//!
//! Statistical primitives shared by discovery and strategy code:
//! least-squares regression, the Augmented Dickey-Fuller unit-root test
//! and full-sample standardization.

pub mod adf;
pub mod ols;
pub mod zscore;

pub use adf::{adf_test, AdfReport, CriticalValues};
pub use ols::{ols, simple_regression, OlsFit};
pub use zscore::{mean_std, zscore};
