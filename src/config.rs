//! Configuration for the pairs pipeline
//!
//! Thresholds are explicit values passed into each stage rather than
//! globals. A config file may set any subset of fields; the rest fall back
//! to the defaults below.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Z-score distance that triggers an entry (must be positive)
    #[serde(default = "default_entry_threshold")]
    pub entry_threshold: f64,

    /// Z-score distance inside which positions are closed (must be < entry)
    #[serde(default = "default_exit_threshold")]
    pub exit_threshold: f64,

    /// ADF significance level for stationarity
    #[serde(default = "default_pval_threshold")]
    pub pval_threshold: f64,

    /// Minimum Pearson correlation for candidate screening (-1.0 to 1.0)
    #[serde(default = "default_min_correlation")]
    pub min_correlation: f64,
}

// Default value functions for serde
fn default_entry_threshold() -> f64 {
    1.0
}
fn default_exit_threshold() -> f64 {
    0.3
}
fn default_pval_threshold() -> f64 {
    0.05
}
fn default_min_correlation() -> f64 {
    0.8
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            entry_threshold: default_entry_threshold(),
            exit_threshold: default_exit_threshold(),
            pval_threshold: default_pval_threshold(),
            min_correlation: default_min_correlation(),
        }
    }
}

impl StrategyConfig {
    /// Load from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> std::result::Result<Self, crate::error::DataError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_signal_thresholds(self.entry_threshold, self.exit_threshold)?;
        if !(self.pval_threshold > 0.0 && self.pval_threshold < 1.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "pval_threshold must be in (0, 1), got {}",
                self.pval_threshold
            )));
        }
        if !(-1.0..=1.0).contains(&self.min_correlation) {
            return Err(AnalysisError::InvalidConfig(format!(
                "min_correlation must be between -1.0 and 1.0, got {}",
                self.min_correlation
            )));
        }
        Ok(())
    }
}

/// Entry/exit thresholds must be finite with `0 <= exit < entry`.
pub fn validate_signal_thresholds(entry_threshold: f64, exit_threshold: f64) -> Result<()> {
    if !entry_threshold.is_finite() || !exit_threshold.is_finite() {
        return Err(AnalysisError::InvalidConfig(format!(
            "thresholds must be finite, got entry {} / exit {}",
            entry_threshold, exit_threshold
        )));
    }
    if entry_threshold <= 0.0 {
        return Err(AnalysisError::InvalidConfig(format!(
            "entry_threshold must be positive, got {}",
            entry_threshold
        )));
    }
    if exit_threshold < 0.0 {
        return Err(AnalysisError::InvalidConfig(format!(
            "exit_threshold cannot be negative, got {}",
            exit_threshold
        )));
    }
    if exit_threshold >= entry_threshold {
        return Err(AnalysisError::InvalidConfig(format!(
            "exit_threshold ({}) must be below entry_threshold ({})",
            exit_threshold, entry_threshold
        )));
    }
    Ok(())
}
