//! Error types for the analysis pipeline and its data layer

use thiserror::Error;

/// Errors raised by the statistical pipeline.
///
/// Every failure is a deterministic function of the input, so none of these
/// are retryable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Not enough usable observations for the requested statistic
    #[error("Insufficient data: expected at least {expected} data points, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// The statistic is undefined for this input (e.g. constant series)
    #[error("Degenerate series: {0}")]
    DegenerateSeries(String),

    /// Regression design matrix could not be inverted
    #[error("Singular regression: {0}")]
    SingularMatrix(String),

    /// Two series that must share a time index do not
    #[error("Index mismatch between '{left}' and '{right}'")]
    Misaligned { left: String, right: String },

    /// Instrument identifier not present in the price table
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    /// Invalid configuration or parameter combination
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A computation produced NaN or infinity
    #[error("Non-finite result: {0}")]
    NonFinite(String),
}

/// Errors raised while reading or writing price and signal files.
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader/writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A cell could not be parsed
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// The file has a header but no instrument columns or no rows
    #[error("Price table is empty: {0}")]
    EmptyTable(String),

    /// Table construction violated a pipeline invariant
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, AnalysisError>;
