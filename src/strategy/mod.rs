//! Mean-reversion strategy over a pair spread.
//!
//! - [`hedge`]: OLS hedge ratio and hedged spread
//! - [`signals`]: threshold flags and the lagged position scan
//! - [`pnl`]: per-period P&L and its summary
//! - [`pipeline`]: the whole chain for one pair

pub mod hedge;
pub mod pipeline;
pub mod pnl;
pub mod signals;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use hedge::{hedge_ratio, hedged_spread};
pub use pipeline::{run_pair_pipeline, PairBacktest};
pub use pnl::{compute_pnl, PnlSummary, ANNUALIZATION_FACTOR};
pub use signals::{generate_signals, SignalRow, SignalTable};

/// Exposure to the spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Position {
    Short,
    #[default]
    Flat,
    Long,
}

impl Position {
    /// Numeric exposure: -1, 0 or +1.
    pub fn value(self) -> i8 {
        match self {
            Position::Short => -1,
            Position::Flat => 0,
            Position::Long => 1,
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.value())
    }

    pub fn is_flat(self) -> bool {
        self == Position::Flat
    }
}

impl From<Position> for i8 {
    fn from(position: Position) -> Self {
        position.value()
    }
}

impl TryFrom<i8> for Position {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Position::Short),
            0 => Ok(Position::Flat),
            1 => Ok(Position::Long),
            other => Err(format!("invalid position {}", other)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
