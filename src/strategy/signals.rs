//! Threshold signals and the lagged position they produce.
//!
//! Each bar is classified from its z-score alone. The position held over
//! bar `t` is whatever signal was last set strictly before `t`, so a signal
//! observed at the close of one bar is only traded on the next.

use super::Position;
use crate::config::validate_signal_thresholds;
use crate::error::Result;
use crate::types::{TimeSeries, Timestamp};
use serde::Serialize;
use tracing::debug;

/// One bar of the signal table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalRow {
    pub timestamp: Timestamp,
    /// `z < -entry`
    pub long_entry: bool,
    /// `z > entry`
    pub short_entry: bool,
    /// `|z| < exit`
    pub exit: bool,
    /// Raw signal for this bar; `None` when no rule fired.
    pub signal: Option<Position>,
    /// Position held over this bar.
    pub position: Position,
    /// Filled in by [`compute_pnl`](super::compute_pnl).
    pub pnl: Option<f64>,
}

/// Signal rows in index order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SignalTable {
    pub rows: Vec<SignalRow>,
}

impl SignalTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn index(&self) -> Vec<Timestamp> {
        self.rows.iter().map(|r| r.timestamp).collect()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.rows.iter().map(|r| r.position).collect()
    }

    pub fn signals(&self) -> Vec<Option<Position>> {
        self.rows.iter().map(|r| r.signal).collect()
    }

    /// Per-period pnl with unset values as zero.
    pub fn pnl_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.pnl.unwrap_or(0.0)).collect()
    }
}

/// Resolve the flags of one bar. Later rules overwrite earlier ones:
/// long, then short, then exit.
fn resolve(long_entry: bool, short_entry: bool, exit: bool) -> Option<Position> {
    let mut signal = None;
    if long_entry {
        signal = Some(Position::Long);
    }
    if short_entry {
        signal = Some(Position::Short);
    }
    if exit {
        signal = Some(Position::Flat);
    }
    signal
}

/// Build the signal table for a z-score series.
///
/// A missing z-score fires no rule, so the carried position is held.
///
/// # Errors
/// `InvalidConfig` unless both thresholds are finite and
/// `0 <= exit_threshold < entry_threshold`.
pub fn generate_signals(
    zscore: &TimeSeries,
    entry_threshold: f64,
    exit_threshold: f64,
) -> Result<SignalTable> {
    validate_signal_thresholds(entry_threshold, exit_threshold)?;

    let mut carried = Position::Flat;
    let rows: Vec<SignalRow> = zscore
        .iter()
        .map(|(ts, z)| {
            let long_entry = z < -entry_threshold;
            let short_entry = z > entry_threshold;
            let exit = z.abs() < exit_threshold;
            let signal = resolve(long_entry, short_entry, exit);

            let position = carried;
            if let Some(next) = signal {
                carried = next;
            }

            SignalRow {
                timestamp: *ts,
                long_entry,
                short_entry,
                exit,
                signal,
                position,
                pnl: None,
            }
        })
        .collect();

    debug!(
        series = zscore.name(),
        bars = rows.len(),
        set = rows.iter().filter(|r| r.signal.is_some()).count(),
        "Generated signals"
    );
    Ok(SignalTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn values(table: &SignalTable) -> Vec<i8> {
        table.positions().into_iter().map(Position::value).collect()
    }

    #[test]
    fn test_position_lags_signal() {
        let z = TimeSeries::from_values("z", vec![-2.0, -2.0, 0.1, 0.1, 2.0, 2.0, 0.1]);
        let table = generate_signals(&z, 1.0, 0.3).unwrap();

        assert_eq!(values(&table), vec![0, 1, 1, 0, 0, -1, -1]);
        assert_eq!(
            table.signals(),
            vec![
                Some(Position::Long),
                Some(Position::Long),
                Some(Position::Flat),
                Some(Position::Flat),
                Some(Position::Short),
                Some(Position::Short),
                Some(Position::Flat),
            ]
        );
        assert!(table.rows.iter().all(|r| r.pnl.is_none()));
    }

    #[test]
    fn test_dead_zone_holds_position() {
        // Between exit and entry nothing fires
        let z = TimeSeries::from_values("z", vec![1.5, 0.6, -0.6, 0.2, 0.0]);
        let table = generate_signals(&z, 1.0, 0.3).unwrap();
        assert_eq!(table.rows[1].signal, None);
        assert_eq!(table.rows[2].signal, None);
        assert_eq!(values(&table), vec![0, -1, -1, -1, 0]);
    }

    #[test]
    fn test_missing_zscore_fires_nothing() {
        let z = TimeSeries::from_values("z", vec![-3.0, f64::NAN, f64::NAN]);
        let table = generate_signals(&z, 1.0, 0.3).unwrap();
        let row = table.rows[1];
        assert!(!row.long_entry && !row.short_entry && !row.exit);
        assert_eq!(row.signal, None);
        assert_eq!(values(&table), vec![0, 1, 1]);
    }

    #[test]
    fn test_flags_are_strict() {
        let z = TimeSeries::from_values("z", vec![1.0, -1.0, 0.3, -0.3]);
        let table = generate_signals(&z, 1.0, 0.3).unwrap();
        assert!(table.rows.iter().all(|r| r.signal.is_none()));
    }

    #[test]
    fn test_first_position_flat() {
        let z = TimeSeries::from_values("z", vec![5.0]);
        let table = generate_signals(&z, 1.0, 0.3).unwrap();
        assert_eq!(table.rows[0].position, Position::Flat);
        assert_eq!(table.rows[0].signal, Some(Position::Short));
    }

    #[test]
    fn test_empty_series() {
        let z = TimeSeries::from_values("z", Vec::new());
        let table = generate_signals(&z, 1.0, 0.3).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_invalid_thresholds() {
        let z = TimeSeries::from_values("z", vec![0.0]);
        for (entry, exit) in [(0.0, 0.0), (1.0, 1.0), (1.0, -0.1), (f64::NAN, 0.3), (1.0, f64::INFINITY)] {
            assert!(
                matches!(
                    generate_signals(&z, entry, exit),
                    Err(AnalysisError::InvalidConfig(_))
                ),
                "entry {} exit {} accepted",
                entry,
                exit
            );
        }
    }

    #[test]
    fn test_exit_overwrites_entries() {
        assert_eq!(resolve(true, false, true), Some(Position::Flat));
        assert_eq!(resolve(true, true, false), Some(Position::Short));
        assert_eq!(resolve(false, false, false), None);
    }

    #[test]
    fn test_keeps_index() {
        let z = TimeSeries::from_values("z", vec![0.0, 2.0, -2.0]);
        let table = generate_signals(&z, 1.0, 0.3).unwrap();
        assert_eq!(table.index(), z.index().to_vec());
    }
}
