//! CSV and JSON storage for price tables, signal tables and pair tables

use crate::discovery::PairTable;
use crate::error::DataError;
use crate::strategy::PairBacktest;
use crate::types::{PriceTable, Timestamp};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use csv::{Reader, Writer};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Cell values read as missing
const MISSING_TOKENS: [&str; 4] = ["", "NaN", "nan", "null"];

/// Columns of the signal CSV
pub const SIGNAL_COLUMNS: [&str; 9] = [
    "timestamp",
    "spread",
    "zscore",
    "long_entry",
    "short_entry",
    "exit",
    "signal",
    "position",
    "pnl",
];

/// Parse RFC 3339, `%Y-%m-%d %H:%M:%S` or `%Y-%m-%d` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn parse_price(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if MISSING_TOKENS.contains(&raw) {
        return Some(f64::NAN);
    }
    raw.parse().ok()
}

/// Load a price table from a CSV file.
pub fn load_price_table(path: impl AsRef<Path>) -> Result<PriceTable, DataError> {
    let path = path.as_ref();
    let table = read_price_table(File::open(path)?)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        instruments = table.columns().len(),
        "Loaded price table"
    );
    Ok(table)
}

/// Read a price table: the first column is the timestamp, every other
/// column is one instrument.
///
/// Instrument names must be unique and timestamps strictly increasing;
/// violations are `Parse` errors (row 0 is the header).
pub fn read_price_table<R: Read>(source: R) -> Result<PriceTable, DataError> {
    let mut reader = Reader::from_reader(source);
    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(DataError::EmptyTable("no instrument columns".to_string()));
    }

    let names: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();
    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(DataError::Parse {
                row: 0,
                message: format!("duplicate instrument column '{}'", name),
            });
        }
    }
    let mut index: Vec<Timestamp> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let raw_ts = record.get(0).unwrap_or_default();
        let ts = parse_timestamp(raw_ts).ok_or_else(|| DataError::Parse {
            row,
            message: format!("invalid timestamp '{}'", raw_ts),
        })?;
        if let Some(previous) = index.last() {
            if ts <= *previous {
                return Err(DataError::Parse {
                    row,
                    message: format!(
                        "timestamp {} does not follow {}",
                        ts.to_rfc3339(),
                        previous.to_rfc3339()
                    ),
                });
            }
        }
        index.push(ts);

        for (col, values) in columns.iter_mut().enumerate() {
            let raw = record.get(col + 1).unwrap_or_default();
            let value = parse_price(raw).ok_or_else(|| DataError::Parse {
                row,
                message: format!("invalid price '{}' for {}", raw, names[col]),
            })?;
            values.push(value);
        }
    }

    if index.is_empty() {
        return Err(DataError::EmptyTable("no data rows".to_string()));
    }

    let mut table = PriceTable::new(index);
    for (name, values) in names.into_iter().zip(columns) {
        table.insert_column(name, values)?;
    }
    Ok(table)
}

/// Write the signal table of a backtest as CSV.
pub fn write_signal_csv(path: impl AsRef<Path>, backtest: &PairBacktest) -> Result<(), DataError> {
    let path = path.as_ref();
    write_signals(File::create(path)?, backtest)?;
    debug!(path = %path.display(), rows = backtest.signals.len(), "Wrote signal table");
    Ok(())
}

pub fn write_signals<W: Write>(sink: W, backtest: &PairBacktest) -> Result<(), DataError> {
    let mut writer = Writer::from_writer(sink);
    writer.write_record(SIGNAL_COLUMNS)?;

    let rows = backtest
        .signals
        .rows
        .iter()
        .zip(backtest.spread.values())
        .zip(backtest.zscore.values());
    for ((row, spread), z) in rows {
        writer.write_record([
            row.timestamp.to_rfc3339(),
            spread.to_string(),
            z.to_string(),
            row.long_entry.to_string(),
            row.short_entry.to_string(),
            row.exit.to_string(),
            row.signal.map(|s| s.to_string()).unwrap_or_default(),
            row.position.to_string(),
            row.pnl.map(|p| p.to_string()).unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the stationary pairs as a JSON array of rows.
pub fn write_pairs_json(path: impl AsRef<Path>, pairs: &PairTable) -> Result<(), DataError> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, &pairs.rows)?;
    Ok(())
}
