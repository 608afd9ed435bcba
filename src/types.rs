//! Common Types Module
//!
//! Time-indexed series and the aligned price table shared by every stage
//! of the pipeline.

use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Index type for every series in the crate.
pub type Timestamp = DateTime<Utc>;

/// A named, time-indexed sequence of real values.
///
/// Missing observations are stored as `NaN`. The index and the values always
/// have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    name: String,
    index: Vec<Timestamp>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series, rejecting an index whose length differs from the values.
    pub fn new(name: impl Into<String>, index: Vec<Timestamp>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if index.len() != values.len() {
            return Err(AnalysisError::Misaligned {
                left: format!("{} index ({} rows)", name, index.len()),
                right: format!("{} values ({} rows)", name, values.len()),
            });
        }
        Ok(Self {
            name,
            index,
            values,
        })
    }

    /// Build a series on a synthetic daily index starting at the Unix epoch.
    ///
    /// Two series built this way with the same length are aligned.
    pub fn from_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            index: daily_index(values.len()),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> &[Timestamp] {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(timestamp, value)` pairs in time order.
    pub fn iter(&self) -> impl Iterator<Item = (&Timestamp, f64)> + '_ {
        self.index.iter().zip(self.values.iter().copied())
    }

    /// Same index, new values. Callers guarantee `values.len() == self.len()`.
    pub(crate) fn with_values(&self, name: impl Into<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.index.len());
        Self {
            name: name.into(),
            index: self.index.clone(),
            values,
        }
    }

    /// Copy of the series with every `NaN` observation removed.
    pub fn dropna(&self) -> Self {
        let (index, values) = self
            .iter()
            .filter(|(_, v)| !v.is_nan())
            .map(|(ts, v)| (*ts, v))
            .unzip();
        Self {
            name: self.name.clone(),
            index,
            values,
        }
    }

    /// Number of non-missing observations.
    pub fn count_valid(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// True when both series carry exactly the same timestamps.
    pub fn is_aligned_with(&self, other: &TimeSeries) -> bool {
        self.index == other.index
    }

    /// Fail loudly when the two series do not share an index.
    pub fn ensure_aligned(&self, other: &TimeSeries) -> Result<()> {
        if self.is_aligned_with(other) {
            Ok(())
        } else {
            Err(AnalysisError::Misaligned {
                left: self.name.clone(),
                right: other.name.clone(),
            })
        }
    }

    /// Elementwise `self - other` on a shared index.
    ///
    /// A missing value on either side yields a missing spread value.
    pub fn difference(&self, other: &TimeSeries) -> Result<TimeSeries> {
        self.ensure_aligned(other)?;
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a - b)
            .collect();
        Ok(self.with_values(format!("{}-{}", self.name, other.name), values))
    }

    /// First difference with the first element defined as zero change.
    ///
    /// Differences involving a missing value also count as zero change.
    pub fn diff_filled(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.values.len());
        if self.values.is_empty() {
            return out;
        }
        out.push(0.0);
        out.extend(self.values.windows(2).map(|w| {
            let d = w[1] - w[0];
            if d.is_nan() {
                0.0
            } else {
                d
            }
        }));
        out
    }
}

/// Daily timestamps starting at the Unix epoch.
pub(crate) fn daily_index(len: usize) -> Vec<Timestamp> {
    let epoch = DateTime::<Utc>::default();
    (0..len).map(|i| epoch + Duration::days(i as i64)).collect()
}

/// Aligned price table: one shared index and a column per instrument.
///
/// Column order is preserved as inserted, which fixes the enumeration order
/// of the correlation screen.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    index: Vec<Timestamp>,
    columns: Vec<String>,
    data: HashMap<String, Vec<f64>>,
}

impl PriceTable {
    /// Empty table over the given index.
    pub fn new(index: Vec<Timestamp>) -> Self {
        Self {
            index,
            columns: Vec::new(),
            data: HashMap::new(),
        }
    }

    /// Table over a synthetic daily index of `len` rows.
    pub fn with_daily_index(len: usize) -> Self {
        Self::new(daily_index(len))
    }

    /// Add (or replace) an instrument column.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(AnalysisError::Misaligned {
                left: "price table index".to_string(),
                right: format!("{} ({} rows vs {})", name, values.len(), self.index.len()),
            });
        }
        if self.data.insert(name.clone(), values).is_none() {
            self.columns.push(name);
        }
        Ok(())
    }

    /// Builder-style variant of [`PriceTable::insert_column`].
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    pub fn index(&self) -> &[Timestamp] {
        &self.index
    }

    /// Instrument identifiers in column order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, instrument: &str) -> bool {
        self.data.contains_key(instrument)
    }

    /// Raw prices of one instrument.
    pub fn prices(&self, instrument: &str) -> Result<&[f64]> {
        self.data
            .get(instrument)
            .map(Vec::as_slice)
            .ok_or_else(|| AnalysisError::UnknownInstrument(instrument.to_string()))
    }

    /// One instrument as a [`TimeSeries`] on the table index.
    pub fn series(&self, instrument: &str) -> Result<TimeSeries> {
        let values = self.prices(instrument)?.to_vec();
        Ok(TimeSeries {
            name: instrument.to_string(),
            index: self.index.clone(),
            values,
        })
    }
}
