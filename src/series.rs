//! Per-(type, size) time series extracted from the allocation table.

use crate::table::{Column, NumericRadix, Row, parse_int_prefix};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Milliseconds between consecutive snapshots.
pub const SNAPSHOT_INTERVAL_MS: u64 = 100;

/// Integer cell value, or the marker for text that is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Numeric {
    Value(u64),
    NotANumber,
}

impl Numeric {
    /// Lenient base-10 parse; anything without a non-negative leading integer is `NotANumber`.
    pub fn parse(text: &str) -> Self {
        parse_int_prefix(text, NumericRadix::Decimal)
            .and_then(|v| u64::try_from(v).ok())
            .map_or(Numeric::NotANumber, Numeric::Value)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Value(v) => write!(f, "{}", v),
            Numeric::NotANumber => f.write_str("NaN"),
        }
    }
}

// Chart data takes `null` for a missing bar.
impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Numeric::Value(v) => serializer.serialize_u64(*v),
            Numeric::NotANumber => serializer.serialize_none(),
        }
    }
}

/// Identifies one series: rows with equal type name and allocation size text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SeriesKey {
    pub type_name: String,
    pub allocation_size: String,
}

impl SeriesKey {
    pub fn new(type_name: impl Into<String>, allocation_size: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            allocation_size: allocation_size.into(),
        }
    }

    /// The key a click on `row` selects.
    pub fn from_row(row: &Row) -> Self {
        Self::new(row.type_name(), row.allocation_size())
    }

    pub fn selects(&self, row: &Row) -> bool {
        row.type_name() == self.type_name && row.allocation_size() == self.allocation_size
    }

    /// Chart title: `"{type} (size:{size})"`.
    pub fn title(&self) -> String {
        format!("{} (size:{})", self.type_name, self.allocation_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Numeric,
}

impl SeriesPoint {
    fn from_row(row: &Row) -> Self {
        let snapshot = Numeric::parse(row.cell(Column::Snapshot));
        Self {
            label: snapshot_label(snapshot),
            value: Numeric::parse(row.cell(Column::Current)),
        }
    }
}

/// `"Snapshot {i}({i*100}ms)"`.
pub fn snapshot_label(snapshot: Numeric) -> String {
    let elapsed = match snapshot {
        Numeric::Value(i) => i
            .checked_mul(SNAPSHOT_INTERVAL_MS)
            .map(Numeric::Value)
            .unwrap_or(Numeric::NotANumber),
        Numeric::NotANumber => Numeric::NotANumber,
    };
    format!("Snapshot {}({}ms)", snapshot, elapsed)
}

/// One point per row selected by `key`, in row order. Nothing is merged or
/// re-sorted, so duplicate snapshots yield duplicate points.
pub fn extract(rows: &[Row], key: &SeriesKey) -> Vec<SeriesPoint> {
    let points: Vec<SeriesPoint> = rows
        .iter()
        .filter(|r| key.selects(r))
        .map(SeriesPoint::from_row)
        .collect();
    log::debug!("series {}: {} point(s)", key.title(), points.len());
    points
}

/// Distinct keys in order of first appearance.
pub fn series_keys(rows: &[Row]) -> Vec<SeriesKey> {
    let mut seen = BTreeSet::new();
    rows.iter()
        .map(SeriesKey::from_row)
        .filter(|k| seen.insert(k.clone()))
        .collect()
}
