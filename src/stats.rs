//! Summary report over the non-null values of numeric columns.
//!
//! Reductions come from `u_numflow::stats`, which returns `None` when the
//! input is too short for the statistic; [`ColumnSummary`] turns those
//! `None`s into `NaN`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use u_numflow::stats;

/// Descriptive statistics of one numeric column, computed over its
/// non-null values.
///
/// Statistics that cannot be computed (no values, or a single value for
/// `std`) are `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Arithmetic mean.
    pub mean: f64,
    /// Largest value.
    pub max: f64,
    /// Smallest value.
    pub min: f64,
    /// Sample standard deviation.
    pub std: f64,
    /// Number of non-null values.
    pub count: usize,
}

impl ColumnSummary {
    /// Summarizes the given non-null values.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            mean: stats::mean(values).unwrap_or(f64::NAN),
            max: stats::max(values).unwrap_or(f64::NAN),
            min: stats::min(values).unwrap_or(f64::NAN),
            std: stats::std_dev(values).unwrap_or(f64::NAN),
            count: values.len(),
        }
    }
}

/// Per-column summaries of a table, in table column order.
///
/// Serializes as a JSON-style map from column name to [`ColumnSummary`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
    entries: Vec<(String, ColumnSummary)>,
}

impl SummaryStats {
    pub(crate) fn push(&mut self, name: &str, summary: ColumnSummary) {
        self.entries.push((name.to_string(), summary));
    }

    /// Summary of the named column, if it was included.
    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, summary)| summary)
    }

    /// Returns `true` if the named column was included.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over (column name, summary) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnSummary)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Names of the summarized columns.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|(name, _)| name).collect()
    }

    /// Number of summarized columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no column was summarized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SummaryStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, summary) in self.iter() {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
