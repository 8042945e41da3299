//! The [`Table`] engine: load, clean, filter and summarize.
//!
//! A table starts unloaded. [`Table::load`] reads a [`TableSource`], infers
//! each column's dtype and replaces whatever was loaded before. Mutations
//! ([`clean`](Table::clean), [`filter_by_value`](Table::filter_by_value))
//! first decide which rows survive and then swap in the new row set, so a
//! failing call leaves the table untouched.
//!
//! # Example
//!
//! ```
//! use u_tabular::table::Table;
//!
//! let mut table = Table::new();
//! table
//!     .load_csv_str("id,value,category\n1,10.5,A\n2,NA,B\n3,30.5,A\n")
//!     .unwrap();
//! assert_eq!(table.shape(), (3, 3));
//!
//! assert_eq!(table.clean().unwrap(), 2);
//! assert_eq!(table.calculate_mean("value").unwrap(), 20.5);
//! assert_eq!(table.filter_by_value("category", "A").unwrap(), 2);
//! ```

use std::path::Path;

use crate::dataframe::{Column, DataFrame, DataType, Value};
use crate::error::TableError;
use crate::inference::build_column;
use crate::source::{CsvFile, CsvText, TableSource};
use crate::stats::{ColumnSummary, SummaryStats};

/// Row counts before and after [`Table::clean_with_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    /// Rows before cleaning.
    pub initial_rows: usize,
    /// Rows after cleaning.
    pub final_rows: usize,
    /// Rows dropped because at least one cell was null.
    pub removed: usize,
}

/// An in-memory table exclusively owning its column data.
#[derive(Debug, Clone, Default)]
pub struct Table {
    frame: Option<DataFrame>,
}

impl Table {
    /// Creates a table with no data loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already built frame as loaded data.
    ///
    /// Unlike [`load`](Self::load), a frame without columns is accepted; it
    /// behaves as loaded-but-empty.
    pub fn from_frame(frame: DataFrame) -> Self {
        Self { frame: Some(frame) }
    }

    /// Loads `source`, replacing any previously loaded data.
    ///
    /// Returns the number of rows loaded. On failure the previous data stays
    /// in place.
    pub fn load(&mut self, source: impl TableSource) -> Result<usize, TableError> {
        let raw = source.read()?;
        if raw.column_count() == 0 {
            return Err(TableError::EmptyInput);
        }

        let (names, cells) = raw.into_parts();
        let mut frame = DataFrame::new();
        for (name, column_cells) in names.into_iter().zip(&cells) {
            let column = build_column(column_cells);
            log::debug!("column '{name}' inferred as {}", column.data_type());
            frame.add_column(name, column)?;
        }

        let rows = frame.row_count();
        log::info!(
            "loaded {rows} rows and {} columns",
            frame.column_count()
        );
        self.frame = Some(frame);
        Ok(rows)
    }

    /// Loads a comma-separated file with default parser settings.
    pub fn load_csv_path(&mut self, path: impl AsRef<Path>) -> Result<usize, TableError> {
        self.load(CsvFile::new(path))
    }

    /// Loads comma-separated text with default parser settings.
    pub fn load_csv_str(&mut self, text: &str) -> Result<usize, TableError> {
        self.load(CsvText::new(text))
    }

    /// Returns `true` once data has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.frame.is_some()
    }

    /// The loaded frame, if any.
    pub fn frame(&self) -> Option<&DataFrame> {
        self.frame.as_ref()
    }

    /// Returns `(row_count, column_count)`, `(0, 0)` when unloaded.
    pub fn shape(&self) -> (usize, usize) {
        self.frame
            .as_ref()
            .map_or((0, 0), |f| (f.row_count(), f.column_count()))
    }

    /// Returns column names in order, empty when unloaded.
    pub fn column_names(&self) -> Vec<&str> {
        self.frame.as_ref().map_or_else(Vec::new, |f| {
            f.column_names().iter().map(String::as_str).collect()
        })
    }

    /// Returns each column's dtype as inferred at load time, empty when unloaded.
    pub fn dtypes(&self) -> Vec<(&str, DataType)> {
        self.frame.as_ref().map_or_else(Vec::new, DataFrame::schema)
    }

    /// Drops every row that has a null in any column.
    ///
    /// Returns the number of rows left. Row order is preserved.
    pub fn clean(&mut self) -> Result<usize, TableError> {
        self.clean_with_report().map(|report| report.final_rows)
    }

    /// Like [`clean`](Self::clean), but reports how many rows were removed.
    pub fn clean_with_report(&mut self) -> Result<CleanReport, TableError> {
        let frame = self.loaded()?;
        let initial_rows = frame.row_count();
        let complete = frame.complete_rows();
        let keep: Vec<usize> = complete.valid_indices().collect();

        let final_rows = keep.len();
        let removed = initial_rows - final_rows;
        if complete.has_nulls() {
            self.replace_rows(&keep);
        }

        let pct = if initial_rows > 0 {
            removed as f64 / initial_rows as f64 * 100.0
        } else {
            0.0
        };
        log::info!("Data cleaning: {removed} rows removed ({pct:.1}%)");

        Ok(CleanReport {
            initial_rows,
            final_rows,
            removed,
        })
    }

    /// Keeps only the rows whose `column` cell equals `value`.
    ///
    /// Numeric columns compare numerically, boolean and string columns
    /// exactly. Null cells never match, and a [`Value::Null`] target matches
    /// nothing. Returns the number of rows left.
    pub fn filter_by_value(
        &mut self,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<usize, TableError> {
        let value = value.into();
        let frame = self.loaded()?;
        let col = lookup(frame, column)?;
        let keep: Vec<usize> = (0..frame.row_count())
            .filter(|&i| col.matches(i, &value))
            .collect();

        if keep.len() != frame.row_count() {
            self.replace_rows(&keep);
        }
        log::info!("Filtered by {column}={value}: {} rows match", keep.len());
        Ok(keep.len())
    }

    /// Arithmetic mean of the non-null values of a numeric column.
    pub fn calculate_mean(&self, column: &str) -> Result<f64, TableError> {
        let values = self.non_null_numeric(column)?;
        u_numflow::stats::mean(&values).ok_or_else(|| all_null(column))
    }

    /// Largest non-null value of a numeric column, as `f64`.
    pub fn find_max(&self, column: &str) -> Result<f64, TableError> {
        let values = self.non_null_numeric(column)?;
        u_numflow::stats::max(&values).ok_or_else(|| all_null(column))
    }

    /// Mean, max, min, sample standard deviation and non-null count of
    /// every numeric column.
    ///
    /// Non-numeric columns are left out. A numeric column without any
    /// non-null value is reported with `NaN` statistics and a count of zero
    /// rather than failing, unlike [`calculate_mean`](Self::calculate_mean).
    pub fn get_summary_stats(&self) -> Result<SummaryStats, TableError> {
        let frame = self.loaded()?;
        let mut summary = SummaryStats::default();
        for (name, col) in frame.iter() {
            if let Some(values) = col.numeric_values() {
                summary.push(name, ColumnSummary::from_values(&values));
            }
        }
        Ok(summary)
    }

    // ── Internal helpers ─────────────────────────────────────────

    fn loaded(&self) -> Result<&DataFrame, TableError> {
        self.frame.as_ref().ok_or(TableError::NoDataLoaded)
    }

    /// Non-null values of `column`, after the checks shared by the
    /// single-column reductions.
    fn non_null_numeric(&self, column: &str) -> Result<Vec<f64>, TableError> {
        let col = lookup(self.loaded()?, column)?;
        let values = col.numeric_values().ok_or_else(|| TableError::NotNumeric {
            column: column.to_string(),
            dtype: col.data_type(),
        })?;
        if values.is_empty() {
            return Err(all_null(column));
        }
        Ok(values)
    }

    /// Swaps the loaded row set for the rows at `keep`.
    fn replace_rows(&mut self, keep: &[usize]) {
        if let Some(frame) = self.frame.as_mut() {
            *frame = frame.take_rows(keep);
        }
    }
}

fn lookup<'a>(frame: &'a DataFrame, column: &str) -> Result<&'a Column, TableError> {
    frame
        .column_by_name(column)
        .ok_or_else(|| TableError::ColumnNotFound {
            name: column.to_string(),
            available: frame.column_names().to_vec(),
        })
}

fn all_null(column: &str) -> TableError {
    TableError::AllNull {
        column: column.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
