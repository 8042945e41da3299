//! Error types for u-tabular.

use std::path::PathBuf;

use thiserror::Error;

use crate::dataframe::DataType;

/// All errors produced by [`Table`](crate::table::Table) operations.
///
/// Every variant is a recoverable, input-driven failure. An operation that
/// returns one of these has left the table exactly as it was before the call.
#[derive(Error, Debug)]
pub enum TableError {
    /// The backing input (e.g. a file) could not be read.
    #[error("the file {} was not found or could not be read: {source}", .path.display())]
    SourceUnavailable {
        /// Location that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The input resolved to zero columns.
    #[error("the input is empty")]
    EmptyInput,
    /// The input is malformed in a way not covered by the other variants.
    #[error("error loading input: {0}")]
    InvalidInput(#[from] InputError),
    /// A query or mutation was issued before any data was loaded.
    #[error("no data loaded, please load data first")]
    NoDataLoaded,
    /// The referenced column does not exist.
    #[error("column '{name}' not found in data, available columns: {available:?}")]
    ColumnNotFound {
        /// Requested column name.
        name: String,
        /// Names that do exist, in table order.
        available: Vec<String>,
    },
    /// A numeric reduction was requested on a non-numeric column.
    #[error("column '{column}' is not numeric, type: {dtype}")]
    NotNumeric {
        /// Column name.
        column: String,
        /// The column's actual dtype.
        dtype: DataType,
    },
    /// A numeric reduction was requested on a column without any non-null value.
    #[error("column '{column}' contains only null values")]
    AllNull {
        /// Column name.
        column: String,
    },
    /// A column's length disagrees with the frame's row count.
    #[error("column '{column}' has {actual} entries, expected {expected}")]
    DimensionMismatch {
        /// Column name.
        column: String,
        /// Row count of the frame.
        expected: usize,
        /// Entries found in the column.
        actual: usize,
    },
    /// A column name appears twice in one frame.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn {
        /// The repeated name.
        name: String,
    },
}

/// Causes of [`TableError::InvalidInput`].
#[derive(Error, Debug)]
pub enum InputError {
    /// The delimited-text tokenizer rejected the input.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// A data row has a different number of fields than the header.
    #[error("line {line}: expected {expected} fields, got {actual}")]
    RaggedRow {
        /// 1-based line number in the input.
        line: u64,
        /// Field count of the header row.
        expected: usize,
        /// Field count of the offending row.
        actual: usize,
    },
    /// The header names the same column twice.
    #[error("duplicate column name '{name}' in header")]
    DuplicateColumn {
        /// The repeated name.
        name: String,
    },
}
