//! Delimited-text reader producing a [`RawTable`].
//!
//! Tokenizing is delegated to the [`csv`] crate; this module only decides
//! which row is the header, which cells count as null, and rejects ragged
//! rows. Typing the cells is left to [`Table::load`](crate::table::Table::load).
//!
//! # Features
//!
//! - RFC 4180 quoting (quoted fields, escaped quotes, delimiters and
//!   newlines inside quotes)
//! - Configurable delimiter, header row, null markers and trimming
//! - Standard null markers recognized: empty, `NA`, `N/A`, `null`, `NULL`,
//!   `None`, `NaN`, `#N/A`, …
//!
//! # Example
//!
//! ```
//! use u_tabular::csv_parser::CsvParser;
//!
//! let raw = CsvParser::new().parse_str("name,score\nAlice,1.5\nBob,NA\n").unwrap();
//! assert_eq!(raw.names(), &["name", "score"]);
//! assert_eq!(raw.row_count(), 2);
//! assert_eq!(raw.columns()[1], vec![Some("1.5".to_string()), None]);
//! ```

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{InputError, TableError};
use crate::source::RawTable;

/// Standard null value markers recognized during parsing.
const DEFAULT_NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "na", "n/a", "null", "NULL", "None", "none", "NaN", "nan", "NAN", "#N/A",
    "#NA",
];

/// Byte order mark some editors put in front of the header.
const BOM: char = '\u{feff}';

/// Delimited-text parser configuration and entry point.
///
/// ```
/// use u_tabular::csv_parser::CsvParser;
///
/// let raw = CsvParser::new()
///     .delimiter(b';')
///     .null_markers(vec!["-".to_string()])
///     .parse_str("a;b\n1;-\n")
///     .unwrap();
/// assert_eq!(raw.columns()[1], vec![None::<String>]);
/// ```
#[derive(Debug, Clone)]
pub struct CsvParser {
    delimiter: u8,
    has_header: bool,
    trim: bool,
    null_markers: Vec<String>,
}

impl CsvParser {
    /// Creates a parser with default settings (comma delimiter, header row,
    /// trimmed fields, standard null markers).
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            trim: true,
            null_markers: DEFAULT_NULL_MARKERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Sets the field delimiter (default: comma).
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }

    /// Sets whether the first row is a header (default: true).
    ///
    /// Without a header, columns are named `col_0`, `col_1`, ….
    pub fn has_header(mut self, header: bool) -> Self {
        self.has_header = header;
        self
    }

    /// Sets whether surrounding whitespace is stripped from fields (default: true).
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Sets custom null markers (replaces defaults).
    pub fn null_markers(mut self, markers: Vec<String>) -> Self {
        self.null_markers = markers;
        self
    }

    /// Parses delimited text held in memory.
    pub fn parse_str(&self, input: &str) -> Result<RawTable, InputError> {
        self.parse_reader(input.as_bytes())
    }

    /// Parses delimited bytes held in memory.
    pub fn parse_bytes(&self, input: &[u8]) -> Result<RawTable, InputError> {
        self.parse_reader(input)
    }

    /// Parses a delimited file from disk.
    ///
    /// A file that cannot be opened or read is reported as
    /// [`TableError::SourceUnavailable`], malformed content as
    /// [`TableError::InvalidInput`].
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<RawTable, TableError> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|source| TableError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} bytes from {}", content.len(), path.display());
        Ok(self.parse_bytes(&content)?)
    }

    /// Parses delimited text from any reader.
    pub fn parse_reader<R: Read>(&self, rdr: R) -> Result<RawTable, InputError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .double_quote(true)
            .flexible(true)
            .from_reader(rdr);

        let mut records = reader.records();
        let Some(first) = records.next().transpose()? else {
            return Ok(RawTable::default());
        };

        let (names, mut columns) = if self.has_header {
            let names: Vec<String> = first
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let field = if i == 0 { field.trim_start_matches(BOM) } else { field };
                    let field = if self.trim { field.trim() } else { field };
                    field.to_string()
                })
                .collect();
            let columns: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
            (names, columns)
        } else {
            let names: Vec<String> = (0..first.len()).map(|i| format!("col_{i}")).collect();
            let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
            self.push_record(&first, &mut columns)?;
            (names, columns)
        };

        for record in records {
            self.push_record(&record?, &mut columns)?;
        }

        RawTable::new(names, columns)
    }

    /// Appends one data record to the column-major cell buffers.
    fn push_record(
        &self,
        record: &StringRecord,
        columns: &mut [Vec<Option<String>>],
    ) -> Result<(), InputError> {
        if record.len() != columns.len() {
            return Err(InputError::RaggedRow {
                line: record.position().map_or(0, |p| p.line()),
                expected: columns.len(),
                actual: record.len(),
            });
        }
        for (column, field) in columns.iter_mut().zip(record.iter()) {
            column.push(self.cell(field));
        }
        Ok(())
    }

    /// Maps a raw field to a cell, `None` for null markers.
    fn cell(&self, field: &str) -> Option<String> {
        let value = if self.trim { field.trim() } else { field };
        if self.null_markers.iter().any(|m| m == value) {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
