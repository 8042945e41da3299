//! Inputs a [`Table`](crate::table::Table) can be loaded from.
//!
//! [`TableSource`] is the seam between the table and whatever produces
//! parsed cells. Delimited text is the only producer shipped here
//! ([`CsvFile`], [`CsvText`], [`CsvBytes`]); an already-parsed
//! [`RawTable`] is a source too.

use std::path::{Path, PathBuf};

use crate::csv_parser::CsvParser;
use crate::error::{InputError, TableError};

/// Parsed but untyped tabular input.
///
/// Cells are stored column-major; `None` marks a null cell. Every column
/// holds the same number of cells and names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    names: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Builds a raw table from column-major cells.
    pub fn new(names: Vec<String>, columns: Vec<Vec<Option<String>>>) -> Result<Self, InputError> {
        if let Some(name) = first_duplicate(&names) {
            return Err(InputError::DuplicateColumn {
                name: name.to_string(),
            });
        }
        let expected = names.len();
        let rows = columns.first().map_or(0, Vec::len);
        if columns.len() != expected {
            return Err(InputError::RaggedRow {
                line: 1,
                expected,
                actual: columns.len(),
            });
        }
        if let Some(pos) = columns.iter().position(|c| c.len() != rows) {
            // First data row that is not present in every column.
            let row = columns[pos].len().min(rows);
            return Err(InputError::RaggedRow {
                line: row as u64 + 2,
                expected,
                actual: columns.iter().filter(|c| c.len() > row).count(),
            });
        }
        Ok(Self { names, columns })
    }

    /// Builds a raw table from row-major cells.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self, InputError> {
        let expected = names.len();
        let mut columns: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(rows.len()); expected];
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != expected {
                return Err(InputError::RaggedRow {
                    line: idx as u64 + 2,
                    expected,
                    actual: row.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.push(cell);
            }
        }
        Self::new(names, columns)
    }

    /// Column names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Cells of each column, in the same order as [`names`](Self::names).
    pub fn columns(&self) -> &[Vec<Option<String>>] {
        &self.columns
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.names.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Splits into names and column-major cells.
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Option<String>>>) {
        (self.names, self.columns)
    }
}

fn first_duplicate(names: &[String]) -> Option<&str> {
    names
        .iter()
        .enumerate()
        .find(|(i, name)| names[..*i].contains(name))
        .map(|(_, name)| name.as_str())
}

/// Something that can produce a [`RawTable`] for [`Table::load`](crate::table::Table::load).
pub trait TableSource {
    /// Obtains and parses the input.
    fn read(self) -> Result<RawTable, TableError>;
}

impl TableSource for RawTable {
    fn read(self) -> Result<RawTable, TableError> {
        Ok(self)
    }
}

/// A delimited file on disk.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
    parser: CsvParser,
}

impl CsvFile {
    /// A file read with the default [`CsvParser`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            parser: CsvParser::new(),
        }
    }

    /// Replaces the parser configuration.
    pub fn with_parser(mut self, parser: CsvParser) -> Self {
        self.parser = parser;
        self
    }
}

impl TableSource for CsvFile {
    fn read(self) -> Result<RawTable, TableError> {
        self.parser.parse_file(&self.path)
    }
}

/// Delimited text held in memory.
#[derive(Debug, Clone)]
pub struct CsvText<'a> {
    text: &'a str,
    parser: CsvParser,
}

impl<'a> CsvText<'a> {
    /// Text read with the default [`CsvParser`].
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            parser: CsvParser::new(),
        }
    }

    /// Replaces the parser configuration.
    pub fn with_parser(mut self, parser: CsvParser) -> Self {
        self.parser = parser;
        self
    }
}

impl TableSource for CsvText<'_> {
    fn read(self) -> Result<RawTable, TableError> {
        Ok(self.parser.parse_str(self.text)?)
    }
}

/// Delimited bytes held in memory.
#[derive(Debug, Clone)]
pub struct CsvBytes<'a> {
    bytes: &'a [u8],
    parser: CsvParser,
}

impl<'a> CsvBytes<'a> {
    /// Bytes read with the default [`CsvParser`].
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            parser: CsvParser::new(),
        }
    }

    /// Replaces the parser configuration.
    pub fn with_parser(mut self, parser: CsvParser) -> Self {
        self.parser = parser;
        self
    }
}

impl TableSource for CsvBytes<'_> {
    fn read(self) -> Result<RawTable, TableError> {
        Ok(self.parser.parse_bytes(self.bytes)?)
    }
}
