//! Column-major storage behind a [`Table`](crate::table::Table).
//!
//! A [`DataFrame`] owns an ordered list of uniquely named [`Column`]s. Each
//! column is a dense, typed value vector paired with a compact
//! [`ValidityBitmap`] marking which rows hold a value and which are null.
//!
//! # Column Types
//!
//! | dtype | Storage | Null slot holds |
//! |-------|---------|-----------------|
//! | [`Integer`](DataType::Integer) | `Vec<i64>` + bitmap | `0` |
//! | [`Float`](DataType::Float) | `Vec<f64>` + bitmap | `0.0` |
//! | [`Boolean`](DataType::Boolean) | `Vec<bool>` + bitmap | `false` |
//! | [`String`](DataType::String) | `Vec<String>` + bitmap | `""` |
//! | [`Unknown`](DataType::Unknown) | bitmap only | every row is null |
//!
//! The dtype *is* the storage variant, so no row operation can drift a
//! column away from its recorded type.
//!
//! # Example
//!
//! ```
//! use u_tabular::dataframe::{Column, DataFrame, DataType};
//!
//! let mut df = DataFrame::new();
//! df.add_column("temperature", Column::from(vec![Some(20.5), None, Some(19.8)]))
//!     .unwrap();
//! assert_eq!(df.row_count(), 3);
//! assert_eq!(df.schema(), vec![("temperature", DataType::Float)]);
//! assert_eq!(df.total_null_count(), 1);
//! ```

use std::fmt;

use serde::Serialize;

use crate::error::TableError;

// ── ValidityBitmap ────────────────────────────────────────────────────

/// Bit-packed validity bitmap using `Vec<u64>`.
///
/// Each bit is `1` when the corresponding row holds a value and `0` when it
/// is null, so the null mask of a column is the complement of this bitmap.
/// Bits past `len` in the last word are always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityBitmap {
    bits: Vec<u64>,
    len: usize,
}

impl ValidityBitmap {
    /// Creates a bitmap where all `len` positions are valid.
    pub fn all_valid(len: usize) -> Self {
        let n_words = len.div_ceil(64);
        let mut bits = vec![u64::MAX; n_words];
        let trailing = len % 64;
        if trailing != 0 && n_words > 0 {
            bits[n_words - 1] = (1u64 << trailing) - 1;
        }
        Self { bits, len }
    }

    /// Creates a bitmap where all `len` positions are null.
    pub fn all_invalid(len: usize) -> Self {
        Self {
            bits: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    /// Creates an empty bitmap with no rows.
    pub fn empty() -> Self {
        Self {
            bits: Vec::new(),
            len: 0,
        }
    }

    /// Returns `true` if the value at `idx` is present.
    #[inline]
    pub fn is_valid(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len, "index {idx} out of bounds (len={})", self.len);
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Returns `true` if the value at `idx` is null.
    #[inline]
    pub fn is_null(&self, idx: usize) -> bool {
        !self.is_valid(idx)
    }

    /// Appends a new position.
    pub fn push(&mut self, valid: bool) {
        let idx = self.len;
        self.len += 1;
        if idx / 64 >= self.bits.len() {
            self.bits.push(0);
        }
        if valid {
            self.bits[idx / 64] |= 1u64 << (idx % 64);
        }
    }

    /// Returns the total number of tracked positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the bitmap tracks zero positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Counts the number of valid positions.
    pub fn valid_count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Counts the number of null positions.
    pub fn null_count(&self) -> usize {
        self.len - self.valid_count()
    }

    /// Returns `true` if any position is null.
    pub fn has_nulls(&self) -> bool {
        self.null_count() > 0
    }

    /// Clears every bit that is clear in `other` (word-wise AND).
    ///
    /// Both bitmaps must track the same number of positions.
    pub fn intersect(&mut self, other: &ValidityBitmap) {
        debug_assert_eq!(self.len, other.len, "bitmap lengths differ");
        for (word, other_word) in self.bits.iter_mut().zip(&other.bits) {
            *word &= other_word;
        }
    }

    /// Builds a new bitmap from the positions listed in `indices`, in order.
    pub fn take(&self, indices: &[usize]) -> Self {
        let mut out = Self::empty();
        out.bits.reserve(indices.len().div_ceil(64));
        for &i in indices {
            out.push(self.is_valid(i));
        }
        out
    }

    /// Returns an iterator over indices of valid positions.
    pub fn valid_indices(&self) -> ValidIndicesIter<'_> {
        ValidIndicesIter {
            bitmap: self,
            current: 0,
        }
    }
}

/// Iterator over valid indices in a [`ValidityBitmap`].
pub struct ValidIndicesIter<'a> {
    bitmap: &'a ValidityBitmap,
    current: usize,
}

impl Iterator for ValidIndicesIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current < self.bitmap.len {
            let word = self.bitmap.bits[self.current / 64] >> (self.current % 64);
            if word == 0 {
                // Nothing left in this word, jump to the next one.
                self.current = (self.current / 64 + 1) * 64;
                continue;
            }
            let idx = self.current + word.trailing_zeros() as usize;
            if idx >= self.bitmap.len {
                break;
            }
            self.current = idx + 1;
            return Some(idx);
        }
        self.current = self.bitmap.len;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.bitmap.len.saturating_sub(self.current)))
    }
}

// ── DataType ──────────────────────────────────────────────────────────

/// Semantic data type of a column, fixed when the column is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
    /// Signed 64-bit integers.
    Integer,
    /// 64-bit floating point numbers.
    Float,
    /// `true` / `false`.
    Boolean,
    /// Arbitrary text.
    String,
    /// No non-null value was seen, so nothing could be inferred.
    Unknown,
}

impl DataType {
    /// Returns `true` for [`Integer`](Self::Integer) and [`Float`](Self::Float).
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "Integer"),
            Self::Float => write!(f, "Float"),
            Self::Boolean => write!(f, "Boolean"),
            Self::String => write!(f, "String"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

// ── Value ─────────────────────────────────────────────────────────────

/// A single cell, or a target to compare cells against.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// Text value.
    String(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ── Column ────────────────────────────────────────────────────────────

/// A typed column with validity bitmap for missing values.
///
/// Null positions hold a placeholder (`0`, `0.0`, `false`, `""`) that is
/// never read.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Integer values.
    Integer {
        values: Vec<i64>,
        validity: ValidityBitmap,
    },
    /// Floating point values.
    Float {
        values: Vec<f64>,
        validity: ValidityBitmap,
    },
    /// Boolean values.
    Boolean {
        values: Vec<bool>,
        validity: ValidityBitmap,
    },
    /// Text values.
    String {
        values: Vec<String>,
        validity: ValidityBitmap,
    },
    /// A column with no non-null value; only the row count is tracked.
    Unknown { validity: ValidityBitmap },
}

impl Column {
    /// Creates an integer column.
    pub fn integer(values: Vec<i64>, validity: ValidityBitmap) -> Self {
        Self::Integer { values, validity }
    }

    /// Creates a float column.
    pub fn float(values: Vec<f64>, validity: ValidityBitmap) -> Self {
        Self::Float { values, validity }
    }

    /// Creates a boolean column.
    pub fn boolean(values: Vec<bool>, validity: ValidityBitmap) -> Self {
        Self::Boolean { values, validity }
    }

    /// Creates a string column.
    pub fn string(values: Vec<String>, validity: ValidityBitmap) -> Self {
        Self::String { values, validity }
    }

    /// Creates an all-null column of unknown type with `len` rows.
    pub fn unknown(len: usize) -> Self {
        Self::Unknown {
            validity: ValidityBitmap::all_invalid(len),
        }
    }

    /// Returns the data type of this column.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Integer { .. } => DataType::Integer,
            Self::Float { .. } => DataType::Float,
            Self::Boolean { .. } => DataType::Boolean,
            Self::String { .. } => DataType::String,
            Self::Unknown { .. } => DataType::Unknown,
        }
    }

    /// Returns the number of rows in this column.
    pub fn len(&self) -> usize {
        self.validity().len()
    }

    /// Returns `true` if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of stored values, `None` for [`Column::Unknown`].
    pub fn values_len(&self) -> Option<usize> {
        match self {
            Self::Integer { values, .. } => Some(values.len()),
            Self::Float { values, .. } => Some(values.len()),
            Self::Boolean { values, .. } => Some(values.len()),
            Self::String { values, .. } => Some(values.len()),
            Self::Unknown { .. } => None,
        }
    }

    /// Returns a reference to the validity bitmap.
    pub fn validity(&self) -> &ValidityBitmap {
        match self {
            Self::Integer { validity, .. }
            | Self::Float { validity, .. }
            | Self::Boolean { validity, .. }
            | Self::String { validity, .. }
            | Self::Unknown { validity } => validity,
        }
    }

    /// Returns the number of null values.
    pub fn null_count(&self) -> usize {
        self.validity().null_count()
    }

    /// Returns the number of non-null values.
    pub fn valid_count(&self) -> usize {
        self.validity().valid_count()
    }

    /// Returns `true` if the value at `idx` is present.
    pub fn is_valid(&self, idx: usize) -> bool {
        self.validity().is_valid(idx)
    }

    /// Returns `true` if the value at `idx` is null.
    pub fn is_null(&self, idx: usize) -> bool {
        self.validity().is_null(idx)
    }

    /// Returns the cell at `idx`, [`Value::Null`] for null cells.
    pub fn value(&self, idx: usize) -> Value {
        if self.is_null(idx) {
            return Value::Null;
        }
        match self {
            Self::Integer { values, .. } => Value::Integer(values[idx]),
            Self::Float { values, .. } => Value::Float(values[idx]),
            Self::Boolean { values, .. } => Value::Boolean(values[idx]),
            Self::String { values, .. } => Value::String(values[idx].clone()),
            Self::Unknown { .. } => Value::Null,
        }
    }

    /// Returns the non-null values of a numeric column promoted to `f64`,
    /// or `None` if the column is not numeric.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match self {
            Self::Integer { values, validity } => {
                Some(validity.valid_indices().map(|i| values[i] as f64).collect())
            }
            Self::Float { values, validity } => {
                Some(validity.valid_indices().map(|i| values[i]).collect())
            }
            _ => None,
        }
    }

    /// Compares the cell at `idx` with `target`.
    ///
    /// Numeric columns compare numerically against integer and float targets
    /// alike; boolean and string columns need a target of the same kind. A
    /// null cell or a [`Value::Null`] target never matches.
    pub fn matches(&self, idx: usize, target: &Value) -> bool {
        if self.is_null(idx) {
            return false;
        }
        match (self, target) {
            (Self::Integer { values, .. }, Value::Integer(v)) => values[idx] == *v,
            (Self::Integer { values, .. }, Value::Float(v)) => values[idx] as f64 == *v,
            (Self::Float { values, .. }, Value::Float(v)) => values[idx] == *v,
            (Self::Float { values, .. }, Value::Integer(v)) => values[idx] == *v as f64,
            (Self::Boolean { values, .. }, Value::Boolean(v)) => values[idx] == *v,
            (Self::String { values, .. }, Value::String(v)) => values[idx] == *v,
            _ => false,
        }
    }

    /// Builds a new column holding the rows listed in `indices`, in order.
    ///
    /// The result keeps this column's dtype even when `indices` is empty.
    pub fn take(&self, indices: &[usize]) -> Self {
        match self {
            Self::Integer { values, validity } => Self::Integer {
                values: indices.iter().map(|&i| values[i]).collect(),
                validity: validity.take(indices),
            },
            Self::Float { values, validity } => Self::Float {
                values: indices.iter().map(|&i| values[i]).collect(),
                validity: validity.take(indices),
            },
            Self::Boolean { values, validity } => Self::Boolean {
                values: indices.iter().map(|&i| values[i]).collect(),
                validity: validity.take(indices),
            },
            Self::String { values, validity } => Self::String {
                values: indices.iter().map(|&i| values[i].clone()).collect(),
                validity: validity.take(indices),
            },
            Self::Unknown { .. } => Self::unknown(indices.len()),
        }
    }
}

/// Splits optional cells into dense values plus validity, using
/// `T::default()` for null slots.
fn split_options<T: Default>(cells: Vec<Option<T>>) -> (Vec<T>, ValidityBitmap) {
    let mut values = Vec::with_capacity(cells.len());
    let mut validity = ValidityBitmap::empty();
    for cell in cells {
        validity.push(cell.is_some());
        values.push(cell.unwrap_or_default());
    }
    (values, validity)
}

impl From<Vec<Option<i64>>> for Column {
    fn from(cells: Vec<Option<i64>>) -> Self {
        let (values, validity) = split_options(cells);
        Self::integer(values, validity)
    }
}

impl From<Vec<Option<f64>>> for Column {
    fn from(cells: Vec<Option<f64>>) -> Self {
        let (values, validity) = split_options(cells);
        Self::float(values, validity)
    }
}

impl From<Vec<Option<bool>>> for Column {
    fn from(cells: Vec<Option<bool>>) -> Self {
        let (values, validity) = split_options(cells);
        Self::boolean(values, validity)
    }
}

impl From<Vec<Option<&str>>> for Column {
    fn from(cells: Vec<Option<&str>>) -> Self {
        let (values, validity) = split_options(
            cells
                .into_iter()
                .map(|c| c.map(str::to_string))
                .collect(),
        );
        Self::string(values, validity)
    }
}

impl From<Vec<i64>> for Column {
    fn from(values: Vec<i64>) -> Self {
        let validity = ValidityBitmap::all_valid(values.len());
        Self::integer(values, validity)
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        let validity = ValidityBitmap::all_valid(values.len());
        Self::float(values, validity)
    }
}

// ── DataFrame ─────────────────────────────────────────────────────────

/// Column-major tabular data structure.
///
/// Stores uniquely named columns that all have the same number of rows.
/// A frame without columns has zero rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    names: Vec<String>,
    columns: Vec<Column>,
    row_count: usize,
}

impl DataFrame {
    /// Creates an empty DataFrame with no columns or rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a named column.
    ///
    /// Fails if the name is already taken, if the column's values and
    /// validity bitmap disagree in length, or if the column length differs
    /// from the existing row count (the first column sets the row count).
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), TableError> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(TableError::DuplicateColumn { name });
        }
        let col_len = column.len();
        if let Some(values_len) = column.values_len().filter(|&n| n != col_len) {
            return Err(TableError::DimensionMismatch {
                column: name,
                expected: col_len,
                actual: values_len,
            });
        }
        if self.columns.is_empty() {
            self.row_count = col_len;
        } else if col_len != self.row_count {
            return Err(TableError::DimensionMismatch {
                column: name,
                expected: self.row_count,
                actual: col_len,
            });
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Returns the number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns the number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the DataFrame has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns a reference to the column with the given `name`.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    /// Returns the index of the column with the given `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns an iterator over (name, column) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    /// Returns each column's name and dtype, in order.
    pub fn schema(&self) -> Vec<(&str, DataType)> {
        self.iter().map(|(name, col)| (name, col.data_type())).collect()
    }

    /// Returns the total number of null cells across all columns.
    pub fn total_null_count(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }

    /// Returns the rows in which every column holds a value.
    pub fn complete_rows(&self) -> ValidityBitmap {
        let mut complete = ValidityBitmap::all_valid(self.row_count);
        for col in &self.columns {
            complete.intersect(col.validity());
        }
        complete
    }

    /// Builds a new frame holding the rows listed in `indices`, in order.
    ///
    /// Names and dtypes are carried over unchanged.
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        let taken = Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
            row_count: indices.len(),
        };
        debug_assert!(taken.validate().is_ok(), "take_rows broke frame invariants");
        taken
    }

    /// Checks that every column's values and validity bitmap have exactly
    /// `row_count` entries and that names are unique.
    pub fn validate(&self) -> Result<(), TableError> {
        for (idx, (name, col)) in self.iter().enumerate() {
            if self.names[..idx].iter().any(|n| n == name) {
                return Err(TableError::DuplicateColumn {
                    name: name.to_string(),
                });
            }
            let lengths = [Some(col.len()), col.values_len()];
            for actual in lengths.into_iter().flatten() {
                if actual != self.row_count {
                    return Err(TableError::DimensionMismatch {
                        column: name.to_string(),
                        expected: self.row_count,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    // ── ValidityBitmap tests ──────────────────────────────────────

    #[test]
    fn bitmap_all_valid() {
        let bm = ValidityBitmap::all_valid(100);
        assert_eq!(bm.len(), 100);
        assert_eq!(bm.null_count(), 0);
        assert_eq!(bm.valid_count(), 100);
        assert!((0..100).all(|i| bm.is_valid(i)));
    }

    #[test]
    fn bitmap_all_invalid() {
        let bm = ValidityBitmap::all_invalid(100);
        assert_eq!(bm.null_count(), 100);
        assert!((0..100).all(|i| bm.is_null(i)));
        assert_eq!(bm.valid_indices().count(), 0);
    }

    /// Bitmap of `len` positions where only `valid` are present.
    fn bitmap_with_valid(len: usize, valid: &[usize]) -> ValidityBitmap {
        let mut bm = ValidityBitmap::empty();
        for i in 0..len {
            bm.push(valid.contains(&i));
        }
        bm
    }

    #[test]
    fn bitmap_null_counts() {
        let bm = bitmap_with_valid(10, &[0, 1, 2, 3, 4, 5, 6, 8, 9]);
        assert_eq!(bm.null_count(), 1);
        assert!(bm.is_null(7));
        assert!(bm.is_valid(9));
        assert!(bm.has_nulls());
        assert!(!ValidityBitmap::all_valid(10).has_nulls());
    }

    #[test]
    fn bitmap_boundary_64() {
        let bm = ValidityBitmap::all_valid(64);
        assert_eq!(bm.bits.len(), 1);
        assert_eq!(bm.null_count(), 0);

        let bm65 = ValidityBitmap::all_valid(65);
        assert_eq!(bm65.bits.len(), 2);
        assert_eq!(bm65.null_count(), 0);
        assert!(bm65.is_valid(64));
    }

    #[test]
    fn bitmap_push_across_word_boundary() {
        let mut bm = ValidityBitmap::empty();
        for i in 0..130 {
            bm.push(i % 3 != 0);
        }
        assert_eq!(bm.len(), 130);
        assert_eq!(bm.null_count(), (0..130).filter(|i| i % 3 == 0).count());
    }

    #[test]
    fn bitmap_valid_indices_skip_words() {
        let bm = bitmap_with_valid(200, &[1, 130, 199]);
        assert_eq!(bm.valid_count(), 3);
        let indices: Vec<usize> = bm.valid_indices().collect();
        assert_eq!(indices, vec![1, 130, 199]);
    }

    #[test]
    fn bitmap_intersect_and_take() {
        let mut a = bitmap_with_valid(5, &[0, 2, 3, 4]);
        let b = bitmap_with_valid(5, &[0, 1, 2, 4]);
        a.intersect(&b);
        assert_eq!(a.valid_indices().collect::<Vec<_>>(), vec![0, 2, 4]);

        let taken = a.take(&[1, 2, 3]);
        assert_eq!(taken.len(), 3);
        assert!(taken.is_null(0));
        assert!(taken.is_valid(1));
        assert!(taken.is_null(2));
    }

    // ── Column tests ─────────────────────────────────────────────

    #[test]
    fn float_column_with_nulls() {
        let col = Column::from(vec![Some(1.0), None, Some(3.0), None]);
        assert_eq!(col.data_type(), DataType::Float);
        assert_eq!(col.null_count(), 2);
        assert_eq!(col.valid_count(), 2);
        assert_eq!(col.value(1), Value::Null);
        assert_eq!(col.numeric_values(), Some(vec![1.0, 3.0]));
    }

    #[test]
    fn integer_values_promote_to_float() {
        let col = Column::from(vec![Some(2_i64), None, Some(5)]);
        assert_eq!(col.data_type(), DataType::Integer);
        assert_eq!(col.numeric_values(), Some(vec![2.0, 5.0]));
        assert_eq!(col.value(2), Value::Integer(5));
    }

    #[test]
    fn string_column_is_not_numeric() {
        let col = Column::from(vec![Some("a"), None]);
        assert_eq!(col.data_type(), DataType::String);
        assert_eq!(col.numeric_values(), None);
        assert_eq!(col.value(0), Value::String("a".into()));
    }

    #[test]
    fn unknown_column_is_all_null() {
        let col = Column::unknown(3);
        assert_eq!(col.data_type(), DataType::Unknown);
        assert_eq!(col.len(), 3);
        assert_eq!(col.null_count(), 3);
        assert_eq!(col.values_len(), None);
        assert!(!col.matches(0, &Value::Null));
    }

    #[test]
    fn matches_numeric_across_kinds() {
        let ints = Column::from(vec![1_i64, 2, 3]);
        assert!(ints.matches(0, &Value::Integer(1)));
        assert!(ints.matches(1, &Value::Float(2.0)));
        assert!(!ints.matches(1, &Value::Float(2.5)));
        assert!(!ints.matches(0, &Value::String("1".into())));

        let floats = Column::from(vec![Some(4.0), None]);
        assert!(floats.matches(0, &Value::Integer(4)));
        assert!(!floats.matches(1, &Value::Float(0.0)));
        assert!(!floats.matches(1, &Value::Null));
    }

    #[test]
    fn matches_strings_and_booleans_exactly() {
        let text = Column::from(vec![Some("A"), Some("a"), None]);
        assert!(text.matches(0, &"A".into()));
        assert!(!text.matches(1, &"A".into()));
        assert!(!text.matches(2, &"".into()));

        let flags = Column::from(vec![Some(true), Some(false)]);
        assert!(flags.matches(0, &true.into()));
        assert!(!flags.matches(0, &Value::Integer(1)));
    }

    #[test]
    fn take_keeps_dtype_when_empty() {
        let col = Column::from(vec![Some(1.5), Some(2.5)]);
        let empty = col.take(&[]);
        assert_eq!(empty.data_type(), DataType::Float);
        assert!(empty.is_empty());

        let picked = col.take(&[1]);
        assert_eq!(picked.value(0), Value::Float(2.5));
    }

    // ── DataFrame tests ──────────────────────────────────────────

    fn sample_frame() -> DataFrame {
        let mut df = DataFrame::new();
        df.add_column("id", Column::from(vec![1_i64, 2, 3]))
            .expect("first column");
        df.add_column("x", Column::from(vec![Some(1.0), None, Some(3.0)]))
            .expect("second column");
        df.add_column("label", Column::from(vec![Some("a"), Some("b"), None]))
            .expect("third column");
        df
    }

    #[test]
    fn empty_dataframe() {
        let df = DataFrame::new();
        assert_eq!(df.row_count(), 0);
        assert_eq!(df.column_count(), 0);
        assert!(df.is_empty());
        assert!(df.validate().is_ok());
    }

    #[test]
    fn add_columns_and_schema() {
        let df = sample_frame();
        assert_eq!(df.row_count(), 3);
        assert_eq!(df.column_names(), &["id", "x", "label"]);
        assert_eq!(
            df.schema(),
            vec![
                ("id", DataType::Integer),
                ("x", DataType::Float),
                ("label", DataType::String)
            ]
        );
        assert_eq!(df.total_null_count(), 2);
        assert_eq!(df.column_index("label"), Some(2));
        assert!(df.column_by_name("missing").is_none());
    }

    #[test]
    fn column_length_mismatch() {
        let mut df = sample_frame();
        let result = df.add_column("y", Column::from(vec![1.0, 2.0]));
        assert!(matches!(
            result,
            Err(TableError::DimensionMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
        assert_eq!(df.column_count(), 3);
    }

    #[test]
    fn values_shorter_than_bitmap_rejected() {
        let mut df = DataFrame::new();
        let result = df.add_column("x", Column::integer(vec![1], ValidityBitmap::all_valid(3)));
        assert!(matches!(
            result,
            Err(TableError::DimensionMismatch {
                expected: 3,
                actual: 1,
                ..
            })
        ));
        assert!(df.is_empty());
        assert!(df.validate().is_ok());
    }

    #[test]
    fn values_longer_than_bitmap_rejected_after_first_column() {
        let mut df = sample_frame();
        let result = df.add_column(
            "s",
            Column::string(vec!["a".into(); 5], ValidityBitmap::all_valid(3)),
        );
        assert!(matches!(result, Err(TableError::DimensionMismatch { .. })));
        assert_eq!(df.column_count(), 3);
    }

    #[test]
    fn duplicate_column_rejected() {
        let mut df = sample_frame();
        let result = df.add_column("x", Column::from(vec![1.0, 2.0, 3.0]));
        assert!(matches!(result, Err(TableError::DuplicateColumn { name }) if name == "x"));
    }

    #[test]
    fn complete_rows_intersects_all_columns() {
        let df = sample_frame();
        let complete = df.complete_rows();
        assert_eq!(complete.valid_indices().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn take_rows_preserves_order_and_invariants() {
        let df = sample_frame();
        let taken = df.take_rows(&[2, 0]);
        assert_eq!(taken.row_count(), 2);
        assert!(taken.validate().is_ok());
        let id = taken.column_by_name("id").expect("id column");
        assert_eq!(id.value(0), Value::Integer(3));
        assert_eq!(id.value(1), Value::Integer(1));
        assert_eq!(taken.schema(), df.schema());
    }
}
