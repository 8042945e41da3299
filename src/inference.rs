//! dtype inference and typed column construction.
//!
//! A column's dtype is seeded by the apparent type of its first non-null
//! cell and widened as later cells disagree:
//!
//! | seen so far | next cell | result |
//! |-------------|-----------|--------|
//! | Integer | Float | Float |
//! | Float | Integer | Float |
//! | any | same type | unchanged |
//! | any | anything else | String |
//!
//! A column without non-null cells is [`DataType::Unknown`].

use crate::dataframe::{Column, DataType, ValidityBitmap};

/// Returns the dtype a single non-null cell looks like on its own.
pub fn apparent_type(cell: &str) -> DataType {
    if cell.parse::<i64>().is_ok() {
        DataType::Integer
    } else if cell.parse::<f64>().is_ok() {
        DataType::Float
    } else if parse_boolean(cell).is_some() {
        DataType::Boolean
    } else {
        DataType::String
    }
}

/// Narrowest dtype able to hold values of both `seen` and `next`.
fn widen(seen: DataType, next: DataType) -> DataType {
    match (seen, next) {
        (a, b) if a == b => a,
        (DataType::Unknown, b) => b,
        (DataType::Integer, DataType::Float) | (DataType::Float, DataType::Integer) => {
            DataType::Float
        }
        _ => DataType::String,
    }
}

/// Infers the dtype of a column from its cells (`None` = null).
pub fn infer_type(cells: &[Option<String>]) -> DataType {
    let mut dtype = DataType::Unknown;
    for cell in cells.iter().flatten() {
        dtype = widen(dtype, apparent_type(cell));
        if dtype == DataType::String {
            break;
        }
    }
    dtype
}

/// Infers the dtype of `cells` and builds the matching typed column.
pub fn build_column(cells: &[Option<String>]) -> Column {
    let dtype = infer_type(cells);
    match dtype {
        DataType::Integer => build_typed(cells, |s| s.parse::<i64>().ok(), Column::integer),
        DataType::Float => build_typed(cells, |s| s.parse::<f64>().ok(), Column::float),
        DataType::Boolean => build_typed(cells, parse_boolean, Column::boolean),
        DataType::String => build_typed(cells, |s| Some(s.to_string()), Column::string),
        DataType::Unknown => Column::unknown(cells.len()),
    }
}

/// Parses every non-null cell with `parse` into dense storage.
///
/// Cells `parse` rejects become null, though inference only picks a dtype
/// every non-null cell parses as.
fn build_typed<T, P, C>(cells: &[Option<String>], parse: P, construct: C) -> Column
where
    T: Default,
    P: Fn(&str) -> Option<T>,
    C: FnOnce(Vec<T>, ValidityBitmap) -> Column,
{
    let mut values = Vec::with_capacity(cells.len());
    let mut validity = ValidityBitmap::empty();
    for cell in cells {
        match cell.as_deref().and_then(&parse) {
            Some(v) => {
                values.push(v);
                validity.push(true);
            }
            None => {
                values.push(T::default());
                validity.push(false);
            }
        }
    }
    construct(values, validity)
}

/// Parses `true` / `false` in any letter case.
fn parse_boolean(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataframe::Value;
    use test_log::test;

    fn cells(raw: &[Option<&str>]) -> Vec<Option<String>> {
        raw.iter().map(|c| c.map(str::to_string)).collect()
    }

    #[test]
    fn apparent_types() {
        assert_eq!(apparent_type("42"), DataType::Integer);
        assert_eq!(apparent_type("-7"), DataType::Integer);
        assert_eq!(apparent_type("4.5"), DataType::Float);
        assert_eq!(apparent_type("2.3e10"), DataType::Float);
        assert_eq!(apparent_type("TRUE"), DataType::Boolean);
        assert_eq!(apparent_type("false"), DataType::Boolean);
        assert_eq!(apparent_type("yes"), DataType::String);
        assert_eq!(apparent_type("A"), DataType::String);
    }

    #[test]
    fn integer_overflow_reads_as_float() {
        assert_eq!(apparent_type("99999999999999999999"), DataType::Float);
    }

    #[test]
    fn integers_widen_to_float() {
        let col = build_column(&cells(&[Some("1"), None, Some("2.5")]));
        assert_eq!(col.data_type(), DataType::Float);
        assert_eq!(col.numeric_values(), Some(vec![1.0, 2.5]));
        assert!(col.is_null(1));
    }

    #[test]
    fn first_non_null_seeds_type() {
        let col = build_column(&cells(&[None, Some("10"), Some("20")]));
        assert_eq!(col.data_type(), DataType::Integer);
        assert_eq!(col.value(2), Value::Integer(20));
    }

    #[test]
    fn mixed_kinds_fall_back_to_string() {
        let col = build_column(&cells(&[Some("1"), Some("two"), Some("true")]));
        assert_eq!(col.data_type(), DataType::String);
        assert_eq!(col.value(0), Value::String("1".into()));
        assert_eq!(col.value(1), Value::String("two".into()));
    }

    #[test]
    fn boolean_column() {
        let col = build_column(&cells(&[Some("true"), Some("False"), None]));
        assert_eq!(col.data_type(), DataType::Boolean);
        assert_eq!(col.value(0), Value::Boolean(true));
        assert_eq!(col.value(1), Value::Boolean(false));
        assert_eq!(col.value(2), Value::Null);
    }

    #[test]
    fn all_null_is_unknown() {
        let col = build_column(&cells(&[None, None, None]));
        assert_eq!(col.data_type(), DataType::Unknown);
        assert_eq!(col.len(), 3);

        let empty = build_column(&[]);
        assert_eq!(empty.data_type(), DataType::Unknown);
        assert!(empty.is_empty());
    }
}
