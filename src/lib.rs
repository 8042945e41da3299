//! # u-tabular
//!
//! In-memory columnar table toolkit: load a delimited dataset, drop
//! incomplete rows, filter by equality, and compute null-aware column
//! statistics.
//!
//! Data lives column-major: every column is a dense typed vector with a
//! bit-packed validity bitmap, and its dtype is inferred once at load time.
//! Statistics skip nulls; single-column queries reject columns that are
//! entirely null, the bulk summary reports them as `NaN` instead.
//!
//! ## Modules
//!
//! - [`table`] — The [`Table`](table::Table) engine (load, clean, filter, mean, max, summary)
//! - [`dataframe`] — Column-major storage (DataFrame, Column, DataType, Value, ValidityBitmap)
//! - [`csv_parser`] — Delimited-text parsing into raw cells
//! - [`source`] — Inputs a table can be loaded from
//! - [`inference`] — dtype inference and typed column construction
//! - [`stats`] — Per-column summary reports built on `u_numflow::stats`
//! - [`error`] — Error types
//!
//! ## Quick Start
//!
//! ```
//! use u_tabular::dataframe::DataType;
//! use u_tabular::table::Table;
//!
//! let csv = "id,value,category\n1,10.5,A\n2,20.3,B\n3,NA,A\n4,40.7,\n5,50.1,B\n";
//! let mut table = Table::new();
//! assert_eq!(table.load_csv_str(csv).unwrap(), 5);
//! assert_eq!(table.dtypes()[1], ("value", DataType::Float));
//!
//! assert_eq!(table.clean().unwrap(), 3);
//! assert_eq!(table.find_max("value").unwrap(), 50.1);
//!
//! let summary = table.get_summary_stats().unwrap();
//! assert_eq!(summary.get("value").unwrap().count, 3);
//! assert!(!summary.contains("category"));
//! ```

pub mod csv_parser;
pub mod dataframe;
pub mod error;
pub mod inference;
pub mod source;
pub mod stats;
pub mod table;

pub use dataframe::{Column, DataFrame, DataType, Value};
pub use error::{InputError, TableError};
pub use table::Table;
