//! Allocation table: named column layout, rows, and numeric sorting.

pub mod row;
pub mod sort;

pub use row::{Column, Row, TableError};
pub use sort::{NumericRadix, SortOrder, parse_int_prefix, sort_rows};
