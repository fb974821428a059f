//! Tabular primitives: typed cells, named columns, and row-labelled tables.

/// Typed cell values and column dtypes.
pub mod cell;
/// Error types for table construction and access.
pub mod error;
/// Column-major tables with stable row labels.
pub mod table;

pub use cell::{Cell, CellType};
pub use error::{Result, TableError};
pub use table::{Column, Table};
