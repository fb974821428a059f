//! Error types for table construction and access.

use thiserror::Error;

/// Errors raised by [`Table`](crate::Table) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
	/// A column's length disagrees with the rest of the table.
	#[error("column `{column}` has {found} rows, expected {expected}")]
	Ragged { column: String, expected: usize, found: usize },

	/// A row passed to [`Table::from_rows`](crate::Table::from_rows) has the wrong width.
	#[error("row {row} has {found} cells, expected {expected}")]
	RowWidth { row: usize, expected: usize, found: usize },

	/// Two columns share a name.
	#[error("duplicate column name `{0}`")]
	DuplicateColumn(String),

	/// A positional column reference past the last column.
	#[error("column index {index} out of range for table with {count} columns")]
	ColumnOutOfRange { index: usize, count: usize },

	/// A named column reference that does not exist.
	#[error("unknown column `{0}`")]
	UnknownColumn(String),

	/// Replacement cells do not cover every row.
	#[error("column `{column}` needs {expected} cells, got {found}")]
	LengthMismatch { column: String, expected: usize, found: usize },

	/// A positional row reference past the last row.
	#[error("row position {index} out of range for table with {count} rows")]
	RowOutOfRange { index: usize, count: usize },

	/// Row labels do not cover every row.
	#[error("expected {expected} row labels, got {found}")]
	LabelCount { expected: usize, found: usize },
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
