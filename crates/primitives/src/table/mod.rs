use std::collections::HashSet;

use crate::cell::{Cell, CellType};
use crate::error::{Result, TableError};

#[cfg(test)]
mod tests;

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
	name: String,
	cells: Vec<Cell>,
}

impl Column {
	pub fn new(name: impl Into<String>, cells: impl IntoIterator<Item = impl Into<Cell>>) -> Self {
		Self {
			name: name.into(),
			cells: cells.into_iter().map(Into::into).collect(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn cells(&self) -> &[Cell] {
		&self.cells
	}

	pub fn get(&self, row: usize) -> Option<&Cell> {
		self.cells.get(row)
	}

	pub fn len(&self) -> usize {
		self.cells.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cells.is_empty()
	}

	pub fn cell_type(&self) -> CellType {
		CellType::infer(&self.cells)
	}
}

/// A rectangular, column-major table with a stable label per row.
///
/// Row labels behave like a dataframe index: they default to `0..n`, and
/// tables produced by [`Table::select_rows`] keep the labels of the rows
/// they were selected from. Positional accessors (`row`, `select_rows`,
/// `Column::get`) address rows by position, not by label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
	columns: Vec<Column>,
	row_labels: Vec<usize>,
}

impl Table {
	/// Builds a table from columns of equal length with unique names.
	pub fn new(columns: Vec<Column>) -> Result<Self> {
		let rows = columns.first().map_or(0, Column::len);
		let mut seen = HashSet::with_capacity(columns.len());

		for column in &columns {
			if !seen.insert(column.name.as_str()) {
				return Err(TableError::DuplicateColumn(column.name.clone()));
			}
			if column.len() != rows {
				return Err(TableError::Ragged {
					column: column.name.clone(),
					expected: rows,
					found: column.len(),
				});
			}
		}

		Ok(Self {
			columns,
			row_labels: (0..rows).collect(),
		})
	}

	/// Builds a table from row-major data.
	///
	/// Every row must have exactly one cell per name.
	pub fn from_rows<N, R>(names: impl IntoIterator<Item = N>, rows: impl IntoIterator<Item = R>) -> Result<Self>
	where
		N: Into<String>,
		R: IntoIterator<Item = Cell>,
	{
		let names: Vec<String> = names.into_iter().map(Into::into).collect();
		let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); names.len()];

		for (row, cells) in rows.into_iter().enumerate() {
			let mut width = 0;
			for cell in cells {
				if let Some(column) = columns.get_mut(width) {
					column.push(cell);
				}
				width += 1;
			}
			if width != names.len() {
				return Err(TableError::RowWidth {
					row,
					expected: names.len(),
					found: width,
				});
			}
		}

		Self::new(names.into_iter().zip(columns).map(|(name, cells)| Column { name, cells }).collect())
	}

	/// Replaces the row labels.
	pub fn with_row_labels(mut self, labels: Vec<usize>) -> Result<Self> {
		if labels.len() != self.row_count() {
			return Err(TableError::LabelCount {
				expected: self.row_count(),
				found: labels.len(),
			});
		}
		self.row_labels = labels;
		Ok(self)
	}

	pub fn row_count(&self) -> usize {
		self.row_labels.len()
	}

	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	pub fn row_labels(&self) -> &[usize] {
		&self.row_labels
	}

	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
		self.columns.iter().map(Column::name)
	}

	pub fn column(&self, index: usize) -> Result<&Column> {
		self.columns.get(index).ok_or(TableError::ColumnOutOfRange {
			index,
			count: self.columns.len(),
		})
	}

	pub fn column_index(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|column| column.name == name)
	}

	pub fn column_by_name(&self, name: &str) -> Result<&Column> {
		self.column_index(name)
			.map(|index| &self.columns[index])
			.ok_or_else(|| TableError::UnknownColumn(name.to_owned()))
	}

	/// Checks that `index` addresses an existing column.
	pub fn check_column(&self, index: usize) -> Result<()> {
		self.column(index).map(|_| ())
	}

	/// Dtype of every column, in column order.
	pub fn column_types(&self) -> Vec<(String, CellType)> {
		self.columns.iter().map(|column| (column.name.clone(), column.cell_type())).collect()
	}

	/// Cells of the row at `position`, in column order.
	pub fn row(&self, position: usize) -> Result<Vec<&Cell>> {
		if position >= self.row_count() {
			return Err(TableError::RowOutOfRange {
				index: position,
				count: self.row_count(),
			});
		}
		Ok(self.columns.iter().map(|column| &column.cells[position]).collect())
	}

	/// Adds `name` as a new trailing column, or overwrites it in place.
	///
	/// A table without columns adopts the length of the first column set on
	/// it, labelling rows `0..n`.
	pub fn set_column(&mut self, name: &str, cells: Vec<Cell>) -> Result<()> {
		if self.columns.is_empty() && self.row_labels.is_empty() {
			self.row_labels = (0..cells.len()).collect();
		}
		if cells.len() != self.row_count() {
			return Err(TableError::LengthMismatch {
				column: name.to_owned(),
				expected: self.row_count(),
				found: cells.len(),
			});
		}

		match self.column_index(name) {
			Some(index) => self.columns[index].cells = cells,
			None => self.columns.push(Column {
				name: name.to_owned(),
				cells,
			}),
		}
		Ok(())
	}

	/// Copies the rows at `positions` into a new table, keeping their labels.
	pub fn select_rows(&self, positions: &[usize]) -> Result<Table> {
		if let Some(&index) = positions.iter().find(|&&p| p >= self.row_count()) {
			return Err(TableError::RowOutOfRange {
				index,
				count: self.row_count(),
			});
		}

		let columns = self
			.columns
			.iter()
			.map(|column| Column {
				name: column.name.clone(),
				cells: positions.iter().map(|&p| column.cells[p].clone()).collect(),
			})
			.collect();

		Ok(Table {
			columns,
			row_labels: positions.iter().map(|&p| self.row_labels[p]).collect(),
		})
	}

	/// Rewrites every cell equal to `from`, in every column, to `to`.
	///
	/// Returns the number of cells changed.
	pub fn replace_value(&mut self, from: &Cell, to: &Cell) -> usize {
		if from == to {
			return 0;
		}

		let mut changed = 0;
		for cell in self.columns.iter_mut().flat_map(|column| column.cells.iter_mut()) {
			if cell == from {
				*cell = to.clone();
				changed += 1;
			}
		}
		changed
	}
}
