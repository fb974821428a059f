//! Row partitioning by the value of one column.

use clearmatch_primitives::{Cell, Table};
use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;

/// Sub-tables keyed by the distinct values of the partition column, in
/// order of first appearance.
pub type Partitions = IndexMap<Cell, Table>;

/// Splits `table` into one sub-table per distinct value of `column`.
///
/// Rows keep their relative order and their row labels, and every row lands
/// in exactly one group. `Null` values form a group of their own.
pub fn partition_by(table: &Table, column: &str) -> Result<Partitions> {
	let cells = table.column_by_name(column)?.cells();

	let mut groups: IndexMap<&Cell, Vec<usize>> = IndexMap::new();
	for (position, cell) in cells.iter().enumerate() {
		groups.entry(cell).or_default().push(position);
	}

	debug!(column, rows = table.row_count(), groups = groups.len(), "partitioned table");

	groups
		.into_iter()
		.map(|(value, positions)| -> Result<(Cell, Table)> { Ok((value.clone(), table.select_rows(&positions)?)) })
		.collect()
}
