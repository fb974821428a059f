use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn sample() -> Table {
	Table::from_rows(
		["name", "country", "size"],
		[
			vec![Cell::str("Acme"), Cell::str("US"), Cell::Int(10)],
			vec![Cell::str("Globex"), Cell::str("CA"), Cell::Int(3)],
			vec![Cell::str("Initech"), Cell::str("US"), Cell::Null],
		],
	)
	.unwrap()
}

#[test]
fn from_rows_is_column_major() {
	let table = sample();
	assert_eq!(table.row_count(), 3);
	assert_eq!(table.column_count(), 3);
	assert_eq!(table.row_labels(), &[0, 1, 2]);
	assert_eq!(table.column(1).unwrap().cells(), &[Cell::str("US"), Cell::str("CA"), Cell::str("US")]);
	assert_eq!(table.row(1).unwrap(), vec![&Cell::str("Globex"), &Cell::str("CA"), &Cell::Int(3)]);
}

#[test]
fn columns_are_in_insertion_order() {
	let mut table = sample();
	table.set_column("region", vec![Cell::Null; 3]).unwrap();

	let names: Vec<&str> = table.columns().iter().map(Column::name).collect();
	assert_eq!(names, vec!["name", "country", "size", "region"]);
	assert!(table.columns().iter().all(|column| column.len() == table.row_count()));
}

#[test]
fn new_rejects_ragged_columns() {
	let err = Table::new(vec![Column::new("a", [Cell::Int(1), Cell::Int(2)]), Column::new("b", [Cell::Int(1)])]).unwrap_err();
	assert_eq!(
		err,
		TableError::Ragged {
			column: "b".into(),
			expected: 2,
			found: 1,
		}
	);
}

#[test]
fn new_rejects_duplicate_names() {
	let err = Table::new(vec![Column::new("a", [Cell::Int(1)]), Column::new("a", [Cell::Int(2)])]).unwrap_err();
	assert_eq!(err, TableError::DuplicateColumn("a".into()));
}

#[test]
fn from_rows_rejects_short_rows() {
	let err = Table::from_rows(["a", "b"], [vec![Cell::Int(1), Cell::Int(2)], vec![Cell::Int(3)]]).unwrap_err();
	assert_eq!(
		err,
		TableError::RowWidth {
			row: 1,
			expected: 2,
			found: 1,
		}
	);
}

#[test]
fn column_lookups() {
	let table = sample();
	assert_eq!(table.column_index("size"), Some(2));
	assert_eq!(table.column_index("missing"), None);
	assert_eq!(table.column_by_name("name").unwrap().get(2), Some(&Cell::str("Initech")));
	assert_eq!(table.column_by_name("missing").unwrap_err(), TableError::UnknownColumn("missing".into()));
	assert_eq!(table.column(3).unwrap_err(), TableError::ColumnOutOfRange { index: 3, count: 3 });
	assert!(table.check_column(2).is_ok());
}

#[test]
fn column_types_follow_non_null_cells() {
	let table = sample();
	assert_eq!(
		table.column_types(),
		vec![
			("name".to_string(), CellType::Str),
			("country".to_string(), CellType::Str),
			("size".to_string(), CellType::Int),
		]
	);
}

#[test]
fn set_column_appends_then_overwrites() {
	let mut table = sample();
	table.set_column("Match", vec![Cell::Null; 3]).unwrap();
	assert_eq!(table.column_count(), 4);
	assert_eq!(table.column_types()[3].1, CellType::Null);

	table.set_column("Match", vec![Cell::str("x"), Cell::Null, Cell::Null]).unwrap();
	assert_eq!(table.column_count(), 4);
	assert_eq!(table.column_by_name("Match").unwrap().get(0), Some(&Cell::str("x")));
	assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["name", "country", "size", "Match"]);
}

#[test]
fn set_column_checks_length() {
	let mut table = sample();
	let err = table.set_column("Match", vec![Cell::Null]).unwrap_err();
	assert_eq!(
		err,
		TableError::LengthMismatch {
			column: "Match".into(),
			expected: 3,
			found: 1,
		}
	);
	assert_eq!(table.column_count(), 3);
}

#[test]
fn set_column_on_empty_table_adopts_length() {
	let mut table = Table::default();
	table.set_column("host", vec![Cell::str("a"), Cell::str("b")]).unwrap();
	assert_eq!(table.row_count(), 2);
	assert_eq!(table.row_labels(), &[0, 1]);
}

#[test]
fn select_rows_keeps_labels() {
	let table = sample();
	let subset = table.select_rows(&[2, 0]).unwrap();
	assert_eq!(subset.row_labels(), &[2, 0]);
	assert_eq!(subset.column(0).unwrap().cells(), &[Cell::str("Initech"), Cell::str("Acme")]);

	let nested = subset.select_rows(&[1]).unwrap();
	assert_eq!(nested.row_labels(), &[0]);

	assert_eq!(table.select_rows(&[5]).unwrap_err(), TableError::RowOutOfRange { index: 5, count: 3 });
}

#[test]
fn with_row_labels_checks_count() {
	let table = sample().with_row_labels(vec![10, 20, 30]).unwrap();
	assert_eq!(table.row_labels(), &[10, 20, 30]);
	assert_eq!(sample().with_row_labels(vec![1]).unwrap_err(), TableError::LabelCount { expected: 3, found: 1 });
}

#[test]
fn replace_value_is_global() {
	let mut table = Table::from_rows(
		["a", "b"],
		[vec![Cell::str("USA"), Cell::str("x")], vec![Cell::str("y"), Cell::str("USA")], vec![Cell::str("USA Inc"), Cell::Null]],
	)
	.unwrap();

	let changed = table.replace_value(&Cell::str("USA"), &Cell::str("US"));
	assert_eq!(changed, 2);
	assert_eq!(table.column(0).unwrap().cells(), &[Cell::str("US"), Cell::str("y"), Cell::str("USA Inc")]);
	assert_eq!(table.column(1).unwrap().cells(), &[Cell::str("x"), Cell::str("US"), Cell::Null]);
}

#[test]
fn replace_value_with_itself_is_noop() {
	let mut table = sample();
	assert_eq!(table.replace_value(&Cell::str("US"), &Cell::str("US")), 0);
}

proptest! {
	#[test]
	fn prop_select_all_rows_is_identity(values in prop::collection::vec(0i64..5, 0..40)) {
		let table = Table::new(vec![Column::new("v", values.into_iter().map(Cell::Int))]).unwrap();
		let positions: Vec<usize> = (0..table.row_count()).collect();
		prop_assert_eq!(table.select_rows(&positions).unwrap(), table);
	}
}
