//! Synonym lookup built from a reference table.
//!
//! Each reference row contributes one entry: the string form of its key
//! cell, mapped to the string forms of its value cells. Entries iterate in
//! the order their key first appeared, which makes every "last key wins"
//! tie-break in the engine deterministic.
//!
//! Duplicate keys are not merged. The later row replaces the earlier row's
//! synonyms while the key keeps its original position; the number of such
//! replacements is reported by [`SynonymLookup::overwritten`].

use std::borrow::Cow;

use clearmatch_primitives::{Column, Table};
use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, trace};

use crate::error::Result;


/// Mapping from linking key to its ordered synonyms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymLookup {
	entries: IndexMap<String, Vec<String>>,
	overwritten: usize,
}

impl SynonymLookup {
	/// Builds a lookup from `reference`.
	///
	/// `key_column` holds the linking keys and `value_columns` the synonyms
	/// of each key's row (a slice, `Vec`, or range of column indices).
	/// `Null` value cells are skipped. A table with zero rows yields an
	/// empty lookup, but every column index must still exist.
	pub fn build(reference: &Table, key_column: usize, value_columns: impl IntoIterator<Item = usize>) -> Result<Self> {
		let keys = reference.column(key_column)?.cells();
		let values = value_columns
			.into_iter()
			.map(|index| reference.column(index).map(Column::cells))
			.collect::<std::result::Result<Vec<_>, _>>()?;

		let mut lookup = Self::default();
		for (row, key) in keys.iter().enumerate() {
			let synonyms = values.iter().filter_map(|column| column[row].text()).map(Cow::into_owned).collect();
			lookup.insert(key.to_key_string(), synonyms);
		}

		debug!(
			rows = reference.row_count(),
			keys = lookup.len(),
			value_columns = values.len(),
			overwritten = lookup.overwritten,
			"built synonym lookup"
		);
		Ok(lookup)
	}

	/// Builds a lookup from `(key, synonyms)` pairs with the same
	/// last-write-wins rule as [`SynonymLookup::build`].
	pub fn from_entries<K, I, S>(entries: impl IntoIterator<Item = (K, I)>) -> Self
	where
		K: Into<String>,
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut lookup = Self::default();
		for (key, synonyms) in entries {
			lookup.insert(key.into(), synonyms.into_iter().map(Into::into).collect());
		}
		lookup
	}

	fn insert(&mut self, key: String, synonyms: Vec<String>) {
		match self.entries.entry(key) {
			Entry::Occupied(mut entry) => {
				trace!(key = entry.key().as_str(), "duplicate reference key, later row replaces synonyms");
				entry.insert(synonyms);
				self.overwritten += 1;
			}
			Entry::Vacant(entry) => {
				entry.insert(synonyms);
			}
		}
	}

	/// Synonyms of `key`, or `None` if the key is not in the reference data.
	pub fn get(&self, key: &str) -> Option<&[String]> {
		self.entries.get(key).map(Vec::as_slice)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of rows whose key had already been seen.
	pub fn overwritten(&self) -> usize {
		self.overwritten
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
		self.entries.keys().map(String::as_str)
	}

	/// Entries in first-appearance order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
		self.entries.iter().map(|(key, synonyms)| (key.as_str(), synonyms.as_slice()))
	}
}
