//! Matcher configuration.
//!
//! [`MatchConfig`] can be built in code or parsed from TOML. Every field has
//! a default, so an empty document yields [`MatchConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Name of the column written by exact and mode-switched joins.
pub const DEFAULT_MATCH_COLUMN: &str = "Match";
/// Name of the column written by [`MatchingEngine::join_substring`](crate::MatchingEngine::join_substring).
pub const DEFAULT_PARTIAL_MATCH_COLUMN: &str = "PartialMatch";

/// Predicate used to compare a record with a synonym.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
	/// The record equals the synonym.
	#[default]
	Exact,
	/// The record and the synonym overlap as contiguous substrings, in the
	/// direction chosen by [`Containment`].
	Substring,
}

/// Direction of the substring test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
	/// The record occurs inside a synonym (`"USA"` matches synonym `"USA Inc"`).
	#[default]
	RecordInSynonym,
	/// A synonym occurs inside the record (`"USA Inc"` matches synonym `"USA"`).
	SynonymInRecord,
}

/// Tunables for a [`MatchingEngine`](crate::MatchingEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
	/// Output column for exact and mode-switched joins.
	pub match_column: String,
	/// Output column for substring joins.
	pub partial_match_column: String,
	/// Direction of substring containment.
	pub containment: Containment,
	/// Upper bound on worker threads for the join row scan. `1` keeps the
	/// scan on the calling thread.
	pub threads: usize,
	/// Rows each worker must have before another thread is added.
	pub min_rows_per_thread: usize,
}

impl Default for MatchConfig {
	fn default() -> Self {
		Self {
			match_column: DEFAULT_MATCH_COLUMN.to_owned(),
			partial_match_column: DEFAULT_PARTIAL_MATCH_COLUMN.to_owned(),
			containment: Containment::default(),
			threads: 1,
			min_rows_per_thread: 2500,
		}
	}
}

impl MatchConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Rejects output column layouts that would clobber each other.
	pub fn validate(&self) -> Result<()> {
		if self.match_column.is_empty() || self.partial_match_column.is_empty() {
			return Err(MatchError::InvalidInput("output column names must not be empty".into()));
		}
		if self.match_column == self.partial_match_column {
			return Err(MatchError::InvalidInput(format!(
				"match and partial match columns must differ, both are `{}`",
				self.match_column
			)));
		}
		Ok(())
	}
}
