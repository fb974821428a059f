//! Error types for lookup construction, matching, and reporting.

use clearmatch_primitives::TableError;
use thiserror::Error;

/// Errors raised by the matching engine.
///
/// Every error is local and synchronous; none of them are transient.
#[derive(Debug, Error)]
pub enum MatchError {
	/// A column reference is out of range or names nothing, or a table has
	/// the wrong shape.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// A summary was requested before a matching session populated the
	/// counters.
	#[error("precondition failed: {0}")]
	Precondition(String),

	/// The missingness percentage divides by a matched count of zero.
	#[error("missingness percentage is undefined: no records matched")]
	EmptyResultAmbiguity,

	/// Matcher configuration failed to parse.
	#[error("invalid matcher configuration: {0}")]
	Config(#[from] toml::de::Error),
}

impl From<TableError> for MatchError {
	fn from(err: TableError) -> Self {
		Self::InvalidInput(err.to_string())
	}
}

/// Result type for matcher operations.
pub type Result<T> = std::result::Result<T, MatchError>;
