//! Missingness bookkeeping for one matching session.
//!
//! A session is a single join or replace call. The engine resets the
//! tracker at the start of the call and finalizes it at the end; reading
//! counters before any session has finished is an error.
//!
//! Two notions of "matched" are kept apart:
//!
//! * match events: one per (row, key) pair whose predicate held. A row
//!   covered by overlapping synonym sets contributes several events, so this
//!   can exceed the row count.
//! * matched rows: rows with at least one event.
//!
//! The headline `matched`/`non_matched` pair uses match events, with
//! `non_matched = total - events` (signed, it goes negative once events
//! exceed rows). The row-based figures are exposed alongside.

use std::fmt;

use clearmatch_primitives::CellType;

use crate::error::{MatchError, Result};


/// Labels of the two bars in a missingness chart.
pub const BAR_LABELS: [&str; 2] = ["Missing", "Nonmissing"];

/// Raw counters of a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissingnessCounters {
	/// Match events recorded during the session.
	pub match_events: usize,
	/// Rows with at least one match event.
	pub matched_rows: usize,
	/// Rows in the host column.
	pub total_rows: usize,
}

impl MissingnessCounters {
	pub fn matched(&self) -> usize {
		self.match_events
	}

	/// `total_rows - match_events`.
	pub fn non_matched(&self) -> i64 {
		self.total_rows as i64 - self.match_events as i64
	}

	pub fn unmatched_rows(&self) -> usize {
		self.total_rows - self.matched_rows
	}

	/// The `(non_matched, matched)` pair.
	pub fn pair(&self) -> (i64, usize) {
		(self.non_matched(), self.matched())
	}
}

/// Session-scoped missingness state owned by a [`MatchingEngine`](crate::MatchingEngine).
#[derive(Debug, Clone, Default)]
pub struct MissingnessTracker {
	counters: MissingnessCounters,
	column_types: Vec<(String, CellType)>,
	finished: bool,
}

impl MissingnessTracker {
	pub fn new() -> Self {
		Self::default()
	}

	/// Zeroes the counters and forgets any finished session.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	pub(crate) fn finish(&mut self, counters: MissingnessCounters, column_types: Vec<(String, CellType)>) {
		self.counters = counters;
		self.column_types = column_types;
		self.finished = true;
	}

	/// Whether a session has finished since construction or the last reset.
	pub fn has_session(&self) -> bool {
		self.finished
	}

	/// Counters of the last session.
	pub fn counters(&self) -> Result<MissingnessCounters> {
		if !self.finished {
			return Err(MatchError::Precondition("no join or replace has run since the counters were reset".into()));
		}
		Ok(self.counters)
	}

	/// Summarizes the last session.
	///
	/// Fails with [`MatchError::Precondition`] when no session has run or
	/// the session left the non-matched slot at zero, and with
	/// [`MatchError::EmptyResultAmbiguity`] when nothing matched.
	pub fn summary(&self) -> Result<Summary> {
		let counters = self.counters()?;
		if counters.matched() == 0 {
			return Err(MatchError::EmptyResultAmbiguity);
		}
		if counters.non_matched() == 0 {
			return Err(MatchError::Precondition("the last session recorded no missing records".into()));
		}

		let missing_share_of_total = if counters.total_rows == 0 {
			0.0
		} else {
			counters.unmatched_rows() as f64 / counters.total_rows as f64 * 100.0
		};

		Ok(Summary {
			column_types: self.column_types.clone(),
			total_records: counters.total_rows,
			matched: counters.matched(),
			non_matched: counters.non_matched(),
			missing_percentage: counters.non_matched() as f64 / counters.matched() as f64 * 100.0,
			matched_rows: counters.matched_rows,
			unmatched_rows: counters.unmatched_rows(),
			missing_share_of_total,
		})
	}
}

/// Missingness report for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
	/// Host table dtypes at the end of the session.
	pub column_types: Vec<(String, CellType)>,
	pub total_records: usize,
	/// Match events.
	pub matched: usize,
	/// `total_records - matched`; negative when events exceed rows.
	pub non_matched: i64,
	/// `non_matched / matched * 100`. Divides by the matched count, not the
	/// total.
	pub missing_percentage: f64,
	/// Rows with at least one match.
	pub matched_rows: usize,
	/// Rows with no match.
	pub unmatched_rows: usize,
	/// `unmatched_rows / total_records * 100`.
	pub missing_share_of_total: f64,
}

impl Summary {
	/// Bar heights for a missingness chart, labelled by [`BAR_LABELS`].
	pub fn bars(&self) -> [(&'static str, i64); 2] {
		[(BAR_LABELS[0], self.non_matched), (BAR_LABELS[1], self.matched as i64)]
	}
}

impl fmt::Display for Summary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Data Types:")?;
		for (name, ty) in &self.column_types {
			writeln!(f, "  {name}: {ty}")?;
		}
		writeln!(f, "Number of records: {}", self.total_records)?;
		writeln!(f, "Number of matches: {}", self.matched)?;
		writeln!(f, "Number of missing records: {}", self.non_matched)?;
		write!(f, "Percentage of missing records: {:.2}", self.missing_percentage)
	}
}
