use clearmatch_primitives::Cell;

use crate::config::{Containment, MatchConfig, MatchMode};
use crate::lookup::SynonymLookup;

/// Record/synonym comparison for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Predicate {
	mode: MatchMode,
	containment: Containment,
}

impl Predicate {
	pub fn new(mode: MatchMode, containment: Containment) -> Self {
		Self { mode, containment }
	}

	#[inline]
	pub fn holds(&self, record: &str, synonym: &str) -> bool {
		match (self.mode, self.containment) {
			(MatchMode::Exact, _) => record == synonym,
			(MatchMode::Substring, Containment::RecordInSynonym) => synonym.contains(record),
			(MatchMode::Substring, Containment::SynonymInRecord) => record.contains(synonym),
		}
	}

	#[inline]
	pub fn any(&self, record: &str, synonyms: &[String]) -> bool {
		synonyms.iter().any(|synonym| self.holds(record, synonym))
	}
}

/// Result of testing one row against every lookup entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RowOutcome<'a> {
	/// Last key, in lookup order, whose synonyms satisfied the predicate.
	pub key: Option<&'a str>,
	/// Keys whose synonyms satisfied the predicate.
	pub events: usize,
}

/// Outcomes for a run of consecutive rows plus their event total.
#[derive(Debug, Default)]
pub(crate) struct ChunkScan<'a> {
	pub outcomes: Vec<RowOutcome<'a>>,
	pub events: usize,
}

impl<'a> ChunkScan<'a> {
	pub fn matched_rows(&self) -> usize {
		self.outcomes.iter().filter(|outcome| outcome.events > 0).count()
	}

	#[cfg(feature = "parallel")]
	fn merge(mut self, next: ChunkScan<'a>) -> Self {
		self.outcomes.extend(next.outcomes);
		self.events += next.events;
		self
	}
}

/// Tests `record` against every entry of `lookup`.
///
/// Keys equal to `existing` (the row's prior annotation) are skipped and
/// not counted. `Null` records never match.
pub(crate) fn scan_row<'a>(record: &Cell, existing: Option<&Cell>, lookup: &'a SynonymLookup, predicate: Predicate) -> RowOutcome<'a> {
	let mut outcome = RowOutcome::default();
	let Some(text) = record.text() else {
		return outcome;
	};
	let existing = existing.and_then(Cell::as_str);

	for (key, synonyms) in lookup.iter() {
		if existing == Some(key) {
			continue;
		}
		if predicate.any(&text, synonyms) {
			outcome.key = Some(key);
			outcome.events += 1;
		}
	}
	outcome
}

fn scan_chunk<'a>(records: &[Cell], existing: Option<&[Cell]>, lookup: &'a SynonymLookup, predicate: Predicate) -> ChunkScan<'a> {
	let mut scan = ChunkScan {
		outcomes: Vec::with_capacity(records.len()),
		events: 0,
	};
	for (row, record) in records.iter().enumerate() {
		let outcome = scan_row(record, existing.and_then(|cells| cells.get(row)), lookup, predicate);
		scan.events += outcome.events;
		scan.outcomes.push(outcome);
	}
	scan
}

/// Scans every row, splitting the rows across workers when the config
/// allows it and there are enough of them.
///
/// Rows are independent given an immutable lookup, so chunked and
/// sequential scans produce identical outcomes.
pub(crate) fn scan_rows<'a>(
	records: &[Cell],
	existing: Option<&[Cell]>,
	lookup: &'a SynonymLookup,
	predicate: Predicate,
	config: &MatchConfig,
) -> ChunkScan<'a> {
	let threads = choose_thread_count(records.len(), config);

	#[cfg(feature = "parallel")]
	if threads > 1 {
		return parallel::scan_chunks(records, existing, lookup, predicate, threads);
	}
	#[cfg(not(feature = "parallel"))]
	let _ = threads;

	scan_chunk(records, existing, lookup, predicate)
}

fn choose_thread_count(rows: usize, config: &MatchConfig) -> usize {
	(rows / config.min_rows_per_thread.max(1)).clamp(1, config.threads.max(1))
}

#[cfg(feature = "parallel")]
mod parallel {
	use rayon::prelude::*;

	use super::*;

	/// Splits the rows into `threads` contiguous chunks scanned on the global
	/// rayon pool; the chunk count bounds the parallelism of one call.
	pub(super) fn scan_chunks<'a>(
		records: &[Cell],
		existing: Option<&[Cell]>,
		lookup: &'a SynonymLookup,
		predicate: Predicate,
		threads: usize,
	) -> ChunkScan<'a> {
		let chunk_len = records.len().div_ceil(threads).max(1);

		records
			.par_chunks(chunk_len)
			.enumerate()
			.map(|(index, chunk)| {
				let offset = index * chunk_len;
				let existing = existing.and_then(|cells| cells.get(offset..offset + chunk.len()));
				scan_chunk(chunk, existing, lookup, predicate)
			})
			.collect::<Vec<_>>()
			.into_iter()
			.fold(ChunkScan::default(), ChunkScan::merge)
	}
}
