//! The matching engine.
//!
//! A [`MatchingEngine`] owns one [`SynonymLookup`], the index of the host
//! column it matches, a [`MatchConfig`], and the [`MissingnessTracker`] of
//! its sessions. Every join or replace call is one session: the tracker is
//! reset first, the host column and output columns are validated before any
//! write, and the counters are finalized at the end.
//!
//! Joins annotate, replaces rewrite:
//!
//! * joins write one key (or `Null`) per row into an output column; when
//!   several keys hit the same row, the last key in lookup order wins.
//! * replaces rewrite every cell equal to a matched record, anywhere in the
//!   table, to the key; unmatched values are left alone.

use std::borrow::Cow;

use clearmatch_primitives::{Cell, Column, Table};
use tracing::{debug, trace};

use crate::config::{MatchConfig, MatchMode};
use crate::error::{MatchError, Result};
use crate::lookup::SynonymLookup;
use crate::tracker::{MissingnessCounters, MissingnessTracker, Summary};

mod scan;

use scan::{ChunkScan, Predicate, scan_rows};


/// Links host records to reference keys through a synonym lookup.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
	lookup: SynonymLookup,
	host_column: usize,
	config: MatchConfig,
	tracker: MissingnessTracker,
}

impl MatchingEngine {
	/// Creates an engine matching column `host_column` of host tables.
	pub fn new(lookup: SynonymLookup, host_column: usize) -> Self {
		Self {
			lookup,
			host_column,
			config: MatchConfig::default(),
			tracker: MissingnessTracker::new(),
		}
	}

	/// Creates an engine with a validated `config`.
	pub fn with_config(lookup: SynonymLookup, host_column: usize, config: MatchConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self {
			config,
			..Self::new(lookup, host_column)
		})
	}

	pub fn lookup(&self) -> &SynonymLookup {
		&self.lookup
	}

	/// Replaces the lookup wholesale for subsequent sessions.
	pub fn set_lookup(&mut self, lookup: SynonymLookup) {
		self.lookup = lookup;
	}

	pub fn host_column(&self) -> usize {
		self.host_column
	}

	pub fn config(&self) -> &MatchConfig {
		&self.config
	}

	pub fn tracker(&self) -> &MissingnessTracker {
		&self.tracker
	}

	/// Zeroes the missingness counters.
	///
	/// Every join and replace calls this first, so counts never carry over
	/// between sessions.
	pub fn reset_counters(&mut self) {
		self.tracker.reset();
	}

	/// Counters of the last session.
	pub fn counters(&self) -> Result<MissingnessCounters> {
		self.tracker.counters()
	}

	/// Missingness summary of the last session.
	pub fn summary(&self) -> Result<Summary> {
		self.tracker.summary()
	}

	/// Annotates each row with the key whose synonyms contain the record
	/// verbatim, writing the match column. Unmatched rows get `Null`.
	pub fn join_exact<'t>(&mut self, host: &'t mut Table) -> Result<&'t Column> {
		self.join(host, MatchMode::Exact)
	}

	/// Annotates each row with the key whose synonyms contain the record as
	/// a substring, writing the partial match column.
	///
	/// A row whose match column already holds a key is neither annotated
	/// nor counted for that same key, but can still pick up another key.
	/// A missing match column is created as all-`Null` so the table always
	/// carries both outputs.
	pub fn join_substring<'t>(&mut self, host: &'t mut Table) -> Result<&'t Column> {
		self.tracker.reset();
		let match_column = self.config.match_column.clone();
		let partial_column = self.config.partial_match_column.clone();
		self.check_outputs(host, &[match_column.as_str(), partial_column.as_str()])?;

		if host.column_index(&match_column).is_none() {
			host.set_column(&match_column, vec![Cell::Null; host.row_count()])?;
		}

		let predicate = Predicate::new(MatchMode::Substring, self.config.containment);
		let records = host.column(self.host_column)?.cells();
		let existing = host.column_by_name(&match_column)?.cells();
		let scan = scan_rows(records, Some(existing), &self.lookup, predicate, &self.config);
		let (cells, counters) = annotation(&scan, host.row_count());

		host.set_column(&partial_column, cells)?;
		self.finish(host, counters, "join_substring");
		Ok(host.column_by_name(&partial_column)?)
	}

	/// Mode-switched join into the match column.
	///
	/// [`MatchMode::Substring`] applies the substring predicate but writes
	/// the match column, unlike [`MatchingEngine::join_substring`].
	pub fn join<'t>(&mut self, host: &'t mut Table, mode: MatchMode) -> Result<&'t Column> {
		self.tracker.reset();
		let match_column = self.config.match_column.clone();
		self.check_outputs(host, &[match_column.as_str()])?;

		let predicate = Predicate::new(mode, self.config.containment);
		let records = host.column(self.host_column)?.cells();
		let scan = scan_rows(records, None, &self.lookup, predicate, &self.config);
		let (cells, counters) = annotation(&scan, host.row_count());

		host.set_column(&match_column, cells)?;
		self.finish(host, counters, join_operation(mode));
		Ok(host.column_by_name(&match_column)?)
	}

	/// Rewrites every value equal to an exactly matched record to its key.
	pub fn replace_exact<'t>(&mut self, host: &'t mut Table) -> Result<&'t Column> {
		self.replace(host, MatchMode::Exact)
	}

	/// Rewrites every value equal to a substring-matched record to its key.
	pub fn replace_substring<'t>(&mut self, host: &'t mut Table) -> Result<&'t Column> {
		self.replace(host, MatchMode::Substring)
	}

	/// Mode-switched replace.
	///
	/// Records are read from a snapshot of the host column taken before any
	/// rewrite. Hits are applied in lookup order, then row order, and each
	/// rewrites matching cells across the whole table, so a later hit sees
	/// the effect of earlier ones. Returns the rewritten host column.
	pub fn replace<'t>(&mut self, host: &'t mut Table, mode: MatchMode) -> Result<&'t Column> {
		self.tracker.reset();
		host.check_column(self.host_column)?;

		let predicate = Predicate::new(mode, self.config.containment);
		let records = host.column(self.host_column)?.cells().to_vec();
		let texts: Vec<Option<Cow<'_, str>>> = records.iter().map(Cell::text).collect();
		let mut hit_rows = vec![false; records.len()];
		let mut match_events = 0;

		for (key, synonyms) in self.lookup.iter() {
			let replacement = Cell::str(key);
			for (row, record) in records.iter().enumerate() {
				let Some(text) = &texts[row] else {
					continue;
				};
				if !predicate.any(text, synonyms) {
					continue;
				}
				let rewritten = host.replace_value(record, &replacement);
				trace!(key, record = %record, rewritten, "rewrote matched value");
				match_events += 1;
				hit_rows[row] = true;
			}
		}

		let counters = MissingnessCounters {
			match_events,
			matched_rows: hit_rows.iter().filter(|&&hit| hit).count(),
			total_rows: records.len(),
		};
		self.finish(host, counters, replace_operation(mode));
		Ok(host.column(self.host_column)?)
	}

	/// Validates the host column and that no output would overwrite it.
	fn check_outputs(&self, host: &Table, outputs: &[&str]) -> Result<()> {
		let column = host.column(self.host_column)?;
		if let Some(output) = outputs.iter().find(|&&output| output == column.name()) {
			return Err(MatchError::InvalidInput(format!(
				"host column `{}` would be overwritten by the `{output}` output",
				column.name()
			)));
		}
		Ok(())
	}

	fn finish(&mut self, host: &Table, counters: MissingnessCounters, operation: &'static str) {
		debug!(
			operation,
			rows = counters.total_rows,
			keys = self.lookup.len(),
			events = counters.match_events,
			matched_rows = counters.matched_rows,
			"matching session finished"
		);
		self.tracker.finish(counters, host.column_types());
	}
}

fn annotation(scan: &ChunkScan<'_>, total_rows: usize) -> (Vec<Cell>, MissingnessCounters) {
	let cells = scan.outcomes.iter().map(|outcome| outcome.key.map_or(Cell::Null, Cell::str)).collect();
	let counters = MissingnessCounters {
		match_events: scan.events,
		matched_rows: scan.matched_rows(),
		total_rows,
	};
	(cells, counters)
}

fn join_operation(mode: MatchMode) -> &'static str {
	match mode {
		MatchMode::Exact => "join_exact",
		MatchMode::Substring => "join_contained",
	}
}

fn replace_operation(mode: MatchMode) -> &'static str {
	match mode {
		MatchMode::Exact => "replace_exact",
		MatchMode::Substring => "replace_substring",
	}
}
