//! Deterministic record linkage against a synonym lookup.
//!
//! A reference table supplies linking keys and their synonyms
//! ([`SynonymLookup`]). A [`MatchingEngine`] then either annotates a host
//! table with the key each record matches ([`MatchingEngine::join_exact`],
//! [`MatchingEngine::join_substring`]) or rewrites matched records to their
//! keys ([`MatchingEngine::replace_exact`],
//! [`MatchingEngine::replace_substring`]). Each call is one session whose
//! missingness counters feed [`MatchingEngine::summary`].
//!
//! ```
//! use clearmatch_matcher::{MatchingEngine, SynonymLookup};
//! use clearmatch_primitives::{Cell, Table};
//!
//! let reference = Table::from_rows(
//! 	["key", "a", "b", "c"],
//! 	[vec![Cell::str("US"), Cell::str("USA"), Cell::str("United States"), Cell::str("U.S.")]],
//! )?;
//! let lookup = SynonymLookup::build(&reference, 0, 1..4)?;
//!
//! let mut host = Table::from_rows(["host"], [[Cell::str("USA")], [Cell::str("Canada")], [Cell::str("U.S.")]])?;
//! let mut engine = MatchingEngine::new(lookup, 0);
//! let matches = engine.join_exact(&mut host)?;
//! assert_eq!(matches.cells(), &[Cell::str("US"), Cell::Null, Cell::str("US")]);
//! assert_eq!(engine.counters()?.pair(), (1, 2));
//! # Ok::<(), clearmatch_matcher::MatchError>(())
//! ```

/// Matcher configuration and match modes.
pub mod config;
/// The matching engine.
pub mod engine;
/// Error types.
pub mod error;
/// Synonym lookup construction.
pub mod lookup;
/// Row partitioning.
pub mod partition;
/// Missingness counters and summaries.
pub mod tracker;

pub use config::{Containment, DEFAULT_MATCH_COLUMN, DEFAULT_PARTIAL_MATCH_COLUMN, MatchConfig, MatchMode};
pub use engine::MatchingEngine;
pub use error::{MatchError, Result};
pub use lookup::SynonymLookup;
pub use partition::{Partitions, partition_by};
pub use tracker::{BAR_LABELS, MissingnessCounters, MissingnessTracker, Summary};
