//! Data model: candidates, roster templates, constraints and lineups.
//!
//! Candidates are supplied by an external data source and never mutated.
//! A [`CandidatePool`] indexes them for the search components; a
//! [`Lineup`] is the only structure returned to callers.

mod candidate;
mod constraints;
mod lineup;
mod pool;
mod roster;

pub use candidate::{
    Candidate, InjuryStatus, Matchup, Platform, Position, Salaries, DEFAULT_OWNERSHIP,
    DEFAULT_SALARY,
};
pub use constraints::ConstraintSet;
pub use lineup::Lineup;
pub use pool::CandidatePool;
pub use roster::{RosterTemplate, SlotSpec};
