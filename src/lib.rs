//! Salary-capped lineup optimization.
//!
//! Selects a roster of candidates that fills every slot of a
//! [`RosterTemplate`](model::RosterTemplate), respects a salary cap and
//! roster constraints, and maximizes a configurable objective:
//!
//! - **Validation** ([`validate`]): pure checks used to pre-filter
//!   candidates and to reject assembled lineups.
//! - **Search space** ([`search`]): lazy, salary-pruned enumeration of
//!   top-K bounded combinations, plus a closed-form size estimate.
//! - **Scoring** ([`scoring`]): projection, value, ownership, floor,
//!   ceiling, correlation and variance terms blended per objective.
//! - **Brute force** ([`brute`]): parallel batched evaluation with a
//!   deterministic tie-break.
//! - **Genetic algorithm** ([`ga`]): projection-biased evolution for
//!   spaces too large to enumerate.
//! - **Engine** ([`engine`]): routing by estimated size, alternatives
//!   under other objectives, recommendations, injury replacements and
//!   waiver targets.
//!
//! # Architecture
//!
//! The crate is a function-call API with no I/O. Candidates arrive from
//! an external data source; lineups and assessments go back to the
//! caller. Scoring and validation share no mutable state, so every
//! search runs its work units on a rayon pool without locks.
//!
//! ```
//! use u_lineup::model::{Candidate, ConstraintSet, Position, RosterTemplate};
//! use u_lineup::scoring::{Objective, StrategyProfile};
//!
//! let mut candidates = Vec::new();
//! for (pos, n) in [(Position::QB, 3), (Position::RB, 5), (Position::WR, 6),
//!                  (Position::TE, 3), (Position::DST, 3)] {
//!     for i in 0..n {
//!         let salary = 4_000 + 500 * i as u32;
//!         candidates.push(Candidate::new(format!("{pos}{i}"), pos, "FA", salary, 8.0 + i as f64));
//!     }
//! }
//! let best = u_lineup::optimize(
//!     &candidates,
//!     &RosterTemplate::classic(),
//!     &ConstraintSet::new(50_000),
//!     Objective::MaximizePoints,
//!     &StrategyProfile::default(),
//!     None,
//! )
//! .unwrap();
//! assert!(best.lineup.total_salary() <= 50_000);
//! assert_eq!(best.lineup.len(), 9);
//! ```

pub mod brute;
pub mod engine;
pub mod error;
pub mod ga;
pub mod model;
pub mod random;
pub mod scoring;
pub mod search;
pub mod validate;

#[cfg(test)]
mod testing;

pub use engine::{
    find_injury_replacements, find_replacements, generate_alternatives, optimize, recommend,
    AlternativeLineup, Optimized, Optimizer, OptimizerConfig, WaiverTarget,
};
pub use error::{OptimizationError, ScoreError};
