//! Error taxonomy for lineup optimization.
//!
//! Only [`OptimizationError`] crosses the public API boundary. Per-unit
//! scoring failures ([`ScoreError`]) are swallowed by the evaluators and
//! surface only as counters in run statistics.

use std::time::Duration;
use thiserror::Error;

/// Reason an optimization run produced no lineup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizationError {
    /// Malformed template, constraint set, profile or algorithm config.
    ///
    /// Detected before any search begins. Never retried.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// No valid lineup exists under the given candidates and constraints.
    ///
    /// A normal outcome: callers are expected to relax constraints.
    #[error("no feasible lineup: {0}")]
    Infeasible(String),

    /// The deadline expired before a single valid lineup was found.
    #[error("deadline expired after {elapsed:?} before any valid lineup was found")]
    DeadlineExceeded {
        /// Wall-clock time spent before giving up.
        elapsed: Duration,
    },
}

impl OptimizationError {
    /// Returns `true` for [`OptimizationError::Infeasible`].
    pub fn is_infeasible(&self) -> bool {
        matches!(self, OptimizationError::Infeasible(_))
    }

    /// Returns `true` for [`OptimizationError::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, OptimizationError::Configuration(_))
    }
}

/// A single lineup could not be scored.
///
/// Treated as an invalid unit (fitness = negative infinity); the
/// surrounding search continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// A candidate reached the scorer without a point projection.
    #[error("candidate {id} has no point projection")]
    MissingProjection {
        /// Candidate identifier.
        id: String,
    },

    /// A candidate carries a NaN or infinite number.
    #[error("candidate {id} has a non-finite {field}")]
    NonFinite {
        /// Candidate identifier.
        id: String,
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Result alias for optimizer entry points.
pub type Result<T> = std::result::Result<T, OptimizationError>;
