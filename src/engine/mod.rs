//! Orchestration: routing, alternatives, recommendations, replacements
//! and waiver targets.
//!
//! [`Optimizer`] validates the inputs, pre-filters candidates and
//! estimates the size of the search space in closed form. Spaces up to
//! [`OptimizerConfig::threshold`] are enumerated exhaustively by the
//! brute-force evaluator; larger ones go to the genetic algorithm. The
//! threshold trades optimality for time; either path returns a valid
//! lineup whenever one exists.
//!
//! When a bounded enumeration finds nothing although the full space may
//! hold a lineup, the optimizer falls back to the genetic algorithm.
//!
//! # Key Types
//!
//! - [`OptimizerConfig`]: threshold, worker count, nested component configs
//! - [`Optimizer`]: owns the worker pool shared by every search it runs
//! - [`Optimized`]: the lineup, its score, the method and [`RunStats`]
//! - [`AlternativeLineup`]: a lineup under another objective with deltas
//! - [`Recommendation`]: primary lineup, alternatives and [`Assessment`]
//! - [`Replacement`]: a ranked stand-in for an injured player
//! - [`WaiverTarget`]: an available player ranked by lineup impact

mod alternatives;
mod config;
mod optimizer;
mod recommendation;
mod replacement;
mod waiver;

pub use alternatives::{generate_alternatives, AlternativeLineup};
pub use config::OptimizerConfig;
pub use optimizer::{optimize, Method, Optimized, Optimizer, RunStats};
pub use recommendation::{
    assess, recommend, Assessment, ContestType, FloorAssessment, Recommendation, RiskLevel,
    UpsidePotential,
};
pub use replacement::{find_injury_replacements, find_replacements, Replacement};
pub use waiver::{WaiverTarget, WAIVER_TARGETS};
