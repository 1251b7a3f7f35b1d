//! Genetic algorithm.
//!
//! A generic evolutionary loop ([`GaRunner`]) driven by the [`GaProblem`]
//! trait, and its lineup instantiation ([`LineupProblem`]) used when the
//! search space is too large to enumerate.
//!
//! Fitness is maximized. Infeasible individuals carry negative infinity,
//! so they lose every selection tournament against a feasible one.
//!
//! # Key Types
//!
//! - [`GaConfig`]: population size, rates, selection, stagnation, seed
//! - [`GaRunner`]: the double-buffered generational loop
//! - [`Chromosome`]: slot-aligned candidate indices plus cached evaluation
//! - [`LineupProblem`]: projection-biased initialization, uniform
//!   crossover with duplicate repair, salary-aware mutation
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod chromosome;
mod config;
pub mod operators;
mod problem;
mod runner;
mod selection;
mod types;

pub use chromosome::Chromosome;
pub use config::GaConfig;
pub use problem::LineupProblem;
pub use runner::{GaError, GaResult, GaRunner};
pub use selection::Selection;
pub use types::{GaProblem, Individual};
