//! Search space generation.
//!
//! Groups pre-filtered candidates by position, cuts each group to its
//! best projections, and enumerates salary-feasible lineups lazily.
//!
//! # Key Types
//!
//! - [`SearchConfig`]: per-position top-K bounds and flex breadth
//! - [`SearchSpace`]: the bounded space; [`SearchSpace::lineups`] walks it
//! - [`estimate_size`]: closed-form size of the unbounded space, for routing

mod combinations;
mod config;
mod space;

pub use combinations::{combinations, n_choose_k};
pub use config::SearchConfig;
pub use space::{check_coverage, estimate_size, Lineups, SearchSpace};
