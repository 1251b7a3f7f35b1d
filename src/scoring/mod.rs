//! Multi-objective lineup scoring.
//!
//! A lineup is reduced to a set of raw [`ScoreTerms`] (projection, floor,
//! ceiling, value, ownership, consistency, upside, matchup, correlation,
//! variance penalty). The [`Objective`] then either picks a single term or,
//! for [`Objective::Balanced`], blends all of them with the weights of a
//! [`StrategyProfile`].
//!
//! Scoring is pure: every call recomputes from the lineup and the active
//! profile, so one [`Scorer`] can be shared across any number of worker
//! threads.
//!
//! # Infeasibility
//!
//! [`Scorer::score`] validates the lineup first. A lineup with any
//! violation scores negative infinity regardless of objective, so it can
//! never win a comparison against a feasible one.

mod objective;
mod profile;
mod scorer;

pub use objective::{Objective, VALUE_SCALE};
pub use profile::{ScoreWeights, Strategy, StrategyProfile};
pub use scorer::{
    evaluate_terms, score, ProjectionEstimates, Score, ScoreTerms, Scorer, RB_DST_PENALTY,
    STACK_BONUS, TEAM_VARIANCE_STEP, TEAM_VARIANCE_THRESHOLD,
};
