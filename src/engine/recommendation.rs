//! Lineup recommendation with a structured assessment.

use super::alternatives::AlternativeLineup;
use super::config::OptimizerConfig;
use super::optimizer::{Optimized, Optimizer};
use crate::error::Result;
use crate::model::{Candidate, ConstraintSet, Lineup, RosterTemplate};
use crate::scoring::{Objective, ProjectionEstimates, Strategy};
use std::fmt;
use std::time::{Duration, Instant};

/// Average ownership above which a lineup fails to differentiate.
const CHALK_OWNERSHIP: f64 = 70.0;
/// Average ownership below which a lineup risks busting.
const FADE_OWNERSHIP: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskLevel {
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpsidePotential {
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloorAssessment {
    Volatile,
    Safe,
    VerySafe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContestType {
    CashGame,
    DoubleUp,
    FiftyFifty,
    Gpp,
    Tournament,
    LargeField,
    SmallFieldGpp,
}

impl ContestType {
    /// Contests suited to a strategy, most suitable first.
    pub fn for_strategy(strategy: Strategy) -> Vec<ContestType> {
        use ContestType::*;
        match strategy {
            Strategy::Safe | Strategy::CashGame => vec![CashGame, DoubleUp, FiftyFifty],
            Strategy::Gpp | Strategy::Contrarian => vec![Gpp, Tournament, LargeField],
            Strategy::Balanced => vec![CashGame, SmallFieldGpp],
            _ => vec![Gpp],
        }
    }
}

impl fmt::Display for ContestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContestType::CashGame => "Cash Games",
            ContestType::DoubleUp => "Double-ups",
            ContestType::FiftyFifty => "50/50s",
            ContestType::Gpp => "GPPs",
            ContestType::Tournament => "Tournaments",
            ContestType::LargeField => "Large-field contests",
            ContestType::SmallFieldGpp => "Small-field GPPs",
        };
        f.write_str(s)
    }
}

/// Derived attributes of a lineup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assessment {
    pub risk: RiskLevel,
    pub upside: UpsidePotential,
    pub floor: FloorAssessment,
    pub contests: Vec<ContestType>,
    /// Teams with at least two players, alphabetical.
    pub stacked_teams: Vec<String>,
    /// Points per $1,000 of salary.
    pub salary_efficiency: f64,
    pub salary_remaining: i64,
    pub projected_points: f64,
    pub average_ownership: f64,
}

/// Classifies a lineup for the given strategy.
///
/// ```
/// use std::sync::Arc;
/// use u_lineup::engine::{assess, FloorAssessment, RiskLevel, UpsidePotential};
/// use u_lineup::model::{Candidate, Lineup, Platform, Position};
/// use u_lineup::scoring::{ProjectionEstimates, Strategy};
///
/// let lineup = Lineup::new(
///     vec![
///         Arc::new(Candidate::new("a", Position::QB, "KC", 7_000, 20.0)
///             .with_floor(17.0).with_ceiling(30.0).with_ownership(20.0)),
///         Arc::new(Candidate::new("b", Position::WR, "KC", 6_000, 10.0)
///             .with_floor(8.0).with_ceiling(15.0).with_ownership(20.0)),
///     ],
///     Platform::DraftKings,
/// );
/// let a = assess(&lineup, Strategy::Gpp, 50_000, &ProjectionEstimates::default());
/// assert_eq!(a.risk, RiskLevel::High);
/// assert_eq!(a.upside, UpsidePotential::VeryHigh);
/// assert_eq!(a.floor, FloorAssessment::VerySafe);
/// assert_eq!(a.stacked_teams, vec!["KC".to_string()]);
/// ```
pub fn assess(
    lineup: &Lineup,
    strategy: Strategy,
    salary_cap: u32,
    estimates: &ProjectionEstimates,
) -> Assessment {
    let projected_points = lineup.total_points();
    let average_ownership = lineup.average_ownership();

    let risk = if !(FADE_OWNERSHIP..=CHALK_OWNERSHIP).contains(&average_ownership) {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    };

    let upside_ratio = if projected_points > 0.0 {
        lineup.total_ceiling(estimates.ceiling_ratio) / projected_points
    } else {
        1.0
    };
    let upside = if upside_ratio > 1.4 {
        UpsidePotential::VeryHigh
    } else if upside_ratio > 1.2 {
        UpsidePotential::High
    } else {
        UpsidePotential::Medium
    };

    let floor_ratio = if projected_points > 0.0 {
        lineup.total_floor(estimates.floor_ratio) / projected_points
    } else {
        estimates.floor_ratio
    };
    let floor = if floor_ratio > 0.8 {
        FloorAssessment::VerySafe
    } else if floor_ratio > 0.7 {
        FloorAssessment::Safe
    } else {
        FloorAssessment::Volatile
    };

    Assessment {
        risk,
        upside,
        floor,
        contests: ContestType::for_strategy(strategy),
        stacked_teams: lineup.stacked_teams(2).into_iter().map(String::from).collect(),
        salary_efficiency: lineup.salary_efficiency(),
        salary_remaining: lineup.salary_remaining(salary_cap),
        projected_points,
        average_ownership,
    }
}

/// Primary lineup for a strategy, its alternatives and assessment.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub strategy: Strategy,
    pub primary: Optimized,
    pub alternatives: Vec<AlternativeLineup>,
    pub assessment: Assessment,
}

impl Optimizer {
    /// Optimizes a balanced blend weighted by `strategy`'s profile, then
    /// adds up to `max_alternatives` alternatives and an assessment.
    ///
    /// `deadline` covers the primary run and every alternative together.
    ///
    /// # Errors
    ///
    /// Same as [`Optimizer::optimize`] for the primary lineup. Failed
    /// alternatives are omitted.
    pub fn recommend(
        &self,
        candidates: &[Candidate],
        template: &RosterTemplate,
        constraints: &ConstraintSet,
        strategy: Strategy,
        max_alternatives: usize,
        deadline: Option<Duration>,
    ) -> Result<Recommendation> {
        let start = Instant::now();
        let profile = strategy.profile();
        let primary = self.optimize(
            candidates,
            template,
            constraints,
            Objective::Balanced,
            &profile,
            deadline,
        )?;
        let alternatives = self.generate_alternatives(
            candidates,
            template,
            constraints,
            &primary.lineup,
            max_alternatives,
            deadline.map(|d| d.saturating_sub(start.elapsed())),
        );
        let assessment = assess(
            &primary.lineup,
            strategy,
            constraints.salary_cap,
            &self.config().estimates,
        );
        tracing::debug!(
            %strategy,
            alternatives = alternatives.len(),
            risk = ?assessment.risk,
            "recommendation built"
        );
        Ok(Recommendation {
            strategy,
            primary,
            alternatives,
            assessment,
        })
    }
}

/// Recommends with [`OptimizerConfig::default`] and up to four alternatives.
pub fn recommend(
    candidates: &[Candidate],
    template: &RosterTemplate,
    constraints: &ConstraintSet,
    strategy: Strategy,
    deadline: Option<Duration>,
) -> Result<Recommendation> {
    Optimizer::new(OptimizerConfig::default())?.recommend(
        candidates,
        template,
        constraints,
        strategy,
        Objective::ALTERNATIVES.len(),
        deadline,
    )
}
