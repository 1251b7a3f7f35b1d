//! Lineup scoring.

use super::objective::Objective;
use super::profile::StrategyProfile;
use crate::error::ScoreError;
use crate::model::{Candidate, ConstraintSet, Lineup, Position, RosterTemplate};
use crate::validate::validate_lineup;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Bonus per same-team QB and pass-catcher pair.
pub const STACK_BONUS: f64 = 2.0;
/// Penalty per same-team RB and DST pair.
pub const RB_DST_PENALTY: f64 = 1.0;
/// Players from one team beyond which the variance penalty grows.
pub const TEAM_VARIANCE_THRESHOLD: usize = 3;
/// Penalty per player above [`TEAM_VARIANCE_THRESHOLD`].
pub const TEAM_VARIANCE_STEP: f64 = 0.5;

/// Ratios used to estimate floor and ceiling when a candidate has none.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionEstimates {
    pub floor_ratio: f64,
    pub ceiling_ratio: f64,
}

impl Default for ProjectionEstimates {
    fn default() -> Self {
        Self {
            floor_ratio: 0.7,
            ceiling_ratio: 1.3,
        }
    }
}

impl ProjectionEstimates {
    pub fn validate(&self) -> Result<(), String> {
        if !self.floor_ratio.is_finite() || self.floor_ratio < 0.0 {
            return Err("floor_ratio must be finite and non-negative".into());
        }
        if !self.ceiling_ratio.is_finite() || self.ceiling_ratio < self.floor_ratio {
            return Err("ceiling_ratio must be finite and at least floor_ratio".into());
        }
        Ok(())
    }
}

/// Raw (unweighted) scoring terms of one lineup.
///
/// Also used for the signed per-term contributions of a [`Score`], whose
/// sum is the scalar fitness.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreTerms {
    pub projection: f64,
    pub floor: f64,
    pub ceiling: f64,
    /// Points per $1,000 of salary.
    pub value: f64,
    /// 100 − average ownership.
    pub ownership: f64,
    pub consistency: f64,
    pub upside: f64,
    pub matchup: f64,
    pub correlation: f64,
    pub variance_penalty: f64,
}

impl ScoreTerms {
    pub fn total(&self) -> f64 {
        self.projection
            + self.floor
            + self.ceiling
            + self.value
            + self.ownership
            + self.consistency
            + self.upside
            + self.matchup
            + self.correlation
            + self.variance_penalty
    }
}

/// Scalar fitness with its itemized components.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    /// Scalar fitness; negative infinity for an infeasible lineup.
    pub value: f64,
    pub terms: ScoreTerms,
    pub contributions: ScoreTerms,
    /// Σ floor (with estimates), the first tie-breaker.
    pub total_floor: f64,
    pub feasible: bool,
}

impl Score {
    pub fn infeasible() -> Self {
        Self {
            value: f64::NEG_INFINITY,
            terms: ScoreTerms::default(),
            contributions: ScoreTerms::default(),
            total_floor: f64::NEG_INFINITY,
            feasible: false,
        }
    }

    /// Orders by value, then total floor. `Greater` means better.
    pub fn rank(&self, other: &Score) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then_with(|| self.total_floor.total_cmp(&other.total_floor))
    }
}

fn finite(c: &Candidate, field: &'static str, v: f64) -> Result<f64, ScoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ScoreError::NonFinite {
            id: c.id.clone(),
            field,
        })
    }
}

/// Computes the raw terms of `lineup`.
///
/// Position multipliers of `profile` scale each player's projection,
/// floor and ceiling only when the objective blends by profile.
pub fn evaluate_terms(
    lineup: &Lineup,
    objective: Objective,
    profile: &StrategyProfile,
    estimates: &ProjectionEstimates,
) -> Result<ScoreTerms, ScoreError> {
    let mut t = ScoreTerms::default();
    let mut ownership = 0.0;

    for c in by_id(lineup) {
        let raw = c.projection.ok_or_else(|| ScoreError::MissingProjection {
            id: c.id.clone(),
        })?;
        let raw = finite(c, "projection", raw)?;
        let floor = finite(c, "floor", c.floor_or(estimates.floor_ratio))?;
        let ceiling = finite(c, "ceiling", c.ceiling_or(estimates.ceiling_ratio))?;
        ownership += finite(c, "ownership", c.ownership_or_default())?;

        let m = if objective.uses_profile() {
            profile.multiplier(c.position)
        } else {
            1.0
        };
        let proj = raw * m;
        t.projection += proj;
        t.floor += floor * m;
        t.ceiling += ceiling * m;

        if raw > 0.0 {
            t.consistency += proj * (floor / raw).max(0.5);
            t.upside += proj * (ceiling / raw).min(2.0);
        }
        t.matchup += proj * (c.matchup.factor() - 1.0);
    }

    let salary = lineup.total_salary();
    if salary > 0 {
        t.value = t.projection / (salary as f64 / 1000.0);
    }
    if !lineup.is_empty() {
        t.ownership = 100.0 - ownership / lineup.len() as f64;
    }
    t.correlation = correlation(lineup);
    t.variance_penalty = team_variance(lineup);
    Ok(t)
}

/// Members in id order, so float sums do not depend on slot arrangement.
fn by_id(lineup: &Lineup) -> Vec<&Candidate> {
    let mut members: Vec<&Candidate> = lineup.candidates().iter().map(|c| c.as_ref()).collect();
    members.sort_by(|a, b| a.id.cmp(&b.id));
    members
}

/// Same-team QB/pass-catcher bonus minus same-team RB/DST penalty.
fn correlation(lineup: &Lineup) -> f64 {
    let mut by_team: BTreeMap<&str, [usize; 4]> = BTreeMap::new();
    for c in lineup.candidates() {
        let n = by_team.entry(c.team.as_str()).or_default();
        match c.position {
            Position::QB => n[0] += 1,
            p if p.is_pass_catcher() => n[1] += 1,
            Position::RB => n[2] += 1,
            Position::DST => n[3] += 1,
            _ => {}
        }
    }
    by_team
        .values()
        .map(|n| {
            STACK_BONUS * (n[0] * n[1]) as f64 - RB_DST_PENALTY * (n[2] * n[3]) as f64
        })
        .sum()
}

fn team_variance(lineup: &Lineup) -> f64 {
    lineup
        .team_counts()
        .values()
        .filter(|&&n| n > TEAM_VARIANCE_THRESHOLD)
        .map(|&n| (n - TEAM_VARIANCE_THRESHOLD) as f64 * TEAM_VARIANCE_STEP)
        .sum()
}

/// Scores `lineup` under `objective` without constraint checks.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_lineup::model::{Candidate, Lineup, Platform, Position};
/// use u_lineup::scoring::{score, Objective, StrategyProfile};
///
/// let lineup = Lineup::new(
///     vec![
///         Arc::new(Candidate::new("qb", Position::QB, "KC", 8_000, 22.0)),
///         Arc::new(Candidate::new("wr", Position::WR, "KC", 7_000, 18.0)),
///     ],
///     Platform::DraftKings,
/// );
/// let s = score(&lineup, Objective::MaximizePoints, &StrategyProfile::default()).unwrap();
/// assert_eq!(s.value, 40.0);
/// assert_eq!(s.terms.correlation, 2.0);
/// ```
pub fn score(
    lineup: &Lineup,
    objective: Objective,
    profile: &StrategyProfile,
) -> Result<Score, ScoreError> {
    score_with(lineup, objective, profile, &ProjectionEstimates::default())
}

fn score_with(
    lineup: &Lineup,
    objective: Objective,
    profile: &StrategyProfile,
    estimates: &ProjectionEstimates,
) -> Result<Score, ScoreError> {
    let terms = evaluate_terms(lineup, objective, profile, estimates)?;
    let contributions = objective.contributions(&terms, &profile.weights);
    Ok(Score {
        value: contributions.total(),
        terms,
        contributions,
        total_floor: by_id(lineup)
            .into_iter()
            .map(|c| c.floor_or(estimates.floor_ratio))
            .sum(),
        feasible: true,
    })
}

/// Scores lineups for one run: template, constraints, objective and
/// profile fixed. Shared by reference across worker threads.
#[derive(Debug, Clone)]
pub struct Scorer<'a> {
    template: &'a RosterTemplate,
    constraints: &'a ConstraintSet,
    objective: Objective,
    profile: &'a StrategyProfile,
    estimates: ProjectionEstimates,
}

impl<'a> Scorer<'a> {
    pub fn new(
        template: &'a RosterTemplate,
        constraints: &'a ConstraintSet,
        objective: Objective,
        profile: &'a StrategyProfile,
    ) -> Self {
        Self {
            template,
            constraints,
            objective,
            profile,
            estimates: ProjectionEstimates::default(),
        }
    }

    pub fn with_estimates(mut self, estimates: ProjectionEstimates) -> Self {
        self.estimates = estimates;
        self
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn template(&self) -> &RosterTemplate {
        self.template
    }

    pub fn constraints(&self) -> &ConstraintSet {
        self.constraints
    }

    pub fn estimates(&self) -> &ProjectionEstimates {
        &self.estimates
    }

    /// Validates then scores. Invalid lineups get [`Score::infeasible`].
    pub fn score(&self, lineup: &Lineup) -> Result<Score, ScoreError> {
        if !validate_lineup(lineup, self.template, self.constraints).is_empty() {
            return Ok(Score::infeasible());
        }
        self.score_unchecked(lineup)
    }

    /// Scores a lineup the caller has already validated.
    pub fn score_unchecked(&self, lineup: &Lineup) -> Result<Score, ScoreError> {
        score_with(lineup, self.objective, self.profile, &self.estimates)
    }
}
