//! Alternative lineups under other objectives.

use super::config::OptimizerConfig;
use super::optimizer::Optimizer;
use crate::model::{Candidate, ConstraintSet, Lineup, RosterTemplate};
use crate::scoring::{Objective, Score, StrategyProfile};
use crate::validate::effective_constraints;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// A lineup built under a different objective, compared to the primary.
#[derive(Debug, Clone)]
pub struct AlternativeLineup {
    pub label: String,
    pub objective: Objective,
    pub lineup: Lineup,
    pub score: Score,
    /// Primary players kept out of this lineup.
    pub excluded: Vec<String>,
    /// Projected points minus the primary's.
    pub points_delta: f64,
    /// Salary minus the primary's.
    pub salary_delta: i64,
    /// Average ownership minus the primary's, in percentage points.
    pub ownership_delta: f64,
}

/// Highest-projected primary players that may be excluded, best first.
fn exclusions(primary: &Lineup, locked: &BTreeSet<String>, n: usize) -> Vec<String> {
    let mut players: Vec<&Candidate> = primary
        .candidates()
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| !locked.contains(&c.id))
        .collect();
    players.sort_by(|a, b| b.points().total_cmp(&a.points()).then_with(|| a.id.cmp(&b.id)));
    players.into_iter().take(n).map(|c| c.id.clone()).collect()
}

impl Optimizer {
    /// Re-optimizes under each alternative objective with the primary's
    /// top players excluded, so every alternative differs in at least
    /// [`OptimizerConfig::alternative_exclusions`] picks.
    ///
    /// Objectives that find no lineup are omitted. At most
    /// `max_alternatives` are returned, in [`Objective::ALTERNATIVES`]
    /// order.
    ///
    /// `deadline` bounds the whole call: each run gets what the earlier
    /// runs left over, and no run starts once it is spent.
    pub fn generate_alternatives(
        &self,
        candidates: &[Candidate],
        template: &RosterTemplate,
        constraints: &ConstraintSet,
        primary: &Lineup,
        max_alternatives: usize,
        deadline: Option<Duration>,
    ) -> Vec<AlternativeLineup> {
        let locked = effective_constraints(candidates, constraints).locked;
        let excluded = exclusions(primary, &locked, self.config().alternative_exclusions);
        let augmented = constraints.clone().with_excluded(excluded.iter().cloned());
        let profile = StrategyProfile::default();

        let start = Instant::now();
        let mut out = Vec::new();
        for (objective, label) in Objective::ALTERNATIVES {
            if out.len() >= max_alternatives {
                break;
            }
            let remaining = deadline.map(|d| d.saturating_sub(start.elapsed()));
            if remaining.is_some_and(|r| r.is_zero()) {
                tracing::debug!(found = out.len(), "alternative budget spent");
                break;
            }
            match self.optimize(candidates, template, &augmented, objective, &profile, remaining) {
                Ok(best) => {
                    out.push(AlternativeLineup {
                        label: label.to_string(),
                        objective,
                        points_delta: best.lineup.total_points() - primary.total_points(),
                        salary_delta: best.lineup.total_salary() as i64
                            - primary.total_salary() as i64,
                        ownership_delta: best.lineup.average_ownership()
                            - primary.average_ownership(),
                        excluded: excluded.clone(),
                        lineup: best.lineup,
                        score: best.score,
                    });
                }
                Err(err) => {
                    tracing::debug!(%objective, error = %err, "alternative omitted");
                }
            }
        }
        out
    }
}

/// Generates alternatives with [`OptimizerConfig::default`].
///
/// Returns an empty list when the configuration is invalid.
pub fn generate_alternatives(
    candidates: &[Candidate],
    template: &RosterTemplate,
    constraints: &ConstraintSet,
    primary: &Lineup,
    max_alternatives: usize,
) -> Vec<AlternativeLineup> {
    match Optimizer::new(OptimizerConfig::default()) {
        Ok(optimizer) => optimizer.generate_alternatives(
            candidates,
            template,
            constraints,
            primary,
            max_alternatives,
            None,
        ),
        Err(err) => {
            tracing::warn!(error = %err, "cannot build optimizer for alternatives");
            Vec::new()
        }
    }
}
