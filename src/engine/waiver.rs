//! Waiver targets ranked by their effect on the best lineup.

use super::optimizer::Optimizer;
use super::replacement::consistency_factor;
use crate::error::Result;
use crate::model::{Candidate, ConstraintSet, RosterTemplate};
use crate::scoring::{Objective, StrategyProfile};
use std::collections::HashSet;

/// Number of targets [`Optimizer::rank_waiver_targets`] returns.
pub const WAIVER_TARGETS: usize = 20;

/// Highest upside factor a candidate can receive.
const MAX_UPSIDE: f64 = 2.0;

/// An available player ranked by lineup impact.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaiverTarget {
    pub candidate: Candidate,
    /// `point_gain × upside_factor × consistency_factor`.
    pub score: f64,
    /// Best lineup points with the player minus without.
    pub point_gain: f64,
    /// `ceiling / projection`, at most 2.0.
    pub upside_factor: f64,
    pub consistency_factor: f64,
}

/// `ceiling / projection`, capped at [`MAX_UPSIDE`]. A missing ceiling
/// counts as the projection itself.
fn upside_factor(c: &Candidate) -> f64 {
    let projection = c.points();
    if projection > 0.0 {
        (c.ceiling.unwrap_or(projection) / projection).min(MAX_UPSIDE)
    } else {
        1.0
    }
}

impl Optimizer {
    /// Ranks `available` players by how much adding each one to `roster`
    /// improves the best points lineup.
    ///
    /// Players already on the roster are skipped. A roster that cannot
    /// field a lineup on its own counts as zero points, so a player who
    /// completes it gains the whole lineup. Returns at most
    /// [`WAIVER_TARGETS`] targets, highest score first, ties by id.
    ///
    /// # Errors
    ///
    /// Configuration errors from the roster-only run. Infeasibility is not
    /// an error.
    pub fn rank_waiver_targets(
        &self,
        available: &[Candidate],
        roster: &[Candidate],
        template: &RosterTemplate,
        constraints: &ConstraintSet,
    ) -> Result<Vec<WaiverTarget>> {
        let profile = StrategyProfile::default();
        let best_points = |candidates: &[Candidate]| -> Result<f64> {
            match self.optimize(
                candidates,
                template,
                constraints,
                Objective::MaximizePoints,
                &profile,
                None,
            ) {
                Ok(best) => Ok(best.lineup.total_points()),
                Err(err) if err.is_infeasible() => Ok(0.0),
                Err(err) => Err(err),
            }
        };

        let baseline = best_points(roster)?;
        let rostered: HashSet<&str> = roster.iter().map(|c| c.id.as_str()).collect();
        let estimates = &self.config().estimates;

        let mut extended = roster.to_vec();
        let mut ranked = Vec::new();
        for c in available.iter().filter(|c| !rostered.contains(c.id.as_str())) {
            extended.push(c.clone());
            let point_gain = match best_points(&extended) {
                Ok(points) => points - baseline,
                Err(err) => {
                    tracing::warn!(id = %c.id, error = %err, "waiver impact not evaluated");
                    0.0
                }
            };
            extended.pop();

            let upside_factor = upside_factor(c);
            let consistency_factor = consistency_factor(c, estimates);
            ranked.push(WaiverTarget {
                candidate: c.clone(),
                score: point_gain * upside_factor * consistency_factor,
                point_gain,
                upside_factor,
                consistency_factor,
            });
        }
        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.candidate.id.cmp(&b.candidate.id))
        });
        ranked.truncate(WAIVER_TARGETS);
        tracing::debug!(
            evaluated = available.len(),
            baseline,
            kept = ranked.len(),
            "waiver targets ranked"
        );
        Ok(ranked)
    }
}
