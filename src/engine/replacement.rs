//! Same-position replacements for an injured player.

use crate::model::{Candidate, ConstraintSet};
use crate::scoring::ProjectionEstimates;
use crate::validate::validate_candidate;
use std::collections::BTreeMap;

/// Lowest consistency factor a candidate can receive.
const MIN_CONSISTENCY: f64 = 0.5;

/// A ranked replacement candidate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Replacement {
    pub candidate: Candidate,
    /// `point_delta × matchup_factor × consistency_factor`.
    pub score: f64,
    /// Replacement projection minus the injured player's.
    pub point_delta: f64,
    pub matchup_factor: f64,
    pub consistency_factor: f64,
}

/// `floor / projection`, at least [`MIN_CONSISTENCY`]; 1.0 with no
/// positive projection.
pub(super) fn consistency_factor(c: &Candidate, estimates: &ProjectionEstimates) -> f64 {
    let projection = c.points();
    if projection > 0.0 {
        (c.floor_or(estimates.floor_ratio) / projection).max(MIN_CONSISTENCY)
    } else {
        1.0
    }
}

/// Ranks same-position candidates that could stand in for `injured`.
///
/// Only candidates passing the pre-filter under `constraints` are
/// considered. Ties rank by id.
///
/// ```
/// use u_lineup::engine::find_replacements;
/// use u_lineup::model::{Candidate, ConstraintSet, Matchup, Position};
///
/// let injured = Candidate::new("a", Position::WR, "KC", 7_000, 15.0);
/// let pool = vec![
///     injured.clone(),
///     Candidate::new("b", Position::WR, "BUF", 6_000, 14.0),
///     Candidate::new("c", Position::WR, "MIA", 6_500, 14.0).with_matchup(Matchup::Favorable),
///     Candidate::new("d", Position::RB, "SF", 5_000, 20.0),
/// ];
/// let ranked = find_replacements(&injured, &pool, &ConstraintSet::new(50_000), 5);
/// let ids: Vec<&str> = ranked.iter().map(|r| r.candidate.id.as_str()).collect();
/// assert_eq!(ids, ["b", "c"]);
/// ```
pub fn find_replacements(
    injured: &Candidate,
    candidates: &[Candidate],
    constraints: &ConstraintSet,
    max_replacements: usize,
) -> Vec<Replacement> {
    let estimates = ProjectionEstimates::default();
    let mut ranked: Vec<Replacement> = candidates
        .iter()
        .filter(|c| c.position == injured.position && c.id != injured.id)
        .filter(|c| validate_candidate(c, constraints).is_empty())
        .map(|c| {
            let point_delta = c.points() - injured.points();
            let matchup_factor = c.matchup.factor();
            let consistency_factor = consistency_factor(c, &estimates);
            Replacement {
                candidate: c.clone(),
                score: point_delta * matchup_factor * consistency_factor,
                point_delta,
                matchup_factor,
                consistency_factor,
            }
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.candidate.id.cmp(&b.candidate.id))
    });
    ranked.truncate(max_replacements);
    tracing::debug!(
        injured = %injured.id,
        found = ranked.len(),
        "replacements ranked"
    );
    ranked
}

/// Runs [`find_replacements`] for every injured player.
///
/// Keyed by injured id. A player listed twice is ranked once.
pub fn find_injury_replacements(
    injured: &[Candidate],
    candidates: &[Candidate],
    constraints: &ConstraintSet,
    max_replacements: usize,
) -> BTreeMap<String, Vec<Replacement>> {
    let mut out = BTreeMap::new();
    for player in injured {
        if !out.contains_key(&player.id) {
            let ranked = find_replacements(player, candidates, constraints, max_replacements);
            out.insert(player.id.clone(), ranked);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InjuryStatus, Matchup, Position};

    fn wr(id: &str, pts: f64) -> Candidate {
        Candidate::new(id, Position::WR, "KC", 5_000, pts)
    }

    #[test]
    fn test_ranking_factors() {
        let injured = wr("out", 12.0).with_injury(InjuryStatus::Out);
        let pool = vec![
            injured.clone(),
            wr("steady", 14.0).with_floor(12.6),
            wr("boom", 14.0).with_floor(2.0),
            wr("soft", 14.0).with_matchup(Matchup::Favorable),
            wr("hurt", 20.0).with_injury(InjuryStatus::Doubtful),
        ];
        let ranked = find_replacements(&injured, &pool, &ConstraintSet::new(50_000), 10);
        let ids: Vec<&str> = ranked.iter().map(|r| r.candidate.id.as_str()).collect();
        // soft: 2 × 1.2 × 0.7, steady: 2 × 1.0 × 0.9, boom: 2 × 1.0 × 0.5
        assert_eq!(ids, ["steady", "soft", "boom"]);
        assert_eq!(ranked[2].consistency_factor, MIN_CONSISTENCY);
        assert!((ranked[1].score - 1.68).abs() < 1e-9);
    }

    #[test]
    fn test_respects_constraints_and_limit() {
        let injured = wr("a", 10.0);
        let pool = vec![wr("b", 9.0), wr("c", 11.0), wr("d", 12.0), wr("e", 8.0)];
        let constraints = ConstraintSet::new(50_000).with_excluded(["d"]);
        let ranked = find_replacements(&injured, &pool, &constraints, 2);
        let ids: Vec<&str> = ranked.iter().map(|r| r.candidate.id.as_str()).collect();
        assert_eq!(ids, ["c", "b"]);
        assert!(ranked[1].point_delta < 0.0);
    }

    #[test]
    fn test_batch_keys_by_injured_id() {
        let hurt_wr = wr("hurt_wr", 12.0).with_injury(InjuryStatus::Out);
        let hurt_te = Candidate::new("hurt_te", Position::TE, "KC", 4_000, 9.0)
            .with_injury(InjuryStatus::IR);
        let pool = vec![
            hurt_wr.clone(),
            hurt_te.clone(),
            wr("a", 13.0),
            wr("b", 11.0),
            wr("c", 10.0),
            Candidate::new("t", Position::TE, "SF", 4_000, 8.0),
        ];
        let injured = [hurt_wr.clone(), hurt_te, hurt_wr];
        let map = find_injury_replacements(&injured, &pool, &ConstraintSet::new(50_000), 2);
        assert_eq!(map.len(), 2);
        let wr_ids: Vec<&str> = map["hurt_wr"].iter().map(|r| r.candidate.id.as_str()).collect();
        assert_eq!(wr_ids, ["a", "b"]);
        assert_eq!(map["hurt_te"].len(), 1);
        assert!(find_injury_replacements(&[], &pool, &ConstraintSet::new(50_000), 2).is_empty());
    }

    #[test]
    fn test_no_same_position_candidates() {
        let injured = Candidate::new("k", Position::K, "KC", 4_000, 8.0);
        assert!(find_replacements(&injured, &[wr("w", 10.0)], &ConstraintSet::new(50_000), 3).is_empty());
    }
}
