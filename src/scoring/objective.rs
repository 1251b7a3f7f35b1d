//! Optimization objectives.

use super::profile::ScoreWeights;
use super::scorer::ScoreTerms;
use std::fmt;

/// Scale applied to the value term so points-per-$1K sits on a range
/// comparable to raw points.
pub const VALUE_SCALE: f64 = 10.0;

/// The metric a search maximizes.
///
/// Single-term objectives take one component of [`ScoreTerms`] as the
/// fitness; [`Objective::Balanced`] blends every term with the active
/// profile's weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    /// Σ projected points.
    MaximizePoints,
    /// Points per $1,000 of salary.
    MaximizeValue,
    /// 100 − average ownership.
    MinimizeOwnership,
    /// Σ ceiling.
    MaximizeCeiling,
    /// Σ floor.
    MaximizeFloor,
    /// Weighted blend of all terms.
    #[default]
    Balanced,
}

impl Objective {
    /// Objectives tried by the alternative generator, with their labels.
    pub const ALTERNATIVES: [(Objective, &'static str); 4] = [
        (Objective::MaximizeValue, "Value-focused alternative"),
        (Objective::MinimizeOwnership, "Low-ownership contrarian play"),
        (Objective::MaximizeCeiling, "High-ceiling tournament play"),
        (Objective::MaximizeFloor, "Safe cash game play"),
    ];

    /// Whether the profile's weights and position multipliers apply.
    pub fn uses_profile(self) -> bool {
        matches!(self, Objective::Balanced)
    }

    /// Signed contribution of each term to the final scalar.
    ///
    /// The scalar fitness is the sum of the returned components.
    pub fn contributions(self, terms: &ScoreTerms, weights: &ScoreWeights) -> ScoreTerms {
        match self {
            Objective::MaximizePoints => ScoreTerms {
                projection: terms.projection,
                ..ScoreTerms::default()
            },
            Objective::MaximizeValue => ScoreTerms {
                value: terms.value * VALUE_SCALE,
                ..ScoreTerms::default()
            },
            Objective::MinimizeOwnership => ScoreTerms {
                ownership: terms.ownership,
                ..ScoreTerms::default()
            },
            Objective::MaximizeCeiling => ScoreTerms {
                ceiling: terms.ceiling,
                ..ScoreTerms::default()
            },
            Objective::MaximizeFloor => ScoreTerms {
                floor: terms.floor,
                ..ScoreTerms::default()
            },
            Objective::Balanced => blend(terms, weights),
        }
    }
}

fn blend(terms: &ScoreTerms, w: &ScoreWeights) -> ScoreTerms {
    ScoreTerms {
        projection: terms.projection * w.projection,
        value: terms.value * VALUE_SCALE * w.value,
        ownership: terms.ownership * w.ownership,
        ceiling: terms.ceiling * w.ceiling,
        floor: terms.floor * w.floor,
        consistency: terms.consistency * w.consistency,
        upside: terms.upside * w.upside,
        matchup: terms.matchup * w.matchup,
        correlation: terms.correlation * w.correlation,
        variance_penalty: -terms.variance_penalty * w.variance_penalty,
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Objective::MaximizePoints => "maximize_points",
            Objective::MaximizeValue => "maximize_value",
            Objective::MinimizeOwnership => "minimize_ownership",
            Objective::MaximizeCeiling => "maximize_ceiling",
            Objective::MaximizeFloor => "maximize_floor",
            Objective::Balanced => "balanced",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms() -> ScoreTerms {
        ScoreTerms {
            projection: 100.0,
            value: 2.0,
            ownership: 80.0,
            ceiling: 130.0,
            floor: 70.0,
            consistency: 70.0,
            upside: 130.0,
            matchup: 4.0,
            correlation: 2.0,
            variance_penalty: 1.0,
        }
    }

    #[test]
    fn test_single_term_objectives_ignore_weights() {
        let w = ScoreWeights::default();
        let t = terms();
        assert_eq!(Objective::MaximizePoints.contributions(&t, &w).total(), 100.0);
        assert_eq!(Objective::MaximizeValue.contributions(&t, &w).total(), 20.0);
        assert_eq!(Objective::MinimizeOwnership.contributions(&t, &w).total(), 80.0);
        assert_eq!(Objective::MaximizeCeiling.contributions(&t, &w).total(), 130.0);
        assert_eq!(Objective::MaximizeFloor.contributions(&t, &w).total(), 70.0);
    }

    #[test]
    fn test_balanced_subtracts_variance() {
        let w = ScoreWeights {
            projection: 1.0,
            variance_penalty: 2.0,
            ..ScoreWeights::zero()
        };
        let c = Objective::Balanced.contributions(&terms(), &w);
        assert_eq!(c.variance_penalty, -2.0);
        assert_eq!(c.total(), 98.0);
    }

    #[test]
    fn test_negative_ownership_weight_prefers_chalk() {
        let chalk = ScoreWeights {
            ownership: -1.0,
            projection: 1.0,
            ..ScoreWeights::zero()
        };
        let mut low_owned = terms();
        low_owned.ownership = 90.0;
        let mut high_owned = terms();
        high_owned.ownership = 60.0;
        assert!(
            Objective::Balanced.contributions(&high_owned, &chalk).total()
                > Objective::Balanced.contributions(&low_owned, &chalk).total()
        );
    }
}
