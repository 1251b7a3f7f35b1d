//! Strategy weight profiles.
//!
//! A [`StrategyProfile`] is a named, immutable weighting of the scoring
//! terms plus per-position multipliers. Profiles are supplied by
//! configuration; the presets below cover the usual contest strategies.

use crate::model::Position;
use std::collections::BTreeMap;
use std::fmt;

/// Weights over scoring terms.
///
/// All weights are non-negative except `ownership`: the ownership term is
/// `100 − average ownership`, so a positive weight rewards low-owned
/// (contrarian) lineups and a negative weight rewards chalk.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    pub projection: f64,
    pub floor: f64,
    pub ceiling: f64,
    pub value: f64,
    pub ownership: f64,
    pub consistency: f64,
    pub upside: f64,
    pub matchup: f64,
    pub correlation: f64,
    pub variance_penalty: f64,
}

impl ScoreWeights {
    /// Every weight zero.
    pub fn zero() -> Self {
        Self {
            projection: 0.0,
            floor: 0.0,
            ceiling: 0.0,
            value: 0.0,
            ownership: 0.0,
            consistency: 0.0,
            upside: 0.0,
            matchup: 0.0,
            correlation: 0.0,
            variance_penalty: 0.0,
        }
    }

    fn named(&self) -> [(&'static str, f64); 10] {
        [
            ("projection", self.projection),
            ("floor", self.floor),
            ("ceiling", self.ceiling),
            ("value", self.value),
            ("ownership", self.ownership),
            ("consistency", self.consistency),
            ("upside", self.upside),
            ("matchup", self.matchup),
            ("correlation", self.correlation),
            ("variance_penalty", self.variance_penalty),
        ]
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        StrategyProfile::balanced().weights
    }
}

/// Named contest strategies with preset profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    MaxPoints,
    MaxValue,
    LowOwnership,
    Contrarian,
    Safe,
    Gpp,
    CashGame,
    #[default]
    Balanced,
    Conservative,
    Aggressive,
}

impl Strategy {
    pub const ALL: [Strategy; 10] = [
        Strategy::MaxPoints,
        Strategy::MaxValue,
        Strategy::LowOwnership,
        Strategy::Contrarian,
        Strategy::Safe,
        Strategy::Gpp,
        Strategy::CashGame,
        Strategy::Balanced,
        Strategy::Conservative,
        Strategy::Aggressive,
    ];

    /// Preset profile for this strategy.
    pub fn profile(self) -> StrategyProfile {
        let w = ScoreWeights::zero();
        match self {
            Strategy::MaxPoints => StrategyProfile::new(
                "max_points",
                ScoreWeights {
                    projection: 1.0,
                    ..w
                },
            ),
            Strategy::MaxValue => StrategyProfile::new(
                "max_value",
                ScoreWeights {
                    projection: 0.3,
                    value: 0.7,
                    ..w
                },
            ),
            Strategy::LowOwnership => StrategyProfile::new(
                "low_ownership",
                ScoreWeights {
                    projection: 0.4,
                    value: 0.2,
                    ownership: 0.4,
                    ..w
                },
            ),
            Strategy::Contrarian => StrategyProfile::new(
                "contrarian",
                ScoreWeights {
                    projection: 0.3,
                    value: 0.2,
                    ownership: 0.5,
                    ..w
                },
            ),
            Strategy::Safe => StrategyProfile::new(
                "safe",
                ScoreWeights {
                    projection: 0.5,
                    value: 0.2,
                    floor: 0.3,
                    ..w
                },
            ),
            Strategy::Gpp => StrategyProfile::new(
                "gpp",
                ScoreWeights {
                    projection: 0.4,
                    value: 0.2,
                    ownership: 0.2,
                    ceiling: 0.2,
                    ..w
                },
            ),
            Strategy::CashGame => StrategyProfile::new(
                "cash_game",
                ScoreWeights {
                    projection: 0.5,
                    value: 0.2,
                    floor: 0.3,
                    ownership: -0.1,
                    consistency: 0.2,
                    ..w
                },
            ),
            Strategy::Balanced => StrategyProfile::balanced(),
            Strategy::Conservative => StrategyProfile::conservative(),
            Strategy::Aggressive => StrategyProfile::aggressive(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A named set of term weights plus per-position multipliers.
///
/// # Examples
///
/// ```
/// use u_lineup::model::Position;
/// use u_lineup::scoring::{Strategy, StrategyProfile};
///
/// let p = StrategyProfile::aggressive();
/// assert!(p.weights.ownership > 0.0); // contrarian lean
/// assert_eq!(p.multiplier(Position::WR), 1.3);
/// assert!(Strategy::Safe.profile().validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyProfile {
    pub name: String,
    pub weights: ScoreWeights,
    /// Missing positions default to 1.0.
    pub position_multipliers: BTreeMap<Position, f64>,
}

impl StrategyProfile {
    /// A profile with neutral (1.0) position multipliers.
    pub fn new(name: impl Into<String>, weights: ScoreWeights) -> Self {
        Self {
            name: name.into(),
            weights,
            position_multipliers: BTreeMap::new(),
        }
    }

    pub fn with_multiplier(mut self, position: Position, multiplier: f64) -> Self {
        self.position_multipliers.insert(position, multiplier);
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Even emphasis on floor, projection and ceiling; slight contrarian lean.
    pub fn balanced() -> Self {
        Self::new(
            "balanced",
            ScoreWeights {
                projection: 0.4,
                floor: 0.3,
                ceiling: 0.3,
                value: 0.25,
                ownership: 0.05,
                consistency: 0.25,
                upside: 0.25,
                matchup: 0.3,
                correlation: 0.2,
                variance_penalty: 0.5,
            },
        )
        .with_multiplier(Position::RB, 1.05)
        .with_multiplier(Position::K, 0.95)
    }

    /// Floor-first, low variance, leans toward chalk.
    pub fn conservative() -> Self {
        Self::new(
            "conservative",
            ScoreWeights {
                projection: 0.4,
                floor: 0.5,
                ceiling: 0.1,
                value: 0.2,
                ownership: -0.1,
                consistency: 0.4,
                upside: 0.1,
                matchup: 0.3,
                correlation: 0.1,
                variance_penalty: 0.9,
            },
        )
        .with_multiplier(Position::QB, 1.1)
        .with_multiplier(Position::WR, 0.9)
        .with_multiplier(Position::TE, 1.05)
        .with_multiplier(Position::K, 1.2)
        .with_multiplier(Position::DST, 1.1)
    }

    /// Ceiling-first, high variance, contrarian.
    pub fn aggressive() -> Self {
        Self::new(
            "aggressive",
            ScoreWeights {
                projection: 0.3,
                floor: 0.2,
                ceiling: 0.5,
                value: 0.3,
                ownership: 0.2,
                consistency: 0.1,
                upside: 0.4,
                matchup: 0.4,
                correlation: 0.3,
                variance_penalty: 0.1,
            },
        )
        .with_multiplier(Position::QB, 1.2)
        .with_multiplier(Position::RB, 0.9)
        .with_multiplier(Position::WR, 1.3)
        .with_multiplier(Position::TE, 1.1)
        .with_multiplier(Position::K, 0.8)
        .with_multiplier(Position::DST, 1.1)
    }

    /// Multiplier for `position`.
    pub fn multiplier(&self, position: Position) -> f64 {
        self.position_multipliers
            .get(&position)
            .copied()
            .unwrap_or(1.0)
    }

    /// Validates the profile.
    pub fn validate(&self) -> Result<(), String> {
        for (name, w) in self.weights.named() {
            if !w.is_finite() {
                return Err(format!("{} weight {name} is not finite", self.name));
            }
            if w < 0.0 && name != "ownership" {
                return Err(format!("{} weight {name} must be non-negative", self.name));
            }
        }
        let w = &self.weights;
        if w.projection + w.floor + w.ceiling <= 0.0 {
            return Err(format!(
                "{}: at least one of projection, floor, ceiling must be weighted",
                self.name
            ));
        }
        for (p, m) in &self.position_multipliers {
            if !m.is_finite() || *m <= 0.0 {
                return Err(format!("{} multiplier for {p} must be positive", self.name));
            }
        }
        Ok(())
    }
}

impl Default for StrategyProfile {
    fn default() -> Self {
        Self::balanced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_valid() {
        for s in Strategy::ALL {
            let p = s.profile();
            assert!(p.validate().is_ok(), "{s} preset invalid: {:?}", p.validate());
        }
    }

    #[test]
    fn test_validate_rejects_bad_weights() {
        let p = StrategyProfile::new(
            "bad",
            ScoreWeights {
                value: -0.1,
                projection: 1.0,
                ..ScoreWeights::zero()
            },
        );
        assert!(p.validate().unwrap_err().contains("value"));

        let p = StrategyProfile::new("empty", ScoreWeights::zero());
        assert!(p.validate().is_err());

        let p = StrategyProfile::balanced().with_multiplier(Position::QB, 0.0);
        assert!(p.validate().is_err());

        let p = StrategyProfile::new(
            "chalk",
            ScoreWeights {
                ownership: -0.5,
                projection: 1.0,
                ..ScoreWeights::zero()
            },
        );
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_multiplier_defaults_to_one() {
        let p = StrategyProfile::balanced();
        assert_eq!(p.multiplier(Position::QB), 1.0);
        assert_eq!(p.multiplier(Position::RB), 1.05);
    }
}
