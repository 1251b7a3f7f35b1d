//! Search space configuration.

use crate::model::Position;
use std::collections::BTreeMap;

/// Bounds the branching factor of the enumeration.
///
/// Each position group is cut to its `top_k` best projections before
/// combinations are formed; locked candidates are always kept.
///
/// # Defaults
///
/// ```
/// use u_lineup::model::Position;
/// use u_lineup::search::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.top_k_for(Position::QB), 5);
/// assert_eq!(config.top_k_for(Position::WR), 15);
/// assert_eq!(config.flex_top_k, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Maximum candidates kept per position.
    pub top_k: BTreeMap<Position, usize>,

    /// Unused flex-eligible candidates tried per core combination.
    pub flex_top_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let top_k = [
            (Position::QB, 5),
            (Position::RB, 10),
            (Position::WR, 15),
            (Position::TE, 8),
            (Position::K, 5),
            (Position::DST, 5),
        ]
        .into_iter()
        .collect();
        Self {
            top_k,
            flex_top_k: 3,
        }
    }
}

impl SearchConfig {
    /// No top-K bound on any position. Only practical for small pools.
    pub fn unbounded() -> Self {
        Self {
            top_k: Position::ALL.iter().map(|&p| (p, usize::MAX)).collect(),
            flex_top_k: usize::MAX,
        }
    }

    /// Sets the bound for one position.
    pub fn with_top_k(mut self, position: Position, k: usize) -> Self {
        self.top_k.insert(position, k);
        self
    }

    /// Sets the same bound for every position.
    pub fn with_uniform_top_k(mut self, k: usize) -> Self {
        for p in Position::ALL {
            self.top_k.insert(p, k);
        }
        self
    }

    /// Sets the number of flex options tried per core combination.
    pub fn with_flex_top_k(mut self, k: usize) -> Self {
        self.flex_top_k = k;
        self
    }

    /// Bound for `position`; positions without an entry are unbounded.
    pub fn top_k_for(&self, position: Position) -> usize {
        self.top_k.get(&position).copied().unwrap_or(usize::MAX)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some((p, _)) = self.top_k.iter().find(|(_, &k)| k == 0) {
            return Err(format!("top_k for {p} must be at least 1"));
        }
        if self.flex_top_k == 0 {
            return Err("flex_top_k must be at least 1".into());
        }
        Ok(())
    }
}
