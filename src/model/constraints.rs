//! Lineup construction constraints.

use super::candidate::Platform;
use std::collections::BTreeSet;

/// Salary cap, team limits, locks and exclusions for one search.
///
/// Candidate-level `locked`/`excluded` tags are honored in addition to
/// the id sets held here.
///
/// # Builder Pattern
///
/// ```
/// use u_lineup::model::ConstraintSet;
///
/// let c = ConstraintSet::new(50_000)
///     .with_max_players_per_team(4)
///     .with_locked(["mahomes"])
///     .with_excluded(["kelce"]);
/// assert!(c.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintSet {
    pub salary_cap: u32,
    pub platform: Platform,
    /// Minimum fraction of the cap a lineup must spend (0.0–1.0).
    pub min_salary_usage: Option<f64>,
    pub max_players_per_team: Option<usize>,
    /// Maximum combined (summed) ownership percentage.
    pub max_total_ownership: Option<f64>,
    pub locked: BTreeSet<String>,
    pub excluded: BTreeSet<String>,
}

impl ConstraintSet {
    pub fn new(salary_cap: u32) -> Self {
        Self {
            salary_cap,
            platform: Platform::default(),
            min_salary_usage: None,
            max_players_per_team: None,
            max_total_ownership: None,
            locked: BTreeSet::new(),
            excluded: BTreeSet::new(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_min_salary_usage(mut self, fraction: f64) -> Self {
        self.min_salary_usage = Some(fraction);
        self
    }

    pub fn with_max_players_per_team(mut self, n: usize) -> Self {
        self.max_players_per_team = Some(n);
        self
    }

    pub fn with_max_total_ownership(mut self, pct: f64) -> Self {
        self.max_total_ownership = Some(pct);
        self
    }

    pub fn with_locked<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locked.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_excluded<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Lowest total salary a lineup may spend.
    pub fn min_salary(&self) -> u32 {
        match self.min_salary_usage {
            Some(f) => (self.salary_cap as f64 * f) as u32,
            None => 0,
        }
    }

    /// Checks the constraint set is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        if self.salary_cap == 0 {
            return Err("salary_cap must be positive".into());
        }
        if let Some(f) = self.min_salary_usage {
            if !(0.0..=1.0).contains(&f) {
                return Err("min_salary_usage must be within 0.0..=1.0".into());
            }
        }
        if self.max_players_per_team == Some(0) {
            return Err("max_players_per_team must be at least 1".into());
        }
        if let Some(o) = self.max_total_ownership {
            if !o.is_finite() || o < 0.0 {
                return Err("max_total_ownership must be a non-negative number".into());
            }
        }
        if let Some(id) = self.locked.intersection(&self.excluded).next() {
            return Err(format!("player {id} is both locked and excluded"));
        }
        Ok(())
    }
}
