//! Lineups: one candidate per roster slot.

use super::candidate::{Candidate, Platform};
use super::roster::RosterTemplate;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// An assignment of one candidate to each roster slot, in template order.
///
/// Totals are always derived from the assignment; nothing is cached.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lineup {
    picks: Vec<Arc<Candidate>>,
    platform: Platform,
}

impl Lineup {
    pub fn new(picks: Vec<Arc<Candidate>>, platform: Platform) -> Self {
        Self { picks, platform }
    }

    /// Candidates in slot order.
    pub fn candidates(&self) -> &[Arc<Candidate>] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Candidate ids in slot order.
    pub fn ids(&self) -> Vec<&str> {
        self.picks.iter().map(|c| c.id.as_str()).collect()
    }

    /// Pairs each slot label with its candidate.
    pub fn assignments<'t>(
        &self,
        template: &'t RosterTemplate,
    ) -> Vec<(&'t str, &Candidate)> {
        template
            .slots()
            .into_iter()
            .zip(self.picks.iter())
            .map(|(spec, c)| (spec.label.as_str(), c.as_ref()))
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.picks.iter().any(|c| c.id == id)
    }

    /// Whether any candidate id appears more than once.
    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.picks.len());
        !self.picks.iter().all(|c| seen.insert(c.id.as_str()))
    }

    /// Number of candidate ids shared with `other`.
    pub fn shared_with(&self, other: &Lineup) -> usize {
        let theirs: HashSet<&str> = other.picks.iter().map(|c| c.id.as_str()).collect();
        self.picks
            .iter()
            .filter(|c| theirs.contains(c.id.as_str()))
            .count()
    }

    /// Summed salary, widened so large pools cannot overflow.
    pub fn total_salary(&self) -> u64 {
        self.picks
            .iter()
            .map(|c| u64::from(c.salary(self.platform)))
            .sum()
    }

    /// Cap minus total salary; negative when over the cap.
    pub fn salary_remaining(&self, cap: u32) -> i64 {
        cap as i64 - self.total_salary() as i64
    }

    pub fn total_points(&self) -> f64 {
        self.picks.iter().map(|c| c.points()).sum()
    }

    /// Σ floor, estimating missing floors as `ratio × projection`.
    pub fn total_floor(&self, ratio: f64) -> f64 {
        self.picks.iter().map(|c| c.floor_or(ratio)).sum()
    }

    /// Σ ceiling, estimating missing ceilings as `ratio × projection`.
    pub fn total_ceiling(&self, ratio: f64) -> f64 {
        self.picks.iter().map(|c| c.ceiling_or(ratio)).sum()
    }

    /// Projected points per $1,000 of salary.
    pub fn salary_efficiency(&self) -> f64 {
        let salary = self.total_salary();
        if salary == 0 {
            return 0.0;
        }
        self.total_points() / (salary as f64 / 1000.0)
    }

    /// Summed ownership percentage.
    pub fn total_ownership(&self) -> f64 {
        self.picks.iter().map(|c| c.ownership_or_default()).sum()
    }

    /// Mean ownership percentage.
    pub fn average_ownership(&self) -> f64 {
        if self.picks.is_empty() {
            return 0.0;
        }
        self.total_ownership() / self.picks.len() as f64
    }

    /// Players per team.
    pub fn team_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for c in &self.picks {
            *counts.entry(c.team.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Teams with at least `min_players` in the lineup.
    pub fn stacked_teams(&self, min_players: usize) -> Vec<&str> {
        self.team_counts()
            .into_iter()
            .filter(|&(_, n)| n >= min_players)
            .map(|(team, _)| team)
            .collect()
    }
}

impl PartialEq for Lineup {
    fn eq(&self, other: &Self) -> bool {
        self.platform == other.platform
            && self.picks.len() == other.picks.len()
            && self
                .picks
                .iter()
                .zip(other.picks.iter())
                .all(|(a, b)| a.id == b.id)
    }
}
