//! Indexed, read-only candidate pool shared across worker threads.

use super::candidate::{Candidate, Platform, Position};
use super::lineup::Lineup;
use super::roster::SlotSpec;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Candidates addressed by index, with salaries resolved for one
/// platform and per-position groups sorted by descending projection.
///
/// Searches work on `usize` indices into the pool and only materialize
/// a [`Lineup`] when scoring or returning a result.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    candidates: Vec<Arc<Candidate>>,
    salaries: Vec<u32>,
    platform: Platform,
    by_position: BTreeMap<Position, Vec<usize>>,
}

impl CandidatePool {
    pub fn new<I>(candidates: I, platform: Platform) -> Self
    where
        I: IntoIterator<Item = Candidate>,
    {
        Self::from_shared(candidates.into_iter().map(Arc::new).collect(), platform)
    }

    pub fn from_shared(candidates: Vec<Arc<Candidate>>, platform: Platform) -> Self {
        let salaries = candidates.iter().map(|c| c.salary(platform)).collect();
        let mut by_position: BTreeMap<Position, Vec<usize>> = BTreeMap::new();
        for (i, c) in candidates.iter().enumerate() {
            by_position.entry(c.position).or_default().push(i);
        }
        for group in by_position.values_mut() {
            group.sort_by(|&a, &b| by_projection(&candidates[a], &candidates[b]));
        }
        Self {
            candidates,
            salaries,
            platform,
            by_position,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn get(&self, index: usize) -> &Arc<Candidate> {
        &self.candidates[index]
    }

    pub fn candidates(&self) -> &[Arc<Candidate>] {
        &self.candidates
    }

    pub fn salary(&self, index: usize) -> u32 {
        self.salaries[index]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.candidates.iter().position(|c| c.id == id)
    }

    /// Indices at `position`, best projection first.
    pub fn by_position(&self, position: Position) -> &[usize] {
        self.by_position
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Indices eligible for `spec`, best projection first.
    pub fn eligible(&self, spec: &SlotSpec) -> Vec<usize> {
        let mut out: Vec<usize> = spec
            .positions
            .iter()
            .flat_map(|&p| self.by_position(p).iter().copied())
            .collect();
        if spec.is_flexible() {
            out.sort_by(|&a, &b| by_projection(&self.candidates[a], &self.candidates[b]));
        }
        out
    }

    /// Summed salary of `picks`.
    pub fn total_salary(&self, picks: &[usize]) -> u64 {
        picks.iter().map(|&i| self.salaries[i] as u64).sum()
    }

    /// Builds a lineup from indices in slot order.
    pub fn lineup(&self, picks: &[usize]) -> Lineup {
        Lineup::new(
            picks.iter().map(|&i| Arc::clone(&self.candidates[i])).collect(),
            self.platform,
        )
    }
}

/// Descending projection, then ascending id.
fn by_projection(a: &Candidate, b: &Candidate) -> Ordering {
    b.points()
        .total_cmp(&a.points())
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_sorted_by_projection() {
        let pool = CandidatePool::new(
            vec![
                Candidate::new("wr-low", Position::WR, "A", 3_000, 5.0),
                Candidate::new("te", Position::TE, "A", 3_000, 9.0),
                Candidate::new("wr-high", Position::WR, "B", 8_000, 20.0),
                Candidate::new("rb", Position::RB, "C", 6_000, 12.0),
            ],
            Platform::DraftKings,
        );
        let wrs: Vec<&str> = pool
            .by_position(Position::WR)
            .iter()
            .map(|&i| pool.get(i).id.as_str())
            .collect();
        assert_eq!(wrs, ["wr-high", "wr-low"]);
        assert!(pool.by_position(Position::DST).is_empty());

        let flex = SlotSpec::flex("FLEX", &[Position::RB, Position::WR, Position::TE], 1);
        let order: Vec<&str> = pool
            .eligible(&flex)
            .iter()
            .map(|&i| pool.get(i).id.as_str())
            .collect();
        assert_eq!(order, ["wr-high", "rb", "te", "wr-low"]);
        assert_eq!(pool.total_salary(&[0, 1]), 6_000);
    }
}
