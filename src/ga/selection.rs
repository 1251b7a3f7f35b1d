//! Parent selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::Rng;

/// Selection strategy for choosing parents. Higher fitness is better.
///
/// ```
/// use u_lineup::ga::Selection;
///
/// let sel = Selection::Tournament(5);
/// assert_eq!(sel, Selection::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Pick `k` individuals at random (with replacement), keep the best.
    ///
    /// Higher `k` means stronger selection pressure.
    Tournament(usize),

    /// Linear ranking: the best of `n` gets weight `n`, the worst weight 1.
    ///
    /// Insensitive to the scale of fitness values, so infeasible
    /// (negative infinity) members still get a small chance.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(5)
    }
}

impl Selection {
    /// Select a parent index from a non-empty population.
    ///
    /// Returns 0 for an empty population.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        if population.len() <= 1 {
            return 0;
        }
        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

fn rank<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    let mut indexed: Vec<usize> = (0..n).collect();
    // best first, stable on index
    indexed.sort_by(|&a, &b| {
        population[b]
            .fitness()
            .total_cmp(&population[a].fitness())
    });

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (rank, &idx) in indexed.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return idx;
        }
    }
    indexed[n - 1]
}
