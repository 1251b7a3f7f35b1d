//! GA working representation of a lineup.

use super::types::Individual;
use crate::model::{CandidatePool, Lineup};
use crate::validate::Violation;

/// Candidate indices aligned to the roster template's slots.
///
/// Fitness stays `None` until evaluated. `violations` is empty when the
/// decoded lineup is valid. A chromosome never leaves a run: the best one
/// is converted with [`Chromosome::to_lineup`].
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<usize>,
    fitness: Option<f64>,
    violations: Vec<Violation>,
}

impl Chromosome {
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: None,
            violations: Vec::new(),
        }
    }

    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Mutable genes. Clears the cached evaluation.
    pub fn genes_mut(&mut self) -> &mut [usize] {
        self.fitness = None;
        self.violations.clear();
        &mut self.genes
    }

    pub fn evaluated(&self) -> Option<f64> {
        self.fitness
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub(crate) fn set_evaluation(&mut self, fitness: f64, violations: Vec<Violation>) {
        self.fitness = Some(fitness);
        self.violations = violations;
    }

    pub fn contains(&self, index: usize) -> bool {
        self.genes.contains(&index)
    }

    pub fn to_lineup(&self, pool: &CandidatePool) -> Lineup {
        pool.lineup(&self.genes)
    }
}

impl Individual for Chromosome {
    fn fitness(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }
}
