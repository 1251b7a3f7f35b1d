//! Lineup construction as a GA problem.

use super::chromosome::Chromosome;
use super::operators::{duplicate_slots, uniform_crossover, uniform_pick, weighted_pick};
use super::types::GaProblem;
use crate::model::{CandidatePool, SlotSpec};
use crate::scoring::Scorer;
use crate::validate::validate_lineup;
use rand::seq::index;
use rand::Rng;

/// Draw weight given to candidates with zero or negative projections.
const MIN_DRAW_WEIGHT: f64 = 0.1;

/// Evolves lineups over a candidate pool.
///
/// Locked candidates are pinned to the first slot that accepts them
/// (fixed slots before flexible ones) and are never touched by mutation.
pub struct LineupProblem<'a> {
    pool: &'a CandidatePool,
    scorer: Scorer<'a>,
    specs: Vec<SlotSpec>,
    eligible: Vec<Vec<usize>>,
    cheapest: Vec<u64>,
    pinned: Vec<Option<usize>>,
    /// A locked candidate is missing or cannot be placed.
    unplaceable: bool,
    cap: u64,
}

impl<'a> LineupProblem<'a> {
    pub fn new(pool: &'a CandidatePool, scorer: Scorer<'a>) -> Self {
        let specs: Vec<SlotSpec> = scorer.template().slots().into_iter().cloned().collect();
        let eligible: Vec<Vec<usize>> = specs.iter().map(|s| pool.eligible(s)).collect();
        let cheapest = eligible
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|&i| pool.salary(i) as u64)
                    .min()
                    .unwrap_or(u64::MAX / 16)
            })
            .collect();

        let mut pinned = vec![None; specs.len()];
        let mut unplaceable = false;
        for id in &scorer.constraints().locked {
            let Some(index) = pool.index_of(id) else {
                unplaceable = true;
                continue;
            };
            let position = pool.get(index).position;
            let slot = (0..specs.len())
                .filter(|&s| pinned[s].is_none() && specs[s].accepts(position))
                .min_by_key(|&s| (specs[s].is_flexible(), s));
            match slot {
                Some(s) => pinned[s] = Some(index),
                None => unplaceable = true,
            }
        }

        let cap = scorer.constraints().salary_cap as u64;
        Self {
            pool,
            scorer,
            specs,
            eligible,
            cheapest,
            pinned,
            unplaceable,
            cap,
        }
    }

    pub fn pool(&self) -> &CandidatePool {
        self.pool
    }

    fn salary(&self, genes: &[usize]) -> u64 {
        self.pool.total_salary(genes)
    }

    /// One or two distinct unpinned slots to mutate.
    fn mutation_slots<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let free: Vec<usize> = (0..self.specs.len())
            .filter(|&s| self.pinned[s].is_none())
            .collect();
        if free.is_empty() {
            return Vec::new();
        }
        let count = rng.random_range(1..=2).min(free.len());
        index::sample(rng, free.len(), count)
            .into_iter()
            .map(|i| free[i])
            .collect()
    }

    /// Replaces repeated candidates, preferring unused genes of the parents.
    fn repair<R: Rng>(&self, genes: &mut [usize], parents: &[usize], rng: &mut R) {
        for s in duplicate_slots(genes) {
            if self.pinned[s].is_some() {
                continue;
            }
            let others: u64 = genes
                .iter()
                .enumerate()
                .filter(|&(t, _)| t != s)
                .map(|(_, &g)| self.pool.salary(g) as u64)
                .sum();
            let budget = self.cap.saturating_sub(others);
            let usable = |i: &usize| {
                !genes.contains(i)
                    && self.specs[s].accepts(self.pool.get(*i).position)
            };

            let mut from_parents: Vec<usize> = parents
                .iter()
                .copied()
                .filter(|i| usable(i) && self.pool.salary(*i) as u64 <= budget)
                .collect();
            from_parents.sort_unstable();
            from_parents.dedup();

            let pick = uniform_pick(&from_parents, rng).or_else(|| {
                let affordable: Vec<usize> = self.eligible[s]
                    .iter()
                    .copied()
                    .filter(|i| usable(i) && self.pool.salary(*i) as u64 <= budget)
                    .collect();
                uniform_pick(&affordable, rng).or_else(|| {
                    self.eligible[s]
                        .iter()
                        .copied()
                        .filter(|i| usable(i))
                        .min_by_key(|&i| (self.pool.salary(i), i))
                })
            });
            if let Some(i) = pick {
                genes[s] = i;
            }
        }
    }
}

impl GaProblem for LineupProblem<'_> {
    type Individual = Chromosome;

    /// Fills slots in template order, drawing each candidate with
    /// probability proportional to projection among the unused eligible
    /// candidates that still leave room for the cheapest fill of every
    /// remaining slot. Falls back to the cheapest unused candidate.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Option<Chromosome> {
        if self.unplaceable {
            return None;
        }
        let n = self.specs.len();
        let mut genes: Vec<Option<usize>> = self.pinned.clone();
        let mut spent: u64 = genes.iter().flatten().map(|&i| self.pool.salary(i) as u64).sum();

        for s in 0..n {
            if genes[s].is_some() {
                continue;
            }
            let reserve: u64 = (s + 1..n)
                .filter(|&t| genes[t].is_none())
                .map(|t| self.cheapest[t])
                .sum();
            let budget = self.cap.saturating_sub(spent.saturating_add(reserve));
            let unused: Vec<usize> = self.eligible[s]
                .iter()
                .copied()
                .filter(|i| !genes.contains(&Some(*i)))
                .collect();
            let affordable: Vec<usize> = unused
                .iter()
                .copied()
                .filter(|&i| self.pool.salary(i) as u64 <= budget)
                .collect();

            let pick = weighted_pick(
                &affordable,
                |i| self.pool.get(i).points(),
                MIN_DRAW_WEIGHT,
                rng,
            )
            .or_else(|| unused.iter().copied().min_by_key(|&i| (self.pool.salary(i), i)))?;
            spent += self.pool.salary(pick) as u64;
            genes[s] = Some(pick);
        }

        genes
            .into_iter()
            .collect::<Option<Vec<usize>>>()
            .map(Chromosome::new)
    }

    fn evaluate(&self, individual: &mut Chromosome) {
        let lineup = individual.to_lineup(self.pool);
        let violations = validate_lineup(&lineup, self.scorer.template(), self.scorer.constraints());
        if !violations.is_empty() {
            individual.set_evaluation(f64::NEG_INFINITY, violations);
            return;
        }
        match self.scorer.score_unchecked(&lineup) {
            Ok(score) => individual.set_evaluation(score.value, Vec::new()),
            Err(err) => {
                tracing::warn!(error = %err, "chromosome could not be scored");
                individual.set_evaluation(f64::NEG_INFINITY, Vec::new());
            }
        }
    }

    fn crossover<R: Rng>(&self, p1: &Chromosome, p2: &Chromosome, rng: &mut R) -> Vec<Chromosome> {
        let (mut c1, mut c2) = uniform_crossover(p1.genes(), p2.genes(), rng);
        let parents: Vec<usize> = p1.genes().iter().chain(p2.genes()).copied().collect();
        self.repair(&mut c1, &parents, rng);
        self.repair(&mut c2, &parents, rng);
        vec![Chromosome::new(c1), Chromosome::new(c2)]
    }

    /// Resamples one or two unpinned slots with an unused candidate of the
    /// same position that keeps the total salary within the cap.
    fn mutate<R: Rng>(&self, individual: &mut Chromosome, rng: &mut R) {
        let genes = individual.genes_mut();
        for s in self.mutation_slots(rng) {
            let old = genes[s];
            let rest = self.salary(genes) - self.pool.salary(old) as u64;
            let Some(available) = self.cap.checked_sub(rest) else {
                continue;
            };
            let position = self.pool.get(old).position;
            let options: Vec<usize> = self
                .pool
                .by_position(position)
                .iter()
                .copied()
                .filter(|i| !genes.contains(i) && self.pool.salary(*i) as u64 <= available)
                .collect();
            if let Some(i) = uniform_pick(&options, rng) {
                genes[s] = i;
            }
        }
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        tracing::trace!(generation, best_fitness, "GA generation");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{GaConfig, GaRunner, Individual};
    use crate::model::{ConstraintSet, Platform, RosterTemplate};
    use crate::random::create_rng;
    use crate::scoring::{Objective, StrategyProfile};
    use crate::testing::{classic_pool, single_solution_pool};
    use std::collections::HashSet;

    struct Fixture {
        pool: CandidatePool,
        template: RosterTemplate,
        constraints: ConstraintSet,
        profile: StrategyProfile,
    }

    impl Fixture {
        fn new(candidates: Vec<crate::model::Candidate>, constraints: ConstraintSet) -> Self {
            Self {
                pool: CandidatePool::new(candidates, Platform::DraftKings),
                template: RosterTemplate::classic(),
                constraints,
                profile: StrategyProfile::default(),
            }
        }

        fn problem(&self) -> LineupProblem<'_> {
            let scorer = Scorer::new(
                &self.template,
                &self.constraints,
                Objective::MaximizePoints,
                &self.profile,
            );
            LineupProblem::new(&self.pool, scorer)
        }
    }

    fn distinct(genes: &[usize]) -> bool {
        genes.iter().collect::<HashSet<_>>().len() == genes.len()
    }

    #[test]
    fn test_initial_individuals_are_slot_aligned() {
        let fx = Fixture::new(classic_pool(), ConstraintSet::new(50_000));
        let problem = fx.problem();
        let mut rng = create_rng(11);
        let mut valid = 0;
        for _ in 0..50 {
            let mut c = problem.create_individual(&mut rng).unwrap();
            assert_eq!(c.genes().len(), 9);
            assert!(distinct(c.genes()));
            for (s, &g) in c.genes().iter().enumerate() {
                assert!(problem.specs[s].accepts(fx.pool.get(g).position));
            }
            problem.evaluate(&mut c);
            if c.is_feasible() {
                valid += 1;
            }
        }
        assert!(valid > 0);
    }

    #[test]
    fn test_locked_candidate_is_pinned() {
        let constraints = ConstraintSet::new(50_000).with_locked(["wr4"]);
        let fx = Fixture::new(classic_pool(), constraints);
        let problem = fx.problem();
        let wr4 = fx.pool.index_of("wr4").unwrap();
        let mut rng = create_rng(5);
        for _ in 0..30 {
            let mut c = problem.create_individual(&mut rng).unwrap();
            assert!(c.contains(wr4));
            problem.mutate(&mut c, &mut rng);
            assert!(c.contains(wr4));
        }
    }

    #[test]
    fn test_unplaceable_lock() {
        let constraints = ConstraintSet::new(50_000).with_locked(["nobody"]);
        let fx = Fixture::new(classic_pool(), constraints);
        assert!(fx.problem().create_individual(&mut create_rng(1)).is_none());
    }

    #[test]
    fn test_mutation_respects_cap() {
        let fx = Fixture::new(classic_pool(), ConstraintSet::new(50_000));
        let problem = fx.problem();
        let mut rng = create_rng(99);
        for _ in 0..200 {
            let mut c = problem.create_individual(&mut rng).unwrap();
            let before = problem.salary(c.genes());
            problem.mutate(&mut c, &mut rng);
            assert!(distinct(c.genes()));
            if before <= 50_000 {
                assert!(problem.salary(c.genes()) <= 50_000);
            }
        }
    }

    #[test]
    fn test_mutation_slots_are_distinct() {
        let constraints = ConstraintSet::new(50_000).with_locked(["qb1"]);
        let fx = Fixture::new(classic_pool(), constraints);
        let problem = fx.problem();
        let mut rng = create_rng(21);
        let mut pairs = 0;
        for _ in 0..300 {
            let slots = problem.mutation_slots(&mut rng);
            assert!((1..=2).contains(&slots.len()));
            assert!(distinct(&slots));
            assert!(slots.iter().all(|&s| problem.pinned[s].is_none()));
            if slots.len() == 2 {
                pairs += 1;
            }
        }
        assert!(pairs > 0);
    }

    #[test]
    fn test_crossover_repairs_duplicates() {
        let fx = Fixture::new(classic_pool(), ConstraintSet::new(50_000));
        let problem = fx.problem();
        let mut rng = create_rng(4);
        for _ in 0..100 {
            let a = problem.create_individual(&mut rng).unwrap();
            let b = problem.create_individual(&mut rng).unwrap();
            for child in problem.crossover(&a, &b, &mut rng) {
                assert!(distinct(child.genes()), "{:?}", child.genes());
            }
        }
    }

    #[test]
    fn test_finds_only_solution() {
        let fx = Fixture::new(single_solution_pool(), ConstraintSet::new(50_000));
        let problem = fx.problem();
        let config = GaConfig::fast().with_population_size(30).with_seed(1);
        let result = GaRunner::run(&problem, &config).unwrap();
        assert!(result.best.is_feasible());
        let ids: HashSet<String> = result
            .best
            .to_lineup(&fx.pool)
            .ids()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn test_invalid_chromosome_records_violations() {
        let fx = Fixture::new(classic_pool(), ConstraintSet::new(40_000));
        let problem = fx.problem();
        // the most expensive pick per slot cannot fit a $40,000 cap
        let genes: Vec<usize> = ["qb1", "rb1", "rb2", "wr1", "wr2", "wr3", "te1", "rb3", "dst1"]
            .iter()
            .map(|id| fx.pool.index_of(id).unwrap())
            .collect();
        let mut c = Chromosome::new(genes);
        problem.evaluate(&mut c);
        assert_eq!(c.fitness(), f64::NEG_INFINITY);
        assert!(!c.violations().is_empty());
    }
}
