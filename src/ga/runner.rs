//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives initialization → evaluation → selection →
//! crossover → mutation → repeat. Each generation is written into a
//! freshly cleared arena; the current population is an index into a
//! double-buffered pair, so parents are never aliased by their children.

use super::config::GaConfig;
use super::types::{GaProblem, Individual};
use crate::random::rng_from;
use rand::Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Why a GA run could not start.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaError {
    #[error("invalid GA configuration: {0}")]
    InvalidConfig(String),
    /// Initialization could not build a single individual.
    #[error("no individual could be created")]
    EmptyPopulation,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    ///
    /// May be infeasible (fitness negative infinity) when no feasible
    /// individual was ever produced.
    pub best: I,

    /// Same as `best.fitness()`.
    pub best_fitness: f64,

    /// Actual population size after initialization.
    pub population_size: usize,

    /// Generations completed after the initial population.
    pub generations: usize,

    /// Total fitness evaluations.
    pub evaluations: usize,

    /// Stopped by the stagnation limit.
    pub stagnated: bool,

    /// Stopped by the cancel flag.
    pub cancelled: bool,

    /// Stopped by the deadline.
    pub timed_out: bool,

    /// All-time best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// ```ignore
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs to completion (generation count or stagnation).
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>, GaError> {
        Self::run_with_cancel(problem, config, None, None)
    }

    /// Runs with an optional deadline and cancellation flag.
    ///
    /// Both are checked once per generation; on either the best found so
    /// far is returned.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        deadline: Option<Instant>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>, GaError> {
        config.validate().map_err(GaError::InvalidConfig)?;
        let mut rng = rng_from(config.seed);

        // 1. Initialize; a short population is fine
        let mut population: Vec<P::Individual> = (0..config.population_size)
            .filter_map(|_| problem.create_individual(&mut rng))
            .collect();
        if population.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        let n = population.len();
        if n < config.population_size {
            tracing::debug!(
                requested = config.population_size,
                created = n,
                "GA population short"
            );
        }

        // 2. Evaluate
        evaluate(problem, &mut population, config.parallel);
        let mut evaluations = n;

        let mut best = find_best(&population).clone();
        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness());

        let elite_count = config.elite_count(n);
        let mut arenas: [Vec<P::Individual>; 2] = [population, Vec::with_capacity(n)];
        let mut current = 0;

        let mut generations = 0;
        let mut stagnation = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut timed_out = false;

        // 3. Evolve
        for gen in 0..config.max_generations {
            if cancel.as_ref().is_some_and(|c| c.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                timed_out = true;
                break;
            }

            let (parents, next) = split(&mut arenas, current);
            // best first; stable so equal fitness keeps arena order
            parents.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));

            next.clear();
            next.extend_from_slice(&parents[..elite_count]);

            while next.len() < n {
                let p1 = config.selection.select(&parents[..], &mut rng);
                let p2 = config.selection.select(&parents[..], &mut rng);

                let children = if rng.random_bool(config.crossover_rate) {
                    problem.crossover(&parents[p1], &parents[p2], &mut rng)
                } else {
                    vec![parents[p1].clone()]
                };

                for mut child in children {
                    if next.len() >= n {
                        break;
                    }
                    if rng.random_bool(config.mutation_rate) {
                        problem.mutate(&mut child, &mut rng);
                    }
                    next.push(child);
                }
            }

            // elites keep their cached fitness
            evaluate(problem, &mut next[elite_count..], config.parallel);
            evaluations += n - elite_count;
            current = 1 - current;
            generations = gen + 1;

            let gen_best = find_best(&arenas[current]);
            if improved(best.fitness(), gen_best.fitness(), config.convergence_threshold) {
                best = gen_best.clone();
                stagnation = 0;
            } else {
                if gen_best.fitness() > best.fitness() {
                    best = gen_best.clone();
                }
                stagnation += 1;
            }

            fitness_history.push(best.fitness());
            problem.on_generation(generations, best.fitness());

            if config.stagnation_limit > 0 && stagnation >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            population_size: n,
            generations,
            evaluations,
            stagnated,
            cancelled,
            timed_out,
            fitness_history,
        })
    }
}

/// (current, next) halves of the double buffer.
fn split<I>(arenas: &mut [Vec<I>; 2], current: usize) -> (&mut Vec<I>, &mut Vec<I>) {
    let [a, b] = arenas;
    if current == 0 {
        (a, b)
    } else {
        (b, a)
    }
}

fn evaluate<P: GaProblem>(problem: &P, population: &mut [P::Individual], parallel: bool) {
    if parallel {
        population
            .par_iter_mut()
            .for_each(|ind| problem.evaluate(ind));
    } else {
        for ind in population.iter_mut() {
            problem.evaluate(ind);
        }
    }
}

/// Whether `new` beats `old` by at least the relative `threshold`.
fn improved(old: f64, new: f64, threshold: f64) -> bool {
    if new <= old {
        return false;
    }
    if !old.is_finite() || old == 0.0 {
        return true;
    }
    (new - old) / old.abs() >= threshold
}

/// Highest fitness; the first one wins ties.
fn find_best<I: Individual>(population: &[I]) -> &I {
    let mut best = &population[0];
    for ind in &population[1..] {
        if ind.fitness() > best.fitness() {
            best = ind;
        }
    }
    best
}
