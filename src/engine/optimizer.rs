//! Routing between exhaustive enumeration and the genetic algorithm.

use super::config::OptimizerConfig;
use crate::brute::{BruteForceResult, BruteForceRunner};
use crate::error::{OptimizationError, Result};
use crate::ga::{Chromosome, GaError, GaResult, GaRunner, Individual, LineupProblem};
use crate::model::{Candidate, CandidatePool, ConstraintSet, Lineup, RosterTemplate};
use crate::scoring::{Objective, Score, Scorer, StrategyProfile};
use crate::search::{check_coverage, estimate_size, SearchSpace};
use crate::validate::{effective_constraints, prefilter, validate_candidate};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Search method that produced a lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Every lineup of the bounded space was scored.
    BruteForce,
    Genetic,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::BruteForce => write!(f, "brute force"),
            Method::Genetic => write!(f, "genetic algorithm"),
        }
    }
}

/// Counters from the search that produced a lineup.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Lineups or chromosomes scored.
    pub evaluated: u64,
    /// Scored lineups that failed validation (brute force only).
    pub invalid: u64,
    /// Lineups whose scoring raised an error (brute force only).
    pub failed: u64,
    /// Batches (brute force) or generations (genetic).
    pub iterations: u64,
    /// Combinations discarded by the salary pre-check.
    pub pruned: u64,
    /// The bounded prefix ended before the space was exhausted.
    pub truncated: bool,
    /// Best fitness per generation (genetic only).
    pub fitness_history: Vec<f64>,
    pub elapsed: Duration,
}

impl From<&BruteForceResult> for RunStats {
    fn from(r: &BruteForceResult) -> Self {
        Self {
            evaluated: r.stats.evaluated,
            invalid: r.stats.invalid,
            failed: r.stats.failed,
            iterations: r.stats.batches,
            pruned: r.stats.pruned,
            truncated: r.stats.truncated,
            fitness_history: Vec::new(),
            elapsed: r.elapsed,
        }
    }
}

/// An optimized lineup with how it was found.
#[derive(Debug, Clone)]
pub struct Optimized {
    pub lineup: Lineup,
    pub score: Score,
    pub method: Method,
    /// Closed-form size of the unbounded space, used for routing.
    pub estimated_space: u128,
    /// Stopped early by the deadline or cancel flag; the lineup is valid
    /// but possibly sub-optimal.
    pub timed_out: bool,
    pub stats: RunStats,
}

/// Lineup optimizer owning its worker pool.
///
/// Every search of one optimizer shares the same pool: brute-force batch
/// scoring and GA fitness evaluation both run inside it.
///
/// # Examples
///
/// ```ignore
/// let optimizer = Optimizer::new(OptimizerConfig::default().with_workers(Some(4)))?;
/// let best = optimizer.optimize(
///     &candidates,
///     &RosterTemplate::classic(),
///     &ConstraintSet::new(50_000),
///     Objective::Balanced,
///     &StrategyProfile::default(),
///     Some(Duration::from_secs(5)),
/// )?;
/// println!("{} via {}", best.score.value, best.method);
/// ```
#[derive(Debug)]
pub struct Optimizer {
    config: OptimizerConfig,
    workers: Option<ThreadPool>,
}

impl Optimizer {
    /// # Errors
    ///
    /// [`OptimizationError::Configuration`] when the config is invalid or
    /// the worker pool cannot be built.
    pub fn new(config: OptimizerConfig) -> Result<Self> {
        config.validate().map_err(OptimizationError::Configuration)?;
        let workers = match config.workers {
            Some(n) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| OptimizationError::Configuration(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self { config, workers })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub(crate) fn install<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.workers {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }

    /// Finds the best lineup under `objective`.
    ///
    /// On deadline expiry the best lineup found so far is returned with
    /// [`Optimized::timed_out`] set.
    ///
    /// # Errors
    ///
    /// - [`OptimizationError::Configuration`] for a malformed template,
    ///   constraint set or profile
    /// - [`OptimizationError::Infeasible`] when no valid lineup exists
    /// - [`OptimizationError::DeadlineExceeded`] when the deadline expires
    ///   before any valid lineup is found
    pub fn optimize(
        &self,
        candidates: &[Candidate],
        template: &RosterTemplate,
        constraints: &ConstraintSet,
        objective: Objective,
        profile: &StrategyProfile,
        deadline: Option<Duration>,
    ) -> Result<Optimized> {
        self.optimize_with_cancel(
            candidates,
            template,
            constraints,
            objective,
            profile,
            deadline,
            None,
        )
    }

    /// [`optimize`](Self::optimize) with a cancel flag, checked at batch
    /// and generation boundaries. Cancellation behaves like deadline
    /// expiry.
    #[allow(clippy::too_many_arguments)]
    pub fn optimize_with_cancel(
        &self,
        candidates: &[Candidate],
        template: &RosterTemplate,
        constraints: &ConstraintSet,
        objective: Objective,
        profile: &StrategyProfile,
        deadline: Option<Duration>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Optimized> {
        let start = Instant::now();
        let deadline_at = deadline.map(|d| start + d);

        // 1. Configuration
        template
            .validate()
            .map_err(|e| OptimizationError::Configuration(format!("template: {e}")))?;
        constraints
            .validate()
            .map_err(|e| OptimizationError::Configuration(format!("constraints: {e}")))?;
        profile
            .validate()
            .map_err(|e| OptimizationError::Configuration(format!("profile: {e}")))?;
        let effective = effective_constraints(candidates, constraints);
        effective
            .validate()
            .map_err(|e| OptimizationError::Configuration(format!("candidate tags: {e}")))?;

        // 2. Pre-filter
        let eligible = prefilter(candidates, &effective);
        check_locked(candidates, &eligible, &effective)?;
        let pool = CandidatePool::new(eligible, effective.platform);
        check_coverage(&pool, template).map_err(OptimizationError::Infeasible)?;

        // 3. Route
        let estimated_space = estimate_size(&pool, template);
        let scorer = Scorer::new(template, &effective, objective, profile)
            .with_estimates(self.config.estimates);
        let method = if estimated_space > self.config.threshold {
            Method::Genetic
        } else {
            Method::BruteForce
        };
        tracing::info!(
            candidates = candidates.len(),
            eligible = pool.len(),
            estimated_space = estimated_space as f64,
            %method,
            %objective,
            "optimization started"
        );

        let result = self.install(|| match method {
            Method::BruteForce => {
                self.run_brute(&pool, &scorer, estimated_space, deadline_at, cancel)
            }
            Method::Genetic => {
                self.run_genetic(&pool, &scorer, estimated_space, deadline_at, cancel)
            }
        });

        match &result {
            Ok(best) => tracing::info!(
                score = best.score.value,
                method = %best.method,
                evaluated = best.stats.evaluated,
                timed_out = best.timed_out,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "optimization finished"
            ),
            Err(err) => tracing::info!(
                error = %err,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "optimization found no lineup"
            ),
        }
        result
    }

    fn run_brute(
        &self,
        pool: &CandidatePool,
        scorer: &Scorer<'_>,
        estimated_space: u128,
        deadline: Option<Instant>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Optimized> {
        let space = SearchSpace::new(pool, scorer.template(), scorer.constraints(), &self.config.search);
        let bounded = space.bounded_size();
        let partial = bounded < estimated_space
            || self
                .config
                .brute
                .max_combinations
                .is_some_and(|m| (m as u128) < bounded);

        match BruteForceRunner::run_with_cancel(
            space,
            scorer,
            &self.config.brute,
            deadline,
            cancel.clone(),
        ) {
            Ok(result) => Ok(Optimized {
                stats: RunStats::from(&result),
                timed_out: result.stats.timed_out || result.stats.cancelled,
                lineup: result.lineup,
                score: result.score,
                method: Method::BruteForce,
                estimated_space,
            }),
            // the bounded space can miss lineups that exist in the full one
            Err(OptimizationError::Infeasible(reason)) if partial => {
                tracing::info!(
                    %reason,
                    bounded_space = bounded as f64,
                    "bounded enumeration found nothing; falling back to genetic search"
                );
                self.run_genetic(pool, scorer, estimated_space, deadline, cancel)
            }
            Err(err) => Err(err),
        }
    }

    fn run_genetic(
        &self,
        pool: &CandidatePool,
        scorer: &Scorer<'_>,
        estimated_space: u128,
        deadline: Option<Instant>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Optimized> {
        let start = Instant::now();
        let problem = LineupProblem::new(pool, scorer.clone());
        let result: GaResult<Chromosome> =
            GaRunner::run_with_cancel(&problem, &self.config.ga, deadline, cancel).map_err(
                |err| match err {
                    GaError::InvalidConfig(msg) => OptimizationError::Configuration(msg),
                    GaError::EmptyPopulation => OptimizationError::Infeasible(
                        "no chromosome could be initialized".into(),
                    ),
                },
            )?;
        let elapsed = start.elapsed();
        let stopped = result.timed_out || result.cancelled;

        if !result.best.is_feasible() {
            return Err(if stopped {
                OptimizationError::DeadlineExceeded { elapsed }
            } else {
                OptimizationError::Infeasible(format!(
                    "no valid lineup after {} generations ({} evaluations)",
                    result.generations, result.evaluations
                ))
            });
        }

        let lineup = result.best.to_lineup(pool);
        let score = scorer
            .score(&lineup)
            .map_err(|e| OptimizationError::Infeasible(e.to_string()))?;
        if !score.feasible {
            return Err(OptimizationError::Infeasible(
                "best chromosome failed validation".into(),
            ));
        }

        Ok(Optimized {
            lineup,
            score,
            method: Method::Genetic,
            estimated_space,
            timed_out: stopped,
            stats: RunStats {
                evaluated: result.evaluations as u64,
                iterations: result.generations as u64,
                fitness_history: result.fitness_history,
                elapsed,
                ..RunStats::default()
            },
        })
    }
}

/// Every locked id must survive the pre-filter.
fn check_locked(
    candidates: &[Candidate],
    eligible: &[Candidate],
    constraints: &ConstraintSet,
) -> Result<()> {
    for id in &constraints.locked {
        if eligible.iter().any(|c| &c.id == id) {
            continue;
        }
        let reason = match candidates.iter().find(|c| &c.id == id) {
            Some(c) => {
                let violations: Vec<String> = validate_candidate(c, constraints)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                format!("locked player {id} cannot be rostered: {}", violations.join("; "))
            }
            None => format!("locked player {id} is not in the candidate pool"),
        };
        return Err(OptimizationError::Infeasible(reason));
    }
    Ok(())
}

/// Optimizes with [`OptimizerConfig::default`].
///
/// ```
/// use u_lineup::model::{Candidate, ConstraintSet, Position, RosterTemplate};
/// use u_lineup::scoring::{Objective, StrategyProfile};
///
/// let candidates = vec![
///     Candidate::new("q", Position::QB, "NYJ", 6_500, 17.0),
///     Candidate::new("r1", Position::RB, "NYJ", 6_000, 13.0),
///     Candidate::new("r2", Position::RB, "NE", 5_500, 11.0),
///     Candidate::new("w1", Position::WR, "MIA", 6_000, 14.0),
///     Candidate::new("w2", Position::WR, "BUF", 5_500, 12.0),
///     Candidate::new("w3", Position::WR, "NE", 5_000, 10.0),
///     Candidate::new("t", Position::TE, "MIA", 4_500, 8.0),
///     Candidate::new("r3", Position::RB, "BUF", 7_000, 9.0),
///     Candidate::new("d", Position::DST, "NE", 3_500, 7.0),
/// ];
/// let best = u_lineup::optimize(
///     &candidates,
///     &RosterTemplate::classic(),
///     &ConstraintSet::new(50_000),
///     Objective::Balanced,
///     &StrategyProfile::default(),
///     None,
/// )
/// .unwrap();
/// assert_eq!(best.lineup.total_salary(), 49_500);
/// ```
pub fn optimize(
    candidates: &[Candidate],
    template: &RosterTemplate,
    constraints: &ConstraintSet,
    objective: Objective,
    profile: &StrategyProfile,
    deadline: Option<Duration>,
) -> Result<Optimized> {
    Optimizer::new(OptimizerConfig::default())?.optimize(
        candidates,
        template,
        constraints,
        objective,
        profile,
        deadline,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::GaConfig;
    use crate::model::{InjuryStatus, Platform, Position};
    use crate::testing::{classic_pool, single_solution_pool, wide_pool};
    use crate::validate::validate_lineup;
    use proptest::prelude::*;
    use std::sync::atomic::Ordering;

    fn run(
        optimizer: &Optimizer,
        candidates: &[Candidate],
        constraints: &ConstraintSet,
        objective: Objective,
    ) -> Result<Optimized> {
        optimizer.optimize(
            candidates,
            &RosterTemplate::classic(),
            constraints,
            objective,
            &StrategyProfile::default(),
            None,
        )
    }

    fn ids(lineup: &Lineup) -> Vec<String> {
        lineup.ids().into_iter().map(String::from).collect()
    }

    fn ga_optimizer() -> Optimizer {
        Optimizer::new(
            OptimizerConfig::default()
                .with_threshold(0)
                .with_ga(GaConfig::fast().with_seed(42)),
        )
        .unwrap()
    }

    #[test]
    fn test_single_solution() {
        let best = optimize(
            &single_solution_pool(),
            &RosterTemplate::classic(),
            &ConstraintSet::new(50_000),
            Objective::Balanced,
            &StrategyProfile::default(),
            None,
        )
        .unwrap();
        assert_eq!(best.method, Method::BruteForce);
        assert_eq!(
            ids(&best.lineup),
            vec!["q", "r1", "r2", "w1", "w2", "w3", "t", "r3", "d"]
        );
        assert!(!best.timed_out);
    }

    #[test]
    fn test_salary_cap_boundary() {
        let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
        let at = run(
            &optimizer,
            &single_solution_pool(),
            &ConstraintSet::new(49_500),
            Objective::MaximizePoints,
        )
        .unwrap();
        assert_eq!(at.lineup.total_salary(), 49_500);

        let below = run(
            &optimizer,
            &single_solution_pool(),
            &ConstraintSet::new(49_499),
            Objective::MaximizePoints,
        );
        assert!(below.unwrap_err().is_infeasible());
    }

    #[test]
    fn test_missing_dst_is_infeasible() {
        let candidates: Vec<Candidate> = classic_pool()
            .into_iter()
            .filter(|c| c.position != Position::DST)
            .collect();
        let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
        for (objective, _) in Objective::ALTERNATIVES {
            let err = run(&optimizer, &candidates, &ConstraintSet::new(50_000), objective)
                .unwrap_err();
            assert!(err.is_infeasible(), "{objective}: {err}");
        }
    }

    #[test]
    fn test_configuration_errors() {
        let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
        let overlap = ConstraintSet::new(50_000)
            .with_locked(["qb1"])
            .with_excluded(["qb1"]);
        let err = run(&optimizer, &classic_pool(), &overlap, Objective::Balanced).unwrap_err();
        assert!(err.is_configuration());

        let err = run(
            &optimizer,
            &classic_pool(),
            &ConstraintSet::new(0),
            Objective::Balanced,
        )
        .unwrap_err();
        assert!(err.is_configuration());

        // a tag on the candidate conflicts with the constraint set
        let mut tagged = classic_pool();
        tagged[0] = tagged[0].clone().excluded();
        let err = run(
            &optimizer,
            &tagged,
            &ConstraintSet::new(50_000).with_locked(["qb1"]),
            Objective::Balanced,
        )
        .unwrap_err();
        assert!(err.is_configuration());

        assert!(Optimizer::new(OptimizerConfig::default().with_workers(Some(0)))
            .unwrap_err()
            .is_configuration());
    }

    #[test]
    fn test_locked_player_unavailable() {
        let mut candidates = classic_pool();
        candidates[0] = candidates[0].clone().with_injury(InjuryStatus::Out);
        let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
        let err = run(
            &optimizer,
            &candidates,
            &ConstraintSet::new(50_000).with_locked(["qb1"]),
            Objective::Balanced,
        )
        .unwrap_err();
        assert!(err.is_infeasible());
        assert!(err.to_string().contains("qb1"));

        let err = run(
            &optimizer,
            &classic_pool(),
            &ConstraintSet::new(50_000).with_locked(["nobody"]),
            Objective::Balanced,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not in the candidate pool"));
    }

    #[test]
    fn test_locked_and_excluded_honored() {
        let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
        let best = run(
            &optimizer,
            &classic_pool(),
            &ConstraintSet::new(50_000)
                .with_locked(["te2"])
                .with_excluded(["qb1"]),
            Objective::MaximizePoints,
        )
        .unwrap();
        assert!(best.lineup.contains("te2"));
        assert!(!best.lineup.contains("qb1"));
    }

    #[test]
    fn test_deterministic_across_worker_counts() {
        let candidates = wide_pool(5);
        let constraints = ConstraintSet::new(50_000);
        let reference = run(
            &Optimizer::new(OptimizerConfig::default().with_workers(Some(1))).unwrap(),
            &candidates,
            &constraints,
            Objective::Balanced,
        )
        .unwrap();
        for workers in [2, 3, 8] {
            let config = OptimizerConfig::default()
                .with_workers(Some(workers))
                .with_brute(crate::brute::BruteForceConfig::default().with_batch_size(97));
            let best = run(
                &Optimizer::new(config).unwrap(),
                &candidates,
                &constraints,
                Objective::Balanced,
            )
            .unwrap();
            assert_eq!(best.method, Method::BruteForce);
            assert_eq!(ids(&best.lineup), ids(&reference.lineup));
            assert_eq!(best.score.value.to_bits(), reference.score.value.to_bits());
        }
    }

    #[test]
    fn test_genetic_route() {
        let best = run(
            &ga_optimizer(),
            &wide_pool(10),
            &ConstraintSet::new(50_000),
            Objective::Balanced,
        )
        .unwrap();
        assert_eq!(best.method, Method::Genetic);
        assert!(best.estimated_space > 0);
        assert!(!best.stats.fitness_history.is_empty());
        assert!(validate_lineup(
            &best.lineup,
            &RosterTemplate::classic(),
            &ConstraintSet::new(50_000)
        )
        .is_empty());
    }

    #[test]
    fn test_genetic_finds_single_solution() {
        let best = run(
            &ga_optimizer(),
            &single_solution_pool(),
            &ConstraintSet::new(50_000),
            Objective::Balanced,
        )
        .unwrap();
        assert_eq!(best.method, Method::Genetic);
        assert_eq!(best.lineup.total_salary(), 49_500);
    }

    #[test]
    fn test_genetic_infeasible() {
        let err = run(
            &ga_optimizer(),
            &single_solution_pool(),
            &ConstraintSet::new(49_499),
            Objective::Balanced,
        )
        .unwrap_err();
        assert!(err.is_infeasible());
    }

    #[test]
    fn test_deadline_keeps_best_found() {
        let config = OptimizerConfig::default()
            .with_threshold(0)
            .with_ga(
                GaConfig::default()
                    .with_population_size(50)
                    .with_max_generations(1_000_000)
                    .with_stagnation_limit(1_000_000)
                    .with_seed(3),
            );
        let best = Optimizer::new(config)
            .unwrap()
            .optimize(
                &wide_pool(10),
                &RosterTemplate::classic(),
                &ConstraintSet::new(50_000),
                Objective::Balanced,
                &StrategyProfile::default(),
                Some(Duration::from_millis(50)),
            )
            .unwrap();
        assert!(best.timed_out);
        assert!(best.score.feasible);
    }

    #[test]
    fn test_expired_deadline_without_result() {
        let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
        let err = optimizer
            .optimize(
                &classic_pool(),
                &RosterTemplate::classic(),
                &ConstraintSet::new(50_000),
                Objective::Balanced,
                &StrategyProfile::default(),
                Some(Duration::ZERO),
            )
            .unwrap_err();
        assert!(matches!(err, OptimizationError::DeadlineExceeded { .. }));
    }

    #[test]
    fn test_cancelled_before_start() {
        let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
        let cancel = Arc::new(AtomicBool::new(false));
        cancel.store(true, Ordering::Relaxed);
        let err = optimizer
            .optimize_with_cancel(
                &classic_pool(),
                &RosterTemplate::classic(),
                &ConstraintSet::new(50_000),
                Objective::Balanced,
                &StrategyProfile::default(),
                None,
                Some(cancel),
            )
            .unwrap_err();
        assert!(matches!(err, OptimizationError::DeadlineExceeded { .. }));
    }

    #[test]
    fn test_platform_salaries() {
        let constraints = ConstraintSet::new(50_000).with_platform(Platform::FanDuel);
        let optimizer = Optimizer::new(OptimizerConfig::default()).unwrap();
        let best = run(&optimizer, &classic_pool(), &constraints, Objective::Balanced).unwrap();
        assert_eq!(best.lineup.platform(), Platform::FanDuel);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn returned_lineups_are_valid(
            cap in 40_000u32..60_000,
            per_team in 2usize..5,
            objective in prop::sample::select(vec![
                Objective::MaximizePoints,
                Objective::MaximizeValue,
                Objective::MinimizeOwnership,
                Objective::MaximizeCeiling,
                Objective::MaximizeFloor,
                Objective::Balanced,
            ]),
        ) {
            let constraints = ConstraintSet::new(cap).with_max_players_per_team(per_team);
            let optimizer = Optimizer::new(
                OptimizerConfig::default().with_ga(GaConfig::fast().with_seed(1)),
            )
            .unwrap();
            match run(&optimizer, &wide_pool(5), &constraints, objective) {
                Ok(best) => {
                    let template = RosterTemplate::classic();
                    prop_assert_eq!(best.lineup.len(), template.slot_count());
                    prop_assert!(!best.lineup.has_duplicates());
                    prop_assert!(validate_lineup(&best.lineup, &template, &constraints).is_empty());
                }
                Err(err) => prop_assert!(err.is_infeasible(), "{}", err),
            }
        }
    }
}
