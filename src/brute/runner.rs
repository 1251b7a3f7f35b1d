//! Batched parallel evaluation with a deterministic reduction.

use super::config::BruteForceConfig;
use crate::error::{OptimizationError, Result, ScoreError};
use crate::model::{CandidatePool, Lineup};
use crate::scoring::{Score, Scorer};
use crate::search::SearchSpace;
use rayon::prelude::*;
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counters from one brute-force run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BruteForceStats {
    /// Lineups scored, valid or not.
    pub evaluated: u64,
    /// Scored lineups that failed validation.
    pub invalid: u64,
    /// Lineups whose scoring raised an error.
    pub failed: u64,
    pub batches: u64,
    /// Discarded by the salary pre-check before scoring.
    pub pruned: u64,
    /// Stopped at `max_combinations` with lineups left unvisited.
    pub truncated: bool,
    pub timed_out: bool,
    pub cancelled: bool,
}

/// Best lineup of a brute-force run.
#[derive(Debug, Clone)]
pub struct BruteForceResult {
    pub lineup: Lineup,
    pub score: Score,
    pub stats: BruteForceStats,
    pub elapsed: Duration,
}

/// Running best, owned by the coordinating thread.
struct Best<'p> {
    pool: &'p CandidatePool,
    picks: Vec<usize>,
    score: Score,
}

impl Best<'_> {
    /// Score, then total floor, then the smaller id sequence.
    fn beaten_by(&self, picks: &[usize], score: &Score) -> bool {
        match score.rank(&self.score) {
            CmpOrdering::Greater => true,
            CmpOrdering::Less => false,
            CmpOrdering::Equal => {
                let theirs = picks.iter().map(|&i| self.pool.get(i).id.as_str());
                let ours = self.picks.iter().map(|&i| self.pool.get(i).id.as_str());
                theirs.lt(ours)
            }
        }
    }
}

/// Scores every lineup of a search space and keeps the best valid one.
///
/// Work is split into batches scored with rayon on the current thread
/// pool; each batch is reduced in sequence order on the calling thread,
/// and the comparison is a total order, so the result does not depend on
/// the worker count or the batch size.
pub struct BruteForceRunner;

impl BruteForceRunner {
    pub fn run(
        space: SearchSpace<'_>,
        scorer: &Scorer<'_>,
        config: &BruteForceConfig,
    ) -> Result<BruteForceResult> {
        Self::run_with_cancel(space, scorer, config, None, None)
    }

    /// Runs with an optional deadline and cancel flag, checked between
    /// batches.
    ///
    /// # Errors
    ///
    /// - [`OptimizationError::Configuration`] for an invalid `config`
    /// - [`OptimizationError::DeadlineExceeded`] when stopped before any
    ///   valid lineup was seen
    /// - [`OptimizationError::Infeasible`] when the space holds no valid lineup
    pub fn run_with_cancel(
        space: SearchSpace<'_>,
        scorer: &Scorer<'_>,
        config: &BruteForceConfig,
        deadline: Option<Instant>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<BruteForceResult> {
        config.validate().map_err(OptimizationError::Configuration)?;
        let start = Instant::now();
        let pool = space.pool();
        let limit = config.max_combinations.unwrap_or(usize::MAX) as u64;

        let mut lineups = space.lineups();
        let mut stats = BruteForceStats::default();
        let mut best: Option<Best<'_>> = None;

        loop {
            if cancel.as_ref().is_some_and(|c| c.load(Ordering::Relaxed)) {
                stats.cancelled = true;
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                stats.timed_out = true;
                break;
            }
            let remaining = limit - stats.evaluated;
            if remaining == 0 {
                stats.truncated = lineups.next().is_some();
                break;
            }

            let take = (config.batch_size as u64).min(remaining) as usize;
            let batch: Vec<Vec<usize>> = lineups.by_ref().take(take).collect();
            if batch.is_empty() {
                break;
            }

            let scored: Vec<std::result::Result<Score, ScoreError>> = batch
                .par_iter()
                .map(|picks| scorer.score(&pool.lineup(picks)))
                .collect();

            stats.batches += 1;
            stats.evaluated += batch.len() as u64;
            let mut first_error: Option<ScoreError> = None;
            let mut batch_failed = 0u64;

            for (picks, outcome) in batch.into_iter().zip(scored) {
                let score = match outcome {
                    Ok(score) => score,
                    Err(err) => {
                        batch_failed += 1;
                        first_error.get_or_insert(err);
                        continue;
                    }
                };
                if !score.feasible {
                    stats.invalid += 1;
                    continue;
                }
                let replace = best.as_ref().is_none_or(|b| b.beaten_by(&picks, &score));
                if replace {
                    tracing::trace!(score = score.value, "new best lineup");
                    best = Some(Best { pool, picks, score });
                }
            }

            if let Some(err) = first_error {
                tracing::warn!(
                    error = %err,
                    failed = batch_failed,
                    batch = stats.batches,
                    "lineups could not be scored"
                );
                stats.failed += batch_failed;
            }
            tracing::debug!(
                batch = stats.batches,
                evaluated = stats.evaluated,
                best = best.as_ref().map(|b| b.score.value),
                "brute-force batch done"
            );
        }
        stats.pruned = lineups.pruned();
        let elapsed = start.elapsed();

        match best {
            Some(b) => Ok(BruteForceResult {
                lineup: pool.lineup(&b.picks),
                score: b.score,
                stats,
                elapsed,
            }),
            None if stats.timed_out || stats.cancelled => {
                Err(OptimizationError::DeadlineExceeded { elapsed })
            }
            None => Err(OptimizationError::Infeasible(format!(
                "no valid lineup among {} evaluated ({} pruned by salary)",
                stats.evaluated, stats.pruned
            ))),
        }
    }
}
