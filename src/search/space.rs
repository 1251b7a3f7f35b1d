//! Lazy enumeration of salary-feasible lineups.

use super::combinations::{combinations, n_choose_k};
use super::config::SearchConfig;
use crate::model::{CandidatePool, ConstraintSet, Position, RosterTemplate};
use std::collections::{BTreeMap, HashSet};

/// Theoretical size of the unbounded search space.
///
/// `Π C(n_pos, count)` over fixed-position groups, times `C(r, count)`
/// for each flexible slot, where `r` is the number of flex-eligible
/// candidates left after the fixed slots are filled. Returns 0 when some
/// slot cannot be filled at all. Saturates at `u128::MAX`.
///
/// Used for routing only; nothing is materialized.
pub fn estimate_size(pool: &CandidatePool, template: &RosterTemplate) -> u128 {
    let sizes: BTreeMap<Position, usize> = Position::ALL
        .iter()
        .map(|&p| (p, pool.by_position(p).len()))
        .collect();
    size_from_counts(&sizes, template)
}

/// Checks every slot can be filled by at least one distinct candidate.
///
/// Returns a description of the first slot that cannot.
pub fn check_coverage(pool: &CandidatePool, template: &RosterTemplate) -> Result<(), String> {
    let demand = fixed_demand(template);
    for (&position, &count) in &demand {
        let available = pool.by_position(position).len();
        if available < count {
            return Err(format!(
                "{count} {position} slot(s) but only {available} eligible candidate(s)"
            ));
        }
    }
    let mut used: BTreeMap<Position, usize> = demand;
    for spec in template.specs().iter().filter(|s| s.is_flexible()) {
        let remaining: usize = spec
            .positions
            .iter()
            .map(|p| pool.by_position(*p).len().saturating_sub(*used.get(p).unwrap_or(&0)))
            .sum();
        if remaining < spec.count {
            return Err(format!(
                "{} {} slot(s) but only {remaining} eligible candidate(s) remain",
                spec.count, spec.label
            ));
        }
        // attribute flex usage to positions in order, for later flex specs
        let mut left = spec.count;
        for p in &spec.positions {
            let free = pool.by_position(*p).len().saturating_sub(*used.get(p).unwrap_or(&0));
            let take = free.min(left);
            *used.entry(*p).or_insert(0) += take;
            left -= take;
        }
    }
    Ok(())
}

/// Slots demanded per position by the fixed (single-position) specs.
fn fixed_demand(template: &RosterTemplate) -> BTreeMap<Position, usize> {
    let mut demand = BTreeMap::new();
    for spec in template.specs().iter().filter(|s| !s.is_flexible()) {
        *demand.entry(spec.positions[0]).or_insert(0) += spec.count;
    }
    demand
}

fn size_from_counts(
    sizes: &BTreeMap<Position, usize>,
    template: &RosterTemplate,
) -> u128 {
    let demand = fixed_demand(template);
    let mut total: u128 = 1;
    for (position, &count) in &demand {
        let n = sizes.get(position).copied().unwrap_or(0);
        total = total.saturating_mul(n_choose_k(n, count));
    }
    let mut flex_used = 0usize;
    for spec in template.specs().iter().filter(|s| s.is_flexible()) {
        let eligible: usize = spec
            .positions
            .iter()
            .map(|p| sizes.get(p).copied().unwrap_or(0))
            .sum();
        let consumed: usize = spec
            .positions
            .iter()
            .map(|p| demand.get(p).copied().unwrap_or(0))
            .sum::<usize>()
            + flex_used;
        let remaining = eligible.saturating_sub(consumed);
        total = total.saturating_mul(n_choose_k(remaining, spec.count));
        flex_used += spec.count;
    }
    total
}

/// One group of fixed slots sharing a position.
#[derive(Debug, Clone)]
struct FixedGroup {
    combos: Vec<Vec<usize>>,
}

/// One flexible slot spec.
#[derive(Debug, Clone)]
struct FlexGroup {
    count: usize,
    /// Bounded, best projection first.
    candidates: Vec<usize>,
}

/// Where each flat slot takes its candidate from.
#[derive(Debug, Clone, Copy)]
enum SlotSource {
    Fixed { group: usize, offset: usize },
    Flex { group: usize, offset: usize },
}

/// The bounded, pruned lineup search space over a candidate pool.
///
/// Iterating yields candidate-index vectors in template slot order. The
/// cartesian product over fixed-position groups is walked lazily like an
/// odometer (last group fastest); flexible slots are filled from the best
/// `flex_top_k` unused, individually affordable flex-eligible candidates
/// for each core.
///
/// Every yielded lineup passes the salary pre-check (total ≤ cap). Cores
/// whose cheapest possible completion already exceeds the cap are
/// skipped whole.
#[derive(Debug, Clone)]
pub struct SearchSpace<'a> {
    pool: &'a CandidatePool,
    cap: u64,
    flex_top_k: usize,
    groups: Vec<FixedGroup>,
    flex: Vec<FlexGroup>,
    layout: Vec<SlotSource>,
    flex_floor: u64,
}

impl<'a> SearchSpace<'a> {
    /// Builds the bounded space. Locked candidates survive the top-K cut.
    pub fn new(
        pool: &'a CandidatePool,
        template: &RosterTemplate,
        constraints: &ConstraintSet,
        config: &SearchConfig,
    ) -> Self {
        let bounded = |position: Position| -> Vec<usize> {
            let all = pool.by_position(position);
            let k = config.top_k_for(position);
            let mut kept: Vec<usize> = all.iter().take(k).copied().collect();
            kept.extend(
                all.iter()
                    .skip(k)
                    .filter(|&&i| constraints.locked.contains(&pool.get(i).id)),
            );
            kept
        };

        let demand = fixed_demand(template);
        let mut group_index: BTreeMap<Position, usize> = BTreeMap::new();
        let mut groups = Vec::new();
        for (&position, &count) in &demand {
            group_index.insert(position, groups.len());
            groups.push(FixedGroup {
                combos: combinations(&bounded(position), count),
            });
        }

        let mut flex = Vec::new();
        let mut layout = Vec::with_capacity(template.slot_count());
        let mut fixed_offsets: BTreeMap<Position, usize> = BTreeMap::new();
        for spec in template.specs() {
            if spec.is_flexible() {
                let mut candidates: Vec<usize> =
                    spec.positions.iter().flat_map(|&p| bounded(p)).collect();
                candidates.sort_by(|&a, &b| {
                    pool.get(b)
                        .points()
                        .total_cmp(&pool.get(a).points())
                        .then_with(|| pool.get(a).id.cmp(&pool.get(b).id))
                });
                let group = flex.len();
                for offset in 0..spec.count {
                    layout.push(SlotSource::Flex { group, offset });
                }
                flex.push(FlexGroup {
                    count: spec.count,
                    candidates,
                });
            } else {
                let position = spec.positions[0];
                let group = group_index[&position];
                let start = fixed_offsets.entry(position).or_insert(0);
                for i in 0..spec.count {
                    layout.push(SlotSource::Fixed {
                        group,
                        offset: *start + i,
                    });
                }
                *start += spec.count;
            }
        }

        // cheapest possible salary for all flex slots together
        let flex_slots: usize = flex.iter().map(|f| f.count).sum();
        let mut flex_salaries: Vec<u64> = flex
            .iter()
            .flat_map(|f| f.candidates.iter().map(|&i| pool.salary(i) as u64))
            .collect();
        flex_salaries.sort_unstable();
        let flex_floor = flex_salaries.iter().take(flex_slots).sum();

        Self {
            pool,
            cap: constraints.salary_cap as u64,
            flex_top_k: config.flex_top_k,
            groups,
            flex,
            layout,
            flex_floor,
        }
    }

    pub fn pool(&self) -> &'a CandidatePool {
        self.pool
    }

    /// Upper bound on yielded lineups, before salary pruning.
    pub fn bounded_size(&self) -> u128 {
        let mut total: u128 = 1;
        for g in &self.groups {
            total = total.saturating_mul(g.combos.len() as u128);
        }
        for f in &self.flex {
            let options = f.candidates.len().min(self.flex_top_k);
            total = total.saturating_mul(n_choose_k(options, f.count));
        }
        total
    }

    /// Consumes the space into its lazy lineup sequence.
    pub fn lineups(self) -> Lineups<'a> {
        let exhausted = self.groups.iter().any(|g| g.combos.is_empty());
        let cursor = vec![0; self.groups.len()];
        Lineups {
            space: self,
            cursor,
            exhausted,
            pending: Vec::new(),
            pruned: 0,
        }
    }

    /// All flex completions of one core, salary-checked.
    fn complete(&self, core: &[&Vec<usize>], pending: &mut Vec<Vec<usize>>) -> u64 {
        let mut pruned = 0;
        let core_salary: u64 = core
            .iter()
            .map(|combo| self.pool.total_salary(combo))
            .sum();
        if core_salary + self.flex_floor > self.cap {
            return 1;
        }

        let mut used: HashSet<usize> = core.iter().flat_map(|c| c.iter().copied()).collect();
        let mut partials: Vec<Vec<Vec<usize>>> = vec![Vec::new()];
        for group in &self.flex {
            let mut next = Vec::new();
            for partial in &partials {
                for &i in partial.iter().flatten() {
                    used.insert(i);
                }
                let spent = core_salary
                    + partial
                        .iter()
                        .map(|pick| self.pool.total_salary(pick))
                        .sum::<u64>();
                let budget = self.cap.saturating_sub(spent);
                // unaffordable options must not use up the top-K slots
                let options: Vec<usize> = group
                    .candidates
                    .iter()
                    .copied()
                    .filter(|i| !used.contains(i))
                    .filter(|&i| self.pool.salary(i) as u64 <= budget)
                    .take(self.flex_top_k)
                    .collect();
                for pick in combinations(&options, group.count) {
                    let mut extended = partial.clone();
                    extended.push(pick);
                    next.push(extended);
                }
                for &i in partial.iter().flatten() {
                    used.remove(&i);
                }
            }
            partials = next;
        }

        for flex_picks in partials {
            let picks: Vec<usize> = self
                .layout
                .iter()
                .map(|source| match *source {
                    SlotSource::Fixed { group, offset } => core[group][offset],
                    SlotSource::Flex { group, offset } => flex_picks[group][offset],
                })
                .collect();
            if self.pool.total_salary(&picks) <= self.cap {
                pending.push(picks);
            } else {
                pruned += 1;
            }
        }
        pruned
    }
}

/// Lazy lineup sequence produced by [`SearchSpace::lineups`].
#[derive(Debug, Clone)]
pub struct Lineups<'a> {
    space: SearchSpace<'a>,
    cursor: Vec<usize>,
    exhausted: bool,
    pending: Vec<Vec<usize>>,
    pruned: u64,
}

impl Lineups<'_> {
    /// Combinations discarded by the salary pre-check so far.
    pub fn pruned(&self) -> u64 {
        self.pruned
    }

    /// Advances the odometer; returns `false` once every core was visited.
    fn advance(&mut self) -> bool {
        for g in (0..self.cursor.len()).rev() {
            self.cursor[g] += 1;
            if self.cursor[g] < self.space.groups[g].combos.len() {
                return true;
            }
            self.cursor[g] = 0;
        }
        false
    }
}

impl Iterator for Lineups<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            if let Some(picks) = self.pending.pop() {
                return Some(picks);
            }
            if self.exhausted {
                return None;
            }
            let core: Vec<&Vec<usize>> = self
                .cursor
                .iter()
                .zip(&self.space.groups)
                .map(|(&c, g)| &g.combos[c])
                .collect();
            let mut batch = Vec::new();
            self.pruned += self.space.complete(&core, &mut batch);
            batch.reverse();
            self.pending = batch;
            if !self.advance() {
                self.exhausted = true;
            }
        }
    }
}
