//! Constraint validation.
//!
//! Pure functions over their inputs: safe to call from any number of
//! worker threads at once. A violation is a signal to reject a candidate
//! or a combination, never an error.
//!
//! Two uses:
//!
//! - **Pre-filter** ([`validate_candidate`], [`prefilter`]): drop
//!   candidates that can never be rostered (excluded, over the cap,
//!   unavailable through injury, no projection).
//! - **Post-check** ([`validate_lineup`]): a fully assembled lineup
//!   against slot eligibility, duplicates, cap, team limits, locks,
//!   exclusions and ownership.

use crate::model::{Candidate, ConstraintSet, InjuryStatus, Lineup, Position, RosterTemplate};
use std::collections::HashSet;
use std::fmt;

/// One reason a candidate or lineup is infeasible.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    MissingProjection { id: String },
    NonFiniteProjection { id: String },
    Unavailable { id: String, status: InjuryStatus },
    Excluded { id: String },
    SalaryOverCap { id: String, salary: u32, cap: u32 },
    SlotCount { expected: usize, actual: usize },
    IneligibleSlot { slot: String, id: String, position: Position },
    Duplicate { id: String },
    CapExceeded { total: u64, cap: u32 },
    BelowMinimumSalary { total: u64, minimum: u32 },
    TeamLimit { team: String, count: usize, max: usize },
    MissingLocked { id: String },
    OwnershipExceeded { total: f64, max: f64 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingProjection { id } => write!(f, "{id} has no projection"),
            Violation::NonFiniteProjection { id } => {
                write!(f, "{id} has a non-finite projection")
            }
            Violation::Unavailable { id, status } => write!(f, "{id} is {status:?}"),
            Violation::Excluded { id } => write!(f, "{id} is excluded"),
            Violation::SalaryOverCap { id, salary, cap } => {
                write!(f, "{id} costs ${salary}, above the ${cap} cap")
            }
            Violation::SlotCount { expected, actual } => {
                write!(f, "expected {expected} slots, got {actual}")
            }
            Violation::IneligibleSlot { slot, id, position } => {
                write!(f, "{id} ({position}) cannot fill {slot}")
            }
            Violation::Duplicate { id } => write!(f, "{id} appears more than once"),
            Violation::CapExceeded { total, cap } => {
                write!(f, "exceeds salary cap by ${}", total - u64::from(*cap))
            }
            Violation::BelowMinimumSalary { total, minimum } => {
                write!(f, "under minimum salary usage by ${}", u64::from(*minimum) - total)
            }
            Violation::TeamLimit { team, count, max } => {
                write!(f, "too many players from {team}: {count} > {max}")
            }
            Violation::MissingLocked { id } => write!(f, "missing locked player {id}"),
            Violation::OwnershipExceeded { total, max } => {
                write!(f, "combined ownership {total:.1}% exceeds {max:.1}%")
            }
        }
    }
}

/// Merges candidate-level `locked`/`excluded` tags into the id sets.
pub fn effective_constraints(candidates: &[Candidate], constraints: &ConstraintSet) -> ConstraintSet {
    let mut merged = constraints.clone();
    for c in candidates {
        if c.locked {
            merged.locked.insert(c.id.clone());
        }
        if c.excluded {
            merged.excluded.insert(c.id.clone());
        }
    }
    merged
}

/// Checks a single candidate can ever be rostered.
pub fn validate_candidate(candidate: &Candidate, constraints: &ConstraintSet) -> Vec<Violation> {
    let mut out = Vec::new();
    let id = &candidate.id;

    if candidate.excluded || constraints.excluded.contains(id) {
        out.push(Violation::Excluded { id: id.clone() });
    }

    let salary = candidate.salary(constraints.platform);
    if salary > constraints.salary_cap {
        out.push(Violation::SalaryOverCap {
            id: id.clone(),
            salary,
            cap: constraints.salary_cap,
        });
    }

    if candidate.injury.is_unavailable() {
        out.push(Violation::Unavailable {
            id: id.clone(),
            status: candidate.injury,
        });
    }

    match candidate.projection {
        None => out.push(Violation::MissingProjection { id: id.clone() }),
        Some(p) if !p.is_finite() => out.push(Violation::NonFiniteProjection { id: id.clone() }),
        Some(_) => {}
    }

    out
}

/// Keeps only candidates with no [`validate_candidate`] violations.
pub fn prefilter(candidates: &[Candidate], constraints: &ConstraintSet) -> Vec<Candidate> {
    candidates
        .iter()
        .filter(|c| validate_candidate(c, constraints).is_empty())
        .cloned()
        .collect()
}

/// Checks a complete lineup. Empty result means valid.
pub fn validate_lineup(
    lineup: &Lineup,
    template: &RosterTemplate,
    constraints: &ConstraintSet,
) -> Vec<Violation> {
    let mut out = Vec::new();
    let slots = template.slots();

    if slots.len() != lineup.len() {
        out.push(Violation::SlotCount {
            expected: slots.len(),
            actual: lineup.len(),
        });
    }

    let mut seen = HashSet::with_capacity(lineup.len());
    for (spec, c) in slots.iter().zip(lineup.candidates()) {
        if !spec.accepts(c.position) {
            out.push(Violation::IneligibleSlot {
                slot: spec.label.clone(),
                id: c.id.clone(),
                position: c.position,
            });
        }
        if !seen.insert(c.id.as_str()) {
            out.push(Violation::Duplicate { id: c.id.clone() });
        }
        if constraints.excluded.contains(&c.id) {
            out.push(Violation::Excluded { id: c.id.clone() });
        }
    }

    let total = lineup.total_salary();
    if total > u64::from(constraints.salary_cap) {
        out.push(Violation::CapExceeded {
            total,
            cap: constraints.salary_cap,
        });
    }
    let minimum = constraints.min_salary();
    if total < u64::from(minimum) {
        out.push(Violation::BelowMinimumSalary { total, minimum });
    }

    if let Some(max) = constraints.max_players_per_team {
        for (team, count) in lineup.team_counts() {
            if count > max {
                out.push(Violation::TeamLimit {
                    team: team.to_string(),
                    count,
                    max,
                });
            }
        }
    }

    for id in &constraints.locked {
        if !seen.contains(id.as_str()) {
            out.push(Violation::MissingLocked { id: id.clone() });
        }
    }

    if let Some(max) = constraints.max_total_ownership {
        let total = lineup.total_ownership();
        if total > max {
            out.push(Violation::OwnershipExceeded { total, max });
        }
    }

    out
}

/// Shorthand for `validate_lineup(..).is_empty()`.
pub fn is_valid(lineup: &Lineup, template: &RosterTemplate, constraints: &ConstraintSet) -> bool {
    validate_lineup(lineup, template, constraints).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CandidatePool, Platform};
    use crate::testing::{classic_pool, classic_lineup_ids};
    use proptest::prelude::*;

    fn lineup_from(pool: &CandidatePool, ids: &[&str]) -> Lineup {
        let picks: Vec<usize> = ids.iter().map(|id| pool.index_of(id).unwrap()).collect();
        pool.lineup(&picks)
    }

    #[test]
    fn test_candidate_prefilter() {
        let constraints = ConstraintSet::new(10_000).with_excluded(["gone"]);
        let ok = Candidate::new("ok", Position::QB, "KC", 9_000, 20.0)
            .with_injury(InjuryStatus::Questionable);
        let out = Candidate::new("out", Position::QB, "KC", 5_000, 20.0)
            .with_injury(InjuryStatus::Out);
        let pricey = Candidate::new("pricey", Position::QB, "KC", 10_001, 20.0);
        let blank = Candidate::new("blank", Position::QB, "KC", 5_000, 0.0).with_projection(None);
        let gone = Candidate::new("gone", Position::QB, "KC", 5_000, 20.0);

        assert!(validate_candidate(&ok, &constraints).is_empty());
        assert!(matches!(
            validate_candidate(&out, &constraints)[..],
            [Violation::Unavailable { .. }]
        ));
        assert!(matches!(
            validate_candidate(&pricey, &constraints)[..],
            [Violation::SalaryOverCap { .. }]
        ));
        assert!(matches!(
            validate_candidate(&blank, &constraints)[..],
            [Violation::MissingProjection { .. }]
        ));
        assert!(matches!(
            validate_candidate(&gone, &constraints)[..],
            [Violation::Excluded { .. }]
        ));

        let kept = prefilter(&[ok, out, pricey, blank, gone], &constraints);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "ok");
    }

    #[test]
    fn test_valid_lineup_has_no_violations() {
        let pool = CandidatePool::new(classic_pool(), Platform::DraftKings);
        let lineup = lineup_from(&pool, &classic_lineup_ids());
        let constraints = ConstraintSet::new(50_000);
        assert_eq!(
            validate_lineup(&lineup, &RosterTemplate::classic(), &constraints),
            vec![]
        );
    }

    #[test]
    fn test_lineup_violations() {
        let pool = CandidatePool::new(classic_pool(), Platform::DraftKings);
        let template = RosterTemplate::classic();
        let mut ids = classic_lineup_ids();
        ids[2] = ids[1]; // duplicate RB

        let lineup = lineup_from(&pool, &ids);
        let constraints = ConstraintSet::new(20_000)
            .with_max_players_per_team(1)
            .with_locked(["qb1"])
            .with_excluded([ids[0]]);
        let v = validate_lineup(&lineup, &template, &constraints);

        assert!(v.iter().any(|x| matches!(x, Violation::Duplicate { .. })));
        assert!(v.iter().any(|x| matches!(x, Violation::CapExceeded { .. })));
        assert!(v.iter().any(|x| matches!(x, Violation::TeamLimit { .. })));
        assert!(v.iter().any(|x| matches!(x, Violation::MissingLocked { id } if id == "qb1")));
        assert!(v.iter().any(|x| matches!(x, Violation::Excluded { .. })));
    }

    #[test]
    fn test_slot_eligibility_and_count() {
        let pool = CandidatePool::new(classic_pool(), Platform::DraftKings);
        let template = RosterTemplate::classic();
        let mut ids = classic_lineup_ids();
        ids.swap(0, 8); // DST in the QB slot, QB in the DST slot
        let v = validate_lineup(&lineup_from(&pool, &ids), &template, &ConstraintSet::new(50_000));
        assert_eq!(
            v.iter()
                .filter(|x| matches!(x, Violation::IneligibleSlot { .. }))
                .count(),
            2
        );

        let short = lineup_from(&pool, &ids[..5]);
        let v = validate_lineup(&short, &template, &ConstraintSet::new(50_000));
        assert!(v.contains(&Violation::SlotCount { expected: 9, actual: 5 }));
    }

    #[test]
    fn test_ownership_and_min_salary() {
        let pool = CandidatePool::new(classic_pool(), Platform::DraftKings);
        let lineup = lineup_from(&pool, &classic_lineup_ids());
        let constraints = ConstraintSet::new(50_000)
            .with_min_salary_usage(1.0)
            .with_max_total_ownership(10.0);
        let v = validate_lineup(&lineup, &RosterTemplate::classic(), &constraints);
        assert!(v.iter().any(|x| matches!(x, Violation::BelowMinimumSalary { .. })));
        assert!(v.iter().any(|x| matches!(x, Violation::OwnershipExceeded { .. })));
    }

    #[test]
    fn test_cap_check_survives_huge_salaries() {
        let template = RosterTemplate::classic();
        let picks: Vec<Candidate> = template
            .slots()
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let pos = Position::ALL
                    .into_iter()
                    .find(|p| spec.accepts(*p))
                    .unwrap();
                Candidate::new(format!("p{i}"), pos, format!("T{i}"), 600_000_000, 10.0)
            })
            .collect();
        let pool = CandidatePool::new(picks, Platform::DraftKings);
        let lineup = pool.lineup(&(0..9).collect::<Vec<_>>());
        assert_eq!(lineup.total_salary(), 5_400_000_000);

        let v = validate_lineup(&lineup, &template, &ConstraintSet::new(u32::MAX));
        let over = v.iter().find(|x| matches!(x, Violation::CapExceeded { .. }));
        assert_eq!(
            over,
            Some(&Violation::CapExceeded {
                total: 5_400_000_000,
                cap: u32::MAX
            })
        );
        assert!(over.unwrap().to_string().contains("1105032705"));
    }

    #[test]
    fn test_effective_constraints_merges_tags() {
        let candidates = vec![
            Candidate::new("a", Position::QB, "KC", 1, 1.0).locked(),
            Candidate::new("b", Position::QB, "KC", 1, 1.0).excluded(),
        ];
        let merged = effective_constraints(&candidates, &ConstraintSet::new(100));
        assert!(merged.locked.contains("a"));
        assert!(merged.excluded.contains("b"));
    }

    proptest! {
        #[test]
        fn prop_cap_violation_matches_total(cap in 1u32..80_000) {
            let pool = CandidatePool::new(classic_pool(), Platform::DraftKings);
            let lineup = lineup_from(&pool, &classic_lineup_ids());
            let v = validate_lineup(&lineup, &RosterTemplate::classic(), &ConstraintSet::new(cap));
            let over = v.iter().any(|x| matches!(x, Violation::CapExceeded { .. }));
            prop_assert_eq!(over, lineup.total_salary() > u64::from(cap));
        }
    }
}
