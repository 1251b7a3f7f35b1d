//! Shared fixtures for unit tests.

use crate::model::{Candidate, Position};

fn c(id: &str, pos: Position, team: &str, salary: u32, pts: f64) -> Candidate {
    Candidate::new(id, pos, team, salary, pts)
}

/// Thirteen candidates covering the classic template with room to choose.
pub(crate) fn classic_pool() -> Vec<Candidate> {
    vec![
        c("qb1", Position::QB, "KC", 8_000, 22.0).with_ownership(30.0),
        c("qb2", Position::QB, "BUF", 7_000, 20.0).with_ownership(12.0),
        c("rb1", Position::RB, "SF", 8_500, 18.0).with_ownership(35.0),
        c("rb2", Position::RB, "DAL", 7_000, 15.0).with_ownership(20.0),
        c("rb3", Position::RB, "KC", 5_000, 11.0).with_ownership(8.0),
        c("wr1", Position::WR, "KC", 8_000, 19.0).with_ownership(28.0),
        c("wr2", Position::WR, "MIA", 7_000, 16.0).with_ownership(18.0),
        c("wr3", Position::WR, "CIN", 6_000, 14.0).with_ownership(10.0),
        c("wr4", Position::WR, "BUF", 4_500, 10.0).with_ownership(5.0),
        c("te1", Position::TE, "KC", 6_000, 12.0).with_ownership(22.0),
        c("te2", Position::TE, "BAL", 4_000, 8.0).with_ownership(6.0),
        c("dst1", Position::DST, "SF", 3_000, 8.0).with_ownership(15.0),
        c("dst2", Position::DST, "DAL", 2_500, 6.0).with_ownership(9.0),
    ]
}

/// A valid classic lineup from [`classic_pool`] costing $49,000.
pub(crate) fn classic_lineup_ids() -> Vec<&'static str> {
    vec![
        "qb2", "rb2", "rb3", "wr2", "wr3", "wr4", "te2", "te1", "dst2",
    ]
}

/// Exactly nine candidates whose only feasible selection is all nine.
///
/// Salaries sum to $49,500, so any cap from that value up admits it.
pub(crate) fn single_solution_pool() -> Vec<Candidate> {
    vec![
        c("q", Position::QB, "NYJ", 6_500, 17.0),
        c("r1", Position::RB, "NYJ", 6_000, 13.0),
        c("r2", Position::RB, "NE", 5_500, 11.0),
        c("w1", Position::WR, "MIA", 6_000, 14.0),
        c("w2", Position::WR, "BUF", 5_500, 12.0),
        c("w3", Position::WR, "NE", 5_000, 10.0),
        c("t", Position::TE, "MIA", 4_500, 8.0),
        c("r3", Position::RB, "BUF", 7_000, 9.0),
        c("d", Position::DST, "NE", 3_500, 7.0),
    ]
}

/// A larger deterministic pool for search-quality tests.
pub(crate) fn wide_pool(per_position: usize) -> Vec<Candidate> {
    const TEAMS: [&str; 8] = ["KC", "BUF", "SF", "DAL", "MIA", "CIN", "BAL", "PHI"];
    let mut out = Vec::new();
    for (p, pos) in [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::DST,
    ]
    .into_iter()
    .enumerate()
    {
        for i in 0..per_position {
            let salary = 3_000 + ((i * 7 + p * 3) % 12) as u32 * 500;
            let pts = 4.0 + salary as f64 / 500.0 + ((i * 5 + p) % 7) as f64;
            let team = TEAMS[(i + p) % TEAMS.len()];
            out.push(
                c(&format!("{pos}{i}"), pos, team, salary, pts)
                    .with_ownership(((i * 13 + p * 7) % 40) as f64 + 2.0),
            );
        }
    }
    out
}
