//! Candidate players supplied by the external data source.

use std::fmt;

/// Default salary when a candidate lists none for any platform.
pub const DEFAULT_SALARY: u32 = 5_000;

/// Ownership percentage assumed for candidates without a projection.
pub const DEFAULT_OWNERSHIP: f64 = 50.0;

/// Roster position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Quarterback.
    QB,
    /// Running back.
    RB,
    /// Wide receiver.
    WR,
    /// Tight end.
    TE,
    /// Kicker.
    K,
    /// Team defense / special teams.
    DST,
}

impl Position {
    /// All positions in canonical order.
    pub const ALL: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DST,
    ];

    /// Short label, e.g. `"QB"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }

    /// Whether this position catches passes (stacks with a same-team QB).
    pub fn is_pass_catcher(self) -> bool {
        matches!(self, Position::WR | Position::TE)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Salary platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Platform {
    #[default]
    DraftKings,
    FanDuel,
    Yahoo,
}

/// Per-platform salaries. Any subset may be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Salaries {
    pub draftkings: Option<u32>,
    pub fanduel: Option<u32>,
    pub yahoo: Option<u32>,
}

impl Salaries {
    /// Salary on a single platform, for all three.
    pub fn uniform(salary: u32) -> Self {
        Self {
            draftkings: Some(salary),
            fanduel: Some(salary),
            yahoo: Some(salary),
        }
    }

    /// Salary for `platform`.
    ///
    /// Falls back to DraftKings, then FanDuel, then Yahoo, then
    /// [`DEFAULT_SALARY`].
    pub fn resolve(&self, platform: Platform) -> u32 {
        let preferred = match platform {
            Platform::DraftKings => self.draftkings,
            Platform::FanDuel => self.fanduel,
            Platform::Yahoo => self.yahoo,
        };
        preferred
            .or(self.draftkings)
            .or(self.fanduel)
            .or(self.yahoo)
            .unwrap_or(DEFAULT_SALARY)
    }
}

/// Injury designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InjuryStatus {
    #[default]
    Healthy,
    Questionable,
    Doubtful,
    Out,
    /// Injured reserve.
    IR,
}

impl InjuryStatus {
    /// Doubtful, Out and IR players are never rostered.
    pub fn is_unavailable(self) -> bool {
        matches!(
            self,
            InjuryStatus::Doubtful | InjuryStatus::Out | InjuryStatus::IR
        )
    }
}

/// Matchup difficulty for the upcoming game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Matchup {
    Favorable,
    #[default]
    Neutral,
    Difficult,
}

impl Matchup {
    /// Multiplicative adjustment applied to the projection.
    pub fn factor(self) -> f64 {
        match self {
            Matchup::Favorable => 1.2,
            Matchup::Neutral => 1.0,
            Matchup::Difficult => 0.8,
        }
    }
}

/// A scored player eligible for selection.
///
/// Candidates are read-only inputs; the optimizer never mutates them.
///
/// ```
/// use u_lineup::model::{Candidate, Position};
///
/// let c = Candidate::new("mahomes", Position::QB, "KC", 8_200, 24.5)
///     .with_floor(17.0)
///     .with_ownership(18.0);
/// assert_eq!(c.floor_or(0.7), 17.0);
/// assert_eq!(c.ceiling_or(1.3), 24.5 * 1.3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Unique identifier; also the final tie-break key.
    pub id: String,
    /// Display name, if the data source supplies one.
    pub name: Option<String>,
    pub position: Position,
    /// Team abbreviation, used for team limits and stacking.
    pub team: String,
    /// Salary per platform; see [`Salaries::resolve`].
    pub salaries: Salaries,
    /// Mean point projection. `None` candidates are dropped by the pre-filter.
    pub projection: Option<f64>,
    /// Low-end outcome. Estimated from the projection when missing.
    pub floor: Option<f64>,
    /// High-end outcome. Estimated from the projection when missing.
    pub ceiling: Option<f64>,
    /// Projected ownership, in percent (0–100).
    pub ownership: Option<f64>,
    /// Doubtful, Out and IR candidates are pre-filtered.
    pub injury: InjuryStatus,
    /// Scales the projection in matchup-aware scoring.
    pub matchup: Matchup,
    /// Must appear in every lineup.
    pub locked: bool,
    /// Must never appear in a lineup.
    pub excluded: bool,
}

impl Candidate {
    /// Creates a healthy candidate with the same salary on every platform.
    pub fn new(
        id: impl Into<String>,
        position: Position,
        team: impl Into<String>,
        salary: u32,
        projection: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            position,
            team: team.into(),
            salaries: Salaries::uniform(salary),
            projection: Some(projection),
            floor: None,
            ceiling: None,
            ownership: None,
            injury: InjuryStatus::Healthy,
            matchup: Matchup::Neutral,
            locked: false,
            excluded: false,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the uniform salary with per-platform salaries.
    pub fn with_salaries(mut self, salaries: Salaries) -> Self {
        self.salaries = salaries;
        self
    }

    /// Sets or clears the projection.
    pub fn with_projection(mut self, projection: Option<f64>) -> Self {
        self.projection = projection;
        self
    }

    /// Sets an explicit floor.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = Some(floor);
        self
    }

    /// Sets an explicit ceiling.
    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    /// Sets projected ownership, in percent.
    pub fn with_ownership(mut self, ownership: f64) -> Self {
        self.ownership = Some(ownership);
        self
    }

    /// Sets the injury designation.
    pub fn with_injury(mut self, injury: InjuryStatus) -> Self {
        self.injury = injury;
        self
    }

    /// Sets the matchup difficulty.
    pub fn with_matchup(mut self, matchup: Matchup) -> Self {
        self.matchup = matchup;
        self
    }

    /// Marks the candidate as required in every lineup.
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Marks the candidate as never selectable.
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// Effective salary on `platform`.
    pub fn salary(&self, platform: Platform) -> u32 {
        self.salaries.resolve(platform)
    }

    /// Projection, or 0.0 when missing.
    pub fn points(&self) -> f64 {
        self.projection.unwrap_or(0.0)
    }

    /// Supplied floor, or `ratio × projection`.
    pub fn floor_or(&self, ratio: f64) -> f64 {
        self.floor.unwrap_or_else(|| self.points() * ratio)
    }

    /// Supplied ceiling, or `ratio × projection`.
    pub fn ceiling_or(&self, ratio: f64) -> f64 {
        self.ceiling.unwrap_or_else(|| self.points() * ratio)
    }

    /// Ownership, or [`DEFAULT_OWNERSHIP`].
    pub fn ownership_or_default(&self) -> f64 {
        self.ownership.unwrap_or(DEFAULT_OWNERSHIP)
    }
}
