//! Roster templates: which positions fill which slots.

use super::candidate::Position;

/// One slot definition: a label, its eligible positions and how many
/// players it takes.
///
/// A slot with a single eligible position is *fixed*; a slot with
/// several is *flexible* (e.g. FLEX = RB/WR/TE).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotSpec {
    pub label: String,
    pub positions: Vec<Position>,
    pub count: usize,
}

impl SlotSpec {
    /// A fixed slot for one position.
    pub fn fixed(position: Position, count: usize) -> Self {
        Self {
            label: position.as_str().to_string(),
            positions: vec![position],
            count,
        }
    }

    /// A flexible slot accepting any of `positions`.
    pub fn flex(label: impl Into<String>, positions: &[Position], count: usize) -> Self {
        let mut positions = positions.to_vec();
        positions.sort();
        positions.dedup();
        Self {
            label: label.into(),
            positions,
            count,
        }
    }

    pub fn is_flexible(&self) -> bool {
        self.positions.len() > 1
    }

    pub fn accepts(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }
}

/// Ordered list of slot definitions shared by every search in a run.
///
/// # Examples
///
/// ```
/// use u_lineup::model::RosterTemplate;
///
/// let t = RosterTemplate::classic();
/// assert_eq!(t.slot_count(), 9);
/// assert!(t.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterTemplate {
    specs: Vec<SlotSpec>,
}

impl RosterTemplate {
    pub fn new(specs: Vec<SlotSpec>) -> Self {
        Self { specs }
    }

    /// QB, 2 RB, 3 WR, TE, FLEX (RB/WR/TE), DST.
    pub fn classic() -> Self {
        Self::new(vec![
            SlotSpec::fixed(Position::QB, 1),
            SlotSpec::fixed(Position::RB, 2),
            SlotSpec::fixed(Position::WR, 3),
            SlotSpec::fixed(Position::TE, 1),
            SlotSpec::flex("FLEX", &[Position::RB, Position::WR, Position::TE], 1),
            SlotSpec::fixed(Position::DST, 1),
        ])
    }

    /// Season-long league lineup: QB, 2 RB, 2 WR, TE, FLEX, K, DST.
    pub fn season_long() -> Self {
        Self::new(vec![
            SlotSpec::fixed(Position::QB, 1),
            SlotSpec::fixed(Position::RB, 2),
            SlotSpec::fixed(Position::WR, 2),
            SlotSpec::fixed(Position::TE, 1),
            SlotSpec::flex("FLEX", &[Position::RB, Position::WR, Position::TE], 1),
            SlotSpec::fixed(Position::K, 1),
            SlotSpec::fixed(Position::DST, 1),
        ])
    }

    pub fn specs(&self) -> &[SlotSpec] {
        &self.specs
    }

    /// Total number of individual slots.
    pub fn slot_count(&self) -> usize {
        self.specs.iter().map(|s| s.count).sum()
    }

    /// One entry per individual slot, in template order.
    pub fn slots(&self) -> Vec<&SlotSpec> {
        self.specs
            .iter()
            .flat_map(|s| std::iter::repeat(s).take(s.count))
            .collect()
    }

    /// Checks the template is well-formed.
    pub fn validate(&self) -> Result<(), String> {
        if self.specs.is_empty() {
            return Err("roster template has no slots".into());
        }
        for spec in &self.specs {
            if spec.count == 0 {
                return Err(format!("slot {} has a count of zero", spec.label));
            }
            if spec.positions.is_empty() {
                return Err(format!("slot {} accepts no positions", spec.label));
            }
        }
        Ok(())
    }
}

impl Default for RosterTemplate {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_slots_expand_in_order() {
        let t = RosterTemplate::classic();
        let labels: Vec<&str> = t.slots().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            ["QB", "RB", "RB", "WR", "WR", "WR", "TE", "FLEX", "DST"]
        );
        assert!(t.slots()[7].is_flexible());
        assert!(t.slots()[7].accepts(Position::TE));
        assert!(!t.slots()[7].accepts(Position::QB));
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert!(RosterTemplate::new(vec![]).validate().is_err());
        assert!(RosterTemplate::new(vec![SlotSpec::fixed(Position::QB, 0)])
            .validate()
            .is_err());
        assert!(RosterTemplate::new(vec![SlotSpec::flex("X", &[], 1)])
            .validate()
            .is_err());
        assert_eq!(RosterTemplate::season_long().slot_count(), 9);
    }
}
