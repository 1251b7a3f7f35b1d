//! Brute-force evaluator configuration.

/// Controls batch size and how much of the lazy sequence is evaluated.
///
/// ```
/// use u_lineup::brute::BruteForceConfig;
///
/// let config = BruteForceConfig::default();
/// assert_eq!(config.batch_size, 1024);
/// assert_eq!(config.max_combinations, Some(100_000));
///
/// let exhaustive = BruteForceConfig::exhaustive().with_batch_size(64);
/// assert!(exhaustive.max_combinations.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BruteForceConfig {
    /// Lineups scored per parallel batch. The deadline and cancel flag
    /// are checked between batches.
    pub batch_size: usize,

    /// Evaluate at most this many lineups (a bounded prefix of the
    /// sequence). `None` walks the whole space.
    pub max_combinations: Option<usize>,
}

impl Default for BruteForceConfig {
    fn default() -> Self {
        Self {
            batch_size: 1024,
            max_combinations: Some(100_000),
        }
    }
}

impl BruteForceConfig {
    /// No prefix bound.
    pub fn exhaustive() -> Self {
        Self {
            max_combinations: None,
            ..Self::default()
        }
    }

    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    pub fn with_max_combinations(mut self, limit: Option<usize>) -> Self {
        self.max_combinations = limit;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".into());
        }
        if self.max_combinations == Some(0) {
            return Err("max_combinations must be positive or None".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(BruteForceConfig::default().validate().is_ok());
        assert!(BruteForceConfig::default().with_batch_size(0).validate().is_err());
        assert!(BruteForceConfig::default()
            .with_max_combinations(Some(0))
            .validate()
            .is_err());
    }
}
