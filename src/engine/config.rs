//! Orchestrator configuration.

use crate::brute::BruteForceConfig;
use crate::ga::GaConfig;
use crate::scoring::ProjectionEstimates;
use crate::search::SearchConfig;

/// Routing threshold, worker pool size and the nested component configs.
///
/// # Builder Pattern
///
/// ```
/// use u_lineup::engine::OptimizerConfig;
/// use u_lineup::ga::GaConfig;
///
/// let config = OptimizerConfig::default()
///     .with_threshold(250_000)
///     .with_workers(Some(4))
///     .with_ga(GaConfig::fast().with_seed(7));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.alternative_exclusions, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Spaces whose estimated size exceeds this go to the genetic
    /// algorithm; smaller ones are enumerated.
    pub threshold: u128,

    /// Worker threads. `None` uses rayon's global pool, sized to the
    /// available hardware parallelism.
    pub workers: Option<usize>,

    pub search: SearchConfig,
    pub brute: BruteForceConfig,
    pub ga: GaConfig,

    /// Floor/ceiling ratios for candidates that supply neither.
    pub estimates: ProjectionEstimates,

    /// Highest-projected primary players excluded per alternative.
    pub alternative_exclusions: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            threshold: 1_000_000,
            workers: None,
            search: SearchConfig::default(),
            brute: BruteForceConfig::default(),
            ga: GaConfig::default(),
            estimates: ProjectionEstimates::default(),
            alternative_exclusions: 3,
        }
    }
}

impl OptimizerConfig {
    pub fn with_threshold(mut self, threshold: u128) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_brute(mut self, brute: BruteForceConfig) -> Self {
        self.brute = brute;
        self
    }

    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_estimates(mut self, estimates: ProjectionEstimates) -> Self {
        self.estimates = estimates;
        self
    }

    pub fn with_alternative_exclusions(mut self, n: usize) -> Self {
        self.alternative_exclusions = n;
        self
    }

    /// Validates this config and every nested one.
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == Some(0) {
            return Err("workers must be at least 1 or None".into());
        }
        self.search.validate().map_err(|e| format!("search: {e}"))?;
        self.brute.validate().map_err(|e| format!("brute force: {e}"))?;
        self.ga.validate().map_err(|e| format!("genetic: {e}"))?;
        self.estimates
            .validate()
            .map_err(|e| format!("estimates: {e}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = OptimizerConfig::default();
        assert_eq!(config.threshold, 1_000_000);
        assert!(config.workers.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_nested() {
        assert!(OptimizerConfig::default()
            .with_workers(Some(0))
            .validate()
            .is_err());
        let err = OptimizerConfig::default()
            .with_brute(BruteForceConfig::default().with_batch_size(0))
            .validate()
            .unwrap_err();
        assert!(err.starts_with("brute force"));
        let err = OptimizerConfig::default()
            .with_ga(GaConfig::default().with_population_size(0))
            .validate()
            .unwrap_err();
        assert!(err.starts_with("genetic"));
    }
}
