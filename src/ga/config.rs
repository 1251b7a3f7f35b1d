//! GA configuration.

use super::selection::Selection;

/// Configuration for the genetic search.
///
/// # Defaults
///
/// ```
/// use u_lineup::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.max_generations, 200);
/// assert_eq!(config.selection, Selection::Tournament(5));
/// assert_eq!(config.stagnation_limit, 50);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_lineup::ga::GaConfig;
///
/// let config = GaConfig::fast()
///     .with_tournament_size(3)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Target population size. A smaller population is used when
    /// initialization cannot fill it.
    pub population_size: usize,

    /// Maximum number of generations.
    pub max_generations: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Fraction of the population carried unchanged into the next
    /// generation (0.0–1.0).
    pub elite_ratio: f64,

    /// Probability of recombining a selected pair (0.0–1.0).
    ///
    /// When crossover is not applied, a clone of the first parent is used.
    pub crossover_rate: f64,

    /// Probability of mutating an offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Generations without improvement before stopping. 0 disables.
    pub stagnation_limit: usize,

    /// Minimum relative improvement to reset the stagnation counter.
    ///
    /// 0.0 counts any improvement.
    pub convergence_threshold: f64,

    /// Evaluate each generation on the rayon pool.
    pub parallel: bool,

    /// Random seed. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            max_generations: 200,
            selection: Selection::default(),
            elite_ratio: 0.1,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            stagnation_limit: 50,
            convergence_threshold: 0.0,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold.max(0.0);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Small population, few generations. For alternatives and interactive use.
    ///
    /// - Population: 200, Generations: 100, Stagnation limit: 20
    pub fn fast() -> Self {
        Self {
            population_size: 200,
            max_generations: 100,
            stagnation_limit: 20,
            ..Self::default()
        }
    }

    /// Large population, many generations.
    ///
    /// - Population: 2000, Generations: 500, Stagnation limit: 80
    pub fn quality() -> Self {
        Self {
            population_size: 2000,
            max_generations: 500,
            stagnation_limit: 80,
            ..Self::default()
        }
    }

    /// Number of elites for a population of `n`.
    pub fn elite_count(&self, n: usize) -> usize {
        ((n as f64 * self.elite_ratio) as usize).min(n.saturating_sub(1))
    }

    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        let elite_count = (self.population_size as f64 * self.elite_ratio) as usize;
        if elite_count >= self.population_size {
            return Err("elite_ratio too high: elites fill entire population".into());
        }
        if let Selection::Tournament(0) = self.selection {
            return Err("tournament size must be at least 1".into());
        }
        for (name, rate) in [
            ("elite_ratio", self.elite_ratio),
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!("{name} must be within 0.0..=1.0"));
            }
        }
        if self.convergence_threshold < 0.0 || !self.convergence_threshold.is_finite() {
            return Err("convergence_threshold must be finite and non-negative".into());
        }
        Ok(())
    }
}
