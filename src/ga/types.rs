//! Core trait definitions for the GA framework.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the generic
//! evolutionary loop and a concrete problem. Fitness is an `f64` and
//! **higher is better**; negative infinity marks an individual that is
//! unevaluated or infeasible.

use rand::Rng;

/// A candidate solution in the GA population.
///
/// Individuals carry their own cached fitness, written by
/// [`GaProblem::evaluate`].
///
/// ```ignore
/// #[derive(Clone)]
/// struct MySolution {
///     genes: Vec<f64>,
///     fitness: Option<f64>,
/// }
///
/// impl Individual for MySolution {
///     fn fitness(&self) -> f64 {
///         self.fitness.unwrap_or(f64::NEG_INFINITY)
///     }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// Cached fitness; [`f64::NEG_INFINITY`] until evaluated or when infeasible.
    fn fitness(&self) -> f64;

    /// Whether this individual is a usable answer.
    fn is_feasible(&self) -> bool {
        self.fitness().is_finite()
    }
}

/// Defines a GA optimization problem.
///
/// 1. **Initialization**: how to create a (biased) random individual
/// 2. **Evaluation**: how to compute and cache fitness
/// 3. **Crossover**: how to recombine two parents
/// 4. **Mutation**: how to perturb an individual
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync`: the runner evaluates each
/// generation in parallel with rayon. Randomness is only ever drawn on
/// the coordinating thread, through the `rng` the runner passes in.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates an individual for the initial population.
    ///
    /// Returns `None` when no individual can be built at all; the runner
    /// proceeds with however many it got.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Option<Self::Individual>;

    /// Computes fitness and caches it on the individual.
    ///
    /// Must be pure with respect to `self`: called concurrently.
    fn evaluate(&self, individual: &mut Self::Individual);

    /// Produces one or two offspring by recombining two parents.
    ///
    /// The default implementation clones parent1 (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone()]
    }

    /// Mutates an individual in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Called at the end of each generation with the all-time best fitness.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}
