//! Engine configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control the
//! generational loop. Strategies are supplied separately, to
//! [`Engine::new`](crate::Engine::new).

use crate::error::{EvolveError, Result};

/// Configuration for the evolution engine.
///
/// Population size is not part of the configuration: it is derived from
/// the initial population handed to [`Engine::run`](crate::Engine::run)
/// and held constant for the run.
///
/// # Defaults
///
/// ```
/// use evoloop::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.elite_ratio, 0.1);
/// assert_eq!(config.new_blood_ratio, 0.05);
/// assert_eq!(config.mutation_probability, 0.5);
/// assert_eq!(config.max_generations, 50_000);
/// assert_eq!(config.stagnation_limit, 50_000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evoloop::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_elite_ratio(0.2)
///     .with_mutation_probability(0.3)
///     .with_target_fitness(1.0)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Fraction of the population carried forward as elites (0.0–1.0).
    ///
    /// `elite_count = floor(N * elite_ratio)`. Elites are deduplicated by
    /// the strategy's elite key before the count is taken.
    pub elite_ratio: f64,

    /// Fraction of the population reserved for fresh random candidates
    /// (0.0–1.0). `new_blood_count = floor(N * new_blood_ratio)`.
    ///
    /// This sets the offspring budget (`N - elite_count -
    /// new_blood_count`); the new blood actually added each generation is
    /// whatever restores the population to `N` after duplicate
    /// suppression, which may be more.
    pub new_blood_ratio: f64,

    /// Probability of mutating each offspring (0.0–1.0). `0.0` never
    /// mutates, `1.0` always does.
    pub mutation_probability: f64,

    /// Stop once the generation's best fitness reaches this value.
    ///
    /// `None` disables fitness-based termination (the default).
    pub target_fitness: Option<f64>,

    /// Stop after this many consecutive generations without a change in
    /// best fitness.
    pub stagnation_limit: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Whether to evaluate fitness in parallel using rayon.
    pub parallel: bool,

    /// Seed for the engine's own rng (parent sampling and mutation
    /// coin-flips). `None` uses a random seed. Randomness inside the
    /// caller's strategies is not covered.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            elite_ratio: 0.1,
            new_blood_ratio: 0.05,
            mutation_probability: 0.5,
            target_fitness: None,
            stagnation_limit: 50_000,
            max_generations: 50_000,
            parallel: true,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the elite ratio.
    pub fn with_elite_ratio(mut self, ratio: f64) -> Self {
        self.elite_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the new-blood ratio.
    pub fn with_new_blood_ratio(mut self, ratio: f64) -> Self {
        self.new_blood_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = probability.clamp(0.0, 1.0);
        self
    }

    /// Sets the target fitness at which the run stops.
    pub fn with_target_fitness(mut self, fitness: f64) -> Self {
        self.target_fitness = Some(fitness);
        self
    }

    /// Sets the stagnation limit.
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the engine rng seed for reproducible parent sampling and
    /// mutation draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Population-size-dependent checks (offspring count reaching zero)
    /// happen at run start, once the initial population is known.
    pub fn validate(&self) -> Result<()> {
        if self.elite_ratio + self.new_blood_ratio >= 1.0 {
            return Err(EvolveError::Configuration(
                "elite_ratio + new_blood_ratio must be < 1.0: no room for offspring".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(EvolveError::Configuration(
                "max_generations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
