//! Core trait and record definitions.
//!
//! [`Strategy`] is the contract between the generic engine and a
//! domain-specific problem; [`Scored`] is the per-generation record the
//! engine attaches fitness and rank to.

use std::hash::Hash;

/// Result type for fallible strategy hooks.
///
/// Strategies return their own error types boxed; the engine wraps any
/// failure into [`EvolveError::Strategy`](crate::EvolveError::Strategy)
/// naming the hook, and aborts the run. A strategy that wants evaluation
/// to continue past a recoverable failure should catch it internally and
/// return a sentinel low fitness instead.
pub type StrategyResult<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// A candidate scored for one generation.
///
/// Constructed fresh each generation at evaluation time — candidate
/// values are never mutated in place across generations, so an elite
/// surviving into the next generation gets a brand-new record (and a
/// freshly computed fitness) there.
#[derive(Debug, Clone)]
pub struct Scored<C> {
    /// The caller-defined candidate value.
    pub value: C,

    /// Fitness of `value`, higher is better. Always set: a `Scored` only
    /// exists after evaluation.
    pub fitness: f64,

    /// Selection weight, assigned after ordering: `1` for the worst
    /// member up to `N` for the best. `0` until ranks are assigned; a
    /// rank-0 member contributes nothing to the selection pool.
    pub rank: usize,
}

impl<C> Scored<C> {
    pub(crate) fn new(value: C, fitness: f64) -> Self {
        Scored {
            value,
            fitness,
            rank: 0,
        }
    }
}

/// Defines an evolution problem.
///
/// This is the main trait users implement to plug domain logic into the
/// generic engine. Mandatory hooks have no default body — a problem that
/// forgets one simply does not compile. Optional hooks default to
/// identity transforms or no-ops.
///
/// # Thread Safety
///
/// `Strategy` must be `Send + Sync` because the engine may evaluate
/// fitness in parallel using rayon. Each [`fitness`](Strategy::fitness)
/// invocation owns its candidate for the duration of the call; no
/// candidate is evaluated by more than one invocation at a time.
///
/// # Randomness
///
/// The engine draws parent samples and mutation coin-flips from its own
/// seedable rng (see [`EvolutionConfig::with_seed`]). Randomness inside
/// `random_candidate`, `crossover`, or `mutate` belongs to the strategy;
/// reproducibility of those draws is the caller's concern.
///
/// [`EvolutionConfig::with_seed`]: crate::EvolutionConfig::with_seed
pub trait Strategy: Send + Sync {
    /// The candidate (solution) type. Opaque to the engine beyond
    /// cloning, hashing through the key hooks, and `Debug` for trace
    /// logging.
    type Candidate: Clone + Send + Sync + std::fmt::Debug;

    /// Identity key produced by the hash hooks, used for duplicate
    /// suppression.
    type Key: Eq + Hash;

    /// Computes the fitness of a candidate. Higher is better.
    ///
    /// Typically the most expensive hook; the engine may call it in
    /// parallel across the population and joins all results (in input
    /// order) before proceeding.
    fn fitness(&self, candidate: &Self::Candidate) -> StrategyResult<f64>;

    /// Produces exactly one offspring from a parent pair.
    ///
    /// The same candidate may appear as both parents: pairs are drawn
    /// with replacement.
    fn crossover(
        &self,
        parents: (&Self::Candidate, &Self::Candidate),
    ) -> StrategyResult<Self::Candidate>;

    /// Returns a mutated version of an offspring.
    ///
    /// Called for each offspring with probability
    /// [`mutation_probability`](crate::EvolutionConfig::mutation_probability).
    fn mutate(&self, candidate: Self::Candidate) -> StrategyResult<Self::Candidate>;

    /// Generates one fresh random candidate ("new blood"), used to
    /// refill the population after duplicate suppression.
    fn random_candidate(&self) -> StrategyResult<Self::Candidate>;

    /// Identity key for whole-population duplicate suppression.
    fn general_key(&self, candidate: &Self::Candidate) -> Self::Key;

    /// Identity key for elite duplicate suppression.
    ///
    /// May be coarser or finer than [`general_key`](Strategy::general_key);
    /// two candidates with equal elite keys never both survive as elites.
    fn elite_key(&self, candidate: &Self::Candidate) -> Self::Key;

    /// Observer: called once per run each time the best fitness ever
    /// seen strictly improves, with the current ranked population.
    fn on_best_fitness_improved(&self, _best_fitness: f64, _population: &[Scored<Self::Candidate>]) {
    }

    /// Observer: called once per generation with that generation's best
    /// fitness, improved or not.
    fn on_generation_best_fitness(&self, _best_fitness: f64) {}

    /// Extension hook: transforms the raw population before fitness
    /// evaluation. Defaults to identity.
    fn before_evaluation(
        &self,
        population: Vec<Self::Candidate>,
    ) -> StrategyResult<Vec<Self::Candidate>> {
        Ok(population)
    }

    /// Extension hook: transforms the scored population after fitness
    /// evaluation, before ordering. Defaults to identity.
    fn after_evaluation(
        &self,
        population: Vec<Scored<Self::Candidate>>,
    ) -> StrategyResult<Vec<Scored<Self::Candidate>>> {
        Ok(population)
    }

    /// Extension hook: removes members after ordering, before ranks are
    /// assigned and elitism runs. Defaults to identity.
    fn eliminate(
        &self,
        population: Vec<Scored<Self::Candidate>>,
    ) -> StrategyResult<Vec<Scored<Self::Candidate>>> {
        Ok(population)
    }

    /// Ordering override. The default sorts by fitness descending and is
    /// stable for equal scores, so ties keep their input order.
    fn order_by_fitness(
        &self,
        mut population: Vec<Scored<Self::Candidate>>,
    ) -> Vec<Scored<Self::Candidate>> {
        population.sort_by(|a, b| {
            b.fitness
                .partial_cmp(&a.fitness)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        population
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Strategy for Noop {
        type Candidate = u32;
        type Key = u32;

        fn fitness(&self, candidate: &u32) -> StrategyResult<f64> {
            Ok(*candidate as f64)
        }
        fn crossover(&self, parents: (&u32, &u32)) -> StrategyResult<u32> {
            Ok(*parents.0)
        }
        fn mutate(&self, candidate: u32) -> StrategyResult<u32> {
            Ok(candidate)
        }
        fn random_candidate(&self) -> StrategyResult<u32> {
            Ok(0)
        }
        fn general_key(&self, candidate: &u32) -> u32 {
            *candidate
        }
        fn elite_key(&self, candidate: &u32) -> u32 {
            *candidate
        }
    }

    fn scored(fitnesses: &[f64]) -> Vec<Scored<u32>> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(i, &f)| Scored::new(i as u32, f))
            .collect()
    }

    #[test]
    fn test_default_order_is_descending() {
        let ordered = Noop.order_by_fitness(scored(&[0.2, 0.9, 0.5]));
        let fits: Vec<f64> = ordered.iter().map(|m| m.fitness).collect();
        assert_eq!(fits, vec![0.9, 0.5, 0.2]);
    }

    #[test]
    fn test_default_order_is_stable_for_ties() {
        let ordered = Noop.order_by_fitness(scored(&[0.5, 0.9, 0.5]));
        let values: Vec<u32> = ordered.iter().map(|m| m.value).collect();
        // Both 0.5-scoring members keep their relative input order.
        assert_eq!(values, vec![1, 0, 2]);
    }

    #[test]
    fn test_optional_hooks_default_to_identity() {
        let population = vec![3u32, 1, 4];
        let out = Noop.before_evaluation(population.clone()).unwrap();
        assert_eq!(out, population);

        let scored = scored(&[0.1, 0.2]);
        let out = Noop.after_evaluation(scored.clone()).unwrap();
        assert_eq!(out.len(), 2);
        let out = Noop.eliminate(scored).unwrap();
        assert_eq!(out.len(), 2);
    }
}
