//! Generational loop execution.
//!
//! [`Engine`] orchestrates the complete evolutionary process:
//! evaluation → ordering/ranking → stop check → selection → crossover →
//! mutation → elitism → duplicate suppression → replenishment → repeat.

use crate::config::EvolutionConfig;
use crate::error::{EvolveError, Result};
use crate::selection::{assign_ranks, WeightedPool};
use crate::types::{Scored, Strategy};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashSet;

/// Why a run stopped. Checked in this order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The generation's best fitness reached the configured target.
    TargetFitness,
    /// Best fitness was unchanged for the configured number of
    /// consecutive generations.
    Stagnation,
    /// The configured generation budget was exhausted.
    GenerationLimit,
}

/// Result of an evolution run.
///
/// Contains the final ranked population along with statistics about the
/// run.
#[derive(Debug, Clone)]
pub struct RunResult<C> {
    /// The final population, ordered best-first with ranks assigned.
    pub population: Vec<Scored<C>>,

    /// Best fitness of the final generation (same as
    /// `population[0].fitness`).
    pub best_fitness: f64,

    /// Best fitness observed at any point during the run.
    pub best_fitness_ever: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Which stop condition fired.
    pub stop: StopReason,

    /// Best fitness of each generation, one entry per generation.
    pub fitness_history: Vec<f64>,
}

/// Derived per-run member counts.
struct Counts {
    /// Target population size, held constant for the run.
    target: usize,
    /// Elites carried forward from the previous generation.
    elite: usize,
    /// Offspring produced per generation.
    offspring: usize,
}

/// Executes the generational evolution loop.
///
/// # Usage
///
/// ```ignore
/// let engine = Engine::new(MyStrategy::new(), EvolutionConfig::default())?;
/// let result = engine.run(initial_population)?;
/// println!("best fitness: {}", result.best_fitness);
/// ```
pub struct Engine<S: Strategy> {
    strategy: S,
    config: EvolutionConfig,
}

impl<S: Strategy> Engine<S> {
    /// Creates an engine, validating the configuration eagerly.
    pub fn new(strategy: S, config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Engine { strategy, config })
    }

    /// Gives back the wrapped strategy.
    pub fn into_strategy(self) -> S {
        self.strategy
    }

    /// Runs the evolution loop to completion.
    ///
    /// The target population size is the length of `initial`; every
    /// later generation is restored to exactly that size. Returns the
    /// final ranked population once a stop condition fires, or the first
    /// error raised by a strategy hook.
    pub fn run(&self, initial: Vec<S::Candidate>) -> Result<RunResult<S::Candidate>> {
        self.config.validate()?;
        let counts = self.derive_counts(initial.len())?;
        debug!(
            "population size: {}, elites: {}, offspring: {}, new blood: {}",
            counts.target,
            counts.elite,
            counts.offspring,
            counts.target - counts.elite - counts.offspring
        );

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut generation_index = 0usize;
        let mut last_best_fitness = 0.0f64;
        let mut best_fitness_ever: Option<f64> = None;
        let mut generations_without_improvement = 0usize;
        let mut first_generation = true;
        let mut fitness_history = Vec::new();
        let mut population = initial;

        loop {
            let incoming = self
                .strategy
                .before_evaluation(population)
                .map_err(|e| EvolveError::strategy("before_evaluation", e))?;
            let scored = self.evaluate(incoming)?;
            let scored = self
                .strategy
                .after_evaluation(scored)
                .map_err(|e| EvolveError::strategy("after_evaluation", e))?;

            let ordered = self.strategy.order_by_fitness(scored);
            let ordered = self
                .strategy
                .eliminate(ordered)
                .map_err(|e| EvolveError::strategy("eliminate", e))?;
            let ranked = assign_ranks(ordered);

            let best_fitness = ranked
                .first()
                .ok_or(EvolveError::EmptyPopulation)?
                .fitness;
            for member in &ranked {
                trace!("{:.6} {} {:?}", member.fitness, member.rank, member.value);
            }

            self.strategy.on_generation_best_fitness(best_fitness);

            if first_generation || best_fitness != last_best_fitness {
                generations_without_improvement = 0;
            } else {
                generations_without_improvement += 1;
            }
            last_best_fitness = best_fitness;

            if best_fitness_ever.map_or(true, |ever| best_fitness > ever) {
                self.strategy
                    .on_best_fitness_improved(best_fitness, &ranked);
                best_fitness_ever = Some(best_fitness);
            }

            generation_index += 1;
            fitness_history.push(best_fitness);
            debug!(
                "generation {}: best fitness {}, unchanged for {}",
                generation_index, best_fitness, generations_without_improvement
            );

            if let Some(stop) = self.stop_condition(
                best_fitness,
                generations_without_improvement,
                generation_index,
            ) {
                debug!("stopping after generation {}: {:?}", generation_index, stop);
                return Ok(RunResult {
                    best_fitness,
                    best_fitness_ever: best_fitness_ever.unwrap_or(best_fitness),
                    generations: generation_index,
                    stop,
                    fitness_history,
                    population: ranked,
                });
            }

            population = self.evolve(&ranked, &counts, &mut rng)?;
            first_generation = false;
        }
    }

    /// Derives elite/offspring/new-blood counts from the initial
    /// population length, rejecting configurations that leave no room
    /// for offspring.
    fn derive_counts(&self, population_size: usize) -> Result<Counts> {
        if population_size == 0 {
            return Err(EvolveError::Configuration(
                "initial population is empty".into(),
            ));
        }
        let elite = (population_size as f64 * self.config.elite_ratio).floor() as usize;
        let new_blood = (population_size as f64 * self.config.new_blood_ratio).floor() as usize;
        if elite + new_blood >= population_size {
            return Err(EvolveError::Configuration(format!(
                "population of {population_size} leaves no offspring: \
                 {elite} elites + {new_blood} new blood"
            )));
        }
        Ok(Counts {
            target: population_size,
            elite,
            offspring: population_size - elite - new_blood,
        })
    }

    /// Scores every candidate, rebuilding the population in input order.
    ///
    /// With `parallel` enabled the fan-out runs on the rayon pool; the
    /// collect joins all evaluations before the engine proceeds. A single
    /// failed evaluation aborts the run.
    fn evaluate(&self, population: Vec<S::Candidate>) -> Result<Vec<Scored<S::Candidate>>> {
        let score = |value: S::Candidate| -> Result<Scored<S::Candidate>> {
            let fitness = self
                .strategy
                .fitness(&value)
                .map_err(|e| EvolveError::strategy("fitness", e))?;
            Ok(Scored::new(value, fitness))
        };
        if self.config.parallel {
            population.into_par_iter().map(score).collect()
        } else {
            population.into_iter().map(score).collect()
        }
    }

    fn stop_condition(
        &self,
        best_fitness: f64,
        generations_without_improvement: usize,
        generation_index: usize,
    ) -> Option<StopReason> {
        if self
            .config
            .target_fitness
            .map_or(false, |target| best_fitness >= target)
        {
            Some(StopReason::TargetFitness)
        } else if generations_without_improvement >= self.config.stagnation_limit {
            Some(StopReason::Stagnation)
        } else if generation_index >= self.config.max_generations {
            Some(StopReason::GenerationLimit)
        } else {
            None
        }
    }

    /// Produces the next generation's input population from the current
    /// ranked one.
    fn evolve(
        &self,
        ranked: &[Scored<S::Candidate>],
        counts: &Counts,
        rng: &mut StdRng,
    ) -> Result<Vec<S::Candidate>> {
        let pool = WeightedPool::new(ranked)?;

        let mut offspring = Vec::with_capacity(counts.offspring);
        for _ in 0..counts.offspring {
            let (a, b) = pool.draw_pair(rng);
            let child = self
                .strategy
                .crossover((&ranked[a].value, &ranked[b].value))
                .map_err(|e| EvolveError::strategy("crossover", e))?;
            let child = if rng.random::<f64>() < self.config.mutation_probability {
                self.strategy
                    .mutate(child)
                    .map_err(|e| EvolveError::strategy("mutate", e))?
            } else {
                child
            };
            offspring.push(child);
        }

        // Elites come from the previous, already-ranked generation:
        // deduplicate best-first by elite key, then take the elite quota.
        let mut seen = HashSet::new();
        let mut next: Vec<S::Candidate> = ranked
            .iter()
            .filter(|member| seen.insert(self.strategy.elite_key(&member.value)))
            .take(counts.elite)
            .map(|member| member.value.clone())
            .collect();
        next.extend(offspring);

        // Whole-population duplicate suppression, keeping first
        // occurrence (elites win over colliding offspring).
        let mut seen = HashSet::new();
        next.retain(|candidate| seen.insert(self.strategy.general_key(candidate)));

        // Refill the shortfall with new blood. Replenished candidates
        // are not re-checked against the hash.
        while next.len() < counts.target {
            next.push(
                self.strategy
                    .random_candidate()
                    .map_err(|e| EvolveError::strategy("random_candidate", e))?,
            );
        }
        Ok(next)
    }
}
