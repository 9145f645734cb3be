//! Domain-agnostic generational evolution engine.
//!
//! Runs the classic evolve loop — evaluate, rank, select, recombine,
//! mutate, replace — over an opaque candidate type. The engine only
//! manipulates fitness scores, ranks, and candidate handles; everything
//! domain-specific (how fitness is computed, how two candidates cross
//! over, what counts as a duplicate) is supplied by the caller through
//! the [`Strategy`] trait.
//!
//! # Core Traits
//!
//! - [`Strategy`]: Problem definition — fitness, crossover, mutation,
//!   identity hashes, random generation, plus optional hooks and
//!   observer callbacks
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: Engine parameters (ratios, mutation
//!   probability, termination thresholds, parallelism, seed)
//! - [`Engine`]: Executes the generational loop
//! - [`RunResult`]: Final ranked population with run statistics
//! - [`Scored`]: Per-generation wrapper attaching fitness and rank to a
//!   candidate value
//!
//! # Algorithm
//!
//! Each generation the population is scored (in parallel when enabled),
//! sorted by fitness descending and ranked `1..=N` (worst = 1). Parents
//! are drawn with replacement from a multiset in which each member
//! appears `rank` times, giving selection pressure proportional to rank
//! rather than to raw fitness magnitude. Offspring are produced by
//! crossover and probabilistic mutation, merged with a deduplicated
//! elite slice of the previous generation, deduplicated as a whole, and
//! the shortfall is refilled with fresh random candidates ("new blood")
//! so the population size stays constant.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

mod config;
mod error;
mod runner;
mod selection;
mod types;

pub use config::EvolutionConfig;
pub use error::{EvolveError, Result};
pub use runner::{Engine, RunResult, StopReason};
pub use types::{Scored, Strategy, StrategyResult};
