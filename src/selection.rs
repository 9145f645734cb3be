//! Rank assignment and rank-weighted parent selection.
//!
//! Selection probability is proportional to a member's rank position,
//! not to its raw fitness value, so fitness needs neither positivity nor
//! boundedness for the weighting to work.
//!
//! # References
//!
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use crate::error::{EvolveError, Result};
use crate::types::Scored;
use rand::Rng;

/// Assigns ranks to an ordered (best-first) population.
///
/// The best member receives rank `N`, the worst rank `1`, making rank
/// directly usable as a selection weight.
pub(crate) fn assign_ranks<C>(mut population: Vec<Scored<C>>) -> Vec<Scored<C>> {
    let n = population.len();
    for (position, member) in population.iter_mut().enumerate() {
        member.rank = n - position;
    }
    population
}

/// Rank-weighted sampling pool over a ranked population.
///
/// A member with rank `r` appears `r` times in the pool, so a uniform
/// draw over the pool selects it with probability `r / (N(N+1)/2)`.
/// Draws are with replacement: the same member may be both parents of a
/// pair and a parent of many pairs.
pub(crate) struct WeightedPool {
    /// Population indices, index `i` repeated `rank(i)` times.
    indices: Vec<usize>,
}

impl WeightedPool {
    /// Builds the pool from a ranked population.
    ///
    /// Fails with [`EvolveError::EmptyPopulation`] when no member
    /// carries a positive rank (empty input included).
    pub(crate) fn new<C>(population: &[Scored<C>]) -> Result<Self> {
        let total: usize = population.iter().map(|member| member.rank).sum();
        let mut indices = Vec::with_capacity(total);
        for (i, member) in population.iter().enumerate() {
            for _ in 0..member.rank {
                indices.push(i);
            }
        }
        if indices.is_empty() {
            return Err(EvolveError::EmptyPopulation);
        }
        Ok(WeightedPool { indices })
    }

    /// Draws one parent pair: two independent uniform samples.
    pub(crate) fn draw_pair<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        (self.draw(rng), self.draw(rng))
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> usize {
        self.indices[rng.random_range(0..self.indices.len())]
    }
}
