//! Probabilistic tour construction for a single ant.
//!
//! # Algorithm
//!
//! 1. Start at a uniformly random city
//! 2. From the current city, score every unvisited city `c` as
//!    `tau(current, c)^alpha * (1 / d(current, c))^beta`
//! 3. Pick the next city by roulette-wheel selection over the scores
//! 4. Repeat until every city is visited, then close the tour
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant System: Optimization
//! by a Colony of Cooperating Agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use rand::Rng;

use super::distance::DistanceMatrix;
use super::pheromone::PheromoneMatrix;
use super::types::Ant;
use crate::error::{AcoError, Result};

/// Read-only view of the colony state an ant needs while walking.
#[derive(Debug, Clone, Copy)]
pub struct TourBuilder<'a> {
    pub distances: &'a DistanceMatrix,
    pub pheromones: &'a PheromoneMatrix,
    pub alpha: f64,
    pub beta: f64,
}

impl<'a> TourBuilder<'a> {
    pub fn new(
        distances: &'a DistanceMatrix,
        pheromones: &'a PheromoneMatrix,
        alpha: f64,
        beta: f64,
    ) -> Self {
        Self {
            distances,
            pheromones,
            alpha,
            beta,
        }
    }

    /// Builds a complete closed tour for a fresh ant.
    ///
    /// The returned ant's tour is a permutation of all cities and its
    /// `distance` is the closed tour length. Nothing shared is mutated.
    pub fn construct<R: Rng>(&self, rng: &mut R) -> Result<Ant> {
        let n = self.distances.len();
        let mut ant = Ant::new(n);
        if n == 0 {
            return Ok(ant);
        }

        let start = rng.random_range(0..n);
        ant.visit(start, 0.0);

        let mut candidates = Vec::with_capacity(n);
        while !ant.is_complete() {
            let current = ant.tour[ant.tour.len() - 1];
            let next = self.select_next(&ant, current, &mut candidates, rng)?;
            ant.visit(next, self.distances.get(current, next));
        }

        let last = ant.tour[n - 1];
        ant.distance += self.distances.get(last, start);
        Ok(ant)
    }

    /// Attractiveness of moving from `from` to `to`.
    ///
    /// May underflow to zero or overflow to infinity for extreme pheromone
    /// levels and exponents; selection uses [`log_score`](Self::log_score).
    #[inline]
    pub fn score(&self, from: usize, to: usize) -> f64 {
        self.log_score(from, to).exp()
    }

    /// Natural logarithm of [`score`](Self::score), finite for any positive
    /// pheromone level and positive finite distance.
    #[inline]
    pub fn log_score(&self, from: usize, to: usize) -> f64 {
        self.alpha * self.pheromones.level(from, to).ln()
            - self.beta * self.distances.get(from, to).ln()
    }

    /// Roulette-wheel choice among the unvisited cities, scanned in
    /// ascending index order.
    ///
    /// Weights are `exp(log_score - max_log_score)`, proportional to the raw
    /// scores, so the largest weight is 1 and the total stays in `[1, n]`.
    fn select_next<R: Rng>(
        &self,
        ant: &Ant,
        current: usize,
        candidates: &mut Vec<(usize, f64)>,
        rng: &mut R,
    ) -> Result<usize> {
        candidates.clear();
        let mut max_log = f64::NEG_INFINITY;
        for (city, &visited) in ant.visited.iter().enumerate() {
            if !visited {
                let l = self.log_score(current, city);
                if l.is_nan() {
                    return Err(AcoError::SelectionFailed { from: current });
                }
                max_log = max_log.max(l);
                candidates.push((city, l));
            }
        }

        let mut total = 0.0;
        for (_, w) in candidates.iter_mut() {
            *w = if max_log.is_finite() {
                (*w - max_log).exp()
            } else {
                // All scores equally infinite (or all zero): uniform.
                1.0
            };
            total += *w;
        }

        if candidates.is_empty() || total.is_nan() {
            return Err(AcoError::SelectionFailed { from: current });
        }

        roulette(candidates, total, rng.random::<f64>())
            .ok_or(AcoError::SelectionFailed { from: current })
    }
}

/// Walks `candidates` subtracting each score from `u * total` and returns the
/// first city where the remainder reaches zero or below.
///
/// When rounding keeps the remainder positive past the end, the last
/// candidate is returned. `None` only for an empty candidate list.
pub(crate) fn roulette(candidates: &[(usize, f64)], total: f64, u: f64) -> Option<usize> {
    let mut remaining = u * total;
    for &(city, s) in candidates {
        remaining -= s;
        if remaining <= 0.0 {
            return Some(city);
        }
    }
    candidates.last().map(|&(city, _)| city)
}
