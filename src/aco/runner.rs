//! Colony execution loop.
//!
//! [`AntColony`] owns the distance and pheromone matrices, the best tour
//! found so far and the per-iteration history. Each iteration:
//!
//! 1. Every ant builds a tour against the current (read-only) pheromones
//! 2. The global best is replaced only on strict improvement
//! 3. Pheromones evaporate once, then each ant deposits `Q / length`
//! 4. An [`IterationRecord`] is appended to the history
//!
//! Iteration boundaries are the only suspension points: [`AntColony::step`]
//! runs exactly one iteration, so a caller can pause between steps and
//! resume later without losing state.

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::AcoConfig;
use super::construct::TourBuilder;
use super::distance::DistanceMatrix;
use super::pheromone::PheromoneMatrix;
use super::types::{Ant, City, IterationRecord};
use crate::error::{AcoError, Result};

/// Minimum number of cities a colony accepts.
pub const MIN_CITIES: usize = 3;

/// Result of a complete (or cancelled) colony run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AcoResult {
    /// Best closed tour found.
    pub best_tour: Vec<usize>,

    /// Length of `best_tour`.
    pub best_distance: f64,

    /// One record per completed iteration.
    pub history: Vec<IterationRecord>,

    /// Number of iterations completed.
    pub iterations: usize,

    /// Whether the run stopped early because of a cancellation request.
    pub cancelled: bool,
}

impl AcoResult {
    /// Smallest and largest best distance over the history, or `None` if
    /// no iteration completed.
    pub fn distance_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.history.iter().map(|r| r.best_distance);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

/// Ant Colony Optimization engine for one TSP instance.
///
/// # Examples
///
/// ```
/// use u_aco::aco::{AcoConfig, AntColony, City};
///
/// let cities = vec![
///     City::new(0.0, 0.0),
///     City::new(10.0, 0.0),
///     City::new(10.0, 10.0),
///     City::new(0.0, 10.0),
/// ];
/// let config = AcoConfig::default()
///     .with_ant_count(10)
///     .with_iteration_count(20)
///     .with_seed(42);
///
/// let mut colony = AntColony::new(cities, config).unwrap();
/// let result = colony.run().unwrap();
/// assert!((result.best_distance - 40.0).abs() < 1e-9);
/// assert_eq!(result.history.len(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct AntColony {
    config: AcoConfig,
    cities: Vec<City>,
    distances: DistanceMatrix,
    pheromones: PheromoneMatrix,
    best_tour: Option<Vec<usize>>,
    best_distance: f64,
    history: Vec<IterationRecord>,
    rng: StdRng,
}

impl AntColony {
    /// Creates a colony, seeding its random source from `config.seed` or
    /// from system entropy.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid, fewer than
    /// [`MIN_CITIES`] cities are given, a coordinate or pairwise distance is
    /// not finite, or two cities coincide.
    pub fn new(cities: Vec<City>, config: AcoConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(cities, config, rng)
    }

    /// Creates a colony driven by a caller-supplied random source.
    /// `config.seed` is ignored.
    pub fn with_rng(cities: Vec<City>, config: AcoConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;

        if cities.len() < MIN_CITIES {
            return Err(AcoError::TooFewCities {
                found: cities.len(),
            });
        }
        if let Some(index) = cities
            .iter()
            .position(|c| !(c.x.is_finite() && c.y.is_finite()))
        {
            return Err(AcoError::NonFiniteCoordinate { index });
        }

        let distances = DistanceMatrix::from_cities(&cities);
        if let Some((first, second)) = distances.find_non_finite() {
            return Err(AcoError::NonFiniteDistance { first, second });
        }
        if let Some((first, second)) = distances.find_coincident() {
            return Err(AcoError::CoincidentCities { first, second });
        }

        let pheromones = PheromoneMatrix::new(cities.len(), config.initial_pheromone);

        Ok(Self {
            history: Vec::with_capacity(config.iteration_count),
            config,
            cities,
            distances,
            pheromones,
            best_tour: None,
            best_distance: f64::INFINITY,
            rng,
        })
    }

    /// Runs every remaining iteration.
    pub fn run(&mut self) -> Result<AcoResult> {
        self.run_with_cancel(|_, _| Ok::<(), Infallible>(()), None)
    }

    /// Runs every remaining iteration, calling `observer` after each one.
    ///
    /// The observer is invoked synchronously, once per completed iteration,
    /// with the iteration index and that iteration's ants. It runs after
    /// the pheromone update and history append, so colony state is
    /// consistent while it runs. Returning an error stops the run and
    /// surfaces as [`AcoError::Observer`]; the iteration it observed stays
    /// recorded.
    pub fn run_with_observer<F, E>(&mut self, observer: F) -> Result<AcoResult>
    where
        F: FnMut(usize, &[Ant]) -> std::result::Result<(), E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        self.run_with_cancel(observer, None)
    }

    /// Runs with an observer and an optional cancellation flag.
    ///
    /// The flag is checked before each iteration. A set flag stops the run
    /// without starting another iteration; the result reports
    /// `cancelled = true` and the best tour found so far.
    pub fn run_with_cancel<F, E>(
        &mut self,
        mut observer: F,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AcoResult>
    where
        F: FnMut(usize, &[Ant]) -> std::result::Result<(), E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        info!(
            cities = self.cities.len(),
            ants = self.config.ant_count,
            iterations = self.config.iteration_count,
            "starting ant colony run"
        );

        let mut cancelled = false;
        while !self.is_finished() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    warn!(
                        completed = self.history.len(),
                        "ant colony run cancelled"
                    );
                    cancelled = true;
                    break;
                }
            }

            let iteration = self.history.len();
            if let Some(ants) = self.step()? {
                observer(iteration, ants.as_slice()).map_err(|e| AcoError::Observer(e.into()))?;
            }
        }

        info!(
            best_distance = self.best_distance,
            iterations = self.history.len(),
            "ant colony run finished"
        );

        Ok(self.result(cancelled))
    }

    /// Runs one iteration and returns its ant population, or `None` once
    /// the iteration budget is exhausted.
    ///
    /// The iteration is all-or-nothing: if an ant fails, best tour,
    /// pheromones and history are left as they were.
    pub fn step(&mut self) -> Result<Option<Vec<Ant>>> {
        if self.is_finished() {
            return Ok(None);
        }
        let iteration = self.history.len();

        let builder = TourBuilder::new(
            &self.distances,
            &self.pheromones,
            self.config.alpha,
            self.config.beta,
        );
        let ants = (0..self.config.ant_count)
            .map(|_| builder.construct(&mut self.rng))
            .collect::<Result<Vec<Ant>>>()?;

        // Validate every deposit before touching the matrix.
        if let Some(bad) = ants
            .iter()
            .find(|a| !(a.distance.is_finite() && a.distance > 0.0))
        {
            return Err(AcoError::DegenerateTour {
                length: bad.distance,
            });
        }

        if let Some(best_ant) = first_shortest(&ants) {
            if best_ant.distance < self.best_distance {
                debug!(
                    iteration,
                    distance = best_ant.distance,
                    previous = self.best_distance,
                    "new best tour"
                );
                self.best_distance = best_ant.distance;
                self.best_tour = Some(best_ant.tour.clone());
            }
        }

        self.pheromones.evaporate(self.config.evaporation_rate);
        for ant in &ants {
            self.pheromones
                .reinforce(&ant.tour, ant.distance, self.config.deposit_constant)?;
        }

        let best_tour = self.best_tour.clone().unwrap_or_default();
        self.history.push(IterationRecord {
            iteration,
            best_distance: self.best_distance,
            best_tour,
        });
        trace!(iteration, best_distance = self.best_distance, "iteration complete");

        Ok(Some(ants))
    }

    /// Returns `true` once the configured number of iterations has run.
    pub fn is_finished(&self) -> bool {
        self.history.len() >= self.config.iteration_count
    }

    pub fn iterations_completed(&self) -> usize {
        self.history.len()
    }

    /// Best tour found so far, `None` before the first iteration.
    pub fn best_tour(&self) -> Option<&[usize]> {
        self.best_tour.as_deref()
    }

    /// Length of the best tour, `f64::INFINITY` before the first iteration.
    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    /// Pheromone level between cities `i` and `j`.
    pub fn pheromone_level(&self, i: usize, j: usize) -> f64 {
        self.pheromones.level(i, j)
    }

    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    fn result(&self, cancelled: bool) -> AcoResult {
        AcoResult {
            best_tour: self.best_tour.clone().unwrap_or_default(),
            best_distance: self.best_distance,
            history: self.history.clone(),
            iterations: self.history.len(),
            cancelled,
        }
    }
}

/// The earliest ant with the smallest distance; later ties never win.
fn first_shortest(ants: &[Ant]) -> Option<&Ant> {
    ants.iter().fold(None, |best: Option<&Ant>, a| match best {
        Some(b) if a.distance >= b.distance => Some(b),
        _ => Some(a),
    })
}
