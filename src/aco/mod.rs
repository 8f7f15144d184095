//! Ant Colony Optimization (ACO) for the Euclidean TSP.
//!
//! A population-based metaheuristic in which artificial ants build tours
//! edge by edge, biased by pheromone trails and inverse distance. Shorter
//! tours deposit more pheromone, so good edges become more likely in later
//! iterations.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Colony parameters (ants, iterations, alpha, beta, rho, Q)
//! - [`AntColony`]: Owns the matrices and best-so-far state; drives iterations
//! - [`AcoResult`]: Best tour, its length and the per-iteration history
//! - [`TourBuilder`]: Builds one ant's tour by roulette-wheel selection
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony
//!   of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod config;
mod construct;
mod distance;
mod pheromone;
mod runner;
mod types;

pub use config::AcoConfig;
pub use construct::TourBuilder;
pub use distance::{tour_length, DistanceMatrix};
pub use pheromone::PheromoneMatrix;
pub use runner::{AcoResult, AntColony, MIN_CITIES};
pub use types::{is_permutation, random_cities, Ant, City, IterationRecord};
