//! Ant Colony Optimization for the Traveling Salesman Problem.
//!
//! Given a set of 2D cities, the [`aco::AntColony`] engine searches for a
//! short closed tour visiting every city once:
//!
//! - **Distance model**: symmetric Euclidean distance matrix, computed once.
//! - **Pheromone model**: evaporated and reinforced every iteration.
//! - **Tour construction**: probabilistic, pheromone- and distance-weighted.
//! - **Colony control**: fixed iteration budget, best-so-far tracking and a
//!   per-iteration history that a caller may poll or observe.
//!
//! # Architecture
//!
//! The engine is a pure computational library. It holds no presentation
//! state; rendering, input handling and progress display belong to the
//! caller, which reads tours, distances, pheromone levels and history
//! through side-effect-free accessors.

pub mod aco;
pub mod error;

pub use error::{AcoError, Result};
