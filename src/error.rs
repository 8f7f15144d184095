//! Error types for u-aco.

use thiserror::Error;

/// Result type for u-aco operations.
pub type Result<T> = std::result::Result<T, AcoError>;

/// Errors that can occur while building or running an ant colony.
#[derive(Debug, Error)]
pub enum AcoError {
    /// A configuration parameter is outside its accepted range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// Fewer than three cities were supplied.
    #[error("at least 3 cities are required, got {found}")]
    TooFewCities { found: usize },

    /// A city coordinate is NaN or infinite.
    #[error("city {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// Two cities are too far apart for their distance to be represented.
    #[error("distance between cities {first} and {second} is not finite")]
    NonFiniteDistance { first: usize, second: usize },

    /// Two distinct cities share the same coordinates.
    #[error("cities {first} and {second} are coincident (zero distance)")]
    CoincidentCities { first: usize, second: usize },

    /// An ant reported a tour length that cannot be used for a deposit.
    #[error("cannot deposit pheromone for a tour of length {length}")]
    DegenerateTour { length: f64 },

    /// Roulette selection found no candidate with a usable score.
    #[error("no selectable successor for city {from}")]
    SelectionFailed { from: usize },

    /// The per-iteration observer returned an error.
    #[error("iteration observer failed: {0}")]
    Observer(#[source] Box<dyn std::error::Error + Send + Sync>),
}
