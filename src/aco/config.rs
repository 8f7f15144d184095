//! ACO configuration.

use crate::error::{AcoError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the Ant Colony Optimization algorithm.
///
/// Parameters are fixed for the lifetime of a run. Builders store values
/// as given; out-of-range values are reported by [`AcoConfig::validate`].
///
/// # Examples
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ant_count(20)
///     .with_iteration_count(200)
///     .with_beta(3.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.ant_count, 20);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcoConfig {
    /// Number of ants released per iteration.
    pub ant_count: usize,

    /// Number of iterations to run. There is no early stopping.
    pub iteration_count: usize,

    /// Pheromone influence exponent.
    pub alpha: f64,

    /// Inverse-distance influence exponent.
    ///
    /// Higher values make the colony greedier towards short edges.
    pub beta: f64,

    /// Fraction of pheromone removed each iteration, in `[0, 1)`.
    pub evaporation_rate: f64,

    /// Deposit scale `Q`. Each ant deposits `Q / tour_length` on its edges.
    pub deposit_constant: f64,

    /// Uniform pheromone level every edge starts with.
    pub initial_pheromone: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ant_count: 50,
            iteration_count: 100,
            alpha: 1.0,
            beta: 5.0,
            evaporation_rate: 0.5,
            deposit_constant: 100.0,
            initial_pheromone: 1.0,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_ant_count(mut self, n: usize) -> Self {
        self.ant_count = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iteration_count(mut self, n: usize) -> Self {
        self.iteration_count = n;
        self
    }

    /// Sets the pheromone influence exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the inverse-distance influence exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the evaporation rate. Must lie in `[0, 1)`.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Sets the deposit constant `Q`.
    pub fn with_deposit_constant(mut self, q: f64) -> Self {
        self.deposit_constant = q;
        self
    }

    /// Sets the initial pheromone level. Must be finite and positive.
    pub fn with_initial_pheromone(mut self, level: f64) -> Self {
        self.initial_pheromone = level;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.ant_count == 0 {
            return Err(invalid("ant_count", "must be at least 1".into()));
        }
        if self.iteration_count == 0 {
            return Err(invalid("iteration_count", "must be at least 1".into()));
        }
        if !(0.0..1.0).contains(&self.evaporation_rate) {
            return Err(invalid(
                "evaporation_rate",
                format!("must be in [0, 1), got {}", self.evaporation_rate),
            ));
        }
        if !self.deposit_constant.is_finite() || self.deposit_constant < 0.0 {
            return Err(invalid(
                "deposit_constant",
                format!("must be finite and non-negative, got {}", self.deposit_constant),
            ));
        }
        if !self.alpha.is_finite() {
            return Err(invalid("alpha", format!("must be finite, got {}", self.alpha)));
        }
        if !self.beta.is_finite() {
            return Err(invalid("beta", format!("must be finite, got {}", self.beta)));
        }
        if !self.initial_pheromone.is_finite() || self.initial_pheromone <= 0.0 {
            return Err(invalid(
                "initial_pheromone",
                format!("must be finite and positive, got {}", self.initial_pheromone),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> AcoError {
    AcoError::InvalidConfig { field, reason }
}
