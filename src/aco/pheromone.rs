//! Pheromone trail matrix.
//!
//! Each iteration the whole matrix decays by `(1 - rate)` and every ant
//! then reinforces the edges of its tour by `Q / tour_length`. Deposits are
//! applied to both `(i, j)` and `(j, i)`, so the matrix stays symmetric.

use crate::error::{AcoError, Result};

/// Square matrix of strictly positive pheromone intensities.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    data: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an `n × n` matrix filled with `initial`.
    pub fn new(n: usize, initial: f64) -> Self {
        Self {
            n,
            data: vec![initial; n * n],
        }
    }

    /// Creates an `n × n` matrix filled with 1.0.
    pub fn initialize(n: usize) -> Self {
        Self::new(n, 1.0)
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Current pheromone level on edge `(i, j)`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn level(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "city index out of range");
        self.data[i * self.n + j]
    }

    /// Multiplies every entry, diagonal included, by `(1 - rate)`.
    ///
    /// Entries never drop below `f64::MIN_POSITIVE`, so repeated decay
    /// without deposits cannot underflow to zero.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for level in &mut self.data {
            *level = (*level * keep).max(f64::MIN_POSITIVE);
        }
    }

    /// Adds `amount` to both directions of every edge of the closed `tour`,
    /// including the edge from the last city back to the first.
    pub fn deposit(&mut self, tour: &[usize], amount: f64) {
        let len = tour.len();
        if len < 2 {
            return;
        }
        for k in 0..len {
            let from = tour[k];
            let to = tour[(k + 1) % len];
            self.data[from * self.n + to] += amount;
            self.data[to * self.n + from] += amount;
        }
    }

    /// Deposits `q / tour_length` on the edges of `tour`.
    ///
    /// Fails with [`AcoError::DegenerateTour`] when `tour_length` is not
    /// strictly positive and finite, instead of writing NaN or infinity
    /// into the matrix.
    pub fn reinforce(&mut self, tour: &[usize], tour_length: f64, q: f64) -> Result<()> {
        if !(tour_length.is_finite() && tour_length > 0.0) {
            return Err(AcoError::DegenerateTour {
                length: tour_length,
            });
        }
        self.deposit(tour, q / tour_length);
        Ok(())
    }

    /// Highest level over distinct city pairs, or 0.0 with fewer than two
    /// cities.
    pub fn max_level(&self) -> f64 {
        let mut max = 0.0_f64;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                max = max.max(self.data[i * self.n + j]);
            }
        }
        max
    }

    /// Level on `(i, j)` relative to [`max_level`](Self::max_level), in `(0, 1]`.
    pub fn normalized_level(&self, i: usize, j: usize) -> f64 {
        let max = self.max_level();
        if max > 0.0 {
            self.level(i, j) / max
        } else {
            0.0
        }
    }

    /// Returns `true` if `level(i, j) == level(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| {
            ((i + 1)..self.n).all(|j| self.data[i * self.n + j] == self.data[j * self.n + i])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initialize_uniform() {
        let p = PheromoneMatrix::initialize(4);
        assert_eq!(p.len(), 4);
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(p.level(i, j), 1.0);
            }
        }
    }

    #[test]
    fn test_evaporate() {
        let mut p = PheromoneMatrix::initialize(3);
        p.evaporate(0.25);
        for i in 0..3 {
            for j in 0..3 {
                assert!((p.level(i, j) - 0.75).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_evaporate_zero_rate_is_identity() {
        let mut p = PheromoneMatrix::initialize(3);
        p.evaporate(0.0);
        assert_eq!(p, PheromoneMatrix::initialize(3));
    }

    #[test]
    fn test_evaporate_never_reaches_zero() {
        let mut p = PheromoneMatrix::initialize(2);
        for _ in 0..5000 {
            p.evaporate(0.9);
        }
        assert!(p.level(0, 1) > 0.0);
    }

    #[test]
    fn test_deposit_includes_closing_edge() {
        let mut p = PheromoneMatrix::new(4, 1.0);
        p.deposit(&[0, 1, 2, 3], 0.5);
        for (i, j) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            assert!((p.level(i, j) - 1.5).abs() < 1e-12);
            assert!((p.level(j, i) - 1.5).abs() < 1e-12);
        }
        assert!((p.level(0, 2) - 1.0).abs() < 1e-12);
        assert!((p.level(1, 3) - 1.0).abs() < 1e-12);
        assert!(p.is_symmetric());
    }

    #[test]
    fn test_reinforce_amount() {
        let mut p = PheromoneMatrix::new(3, 1.0);
        p.reinforce(&[0, 1, 2], 50.0, 100.0).unwrap();
        assert!((p.level(0, 1) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_reinforce_rejects_zero_length() {
        let mut p = PheromoneMatrix::new(3, 1.0);
        let err = p.reinforce(&[0, 1, 2], 0.0, 100.0).unwrap_err();
        assert!(matches!(err, AcoError::DegenerateTour { .. }));
        assert_eq!(p, PheromoneMatrix::new(3, 1.0));
    }

    #[test]
    fn test_max_and_normalized_level() {
        let mut p = PheromoneMatrix::new(3, 1.0);
        p.deposit(&[0, 1], 1.0);
        assert!((p.max_level() - 3.0).abs() < 1e-12);
        assert!((p.normalized_level(0, 1) - 1.0).abs() < 1e-12);
        assert!((p.normalized_level(1, 2) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(PheromoneMatrix::initialize(1).max_level(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_symmetric_and_positive(
            rate in 0.0f64..0.999,
            n in 3usize..9,
            rounds in proptest::collection::vec((0usize..1000, 0.0f64..50.0), 1..30),
        ) {
            let mut p = PheromoneMatrix::initialize(n);
            for (shift, amount) in rounds {
                p.evaporate(rate);
                let tour: Vec<usize> = (0..n).map(|k| (k + shift) % n).collect();
                p.deposit(&tour, amount);
            }
            prop_assert!(p.is_symmetric());
            for i in 0..n {
                for j in 0..n {
                    prop_assert!(p.level(i, j) > 0.0);
                    prop_assert!(p.level(i, j).is_finite());
                }
            }
        }
    }
}
