//! Pairwise Euclidean distance matrix.

use super::types::City;

/// Symmetric `n × n` table of Euclidean distances with a zero diagonal.
///
/// Stored row-major in a single buffer. Computed once per colony and only
/// read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes the matrix for `cities`. Defined for any number of cities,
    /// including zero and one.
    pub fn from_cities(cities: &[City]) -> Self {
        let n = cities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between cities `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "city index out of range");
        self.data[i * self.n + j]
    }

    /// First pair of cities whose distance is NaN or infinite, if any.
    pub fn find_non_finite(&self) -> Option<(usize, usize)> {
        (0..self.n)
            .flat_map(|i| ((i + 1)..self.n).map(move |j| (i, j)))
            .find(|&(i, j)| !self.data[i * self.n + j].is_finite())
    }

    /// First pair of distinct cities at zero distance, if any.
    pub fn find_coincident(&self) -> Option<(usize, usize)> {
        (0..self.n)
            .flat_map(|i| ((i + 1)..self.n).map(move |j| (i, j)))
            .find(|&(i, j)| self.data[i * self.n + j] == 0.0)
    }
}

/// Closed length of `tour`, including the edge from the last city back to
/// the first.
///
/// Tours with fewer than two cities have length zero.
pub fn tour_length(distances: &DistanceMatrix, tour: &[usize]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let open: f64 = tour.windows(2).map(|w| distances.get(w[0], w[1])).sum();
    open + distances.get(tour[tour.len() - 1], tour[0])
}
