//! Core data types: cities, ants and iteration records.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in the plane. Cities are identified by their index in the
/// input sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Generates `count` cities uniformly inside a `width × height` area,
/// keeping `margin` units away from every border.
///
/// If the margin leaves no room on an axis, cities are placed on the
/// centre line of that axis.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use u_aco::aco::random_cities;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let cities = random_cities(20, 800.0, 600.0, 50.0, &mut rng);
/// assert_eq!(cities.len(), 20);
/// assert!(cities.iter().all(|c| c.x >= 50.0 && c.x <= 750.0));
/// ```
pub fn random_cities<R: Rng>(
    count: usize,
    width: f64,
    height: f64,
    margin: f64,
    rng: &mut R,
) -> Vec<City> {
    (0..count)
        .map(|_| City {
            x: sample_axis(width, margin, rng),
            y: sample_axis(height, margin, rng),
        })
        .collect()
}

fn sample_axis<R: Rng>(extent: f64, margin: f64, rng: &mut R) -> f64 {
    let span = extent - 2.0 * margin;
    if span > 0.0 {
        margin + rng.random::<f64>() * span
    } else {
        extent / 2.0
    }
}

/// A transient worker that builds one tour during one iteration.
#[derive(Debug, Clone)]
pub struct Ant {
    /// Visiting order, a permutation of `0..n` once construction finishes.
    pub tour: Vec<usize>,
    /// `visited[c]` is true once city `c` is on the tour.
    pub visited: Vec<bool>,
    /// Closed tour length accumulated so far.
    pub distance: f64,
}

impl Ant {
    /// Creates an ant with an empty tour over `n` cities.
    pub fn new(n: usize) -> Self {
        Self {
            tour: Vec::with_capacity(n),
            visited: vec![false; n],
            distance: 0.0,
        }
    }

    /// Appends `city` to the tour and adds `edge` to the running length.
    pub(crate) fn visit(&mut self, city: usize, edge: f64) {
        self.tour.push(city);
        self.visited[city] = true;
        self.distance += edge;
    }

    /// Returns `true` once every city has been visited.
    pub fn is_complete(&self) -> bool {
        self.tour.len() == self.visited.len()
    }
}

/// Snapshot of the colony state at the end of one iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IterationRecord {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Best closed tour length found up to and including this iteration.
    pub best_distance: f64,
    /// Copy of the best tour at this point.
    pub best_tour: Vec<usize>,
}

/// Returns `true` if `tour` contains every index in `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_city_distance() {
        let a = City::new(0.0, 0.0);
        let b = City::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_city_distance_large_coordinates() {
        let a = City::new(1e200, 0.0);
        let b = City::new(0.0, 1e200);
        let d = a.distance_to(&b);
        assert!(d.is_finite());
        assert!((d / 1e200 - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_random_cities_within_margin() {
        let mut rng = StdRng::seed_from_u64(1);
        let cities = random_cities(500, 800.0, 600.0, 50.0, &mut rng);
        assert_eq!(cities.len(), 500);
        for c in &cities {
            assert!(c.x >= 50.0 && c.x <= 750.0, "x out of bounds: {}", c.x);
            assert!(c.y >= 50.0 && c.y <= 550.0, "y out of bounds: {}", c.y);
        }
    }

    #[test]
    fn test_random_cities_reproducible() {
        let a = random_cities(10, 100.0, 100.0, 0.0, &mut StdRng::seed_from_u64(9));
        let b = random_cities(10, 100.0, 100.0, 0.0, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_cities_margin_too_large() {
        let mut rng = StdRng::seed_from_u64(3);
        let cities = random_cities(3, 100.0, 40.0, 30.0, &mut rng);
        assert!(cities.iter().all(|c| (c.y - 20.0).abs() < 1e-12));
        assert!(cities.iter().all(|c| c.x >= 30.0 && c.x <= 70.0));
    }

    #[test]
    fn test_ant_visit() {
        let mut ant = Ant::new(3);
        ant.visit(2, 0.0);
        ant.visit(0, 1.5);
        assert!(!ant.is_complete());
        ant.visit(1, 2.0);
        assert!(ant.is_complete());
        assert_eq!(ant.tour, vec![2, 0, 1]);
        assert!(ant.visited.iter().all(|&v| v));
        assert!((ant.distance - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(is_permutation(&[], 0));
    }
}
