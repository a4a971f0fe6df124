//! Orbit Iteration: Repeated Application of a Scalar Map
//!
//! The primitive underneath every other engine: starting from x_0, apply
//! the map N times and record x_0, x_1, …, x_N.
//!
//! No state is checked for finiteness. An orbit that leaves the invariant
//! set (e.g. the logistic map with r > 4) keeps iterating and the
//! resulting infinities or NaNs show up in the sequence for the caller
//! to filter.

use ndarray::{s, Array1, ArrayView1};
use tracing::trace;

use super::traits::ScalarMap;

/// Inputs to a scalar iterated map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapParameters {
    /// Control parameter θ (growth rate r for the logistic map)
    pub control: f64,
    /// Initial state x_0
    pub initial: f64,
}

impl MapParameters {
    pub fn new(control: f64, initial: f64) -> Self {
        Self { control, initial }
    }

    /// Iterate `map` from these parameters for `n` steps
    pub fn orbit<M: ScalarMap + ?Sized>(&self, map: &M, n: usize) -> OrbitSequence {
        iterate_map(map, self.initial, self.control, n)
    }
}

/// Ordered states x_0..x_N of one orbit
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitSequence {
    /// Control parameter the orbit was computed with
    pub control: f64,
    /// States indexed by iteration count n
    pub states: Array1<f64>,
}

impl OrbitSequence {
    /// Number of recorded states (iterations + 1)
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State after the last iteration
    pub fn last(&self) -> Option<f64> {
        self.states.last().copied()
    }

    /// States after discarding the first `transient` entries
    pub fn steady_state(&self, transient: usize) -> ArrayView1<'_, f64> {
        let start = transient.min(self.states.len());
        self.states.slice(s![start..])
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.states.iter().copied()
    }
}

/// Iterate `map` from `initial` under `control` for `n` steps.
///
/// Returns an orbit of length `n + 1` whose first entry is `initial`.
/// Identical inputs always produce identical output.
pub fn iterate_map<M: ScalarMap + ?Sized>(
    map: &M,
    initial: f64,
    control: f64,
    n: usize,
) -> OrbitSequence {
    let mut states = Vec::with_capacity(n + 1);
    let mut x = initial;
    states.push(x);
    for _ in 0..n {
        x = map.apply(x, control);
        states.push(x);
    }

    trace!(control, initial, n, "iterated orbit");

    OrbitSequence {
        control,
        states: Array1::from_vec(states),
    }
}

/// State after applying `map` `n` times from `initial`, without
/// recording the intermediate states (transient skip).
pub fn advance<M: ScalarMap + ?Sized>(map: &M, initial: f64, control: f64, n: usize) -> f64 {
    (0..n).fold(initial, |x, _| map.apply(x, control))
}

/// Continuous exponential growth `x(t) = x0 · e^{rate · t}` sampled at
/// `samples` evenly spaced times in `[0, t_end]`.
///
/// This is the unbounded model the logistic map corrects; returned as
/// `(time_axis, population)`.
pub fn exponential_growth(
    x0: f64,
    rate: f64,
    t_end: f64,
    samples: usize,
) -> (Array1<f64>, Array1<f64>) {
    let t = Array1::linspace(0.0, t_end, samples);
    let x = t.mapv(|t| x0 * (rate * t).exp());
    (t, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::LogisticMap;
    use approx::assert_relative_eq;

    #[test]
    fn test_orbit_length_includes_initial() {
        let orbit = iterate_map(&LogisticMap, 0.1, 2.0, 100);
        assert_eq!(orbit.len(), 101);
        assert_eq!(orbit.states[0], 0.1);
        assert_relative_eq!(orbit.states[1], 0.18, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_iterations() {
        let orbit = iterate_map(&LogisticMap, 0.3, 3.0, 0);
        assert_eq!(orbit.len(), 1);
        assert_eq!(orbit.last(), Some(0.3));
    }

    #[test]
    fn test_extinction_below_one() {
        for &r in &[0.1, 0.5, 0.9] {
            for &x0 in &[0.01, 0.3, 0.5, 0.99] {
                let orbit = iterate_map(&LogisticMap, x0, r, 2000);
                let last = orbit.last().unwrap();
                assert!(last.abs() < 1e-9, "Expected extinction for r = {}, x0 = {}, got {}", r, x0, last);
            }
        }
    }

    #[test]
    fn test_converges_to_fixed_point() {
        let r = 2.8;
        let orbit = MapParameters::new(r, 0.1).orbit(&LogisticMap, 500);
        assert_relative_eq!(orbit.last().unwrap(), LogisticMap::fixed_point(r), epsilon = 1e-10);
    }

    #[test]
    fn test_divergence_propagates() {
        // r > 4 pushes the orbit out of [0, 1] and it runs away
        let orbit = iterate_map(&LogisticMap, 0.5, 4.5, 50);
        assert_eq!(orbit.len(), 51);
        assert!(!orbit.last().unwrap().is_finite());
    }

    #[test]
    fn test_deterministic() {
        let a = iterate_map(&LogisticMap, 0.2, 3.9, 300);
        let b = iterate_map(&LogisticMap, 0.2, 3.9, 300);
        assert_eq!(a, b);
    }

    #[test]
    fn test_steady_state() {
        let orbit = iterate_map(&|x: f64, _r: f64| x + 1.0, 0.0, 0.0, 5);
        assert_eq!(orbit.steady_state(3).to_vec(), vec![3.0, 4.0, 5.0]);
        assert!(orbit.steady_state(10).is_empty());
    }

    #[test]
    fn test_advance_matches_orbit() {
        let orbit = iterate_map(&LogisticMap, 0.5, 3.7, 40);
        assert_eq!(advance(&LogisticMap, 0.5, 3.7, 40), orbit.last().unwrap());
        assert_eq!(advance(&LogisticMap, 0.5, 3.7, 0), 0.5);
    }

    #[test]
    fn test_exponential_growth() {
        let (t, x) = exponential_growth(2.0, 0.5, 10.0, 400);
        assert_eq!(t.len(), 400);
        assert_eq!(x[0], 2.0);
        assert_relative_eq!(x[399], 2.0 * 5.0_f64.exp(), max_relative = 1e-12);
    }
}
