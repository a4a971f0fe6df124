//! Poincaré (return) map of interval sequences.
//!
//! Plotting each interval against its predecessor collapses the rhythm
//! onto low-dimensional structure: one point for a regular rhythm, two
//! mirrored points for alternans, a parabola-shaped curve for chaos.

use ndarray::{s, Array1};

use super::intervals::IntervalSequence;

/// Lag-1 return map `(I_{n-1}, I_n)`
#[derive(Debug, Clone, PartialEq)]
pub struct PoincareMap {
    /// Predecessors I_{n-1}
    pub previous: Array1<f64>,
    /// Successors I_n
    pub next: Array1<f64>,
}

impl PoincareMap {
    /// Return map of `values` after dropping the first `transient` entries.
    /// Yields `len - transient - 1` pairs (none if that is not positive).
    pub fn from_values(values: &Array1<f64>, transient: usize) -> Self {
        let start = transient.min(values.len());
        let steady = values.slice(s![start..]);
        if steady.len() < 2 {
            return Self {
                previous: Array1::zeros(0),
                next: Array1::zeros(0),
            };
        }
        Self {
            previous: steady.slice(s![..-1]).to_owned(),
            next: steady.slice(s![1..]).to_owned(),
        }
    }

    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// `(I_{n-1}, I_n)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.previous.iter().copied().zip(self.next.iter().copied())
    }

    /// Root mean square of successive differences, the standard
    /// short-term variability measure (0 for a perfectly regular rhythm)
    pub fn rmssd(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.points().map(|(a, b)| (b - a).powi(2)).sum();
        (sum_sq / self.len() as f64).sqrt()
    }
}

/// Lag-1 return map of `intervals` after discarding `transient` entries
pub fn build_poincare(intervals: &IntervalSequence, transient: usize) -> PoincareMap {
    PoincareMap::from_values(&intervals.values, transient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardiac::{synthesize_intervals, ScaleRange};

    #[test]
    fn test_lengths_and_indexing() {
        let seq = synthesize_intervals(3.7, 200, ScaleRange::default()).unwrap();
        let map = build_poincare(&seq, 50);
        assert_eq!(map.len(), 200 - 50 - 1);
        assert_eq!(map.previous.len(), map.next.len());
        for k in 0..map.len() {
            assert_eq!(map.next[k], seq.values[50 + 1 + k]);
            assert_eq!(map.previous[k], seq.values[50 + k]);
        }
    }

    #[test]
    fn test_short_sequences_are_empty() {
        let values = Array1::from_vec(vec![0.3, 0.31, 0.29]);
        assert_eq!(PoincareMap::from_values(&values, 1).len(), 1);
        assert!(PoincareMap::from_values(&values, 2).is_empty());
        assert!(PoincareMap::from_values(&values, 10).is_empty());
    }

    #[test]
    fn test_regular_rhythm_has_no_variability() {
        let seq = synthesize_intervals(2.8, 200, ScaleRange::default()).unwrap();
        assert!(build_poincare(&seq, 100).rmssd() < 1e-9);
    }

    #[test]
    fn test_alternans_two_points() {
        let seq = synthesize_intervals(3.2, 200, ScaleRange::default()).unwrap();
        let map = build_poincare(&seq, 100);
        // alternating long/short beats land mirrored across the diagonal
        for (a, b) in map.points() {
            assert!((a - b).abs() > 0.04);
        }
        assert!(map.rmssd() > 0.04);
    }
}
