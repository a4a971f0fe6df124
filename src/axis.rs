//! Evenly spaced sample axes.

use ndarray::Array1;

/// `n` evenly spaced values from `start` to `end`, both included.
///
/// The last entry is pinned to `end` so inclusive range checks on the
/// axis hold exactly. `n = 1` yields `[start]`, `n = 0` an empty axis.
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    let mut axis = Array1::linspace(start, end, n);
    if n > 1 {
        axis[n - 1] = end;
    }
    axis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_exact() {
        let axis = linspace(2.4, 4.0, 800);
        assert_eq!(axis.len(), 800);
        assert_eq!(axis[0], 2.4);
        assert_eq!(axis[799], 4.0);
        assert!(axis.iter().all(|&r| (2.4..=4.0).contains(&r)));
    }

    #[test]
    fn test_degenerate_lengths() {
        assert_eq!(linspace(1.0, 2.0, 1).to_vec(), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }
}
