//! Logistic Map: Bounded Population Growth
//!
//! The logistic map models a population with limited resources:
//!
//!   x_{n+1} = r · x_n · (1 - x_n)
//!
//! where x_n ∈ [0, 1] is the population as a fraction of the maximum and
//! r is the growth rate (control parameter).
//!
//! ## Period-Doubling Route to Chaos
//!
//! - r < 1: Extinction, x_n → 0
//! - 1 < r < 3: Stable fixed point x* = 1 - 1/r
//! - 3 < r < 1 + √6: Period-2 cycle
//! - r → r∞ ≈ 3.5699: Cascade of period doublings
//! - r∞ < r ≤ 4: Chaos, interrupted by periodic windows
//!
//! For r ∈ [0, 4] the unit interval is invariant. Outside it the orbit
//! leaves [0, 1] and diverges.
//!
//! ## References
//!
//! - May, R. M. (1976). Simple mathematical models with very complicated
//!   dynamics. Nature, 261, 459-467.
//! - Feigenbaum, M. J. (1978). Quantitative universality for a class of
//!   nonlinear transformations. J. Stat. Phys., 19(1), 25-52.

use super::traits::{Bifurcating, ScalarMap};

/// Accumulation point of the period-doubling cascade
pub const FEIGENBAUM_ONSET: f64 = 3.569_945_671_870_944;

/// The logistic map `x' = r·x·(1-x)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogisticMap;

impl LogisticMap {
    /// Fixed point `x* = 1 - 1/r`, stable for 1 < r < 3
    pub fn fixed_point(r: f64) -> f64 {
        1.0 - 1.0 / r
    }

    /// The two points of the period-2 cycle, valid for r > 3
    pub fn period_two_cycle(r: f64) -> (f64, f64) {
        let disc = ((r - 3.0) * (r + 1.0)).sqrt();
        let lo = (r + 1.0 - disc) / (2.0 * r);
        let hi = (r + 1.0 + disc) / (2.0 * r);
        (lo, hi)
    }
}

impl ScalarMap for LogisticMap {
    #[inline]
    fn apply(&self, state: f64, control: f64) -> f64 {
        control * state * (1.0 - state)
    }
}

impl Bifurcating for LogisticMap {
    fn critical_parameter(&self) -> Option<f64> {
        Some(FEIGENBAUM_ONSET)
    }

    fn bifurcation_type(&self) -> &'static str {
        "period-doubling cascade"
    }

    fn bounded_control(&self) -> (f64, f64) {
        (0.0, 4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_logistic_step() {
        assert_relative_eq!(LogisticMap.apply(0.5, 4.0), 1.0);
        assert_relative_eq!(LogisticMap.apply(0.1, 2.0), 0.18, epsilon = 1e-12);
        assert_eq!(LogisticMap.apply(0.0, 3.7), 0.0);
    }

    #[test]
    fn test_fixed_point_is_invariant() {
        let r = 2.8;
        let x = LogisticMap::fixed_point(r);
        assert_relative_eq!(LogisticMap.apply(x, r), x, epsilon = 1e-14);
    }

    #[test]
    fn test_period_two_cycle() {
        let r = 3.2;
        let (lo, hi) = LogisticMap::period_two_cycle(r);
        assert_relative_eq!(LogisticMap.apply(lo, r), hi, epsilon = 1e-12);
        assert_relative_eq!(LogisticMap.apply(hi, r), lo, epsilon = 1e-12);
    }

    #[test]
    fn test_bounded_control() {
        assert!(LogisticMap.is_bounded(3.9));
        assert!(!LogisticMap.is_bounded(4.2));
        assert_eq!(LogisticMap.critical_parameter(), Some(FEIGENBAUM_ONSET));
    }
}
