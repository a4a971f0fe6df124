//! Scalar Map Traits: Standardized API for Iterated Maps
//!
//! Every one-dimensional map `f(x, θ) → x'` consumed by the iteration
//! engines implements [`ScalarMap`]. Maps whose long-run behaviour changes
//! qualitatively with the control parameter also implement [`Bifurcating`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ScalarMap Trait                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + apply(x, θ)          - One application of the map        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     Bifurcating Trait                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + bifurcation_type()   - Route to chaos                    │
//! │  + critical_parameter() - Onset of chaos (if known)         │
//! │  + bounded_control()    - Controls keeping orbits bounded   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Plain closures `Fn(f64, f64) -> f64` are maps too, so ad-hoc maps can
//! be iterated without declaring a type.

/// A scalar iterated map `x_{n+1} = f(x_n, θ)`.
pub trait ScalarMap {
    /// Apply the map once to `state` under control parameter `control`.
    fn apply(&self, state: f64, control: f64) -> f64;
}

impl<F> ScalarMap for F
where
    F: Fn(f64, f64) -> f64,
{
    fn apply(&self, state: f64, control: f64) -> f64 {
        self(state, control)
    }
}

/// Trait for maps exhibiting bifurcations along their control parameter
pub trait Bifurcating: ScalarMap {
    /// Control value at which the map becomes chaotic (if known)
    fn critical_parameter(&self) -> Option<f64> {
        None
    }

    /// Name of the bifurcation route
    fn bifurcation_type(&self) -> &'static str;

    /// Control interval on which orbits started in the invariant set stay
    /// bounded. Outside it states may diverge to infinity or NaN.
    fn bounded_control(&self) -> (f64, f64);

    /// Whether `control` lies inside [`Bifurcating::bounded_control`]
    fn is_bounded(&self, control: f64) -> bool {
        let (lo, hi) = self.bounded_control();
        control >= lo && control <= hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_map() {
        let tent = |x: f64, mu: f64| mu * x.min(1.0 - x);
        assert!((tent.apply(0.25, 2.0) - 0.5).abs() < 1e-15);
        assert!((tent.apply(0.75, 2.0) - 0.5).abs() < 1e-15);
    }
}
