//! Orbit Surface: Full Orbits Across a Control Sweep
//!
//! Unlike the bifurcation diagram, nothing is discarded: every iterate
//! (r, n, x_n) is kept, so the transient approach to the attractor is
//! visible as a third axis.

use tracing::debug;

use super::sampler::BIFURCATION_X0;
use crate::axis::linspace;
use crate::error::{ConfigurationError, Result};
use crate::maps::{iterate_map, LogisticMap};

/// One iterate of one orbit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSurfacePoint {
    /// Control parameter r
    pub control: f64,
    /// Iteration index n (0 is the first application of the map)
    pub iteration: usize,
    /// State after n + 1 applications
    pub state: f64,
}

/// `(r, n, x_n)` triples for a sweep of logistic orbits
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitSurface {
    pub points: Vec<OrbitSurfacePoint>,
}

impl OrbitSurface {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points with `control ≤ r_limit`
    pub fn up_to(&self, r_limit: f64) -> Vec<OrbitSurfacePoint> {
        self.points
            .iter()
            .filter(|p| p.control <= r_limit)
            .copied()
            .collect()
    }
}

/// Record `n_iter` iterates of the logistic map from x_0 = 0.5 for each of
/// `steps` control values in `[r_min, r_max]`.
pub fn orbit_surface(r_min: f64, r_max: f64, steps: usize, n_iter: usize) -> Result<OrbitSurface> {
    ConfigurationError::check_count("steps", steps)?;
    ConfigurationError::check_range("control", r_min, r_max)?;
    let len = ConfigurationError::check_allocation::<OrbitSurfacePoint>("orbit surface", steps.checked_mul(n_iter))?;

    debug!(r_min, r_max, steps, n_iter, "sampling orbit surface");

    let mut points = Vec::with_capacity(len);
    for &r in linspace(r_min, r_max, steps).iter() {
        let orbit = iterate_map(&LogisticMap, BIFURCATION_X0, r, n_iter);
        points.extend(orbit.iter().skip(1).enumerate().map(|(n, state)| OrbitSurfacePoint {
            control: r,
            iteration: n,
            state,
        }));
    }

    Ok(OrbitSurface { points })
}
