//! Bifurcation Sampler: Steady States Along a Control Sweep
//!
//! For each of `steps` evenly spaced control values r ∈ [r_min, r_max]:
//!
//! 1. Start from x_0 = 0.5
//! 2. Iterate `discard` times without recording (transient)
//! 3. Iterate `keep` more times, recording (r, x_n) after each step
//!
//! Discarding the transient leaves only the attractor: a single value in
//! the fixed-point regime, 2 values after the first period doubling, 4
//! after the second, and a dense band once the map is chaotic.
//!
//! Columns (one per control value) are independent and are computed in
//! parallel when the `parallel` feature is enabled. The output order is
//! the ascending sweep either way.

use ndarray::{Array1, Array2};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::axis::linspace;
use crate::error::{ConfigurationError, Result};
use crate::maps::{advance, iterate_map, Bifurcating, LogisticMap, ScalarMap};

/// Initial state of every column in the sweep
pub const BIFURCATION_X0: f64 = 0.5;

/// One point of a bifurcation diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BifurcationSample {
    /// Control parameter r
    pub control: f64,
    /// Steady-state map value x_n
    pub state: f64,
}

/// All points of a bifurcation diagram, grouped by control value
#[derive(Debug, Clone, PartialEq)]
pub struct BifurcationSampleSet {
    /// Samples in sweep order: `keep` consecutive entries per control value
    samples: Vec<BifurcationSample>,
    /// Lower end of the sweep
    r_min: f64,
    /// Upper end of the sweep
    r_max: f64,
    /// Number of control values
    steps: usize,
    /// Samples recorded per control value
    keep: usize,
}

impl BifurcationSampleSet {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[BifurcationSample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &BifurcationSample> {
        self.samples.iter()
    }

    /// Swept control range `(r_min, r_max)`
    pub fn control_range(&self) -> (f64, f64) {
        (self.r_min, self.r_max)
    }

    /// Number of control values in the sweep
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Samples recorded per control value
    pub fn keep(&self) -> usize {
        self.keep
    }

    /// Control coordinate of every sample
    pub fn controls(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.control).collect()
    }

    /// State coordinate of every sample
    pub fn states(&self) -> Array1<f64> {
        self.samples.iter().map(|s| s.state).collect()
    }

    /// `(len, 2)` matrix of `[control, state]` rows, ready for a scatter plot
    pub fn to_array(&self) -> Array2<f64> {
        let mut out = Array2::zeros((self.samples.len(), 2));
        for (i, s) in self.samples.iter().enumerate() {
            out[[i, 0]] = s.control;
            out[[i, 1]] = s.state;
        }
        out
    }

    /// Samples of the `index`-th control value (empty past the end)
    pub fn column(&self, index: usize) -> &[BifurcationSample] {
        let start = (index * self.keep).min(self.samples.len());
        let end = (start + self.keep).min(self.samples.len());
        &self.samples[start..end]
    }

    /// Distinct steady-state values of the `index`-th column, merging
    /// values closer than `tolerance`. Sorted ascending; non-finite
    /// states are skipped.
    ///
    /// The count estimates the attractor's period (1, 2, 4, …) outside
    /// the chaotic band.
    pub fn distinct_states(&self, index: usize, tolerance: f64) -> Vec<f64> {
        let mut values: Vec<f64> = self
            .column(index)
            .iter()
            .map(|s| s.state)
            .filter(|x| x.is_finite())
            .collect();
        values.sort_by(f64::total_cmp);

        let mut distinct: Vec<f64> = Vec::new();
        for x in values {
            match distinct.last() {
                Some(&prev) if (x - prev).abs() <= tolerance => {}
                _ => distinct.push(x),
            }
        }
        distinct
    }

    /// Samples with `control ≤ r_limit`: the left part of the diagram
    pub fn up_to(&self, r_limit: f64) -> Vec<BifurcationSample> {
        self.samples
            .iter()
            .filter(|s| s.control <= r_limit)
            .copied()
            .collect()
    }

    /// [`BifurcationSampleSet::up_to`] with the limit given as a progress
    /// fraction in `[0, 1]` of the swept range
    pub fn up_to_fraction(&self, frac: f64) -> Vec<BifurcationSample> {
        let frac = frac.clamp(0.0, 1.0);
        self.up_to(self.r_min + frac * (self.r_max - self.r_min))
    }
}

/// Sample the logistic map's bifurcation diagram.
///
/// Produces exactly `steps × keep` samples. `steps = 1` sweeps the single
/// control value `r_min`.
///
/// # Arguments
/// * `r_min`, `r_max` - Control range, both ends included
/// * `steps` - Number of control values
/// * `discard` - Transient iterations dropped per control value
/// * `keep` - Iterations recorded per control value
pub fn sample_bifurcation(
    r_min: f64,
    r_max: f64,
    steps: usize,
    discard: usize,
    keep: usize,
) -> Result<BifurcationSampleSet> {
    let map = LogisticMap;
    if !map.is_bounded(r_min) || !map.is_bounded(r_max) {
        let (lo, hi) = map.bounded_control();
        warn!(r_min, r_max, lo, hi, "sweep leaves the bounded control range, states may diverge");
    }
    sample_bifurcation_with(&map, BIFURCATION_X0, r_min, r_max, steps, discard, keep)
}

/// [`sample_bifurcation`] for an arbitrary map and initial state
pub fn sample_bifurcation_with<M>(
    map: &M,
    x0: f64,
    r_min: f64,
    r_max: f64,
    steps: usize,
    discard: usize,
    keep: usize,
) -> Result<BifurcationSampleSet>
where
    M: ScalarMap + Sync + ?Sized,
{
    ConfigurationError::check_count("steps", steps)?;
    ConfigurationError::check_range("control", r_min, r_max)?;
    ConfigurationError::check_allocation::<BifurcationSample>("bifurcation samples", steps.checked_mul(keep))?;

    debug!(r_min, r_max, steps, discard, keep, "sampling bifurcation diagram");

    let controls = linspace(r_min, r_max, steps).to_vec();
    let column = |r: f64| sweep_column(map, x0, r, discard, keep);

    #[cfg(feature = "parallel")]
    let samples: Vec<BifurcationSample> = controls.into_par_iter().flat_map_iter(column).collect();
    #[cfg(not(feature = "parallel"))]
    let samples: Vec<BifurcationSample> = controls.into_iter().flat_map(column).collect();

    Ok(BifurcationSampleSet {
        samples,
        r_min,
        r_max,
        steps,
        keep,
    })
}

fn sweep_column<M: ScalarMap + ?Sized>(
    map: &M,
    x0: f64,
    r: f64,
    discard: usize,
    keep: usize,
) -> Vec<BifurcationSample> {
    let settled = advance(map, x0, r, discard);
    iterate_map(map, settled, r, keep)
        .iter()
        .skip(1)
        .map(|state| BifurcationSample { control: r, state })
        .collect()
}
