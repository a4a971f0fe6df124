//! Maps Module: Scalar Iterated Maps
//!
//! Implements the fixed-point iteration primitive shared by the
//! bifurcation sampler and the cardiac interval generator:
//!
//! - **traits**: [`ScalarMap`] and [`Bifurcating`]
//! - **logistic**: The logistic map `x' = r·x·(1-x)`
//! - **orbit**: [`iterate_map`] and the exponential growth baseline

mod traits;
mod logistic;
mod orbit;

pub use traits::{ScalarMap, Bifurcating};
pub use logistic::{LogisticMap, FEIGENBAUM_ONSET};
pub use orbit::{MapParameters, OrbitSequence, iterate_map, advance, exponential_growth};
