//! Bifurcation Module: Long-Run Behaviour Along a Control Sweep
//!
//! - **sampler**: Bifurcation diagram (transient discarded)
//! - **surface**: Full orbits per control value (nothing discarded)

mod sampler;
mod surface;

pub use sampler::{
    BifurcationSample,
    BifurcationSampleSet,
    sample_bifurcation,
    sample_bifurcation_with,
    BIFURCATION_X0,
};
pub use surface::{OrbitSurface, OrbitSurfacePoint, orbit_surface};
