//! # chaos-dynamics
//!
//! Iteration Engines for Discrete Dynamical Systems: Bifurcations,
//! Escape-Time Fractals and Chaotic Cardiac Rhythms
//!
//! ## Overview
//!
//! This crate samples two families of discrete maps and returns the raw
//! numeric artifacts a plotting layer needs:
//!
//! - the logistic map `x ← r·x·(1-x)`
//! - the complex quadratic family `z ← z² + c`
//!
//! Every entry point is a pure function of its arguments. There is no
//! global state: a caller holds its parameters, calls the engine on each
//! change and replaces the previous artifact wholesale. The only source of
//! randomness (waveform noise) is a generator built per call from an
//! explicit seed.
//!
//! ### Engines
//!
//! 1. **Orbits** ([`iterate_map`]): x_0, x_1, …, x_N for any scalar map
//!
//! 2. **Bifurcation diagrams** ([`sample_bifurcation`]): steady states of
//!    the logistic map across a control sweep, transient discarded
//!
//! 3. **Escape-time fields** ([`compute_escape_field`]): Mandelbrot and
//!    Julia sets over a rectangular grid
//!
//! 4. **Cardiac rhythms** ([`synthesize_intervals`], [`synthesize_voltage`],
//!    [`build_poincare`]): logistic inter-beat intervals turned into a
//!    voltage trace and a return map
//!
//! ## Errors
//!
//! Invalid parameters fail up front with [`ConfigurationError`], as do
//! sizes whose output could not be allocated. Numerical
//! divergence is not an error: orbits that run away show up as infinite
//! or NaN values for the caller to filter.
//!
//! ## Features
//!
//! - `parallel` (default): fill escape-time grids and bifurcation sweeps
//!   with rayon. Output is identical to the sequential path.
//! - `cli`: build the `chaos` batch driver binary (clap, anyhow,
//!   tracing-subscriber).
//!
//! ## References
//!
//! - May, "Simple mathematical models with very complicated dynamics" (1976)
//! - Mandelbrot, "The Fractal Geometry of Nature" (1982)
//! - Garfinkel et al., "Controlling cardiac chaos" (1992)

mod axis;

pub mod error;
pub mod config;
pub mod maps;
pub mod bifurcation;
pub mod escape;
pub mod cardiac;

pub use error::{ConfigurationError, Result};
pub use config::{
    ChaosConfig,
    ConfigLoadError,
    OrbitConfig,
    BifurcationConfig,
    EscapeConfig,
    JuliaConfig,
    CardiacConfig,
};

// Re-exports from maps
pub use maps::{
    ScalarMap,
    Bifurcating,
    LogisticMap,
    MapParameters,
    OrbitSequence,
    iterate_map,
    exponential_growth,
};

// Re-exports from bifurcation
pub use bifurcation::{
    BifurcationSample,
    BifurcationSampleSet,
    OrbitSurface,
    sample_bifurcation,
    orbit_surface,
};

// Re-exports from escape
pub use escape::{
    ComplexIterationField,
    EscapeMode,
    Region,
    Resolution,
    JuliaPath,
    compute_escape_field,
};

// Re-exports from cardiac
pub use cardiac::{
    IntervalSequence,
    BeatTimeSequence,
    VoltageSignal,
    PoincareMap,
    ActionPotentialTemplate,
    CardiacModel,
    CardiacRhythm,
    RhythmPreset,
    ScaleRange,
    synthesize_intervals,
    synthesize_voltage,
    build_poincare,
};
