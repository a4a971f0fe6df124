//! Cardiac Module: Chaotic Heart Rhythm Synthesis
//!
//! Turns logistic-map dynamics into physiological signals:
//!
//! - **intervals**: Inter-beat intervals and cumulative beat times
//! - **waveform**: Monophasic action potential voltage traces
//! - **poincare**: Lag-1 return map of the intervals
//! - **model**: The full chain for one control value, plus rhythm presets

mod intervals;
mod waveform;
mod poincare;
mod model;

pub use intervals::{
    BeatTimeSequence,
    IntervalSequence,
    ScaleRange,
    synthesize_intervals,
    INTERVAL_X0,
};
pub use waveform::{
    ActionPotentialTemplate,
    VoltageSignal,
    VoltageSynthesizer,
    synthesize_voltage,
    VOLTAGE_CEILING,
};
pub use poincare::{PoincareMap, build_poincare};
pub use model::{CardiacModel, CardiacRhythm, RhythmPreset};
