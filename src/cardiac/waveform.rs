//! Monophasic Action Potential Synthesis
//!
//! A voltage trace is built by placing one action-potential template at
//! every beat time and summing overlapping contributions:
//!
//!   v(t) = Σ_b AP(t - b) + σ·ξ(t),   clipped to [0, 1.2]
//!
//! with the template
//!
//! ```text
//!   AP(s) = 0                              s < 0
//!         = (s / t_peak)²                  0 ≤ s < t_peak
//!         = exp(-(s - t_peak) / tau_decay)  s ≥ t_peak
//! ```
//!
//! ξ(t) is independent standard normal noise drawn from a generator
//! created for the call: seeded runs are reproducible, unseeded runs draw
//! their seed from the thread-local generator.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::debug;

use crate::axis::linspace;
use crate::error::{ConfigurationError, Result};

/// Upper clip of the synthesized voltage
pub const VOLTAGE_CEILING: f64 = 1.2;

/// Shape of one action potential
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionPotentialTemplate {
    /// Time from beat onset to peak (s)
    pub t_peak: f64,
    /// Exponential decay constant after the peak (s)
    pub tau_decay: f64,
}

impl Default for ActionPotentialTemplate {
    fn default() -> Self {
        Self {
            t_peak: 0.01,
            tau_decay: 0.05,
        }
    }
}

impl ActionPotentialTemplate {
    pub fn new(t_peak: f64, tau_decay: f64) -> Result<Self> {
        let template = Self { t_peak, tau_decay };
        template.validate()?;
        Ok(template)
    }

    pub fn validate(&self) -> Result<()> {
        ConfigurationError::check_positive("t_peak", self.t_peak)?;
        ConfigurationError::check_positive("tau_decay", self.tau_decay)
    }

    /// Template value `s` seconds after the beat
    #[inline]
    pub fn value(&self, s: f64) -> f64 {
        if s < 0.0 {
            0.0
        } else if s < self.t_peak {
            (s / self.t_peak).powi(2)
        } else {
            (-(s - self.t_peak) / self.tau_decay).exp()
        }
    }
}

/// Sampled voltage trace
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageSignal {
    /// Sample instants in seconds, `[0, total_time]`
    pub time: Array1<f64>,
    /// Voltage (arbitrary units) in `[0, VOLTAGE_CEILING]`
    pub amplitude: Array1<f64>,
}

impl VoltageSignal {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Largest amplitude in the trace
    pub fn peak(&self) -> f64 {
        self.amplitude.iter().copied().fold(0.0, f64::max)
    }
}

/// Voltage synthesizer with validated sampling parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageSynthesizer {
    /// Window length (s)
    total_time: f64,
    /// Sample rate (Hz)
    fs: f64,
    /// `floor(total_time · fs)`
    samples: usize,
    /// Scale of the additive noise
    noise_amplitude: f64,
    /// Action potential shape
    template: ActionPotentialTemplate,
}

impl VoltageSynthesizer {
    /// # Arguments
    /// * `total_time` - Window length in seconds, positive
    /// * `fs` - Sample rate in Hz, positive
    /// * `noise_amplitude` - Noise scale σ; the noise σ·ξ is zero-mean for
    ///   either sign
    /// * `template` - Action potential shape
    ///
    /// A window shorter than one sample period is valid and synthesizes
    /// an empty trace.
    pub fn new(
        total_time: f64,
        fs: f64,
        noise_amplitude: f64,
        template: ActionPotentialTemplate,
    ) -> Result<Self> {
        ConfigurationError::check_positive("total_time", total_time)?;
        ConfigurationError::check_positive("fs", fs)?;
        ConfigurationError::check_finite("noise_amplitude", noise_amplitude)?;
        template.validate()?;
        let samples = ConfigurationError::check_allocation::<f64>(
            "voltage samples",
            Self::sample_count(total_time, fs),
        )?;

        Ok(Self {
            total_time,
            fs,
            samples,
            noise_amplitude,
            template,
        })
    }

    /// `floor(total_time · fs)` samples spanning `[0, total_time]`, `None`
    /// when the count does not fit in `usize`
    fn sample_count(total_time: f64, fs: f64) -> Option<usize> {
        let n = (total_time * fs).floor();
        (n < usize::MAX as f64).then_some(n as usize)
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn sample_rate(&self) -> f64 {
        self.fs
    }

    /// Length of every synthesized trace
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn template(&self) -> ActionPotentialTemplate {
        self.template
    }

    /// Synthesize the trace for `beat_times`.
    ///
    /// Beats after `total_time` (and non-finite beats) contribute nothing.
    /// With `seed = Some(_)` the output is reproducible bit for bit.
    pub fn synthesize(&self, beat_times: &[f64], seed: Option<u64>) -> VoltageSignal {
        let n = self.samples;
        let time = linspace(0.0, self.total_time, n);
        let mut amplitude = Array1::<f64>::zeros(n);

        let samples = time.as_slice().unwrap_or(&[]);
        let mut beats = 0usize;
        for &beat in beat_times.iter().filter(|&&b| b <= self.total_time) {
            beats += 1;
            let start = samples.partition_point(|&t| t < beat);
            for (v, &t) in amplitude.iter_mut().zip(samples).skip(start) {
                *v += self.template.value(t - beat);
            }
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let noise = self.noise_amplitude;
        amplitude.mapv_inplace(|v| {
            let xi: f64 = rng.sample(StandardNormal);
            (v + noise * xi).clamp(0.0, VOLTAGE_CEILING)
        });

        debug!(samples = n, beats, seeded = seed.is_some(), "synthesized voltage");

        VoltageSignal { time, amplitude }
    }
}

/// Synthesize a voltage trace with the default action potential template.
///
/// # Arguments
/// * `beat_times` - Beat instants in seconds
/// * `total_time` - Window length in seconds
/// * `fs` - Sample rate in Hz
/// * `noise_amplitude` - Noise scale
/// * `seed` - Noise seed; `None` draws a fresh one
pub fn synthesize_voltage(
    beat_times: &[f64],
    total_time: f64,
    fs: f64,
    noise_amplitude: f64,
    seed: Option<u64>,
) -> Result<VoltageSignal> {
    let synth = VoltageSynthesizer::new(
        total_time,
        fs,
        noise_amplitude,
        ActionPotentialTemplate::default(),
    )?;
    Ok(synth.synthesize(beat_times, seed))
}
