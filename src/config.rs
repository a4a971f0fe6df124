//! Engine configuration.
//!
//! Every engine has a plain parameter struct whose `Default` carries the
//! calibration values the models were tuned with. The structs deserialize
//! from TOML with missing keys falling back to those defaults, so a file
//! only needs the values it changes:
//!
//! ```toml
//! [bifurcation]
//! steps = 1200
//!
//! [cardiac]
//! seed = 7
//! ```
//!
//! The cardiac constants (`t_peak`, `tau_decay`, `scale_min`, `scale_max`)
//! are calibration values, not model invariants; any positive values that
//! pass [`ChaosConfig::validate`] are accepted.

use std::fs;
use std::path::{Path, PathBuf};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cardiac::{ActionPotentialTemplate, ScaleRange, VoltageSynthesizer};
use crate::error::ConfigurationError;
use crate::escape::{JuliaPath, Region, Resolution};

/// Failure to load a configuration file
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigurationError),
}

/// Logistic orbit plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Growth rate r
    pub control: f64,
    /// Initial population fraction x_0
    pub initial: f64,
    /// Iterations after x_0
    pub iterations: usize,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            control: 2.0,
            initial: 0.1,
            iterations: 50,
        }
    }
}

/// Bifurcation diagram and orbit surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BifurcationConfig {
    pub r_min: f64,
    pub r_max: f64,
    /// Control values in the sweep
    pub steps: usize,
    /// Transient iterations dropped per control value
    pub discard: usize,
    /// Iterations kept per control value
    pub keep: usize,
    /// Control values in the orbit surface
    pub surface_steps: usize,
    /// Iterations per orbit in the orbit surface
    pub surface_iterations: usize,
}

impl Default for BifurcationConfig {
    fn default() -> Self {
        Self {
            r_min: 2.4,
            r_max: 4.0,
            steps: 800,
            discard: 200,
            keep: 50,
            surface_steps: 50,
            surface_iterations: 100,
        }
    }
}

impl BifurcationConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        ConfigurationError::check_count("steps", self.steps)?;
        ConfigurationError::check_count("surface_steps", self.surface_steps)?;
        ConfigurationError::check_range("control", self.r_min, self.r_max)
    }
}

/// One escape-time grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeConfig {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub width: usize,
    pub height: usize,
    pub max_iter: u32,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self::mandelbrot()
    }
}

impl EscapeConfig {
    pub fn mandelbrot() -> Self {
        let r = Region::MANDELBROT;
        Self {
            xmin: r.xmin,
            xmax: r.xmax,
            ymin: r.ymin,
            ymax: r.ymax,
            width: 600,
            height: 400,
            max_iter: 200,
        }
    }

    pub fn julia() -> Self {
        let r = Region::JULIA;
        Self {
            xmin: r.xmin,
            xmax: r.xmax,
            ymin: r.ymin,
            ymax: r.ymax,
            width: 400,
            height: 400,
            max_iter: 150,
        }
    }

    pub fn region(&self) -> Region {
        Region::new(self.xmin, self.xmax, self.ymin, self.ymax)
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.region().validate()?;
        self.resolution().validate()?;
        if self.max_iter == 0 {
            return Err(ConfigurationError::ZeroCount { name: "max_iter" });
        }
        Ok(())
    }
}

/// Julia grid plus the parameter circle it is swept along
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JuliaConfig {
    pub grid: EscapeConfig,
    /// Circle center (real part)
    pub center_re: f64,
    /// Circle center (imaginary part)
    pub center_im: f64,
    pub radius: f64,
}

impl Default for JuliaConfig {
    fn default() -> Self {
        let path = JuliaPath::default();
        Self {
            grid: EscapeConfig::julia(),
            center_re: path.center.re,
            center_im: path.center.im,
            radius: path.radius,
        }
    }
}

impl JuliaConfig {
    pub fn path(&self) -> Result<JuliaPath, ConfigurationError> {
        JuliaPath::new(Complex64::new(self.center_re, self.center_im), self.radius)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.grid.validate()?;
        self.path().map(|_| ())
    }
}

/// Cardiac rhythm model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardiacConfig {
    /// Intervals generated per simulation
    pub n_intervals: usize,
    /// Intervals dropped before the Poincaré map
    pub transient: usize,
    /// Voltage window (s)
    pub total_time: f64,
    /// Voltage sample rate (Hz)
    pub sample_rate: f64,
    /// Noise standard deviation
    pub noise_amplitude: f64,
    /// Shortest interval (s)
    pub scale_min: f64,
    /// Longest interval (s)
    pub scale_max: f64,
    /// Action potential rise time (s)
    pub t_peak: f64,
    /// Action potential decay constant (s)
    pub tau_decay: f64,
    /// Noise seed; unseeded runs differ each time
    pub seed: Option<u64>,
}

impl Default for CardiacConfig {
    fn default() -> Self {
        let scale = ScaleRange::default();
        let template = ActionPotentialTemplate::default();
        Self {
            n_intervals: 200,
            transient: 50,
            total_time: 5.0,
            sample_rate: 1000.0,
            noise_amplitude: 0.02,
            scale_min: scale.min,
            scale_max: scale.max,
            t_peak: template.t_peak,
            tau_decay: template.tau_decay,
            seed: None,
        }
    }
}

impl CardiacConfig {
    pub fn scale(&self) -> Result<ScaleRange, ConfigurationError> {
        ScaleRange::new(self.scale_min, self.scale_max)
    }

    pub fn synthesizer(&self) -> Result<VoltageSynthesizer, ConfigurationError> {
        VoltageSynthesizer::new(
            self.total_time,
            self.sample_rate,
            self.noise_amplitude,
            ActionPotentialTemplate::new(self.t_peak, self.tau_decay)?,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.scale()?;
        self.synthesizer().map(|_| ())
    }
}

/// Configuration of every engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaosConfig {
    pub orbit: OrbitConfig,
    pub bifurcation: BifurcationConfig,
    pub mandelbrot: EscapeConfig,
    pub julia: JuliaConfig,
    pub cardiac: CardiacConfig,
}

impl ChaosConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// `load(path)` when a path is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.bifurcation.validate()?;
        self.mandelbrot.validate()?;
        self.julia.validate()?;
        self.cardiac.validate()
    }

    /// Pretty TOML rendering of the effective configuration
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
