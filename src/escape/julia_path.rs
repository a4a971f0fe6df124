//! Julia parameter paths.
//!
//! Sweeping c around a small circle inside the Mandelbrot set morphs the
//! Julia set continuously; a progress fraction picks the point on the
//! circle.

use std::f64::consts::PI;

use num_complex::Complex64;

use super::field::{compute_escape_field, ComplexIterationField, EscapeMode, Region, Resolution};
use crate::error::{ConfigurationError, Result};

/// Circle `c(frac) = center + radius · e^{2πi·frac}`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JuliaPath {
    pub center: Complex64,
    pub radius: f64,
}

impl Default for JuliaPath {
    /// Circle of radius 0.2 around -0.8, through the period-2 bulb
    fn default() -> Self {
        Self {
            center: Complex64::new(-0.8, 0.0),
            radius: 0.2,
        }
    }
}

impl JuliaPath {
    pub fn new(center: Complex64, radius: f64) -> Result<Self> {
        ConfigurationError::check_finite("path center (re)", center.re)?;
        ConfigurationError::check_finite("path center (im)", center.im)?;
        ConfigurationError::check_finite("path radius", radius)?;
        Ok(Self { center, radius })
    }

    /// Parameter at progress `frac` (one full turn per unit)
    pub fn parameter(&self, frac: f64) -> Complex64 {
        self.center + Complex64::from_polar(self.radius, 2.0 * PI * frac)
    }

    /// Escape mode at progress `frac`
    pub fn mode(&self, frac: f64) -> EscapeMode {
        EscapeMode::Julia { c: self.parameter(frac) }
    }

    /// Julia field at progress `frac`
    pub fn field(
        &self,
        frac: f64,
        region: Region,
        resolution: Resolution,
        max_iter: u32,
    ) -> Result<ComplexIterationField> {
        compute_escape_field(self.mode(frac), region, resolution, max_iter)
    }
}
