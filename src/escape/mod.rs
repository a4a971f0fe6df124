//! Escape Module: Escape-Time Fractals of the Quadratic Family
//!
//! One engine serves both the Mandelbrot set and every Julia set; the
//! [`EscapeMode`] decides whether the grid point is the parameter c or
//! the initial state z_0.
//!
//! - **field**: Grid sampling and the escape-time kernel
//! - **julia_path**: Julia parameters on a circle

mod field;
mod julia_path;

pub use field::{
    ComplexIterationField,
    EscapeMode,
    Region,
    Resolution,
    RevealedField,
    compute_escape_field,
    escape_time,
    ESCAPE_RADIUS,
};
pub use julia_path::JuliaPath;
