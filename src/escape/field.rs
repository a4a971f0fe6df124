//! Escape-Time Fields: Mandelbrot and Julia Sets
//!
//! Both sets come from the quadratic family
//!
//!   z_{n+1} = z_n² + c
//!
//! sampled over a rectangular grid of the complex plane:
//!
//! - **Mandelbrot**: z_0 = 0, c = grid point
//! - **Julia**: z_0 = grid point, c fixed
//!
//! Each cell records how many iterations the orbit survived with |z| ≤ 2.
//! Once |z| > 2 the orbit provably diverges, so the count is the escape
//! time. Cells that never escape saturate at `max_iter` and are presumed
//! to belong to the bounded set.
//!
//! ## Grid Orientation
//!
//! ```text
//!   row height-1 ─ y = ymax
//!        ⋮
//!   row 0        ─ y = ymin        (origin lower)
//!                  │          │
//!                col 0    col width-1
//!               x = xmin   x = xmax
//! ```
//!
//! `counts[[i, j]]` is the cell at `x_j + i·y_i` with
//! `x_j = xmin + j·(xmax-xmin)/(width-1)` and
//! `y_i = ymin + i·(ymax-ymin)/(height-1)`. Image consumers that put row 0
//! at the top should use [`ComplexIterationField::flipped_rows`].
//!
//! Cells are independent; with the `parallel` feature the grid is filled
//! concurrently and the result is bit-identical to the sequential fill.

use ndarray::{s, Array1, Array2, ArrayView2, Zip};
use num_complex::Complex64;
use tracing::debug;

use crate::axis::linspace;
use crate::error::{ConfigurationError, Result};

/// Escape radius: any orbit with |z| > 2 diverges
pub const ESCAPE_RADIUS: f64 = 2.0;

const ESCAPE_RADIUS_SQ: f64 = ESCAPE_RADIUS * ESCAPE_RADIUS;

/// Which set to sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EscapeMode {
    /// z_0 = 0, c = grid point
    Mandelbrot,
    /// z_0 = grid point, c fixed
    Julia { c: Complex64 },
}

impl EscapeMode {
    pub fn julia(re: f64, im: f64) -> Self {
        EscapeMode::Julia { c: Complex64::new(re, im) }
    }

    /// Initial state and parameter for the grid point `p`
    #[inline]
    fn seed(&self, p: Complex64) -> (Complex64, Complex64) {
        match *self {
            EscapeMode::Mandelbrot => (Complex64::new(0.0, 0.0), p),
            EscapeMode::Julia { c } => (p, c),
        }
    }
}

/// Rectangle of the complex plane `[xmin, xmax] × [ymin, ymax]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Region {
    /// Whole Mandelbrot set
    pub const MANDELBROT: Region = Region { xmin: -2.0, xmax: 1.0, ymin: -1.5, ymax: 1.5 };
    /// Square around the origin used for Julia sets
    pub const JULIA: Region = Region { xmin: -1.5, xmax: 1.5, ymin: -1.5, ymax: 1.5 };

    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self { xmin, xmax, ymin, ymax }
    }

    pub fn validate(&self) -> Result<()> {
        ConfigurationError::check_open_range("real axis", self.xmin, self.xmax)?;
        ConfigurationError::check_open_range("imaginary axis", self.ymin, self.ymax)
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }
}

/// Grid size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Columns, along the real axis
    pub width: usize,
    /// Rows, along the imaginary axis
    pub height: usize,
}

impl Resolution {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<()> {
        ConfigurationError::check_count("width", self.width)?;
        ConfigurationError::check_count("height", self.height)?;
        ConfigurationError::check_allocation::<u32>("escape grid", self.width.checked_mul(self.height))
            .map(|_| ())
    }

    pub fn cells(&self) -> usize {
        self.width * self.height
    }
}

/// Grid of escape times over a region
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexIterationField {
    /// Escape counts, `(height, width)`, each in `[0, max_iter]`
    counts: Array2<u32>,
    /// Sampled region
    region: Region,
    /// Iteration bound (saturation value)
    max_iter: u32,
}

impl ComplexIterationField {
    pub fn counts(&self) -> &Array2<u32> {
        &self.counts
    }

    pub fn into_counts(self) -> Array2<u32> {
        self.counts
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    pub fn width(&self) -> usize {
        self.counts.ncols()
    }

    pub fn height(&self) -> usize {
        self.counts.nrows()
    }

    /// Escape count at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.counts.get([row, col]).copied()
    }

    /// Real coordinate of every column
    pub fn x_axis(&self) -> Array1<f64> {
        linspace(self.region.xmin, self.region.xmax, self.width())
    }

    /// Imaginary coordinate of every row
    pub fn y_axis(&self) -> Array1<f64> {
        linspace(self.region.ymin, self.region.ymax, self.height())
    }

    /// Complex coordinate of the cell at `(row, col)`
    pub fn coordinate(&self, row: usize, col: usize) -> Complex64 {
        Complex64::new(
            axis_value(self.region.xmin, self.region.xmax, self.width(), col),
            axis_value(self.region.ymin, self.region.ymax, self.height(), row),
        )
    }

    /// Whether the cell never escaped (presumed inside the set)
    pub fn is_saturated(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(self.max_iter)
    }

    /// Fraction of cells that never escaped
    pub fn bounded_fraction(&self) -> f64 {
        let inside = self.counts.iter().filter(|&&n| n == self.max_iter).count();
        inside as f64 / self.counts.len() as f64
    }

    /// Copy with row 0 at `ymax`, for top-origin image buffers
    pub fn flipped_rows(&self) -> Array2<u32> {
        self.counts.slice(s![..;-1, ..]).to_owned()
    }

    /// Left part of the field covering a progress fraction `frac ∈ [0, 1]`
    /// of the columns. At least one column is always revealed.
    pub fn revealed(&self, frac: f64) -> RevealedField<'_> {
        let width = self.width();
        let frac = frac.clamp(0.0, 1.0);
        let columns = ((frac * width as f64) as usize).clamp(1, width);
        let x_end = self.region.xmin + (columns as f64 / width as f64) * self.region.width();
        RevealedField {
            counts: self.counts.slice(s![.., ..columns]),
            x_extent: (self.region.xmin, x_end),
            y_extent: (self.region.ymin, self.region.ymax),
        }
    }
}

/// Column slice of a field with the extent it covers
#[derive(Debug, Clone)]
pub struct RevealedField<'a> {
    /// Revealed counts, `(height, columns)`
    pub counts: ArrayView2<'a, u32>,
    /// Real-axis extent of the revealed columns
    pub x_extent: (f64, f64),
    /// Imaginary-axis extent (unchanged)
    pub y_extent: (f64, f64),
}

#[inline]
fn axis_value(min: f64, max: f64, n: usize, i: usize) -> f64 {
    if n <= 1 {
        min
    } else if i == n - 1 {
        max
    } else {
        min + i as f64 * ((max - min) / (n - 1) as f64)
    }
}

/// Iterations survived by z_0 under z ← z² + c before |z| exceeded 2,
/// saturating at `max_iter`.
#[inline]
pub fn escape_time(z0: Complex64, c: Complex64, max_iter: u32) -> u32 {
    let mut z = z0;
    let mut n = 0;
    while n < max_iter && z.norm_sqr() <= ESCAPE_RADIUS_SQ {
        z = z * z + c;
        n += 1;
    }
    n
}

/// Compute the escape-time field of `mode` over `region`.
///
/// # Arguments
/// * `mode` - Mandelbrot, or Julia with its fixed parameter c
/// * `region` - Sampled rectangle, `xmin < xmax` and `ymin < ymax`
/// * `resolution` - Columns × rows, both at least 1
/// * `max_iter` - Iteration bound, at least 1
pub fn compute_escape_field(
    mode: EscapeMode,
    region: Region,
    resolution: Resolution,
    max_iter: u32,
) -> Result<ComplexIterationField> {
    region.validate()?;
    resolution.validate()?;
    if max_iter == 0 {
        return Err(ConfigurationError::ZeroCount { name: "max_iter" });
    }
    if let EscapeMode::Julia { c } = mode {
        ConfigurationError::check_finite("julia parameter (re)", c.re)?;
        ConfigurationError::check_finite("julia parameter (im)", c.im)?;
    }

    debug!(
        ?mode,
        width = resolution.width,
        height = resolution.height,
        max_iter,
        "computing escape-time field"
    );

    let Resolution { width, height } = resolution;
    let cell = |(row, col): (usize, usize), count: &mut u32| {
        let p = Complex64::new(
            axis_value(region.xmin, region.xmax, width, col),
            axis_value(region.ymin, region.ymax, height, row),
        );
        let (z0, c) = mode.seed(p);
        *count = escape_time(z0, c, max_iter);
    };

    let mut counts = Array2::<u32>::zeros((height, width));
    #[cfg(feature = "parallel")]
    Zip::indexed(&mut counts).par_for_each(cell);
    #[cfg(not(feature = "parallel"))]
    Zip::indexed(&mut counts).for_each(cell);

    Ok(ComplexIterationField {
        counts,
        region,
        max_iter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_time_origin_is_bounded() {
        assert_eq!(escape_time(Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0), 100), 100);
        assert_eq!(escape_time(Complex64::new(0.0, 0.0), Complex64::new(-1.0, 0.0), 100), 100);
    }

    #[test]
    fn test_escape_time_far_point() {
        // |z_0| > 2 never iterates
        assert_eq!(escape_time(Complex64::new(3.0, 0.0), Complex64::new(0.0, 0.0), 100), 0);
        // c = 1: 0 → 1 → 2 → 5
        assert_eq!(escape_time(Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0), 100), 3);
    }

    #[test]
    fn test_field_shape_and_bounds() {
        let field = compute_escape_field(
            EscapeMode::Mandelbrot,
            Region::MANDELBROT,
            Resolution::new(60, 40),
            50,
        )
        .unwrap();
        assert_eq!(field.counts().dim(), (40, 60));
        assert!(field.counts().iter().all(|&n| n <= 50));
        assert!(field.bounded_fraction() > 0.0 && field.bounded_fraction() < 1.0);
    }

    #[test]
    fn test_orientation() {
        let region = Region::new(-2.0, 1.0, -1.5, 1.5);
        let field = compute_escape_field(EscapeMode::Mandelbrot, region, Resolution::new(4, 3), 20).unwrap();

        assert_eq!(field.coordinate(0, 0), Complex64::new(-2.0, -1.5));
        assert_eq!(field.coordinate(2, 3), Complex64::new(1.0, 1.5));
        assert_eq!(field.coordinate(1, 2), Complex64::new(0.0, 0.0));
        assert_eq!(field.x_axis().to_vec(), vec![-2.0, -1.0, 0.0, 1.0]);
        assert_eq!(field.y_axis().to_vec(), vec![-1.5, 0.0, 1.5]);
        // c = 0 is inside the set
        assert!(field.is_saturated(1, 2));
        // c = 1 escapes after 3 iterations
        assert_eq!(field.get(1, 3), Some(3));
    }

    #[test]
    fn test_mandelbrot_conjugate_symmetry() {
        let region = Region::new(-2.0, 1.0, -1.5, 1.5);
        let field = compute_escape_field(EscapeMode::Mandelbrot, region, Resolution::new(61, 7), 200).unwrap();
        let h = field.height();
        for row in 0..h {
            let mirror = h - 1 - row;
            assert_eq!(field.coordinate(row, 0).im, -field.coordinate(mirror, 0).im);
            for col in 0..field.width() {
                assert_eq!(field.get(row, col), field.get(mirror, col), "asymmetry at ({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_conjugate_symmetry_pointwise() {
        for &(x, y) in &[(-0.75, 0.1), (0.3, 0.5), (-1.25, 0.02), (-0.1, 0.9)] {
            let up = escape_time(Complex64::new(0.0, 0.0), Complex64::new(x, y), 500);
            let down = escape_time(Complex64::new(0.0, 0.0), Complex64::new(x, -y), 500);
            assert_eq!(up, down);
        }
    }

    #[test]
    fn test_deterministic() {
        let mode = EscapeMode::julia(-0.8, 0.156);
        let a = compute_escape_field(mode, Region::JULIA, Resolution::new(80, 80), 150).unwrap();
        let b = compute_escape_field(mode, Region::JULIA, Resolution::new(80, 80), 150).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_julia_uses_grid_as_initial_state() {
        let field = compute_escape_field(
            EscapeMode::julia(0.0, 0.0),
            Region::new(-1.5, 1.5, -1.5, 1.5),
            Resolution::new(7, 7),
            30,
        )
        .unwrap();
        // c = 0: the filled Julia set is the closed unit disc
        assert!(field.is_saturated(3, 3));
        assert!(field.is_saturated(3, 4)); // z0 = 0.5
        assert!(field.is_saturated(3, 5)); // z0 = 1.0
        assert_eq!(field.get(3, 6), Some(1)); // z0 = 1.5 → 2.25
        assert_eq!(field.get(0, 0), Some(0)); // |z0| ≈ 2.12
    }

    #[test]
    fn test_invalid_configuration() {
        let ok = Resolution::new(10, 10);
        assert!(matches!(
            compute_escape_field(EscapeMode::Mandelbrot, Region::MANDELBROT, Resolution::new(0, 10), 10),
            Err(ConfigurationError::ZeroCount { name: "width" })
        ));
        assert!(matches!(
            compute_escape_field(EscapeMode::Mandelbrot, Region::MANDELBROT, Resolution::new(10, 0), 10),
            Err(ConfigurationError::ZeroCount { name: "height" })
        ));
        assert!(matches!(
            compute_escape_field(EscapeMode::Mandelbrot, Region::MANDELBROT, ok, 0),
            Err(ConfigurationError::ZeroCount { name: "max_iter" })
        ));
        assert!(matches!(
            compute_escape_field(EscapeMode::Mandelbrot, Region::new(1.0, 1.0, -1.0, 1.0), ok, 10),
            Err(ConfigurationError::EmptyRange { .. })
        ));
        assert!(matches!(
            compute_escape_field(EscapeMode::Mandelbrot, Region::new(-1.0, 1.0, 1.0, -1.0), ok, 10),
            Err(ConfigurationError::InvertedRange { .. })
        ));
        assert!(compute_escape_field(EscapeMode::julia(f64::NAN, 0.0), Region::JULIA, ok, 10).is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let too_large = Err(ConfigurationError::TooLarge { name: "escape grid" });
        assert_eq!(
            compute_escape_field(EscapeMode::Mandelbrot, Region::MANDELBROT, Resolution::new(usize::MAX, 2), 10),
            too_large
        );
        assert_eq!(
            compute_escape_field(EscapeMode::Mandelbrot, Region::MANDELBROT, Resolution::new(1 << 32, 1 << 31), 10),
            too_large
        );
    }

    #[test]
    fn test_single_cell_grid() {
        let field = compute_escape_field(EscapeMode::Mandelbrot, Region::MANDELBROT, Resolution::new(1, 1), 10).unwrap();
        // single cell sits at (xmin, ymin) = -2 - 1.5i
        assert_eq!(field.coordinate(0, 0), Complex64::new(-2.0, -1.5));
        assert_eq!(field.get(0, 0), Some(1));
    }

    #[test]
    fn test_flipped_rows() {
        let field = compute_escape_field(EscapeMode::Mandelbrot, Region::MANDELBROT, Resolution::new(5, 4), 30).unwrap();
        let flipped = field.flipped_rows();
        for col in 0..5 {
            assert_eq!(flipped[[0, col]], field.counts()[[3, col]]);
            assert_eq!(flipped[[3, col]], field.counts()[[0, col]]);
        }
    }

    #[test]
    fn test_revealed_columns() {
        let field = compute_escape_field(EscapeMode::Mandelbrot, Region::MANDELBROT, Resolution::new(40, 30), 20).unwrap();

        let none = field.revealed(0.0);
        assert_eq!(none.counts.ncols(), 1);

        let half = field.revealed(0.5);
        assert_eq!(half.counts.dim(), (30, 20));
        assert_eq!(half.x_extent, (-2.0, -0.5));
        assert_eq!(half.y_extent, (-1.5, 1.5));

        let all = field.revealed(1.0);
        assert_eq!(all.counts.ncols(), 40);
        assert_eq!(all.x_extent.1, 1.0);
    }
}
