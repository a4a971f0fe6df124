//! Error types shared by the iteration engines.
//!
//! Every engine validates its parameters up front and reports a
//! [`ConfigurationError`] before doing any work. Numerical divergence
//! (infinite or NaN states) is never an error: it surfaces in the output
//! and the caller decides how to filter it.

use thiserror::Error;

/// Result type produced by the engines.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Invalid parameters passed to one of the engines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{name} must be at least 1")]
    ZeroCount { name: &'static str },
    #[error("{name} must be finite (got {value})")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },
    #[error("inverted {name} range: [{min}, {max}]")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("empty {name} range: [{min}, {max}]")]
    EmptyRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{name} is too large to allocate")]
    TooLarge { name: &'static str },
}

impl ConfigurationError {
    pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFinite { name, value })
        }
    }

    pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<()> {
        Self::check_finite(name, value)?;
        if value > 0.0 {
            Ok(())
        } else {
            Err(Self::NonPositive { name, value })
        }
    }

    pub(crate) fn check_count(name: &'static str, value: usize) -> Result<()> {
        if value == 0 {
            Err(Self::ZeroCount { name })
        } else {
            Ok(())
        }
    }

    /// `len` elements of `T` fit in one allocation. `None` stands for a
    /// length that already overflowed.
    pub(crate) fn check_allocation<T>(name: &'static str, len: Option<usize>) -> Result<usize> {
        let fits = |len: usize| {
            len.checked_mul(std::mem::size_of::<T>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        };
        match len {
            Some(len) if fits(len) => Ok(len),
            _ => Err(Self::TooLarge { name }),
        }
    }

    /// `min <= max`, both finite.
    pub(crate) fn check_range(name: &'static str, min: f64, max: f64) -> Result<()> {
        Self::check_finite(name, min)?;
        Self::check_finite(name, max)?;
        if min > max {
            Err(Self::InvertedRange { name, min, max })
        } else {
            Ok(())
        }
    }

    /// `min < max`, both finite.
    pub(crate) fn check_open_range(name: &'static str, min: f64, max: f64) -> Result<()> {
        Self::check_range(name, min, max)?;
        if min == max {
            Err(Self::EmptyRange { name, min, max })
        } else {
            Ok(())
        }
    }
}
