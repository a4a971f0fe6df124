//! Beat Intervals: Logistic Dynamics of the Cardiac Cycle
//!
//! Successive inter-beat intervals are modelled by the logistic map,
//! rescaled into a physiological range (200–400 ms by default):
//!
//!   I_n = scale_min + (scale_max - scale_min) · x_n
//!
//! As r increases the rhythm goes from a regular beat (period 1) to
//! alternans/bigeminy (period 2), period 4, and finally irregular
//! (chaotic) intervals, mirroring the period-doubling route observed in
//! paced cardiac tissue.
//!
//! ## References
//!
//! - Garfinkel, A., Spano, M. L., Ditto, W. L., & Weiss, J. N. (1992).
//!   Controlling cardiac chaos. Science, 257(5074), 1230-1235.

use ndarray::Array1;
use tracing::debug;

use crate::error::{ConfigurationError, Result};
use crate::maps::{iterate_map, LogisticMap};

/// Initial state of the interval map
pub const INTERVAL_X0: f64 = 0.5;

/// Physiological interval range in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self { min: 0.20, max: 0.40 }
    }
}

impl ScaleRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        ConfigurationError::check_range("interval scale", self.min, self.max)
    }

    /// Affine map of a unit-interval state into the range.
    ///
    /// An unvalidated range (`min > max` or NaN bounds) is mapped affinely
    /// without clamping.
    #[inline]
    pub fn rescale(&self, x: f64) -> f64 {
        let v = self.min + (self.max - self.min) * x;
        // keep rounding at x = 0 or 1 from stepping outside the range
        if self.min <= self.max && (0.0..=1.0).contains(&x) {
            v.clamp(self.min, self.max)
        } else {
            v
        }
    }
}

/// Inter-beat intervals in seconds
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSequence {
    /// Interval values I_0..I_{count-1}
    pub values: Array1<f64>,
    /// Range the values were scaled into
    pub scale: ScaleRange,
}

impl IntervalSequence {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Mean interval (NaN when empty)
    pub fn mean(&self) -> f64 {
        self.values.mean().unwrap_or(f64::NAN)
    }

    /// Beat times of these intervals inside `[0, total_time]`
    pub fn beat_times(&self, total_time: f64) -> BeatTimeSequence {
        BeatTimeSequence::from_intervals(self, total_time)
    }
}

/// Cumulative beat times, truncated to a time window
#[derive(Debug, Clone, PartialEq)]
pub struct BeatTimeSequence {
    /// Beat instants in seconds, ascending
    pub times: Array1<f64>,
    /// Window the beats were truncated to
    pub total_time: f64,
}

impl BeatTimeSequence {
    /// Running sum of `intervals`, keeping the prefix with time ≤ `total_time`
    pub fn from_intervals(intervals: &IntervalSequence, total_time: f64) -> Self {
        let times: Vec<f64> = intervals
            .iter()
            .scan(0.0, |t, dt| {
                *t += dt;
                Some(*t)
            })
            .take_while(|&t| t <= total_time)
            .collect();
        Self {
            times: Array1::from_vec(times),
            total_time,
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        self.times.as_slice().unwrap_or(&[])
    }

    /// Mean heart rate over the window in beats per minute
    pub fn heart_rate_bpm(&self) -> f64 {
        60.0 * self.times.len() as f64 / self.total_time
    }
}

/// Generate `count` inter-beat intervals from the logistic map at control
/// `r`, started at x_0 = 0.5 and rescaled into `scale`.
///
/// The initial state itself is not an interval: the first value is the
/// image of x_0.
pub fn synthesize_intervals(r: f64, count: usize, scale: ScaleRange) -> Result<IntervalSequence> {
    ConfigurationError::check_finite("control", r)?;
    scale.validate()?;

    debug!(r, count, scale_min = scale.min, scale_max = scale.max, "synthesizing intervals");

    let orbit = iterate_map(&LogisticMap, INTERVAL_X0, r, count);
    let values = orbit.iter().skip(1).map(|x| scale.rescale(x)).collect();

    Ok(IntervalSequence { values, scale })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_interval_count_and_first_value() {
        let seq = synthesize_intervals(3.2, 150, ScaleRange::default()).unwrap();
        assert_eq!(seq.len(), 150);
        // x_1 = 3.2 · 0.5 · 0.5 = 0.8 → 0.2 + 0.2 · 0.8
        assert_relative_eq!(seq.values[0], 0.36, epsilon = 1e-12);
    }

    #[test]
    fn test_period_one_is_regular() {
        let seq = synthesize_intervals(2.8, 200, ScaleRange::default()).unwrap();
        let tail = &seq.values.as_slice().unwrap()[150..];
        let expected = ScaleRange::default().rescale(LogisticMap::fixed_point(2.8));
        for &v in tail {
            assert_relative_eq!(v, expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_invalid_scale() {
        assert!(matches!(
            synthesize_intervals(3.2, 10, ScaleRange { min: 0.4, max: 0.2 }),
            Err(ConfigurationError::InvertedRange { .. })
        ));
        assert!(ScaleRange::new(0.2, f64::NAN).is_err());
    }

    #[test]
    fn test_rescale_inverted_range_does_not_clamp() {
        let inverted = ScaleRange { min: 0.4, max: 0.2 };
        assert_relative_eq!(inverted.rescale(0.5), 0.3, epsilon = 1e-12);
        assert_eq!(inverted.rescale(0.0), 0.4);
        assert_relative_eq!(inverted.rescale(1.0), 0.2, epsilon = 1e-12);

        let nan = ScaleRange { min: f64::NAN, max: 0.4 };
        assert!(nan.rescale(0.5).is_nan());
    }

    #[test]
    fn test_beat_times_cumulative() {
        let seq = IntervalSequence {
            values: Array1::from_vec(vec![0.25, 0.25, 0.5, 0.5, 0.5]),
            scale: ScaleRange::default(),
        };
        let beats = seq.beat_times(1.5);
        assert_eq!(beats.len(), 4);
        assert_eq!(beats.times.to_vec(), vec![0.25, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_beat_times_strictly_increasing() {
        let seq = synthesize_intervals(3.8, 200, ScaleRange::default()).unwrap();
        let beats = seq.beat_times(5.0);
        assert!(!beats.is_empty());
        assert!(beats.as_slice().windows(2).all(|w| w[0] < w[1]));
        assert!(beats.as_slice().iter().all(|&t| t <= 5.0));
        // 200-400 ms intervals: between 12 and 25 beats in 5 s
        assert!(beats.len() >= 12 && beats.len() <= 25, "got {} beats", beats.len());
    }

    proptest! {
        #[test]
        fn prop_intervals_within_scale(r in 0.001f64..3.999, count in 1usize..300) {
            let scale = ScaleRange::default();
            let seq = synthesize_intervals(r, count, scale).unwrap();
            prop_assert_eq!(seq.len(), count);
            for v in seq.iter() {
                prop_assert!(v >= scale.min && v <= scale.max, "interval {} outside scale", v);
            }
        }
    }
}
