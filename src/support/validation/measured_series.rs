use thiserror::Error;
use uom::si::f64::Time;

/// An error in a logged measurement series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MeasuredSeriesError {
    #[error("a measured series needs at least one point")]
    Empty,
    #[error("series has {times} times but {values} values")]
    LengthMismatch { times: usize, values: usize },
    #[error("measured time at index {0} must be finite and non-negative")]
    InvalidTime(usize),
    #[error("measured times must be strictly increasing (violated at index {0})")]
    NotIncreasing(usize),
    #[error("measured value at index {0} is not finite")]
    InvalidValue(usize),
}

/// A logged measurement series: strictly increasing timestamps, one reading
/// each.
///
/// Readings are plain numbers in whatever unit the instrument logged; a
/// comparison supplies the simulated side in the same unit. Zero readings
/// are legal here and only matter when a percent error is formed.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredSeries {
    times: Vec<Time>,
    values: Vec<f64>,
}

impl MeasuredSeries {
    /// A validated series from matching time and value vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectors are empty or of different lengths,
    /// any time is negative, not finite, or out of order, or any value is
    /// not finite.
    pub fn new(times: Vec<Time>, values: Vec<f64>) -> Result<Self, MeasuredSeriesError> {
        if times.len() != values.len() {
            return Err(MeasuredSeriesError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.is_empty() {
            return Err(MeasuredSeriesError::Empty);
        }
        for (index, time) in times.iter().enumerate() {
            if !time.value.is_finite() || time.value < 0.0 {
                return Err(MeasuredSeriesError::InvalidTime(index));
            }
            if index > 0 && times[index - 1] >= *time {
                return Err(MeasuredSeriesError::NotIncreasing(index));
            }
        }
        for (index, value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(MeasuredSeriesError::InvalidValue(index));
            }
        }
        Ok(Self { times, values })
    }

    /// A series from data already known to be well formed, such as compiled-in
    /// reference logs.
    pub(crate) fn new_unchecked(times: Vec<Time>, values: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), values.len());
        debug_assert!(!times.is_empty());
        Self { times, values }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the series has no points. Never true for a constructed
    /// series; provided for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The timestamps, strictly increasing.
    #[must_use]
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// The readings, in timestamp order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The points in timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = (Time, f64)> {
        self.times
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }
}
