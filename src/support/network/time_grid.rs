use thiserror::Error;
use uom::ConstZero;
use uom::si::f64::Time;

use crate::support::constraint::{ConstraintError, StrictlyPositive};

/// An error in a requested report grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TimeGridError {
    #[error("time span must be strictly positive")]
    Span(#[source] ConstraintError),
    #[error("report step must be strictly positive")]
    Step(#[source] ConstraintError),
    #[error("time span and step must be finite")]
    NotFinite,
    #[error("a sampled grid needs at least two points, got {0}")]
    TooFewSamples(usize),
    #[error("grid has no report times")]
    Empty,
    #[error("report time at index {0} must be finite and non-negative")]
    InvalidTime(usize),
    #[error("report times must be strictly increasing (violated at index {0})")]
    NotIncreasing(usize),
}

/// The times at which a solve reports temperatures.
///
/// The grid only controls reporting. Integration marches at the solver's own
/// step and the trajectory is then sampled onto the grid, so refining or
/// coarsening a grid never changes the underlying solution.
///
/// Integration always starts at time zero; report times need not include it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<Time>,
}

impl TimeGrid {
    /// A grid from zero to `span` at a fixed report step.
    ///
    /// When the span is an exact multiple of the step the final report lands
    /// on the span itself; otherwise the grid stops at the last full step.
    ///
    /// # Errors
    ///
    /// Returns an error if the span or step is not strictly positive and
    /// finite.
    pub fn uniform(span: Time, step: Time) -> Result<Self, TimeGridError> {
        StrictlyPositive::new(span).map_err(TimeGridError::Span)?;
        let step = StrictlyPositive::new(step)
            .map_err(TimeGridError::Step)?
            .into_inner();
        if !span.value.is_finite() || !step.value.is_finite() {
            return Err(TimeGridError::NotFinite);
        }

        // Slack on the ratio keeps the final report when span/step is an
        // exact multiple that floating point lands just below.
        let count = ((span / step).value + 1e-9).floor() as usize;
        let times = (0..=count).map(|k| step * k as f64).collect();
        Ok(Self { times })
    }

    /// A grid of `samples` evenly spaced reports from zero to `span`
    /// inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the span is not strictly positive and finite, or
    /// fewer than two samples are requested.
    pub fn sampled(span: Time, samples: usize) -> Result<Self, TimeGridError> {
        StrictlyPositive::new(span).map_err(TimeGridError::Span)?;
        if !span.value.is_finite() {
            return Err(TimeGridError::NotFinite);
        }
        if samples < 2 {
            return Err(TimeGridError::TooFewSamples(samples));
        }

        let last = (samples - 1) as f64;
        let times = (0..samples).map(|k| span * (k as f64 / last)).collect();
        Ok(Self { times })
    }

    /// A grid at caller-chosen report times.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, any time is negative or not
    /// finite, or the times are not strictly increasing.
    pub fn explicit(times: Vec<Time>) -> Result<Self, TimeGridError> {
        if times.is_empty() {
            return Err(TimeGridError::Empty);
        }
        for (index, time) in times.iter().enumerate() {
            if !time.value.is_finite() || time.value < 0.0 {
                return Err(TimeGridError::InvalidTime(index));
            }
            if index > 0 && times[index - 1] >= *time {
                return Err(TimeGridError::NotIncreasing(index));
            }
        }
        Ok(Self { times })
    }

    /// The report times, strictly increasing.
    #[must_use]
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// The final report time.
    #[must_use]
    pub fn end(&self) -> Time {
        self.times.last().copied().unwrap_or(Time::ZERO)
    }

    /// Number of report times.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the grid has no report times. Never true for a constructed
    /// grid; provided for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
