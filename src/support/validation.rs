//! Comparison of simulated trajectories against logged measurements.
//!
//! A measured series is usually far sparser than a solved trajectory, and
//! its timestamps rarely line up with the solver's. [`compare`] aligns the
//! two by timestamp, interpolating the simulated series at each measured
//! time, and reports absolute and percent error point by point along with
//! summary statistics.
//!
//! Values are compared as plain numbers in whatever unit the caller supplies
//! for both sides, typically degrees Celsius straight from a logger.

mod measured_series;

pub use measured_series::{MeasuredSeries, MeasuredSeriesError};

use thiserror::Error;
use uom::si::f64::{Ratio, Time};
use uom::si::ratio::percent;

/// An error aligning a simulated series with measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AlignError {
    #[error("simulated series has no samples")]
    EmptySimulated,
    #[error("simulated time at index {0} is not finite")]
    InvalidSimulatedTime(usize),
    #[error("simulated times must be strictly increasing (violated at index {0})")]
    SimulatedNotIncreasing(usize),
    #[error("simulated value at index {0} is not finite")]
    InvalidSimulatedValue(usize),
    #[error("measured point {index} lies outside the simulated span")]
    OutOfRange { index: usize },
}

/// Percent error at one aligned point.
///
/// Defined as `100 · |simulated - measured| / measured`; when the measured
/// value is exactly zero the ratio does not exist, and the point carries
/// [`Undefined`](Self::Undefined) instead of aborting the comparison or
/// smuggling in an infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentError {
    Defined(Ratio),
    Undefined,
}

impl PercentError {
    /// The ratio, unless the point was undefined.
    #[must_use]
    pub fn defined(self) -> Option<Ratio> {
        match self {
            Self::Defined(ratio) => Some(ratio),
            Self::Undefined => None,
        }
    }
}

/// Errors at one measured timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointError {
    /// The measured timestamp the simulation was sampled at.
    pub time: Time,
    /// Simulated value, interpolated to the measured timestamp.
    pub simulated: f64,
    /// The logged value.
    pub measured: f64,
    /// `|simulated - measured|`, in the caller's unit.
    pub absolute: f64,
    pub percent: PercentError,
}

/// Summary of the defined percent errors of a comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorStats {
    pub max: Ratio,
    pub min: Ratio,
    pub mean: Ratio,
}

/// A point-by-point comparison of simulation against measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// One entry per measured point, in time order.
    pub points: Vec<PointError>,
    /// Statistics over the defined percent errors, or `None` when every
    /// measured value was zero.
    pub stats: Option<ErrorStats>,
}

impl Comparison {
    /// Number of points whose percent error is undefined.
    #[must_use]
    pub fn undefined_points(&self) -> usize {
        self.points
            .iter()
            .filter(|point| point.percent == PercentError::Undefined)
            .count()
    }
}

/// Aligns a simulated series with a measured one and reports the errors.
///
/// The simulated series is interpolated linearly at each measured timestamp,
/// so it must cover the full measured range. A measured value of exactly
/// zero yields an undefined percent error at that point; the comparison
/// still completes and the point still carries its absolute error.
///
/// # Errors
///
/// Returns an error if the simulated series is empty, unordered, or not
/// finite, or if a measured timestamp falls outside the simulated span.
pub fn compare(
    simulated: &[(Time, f64)],
    measured: &MeasuredSeries,
) -> Result<Comparison, AlignError> {
    check_simulated(simulated)?;

    let mut points = Vec::with_capacity(measured.len());
    for (index, (time, measured_value)) in measured.iter().enumerate() {
        let simulated_value =
            sample(simulated, time).ok_or(AlignError::OutOfRange { index })?;

        let absolute = (simulated_value - measured_value).abs();
        let percent_error = if measured_value == 0.0 {
            PercentError::Undefined
        } else {
            PercentError::Defined(Ratio::new::<percent>(100.0 * absolute / measured_value))
        };

        points.push(PointError {
            time,
            simulated: simulated_value,
            measured: measured_value,
            absolute,
            percent: percent_error,
        });
    }

    let stats = summarize(&points);
    Ok(Comparison { points, stats })
}

fn check_simulated(simulated: &[(Time, f64)]) -> Result<(), AlignError> {
    if simulated.is_empty() {
        return Err(AlignError::EmptySimulated);
    }
    for (index, &(time, value)) in simulated.iter().enumerate() {
        if !time.value.is_finite() {
            return Err(AlignError::InvalidSimulatedTime(index));
        }
        if !value.is_finite() {
            return Err(AlignError::InvalidSimulatedValue(index));
        }
        if index > 0 && simulated[index - 1].0 >= time {
            return Err(AlignError::SimulatedNotIncreasing(index));
        }
    }
    Ok(())
}

/// Linear interpolation within the simulated series; `None` outside it.
fn sample(series: &[(Time, f64)], time: Time) -> Option<f64> {
    let &(first, _) = series.first()?;
    let &(last, _) = series.last()?;
    if time < first || time > last {
        return None;
    }

    let upper = series.partition_point(|&(t, _)| t < time);
    let (t_hi, v_hi) = series[upper];
    if t_hi == time {
        return Some(v_hi);
    }

    let (t_lo, v_lo) = series[upper - 1];
    let fraction = ((time - t_lo) / (t_hi - t_lo)).value;
    Some(v_lo + (v_hi - v_lo) * fraction)
}

fn summarize(points: &[PointError]) -> Option<ErrorStats> {
    let mut defined = points.iter().filter_map(|point| point.percent.defined());

    let first = defined.next()?;
    let mut max = first;
    let mut min = first;
    let mut sum = first;
    let mut count = 1_usize;
    for value in defined {
        if value > max {
            max = value;
        }
        if value < min {
            min = value;
        }
        sum += value;
        count += 1;
    }

    Some(ErrorStats {
        max,
        min,
        mean: sum / count as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::second;

    fn seconds(value: f64) -> Time {
        Time::new::<second>(value)
    }

    #[test]
    fn a_series_compared_against_itself_has_zero_error() {
        let simulated = vec![
            (seconds(0.0), 22.9),
            (seconds(300.0), 25.8),
            (seconds(600.0), 28.1),
        ];
        let measured = MeasuredSeries::new(
            vec![seconds(0.0), seconds(300.0), seconds(600.0)],
            vec![22.9, 25.8, 28.1],
        )
        .unwrap();

        let comparison = compare(&simulated, &measured).unwrap();

        for point in &comparison.points {
            assert_eq!(point.absolute, 0.0);
            let ratio = point.percent.defined().unwrap();
            assert_eq!(ratio.get::<percent>(), 0.0);
        }
        let stats = comparison.stats.unwrap();
        assert_eq!(stats.max.get::<percent>(), 0.0);
        assert_eq!(stats.mean.get::<percent>(), 0.0);
    }

    #[test]
    fn measurements_between_samples_interpolate_the_simulation() {
        let simulated = vec![(seconds(0.0), 20.0), (seconds(100.0), 30.0)];
        let measured =
            MeasuredSeries::new(vec![seconds(50.0)], vec![24.0]).unwrap();

        let comparison = compare(&simulated, &measured).unwrap();

        let point = &comparison.points[0];
        assert_relative_eq!(point.simulated, 25.0, epsilon = 1e-12);
        assert_relative_eq!(point.absolute, 1.0, epsilon = 1e-12);
        let ratio = point.percent.defined().unwrap();
        assert_relative_eq!(ratio.get::<percent>(), 100.0 / 24.0, max_relative = 1e-12);
    }

    #[test]
    fn zero_measured_values_are_undefined_rather_than_fatal() {
        let simulated = vec![(seconds(0.0), 1.0), (seconds(100.0), 3.0)];
        let measured = MeasuredSeries::new(
            vec![seconds(0.0), seconds(50.0), seconds(100.0)],
            vec![1.0, 0.0, 2.0],
        )
        .unwrap();

        let comparison = compare(&simulated, &measured).unwrap();

        assert_eq!(comparison.undefined_points(), 1);
        assert_eq!(comparison.points[1].percent, PercentError::Undefined);
        assert_relative_eq!(comparison.points[1].absolute, 2.0, epsilon = 1e-12);

        // Statistics cover only the defined points.
        let stats = comparison.stats.unwrap();
        assert_relative_eq!(stats.max.get::<percent>(), 50.0, max_relative = 1e-12);
        assert_relative_eq!(stats.min.get::<percent>(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(stats.mean.get::<percent>(), 25.0, max_relative = 1e-12);
    }

    #[test]
    fn statistics_summarize_the_percent_errors() {
        let simulated = vec![
            (seconds(0.0), 102.0),
            (seconds(100.0), 104.0),
            (seconds(200.0), 106.0),
        ];
        let measured = MeasuredSeries::new(
            vec![seconds(0.0), seconds(100.0), seconds(200.0)],
            vec![100.0, 100.0, 100.0],
        )
        .unwrap();

        let stats = compare(&simulated, &measured).unwrap().stats.unwrap();

        assert_relative_eq!(stats.max.get::<percent>(), 6.0, max_relative = 1e-12);
        assert_relative_eq!(stats.min.get::<percent>(), 2.0, max_relative = 1e-12);
        assert_relative_eq!(stats.mean.get::<percent>(), 4.0, max_relative = 1e-12);
    }

    #[test]
    fn measurements_outside_the_simulated_span_are_errors() {
        let simulated = vec![(seconds(0.0), 20.0), (seconds(100.0), 30.0)];
        let measured =
            MeasuredSeries::new(vec![seconds(50.0), seconds(150.0)], vec![25.0, 35.0]).unwrap();

        assert!(matches!(
            compare(&simulated, &measured),
            Err(AlignError::OutOfRange { index: 1 })
        ));
    }

    #[test]
    fn malformed_simulated_series_are_rejected() {
        let measured = MeasuredSeries::new(vec![seconds(0.0)], vec![20.0]).unwrap();

        assert!(matches!(
            compare(&[], &measured),
            Err(AlignError::EmptySimulated)
        ));
        assert!(matches!(
            compare(&[(seconds(10.0), 20.0), (seconds(5.0), 21.0)], &measured),
            Err(AlignError::SimulatedNotIncreasing(1))
        ));
        assert!(matches!(
            compare(&[(seconds(0.0), f64::NAN)], &measured),
            Err(AlignError::InvalidSimulatedValue(0))
        ));
    }
}
