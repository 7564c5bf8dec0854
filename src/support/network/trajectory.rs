use thiserror::Error;
use uom::si::f64::{ThermodynamicTemperature, Time};
use uom::si::thermodynamic_temperature::degree_celsius;

use crate::support::units::TemperatureDifference;

use super::NodeId;
use super::time_grid::TimeGrid;

/// An error from reading a [`Trajectory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TrajectoryError {
    #[error("node does not belong to this trajectory's network")]
    UnknownNode,
    #[error("requested time lies outside the solved span")]
    TimeOutOfRange,
}

/// Where a requested time falls among stored samples.
enum Bracket {
    Exact(usize),
    Between {
        lower: usize,
        upper: usize,
        fraction: f64,
    },
}

/// Node temperatures over a strictly increasing sequence of times.
///
/// Samples hold every node in node order. Reads between stored times
/// interpolate linearly; reads outside the solved span are errors rather
/// than extrapolations.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Vec<Time>,
    samples: Vec<Vec<ThermodynamicTemperature>>,
}

impl Trajectory {
    pub(super) fn new(times: Vec<Time>, samples: Vec<Vec<ThermodynamicTemperature>>) -> Self {
        debug_assert_eq!(times.len(), samples.len());
        debug_assert!(times.windows(2).all(|pair| pair[0] < pair[1]));
        Self { times, samples }
    }

    /// Number of stored samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the trajectory holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The sample times, strictly increasing.
    #[must_use]
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Number of nodes in each sample.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.samples.first().map_or(0, Vec::len)
    }

    /// The sample at the given index.
    #[must_use]
    pub fn sample(&self, index: usize) -> Option<(Time, &[ThermodynamicTemperature])> {
        let time = *self.times.get(index)?;
        let sample = self.samples.get(index)?;
        Some((time, sample.as_slice()))
    }

    /// The final sample.
    #[must_use]
    pub fn last(&self) -> Option<(Time, &[ThermodynamicTemperature])> {
        self.len().checked_sub(1).and_then(|index| self.sample(index))
    }

    /// One node's temperature at every stored time.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not part of this trajectory.
    pub fn series(
        &self,
        node: NodeId,
    ) -> Result<Vec<(Time, ThermodynamicTemperature)>, TrajectoryError> {
        let NodeId(column) = node;
        if column >= self.node_count() {
            return Err(TrajectoryError::UnknownNode);
        }
        Ok(self
            .times
            .iter()
            .zip(&self.samples)
            .map(|(&time, sample)| (time, sample[column]))
            .collect())
    }

    /// Like [`series`](Self::series), with temperatures as plain degrees
    /// Celsius. Handy for comparison against logged measurements.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not part of this trajectory.
    pub fn series_celsius(&self, node: NodeId) -> Result<Vec<(Time, f64)>, TrajectoryError> {
        Ok(self
            .series(node)?
            .into_iter()
            .map(|(time, temperature)| (time, temperature.get::<degree_celsius>()))
            .collect())
    }

    /// One node's temperature at an arbitrary time within the solved span,
    /// interpolating linearly between stored samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is unknown or the time lies outside the
    /// span.
    pub fn temperature_at(
        &self,
        node: NodeId,
        time: Time,
    ) -> Result<ThermodynamicTemperature, TrajectoryError> {
        let NodeId(column) = node;
        if column >= self.node_count() {
            return Err(TrajectoryError::UnknownNode);
        }
        match self.bracket(time)? {
            Bracket::Exact(index) => Ok(self.samples[index][column]),
            Bracket::Between {
                lower,
                upper,
                fraction,
            } => {
                let lo = self.samples[lower][column];
                let hi = self.samples[upper][column];
                Ok(lo + hi.minus(lo) * fraction)
            }
        }
    }

    /// This trajectory sampled at the grid's report times.
    ///
    /// Times already present are copied through unchanged; times between
    /// samples interpolate linearly.
    ///
    /// # Errors
    ///
    /// Returns an error if any report time lies outside the solved span.
    pub fn resample(&self, grid: &TimeGrid) -> Result<Self, TrajectoryError> {
        let mut samples = Vec::with_capacity(grid.len());
        for &time in grid.times() {
            samples.push(self.sample_at(time)?);
        }
        Ok(Self {
            times: grid.times().to_vec(),
            samples,
        })
    }

    fn sample_at(&self, time: Time) -> Result<Vec<ThermodynamicTemperature>, TrajectoryError> {
        match self.bracket(time)? {
            Bracket::Exact(index) => Ok(self.samples[index].clone()),
            Bracket::Between {
                lower,
                upper,
                fraction,
            } => Ok(self.samples[lower]
                .iter()
                .zip(&self.samples[upper])
                .map(|(&lo, &hi)| lo + hi.minus(lo) * fraction)
                .collect()),
        }
    }

    fn bracket(&self, time: Time) -> Result<Bracket, TrajectoryError> {
        let first = *self.times.first().ok_or(TrajectoryError::TimeOutOfRange)?;
        let last = *self.times.last().ok_or(TrajectoryError::TimeOutOfRange)?;
        if time < first || time > last {
            return Err(TrajectoryError::TimeOutOfRange);
        }

        let upper = self.times.partition_point(|&t| t < time);
        if self.times[upper] == time {
            return Ok(Bracket::Exact(upper));
        }

        let lower = upper - 1;
        let fraction = ((time - self.times[lower]) / (self.times[upper] - self.times[lower])).value;
        Ok(Bracket::Between {
            lower,
            upper,
            fraction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::second;

    fn seconds(value: f64) -> Time {
        Time::new::<second>(value)
    }

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    /// Two nodes warming linearly, ten degrees apart.
    fn ramp() -> Trajectory {
        Trajectory::new(
            vec![seconds(0.0), seconds(10.0), seconds(20.0)],
            vec![
                vec![celsius(20.0), celsius(30.0)],
                vec![celsius(30.0), celsius(40.0)],
                vec![celsius(40.0), celsius(50.0)],
            ],
        )
    }

    #[test]
    fn stored_times_return_stored_samples() {
        let trajectory = ramp();

        let value = trajectory.temperature_at(NodeId(0), seconds(10.0)).unwrap();
        assert_relative_eq!(value.get::<degree_celsius>(), 30.0);

        let (time, sample) = trajectory.last().unwrap();
        assert_relative_eq!(time.get::<second>(), 20.0);
        assert_relative_eq!(sample[1].get::<degree_celsius>(), 50.0);
    }

    #[test]
    fn times_between_samples_interpolate_linearly() {
        let trajectory = ramp();

        let value = trajectory.temperature_at(NodeId(0), seconds(15.0)).unwrap();
        assert_relative_eq!(value.get::<degree_celsius>(), 35.0, epsilon = 1e-12);

        let value = trajectory.temperature_at(NodeId(1), seconds(2.5)).unwrap();
        assert_relative_eq!(value.get::<degree_celsius>(), 32.5, epsilon = 1e-12);
    }

    #[test]
    fn reads_outside_the_span_are_errors() {
        let trajectory = ramp();

        assert!(matches!(
            trajectory.temperature_at(NodeId(0), seconds(-1.0)),
            Err(TrajectoryError::TimeOutOfRange)
        ));
        assert!(matches!(
            trajectory.temperature_at(NodeId(0), seconds(20.1)),
            Err(TrajectoryError::TimeOutOfRange)
        ));
    }

    #[test]
    fn unknown_nodes_are_errors() {
        let trajectory = ramp();

        assert!(matches!(
            trajectory.series(NodeId(5)),
            Err(TrajectoryError::UnknownNode)
        ));
        assert!(matches!(
            trajectory.temperature_at(NodeId(5), seconds(0.0)),
            Err(TrajectoryError::UnknownNode)
        ));
    }

    #[test]
    fn series_extracts_one_node_in_time_order() {
        let trajectory = ramp();

        let series = trajectory.series_celsius(NodeId(1)).unwrap();
        assert_eq!(series.len(), 3);
        assert_relative_eq!(series[0].1, 30.0);
        assert_relative_eq!(series[2].1, 50.0);
    }

    #[test]
    fn resampling_hits_stored_times_and_interpolates_the_rest() {
        let trajectory = ramp();
        let grid = TimeGrid::explicit(vec![seconds(5.0), seconds(10.0), seconds(20.0)]).unwrap();

        let resampled = trajectory.resample(&grid).unwrap();

        assert_eq!(resampled.len(), 3);
        let (_, first) = resampled.sample(0).unwrap();
        assert_relative_eq!(first[0].get::<degree_celsius>(), 25.0, epsilon = 1e-12);
        let (_, middle) = resampled.sample(1).unwrap();
        assert_relative_eq!(middle[0].get::<degree_celsius>(), 30.0);
    }

    #[test]
    fn resampling_outside_the_span_is_an_error() {
        let trajectory = ramp();
        let grid = TimeGrid::explicit(vec![seconds(25.0)]).unwrap();

        assert!(matches!(
            trajectory.resample(&grid),
            Err(TrajectoryError::TimeOutOfRange)
        ));
    }
}
