use uom::si::f64::{ThermodynamicTemperature, Time};
use uom::si::thermodynamic_temperature::degree_celsius;

use crate::support::network::{Trajectory, TrajectoryError};
use crate::support::validation::{self, AlignError, Comparison, MeasuredSeries};

use super::build::Handles;

/// A solved heating run with the two fluid histories pulled out.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    trajectory: Trajectory,
    bath: Vec<(Time, ThermodynamicTemperature)>,
    inner: Vec<(Time, ThermodynamicTemperature)>,
}

impl Solution {
    pub(crate) fn new(trajectory: Trajectory, handles: Handles) -> Result<Self, TrajectoryError> {
        let bath = trajectory.series(handles.bath)?;
        let inner = trajectory.series(handles.inner)?;
        Ok(Self {
            trajectory,
            bath,
            inner,
        })
    }

    /// Bath temperature at each reported time.
    #[must_use]
    pub fn bath_series(&self) -> &[(Time, ThermodynamicTemperature)] {
        &self.bath
    }

    /// Inner fluid temperature at each reported time.
    #[must_use]
    pub fn inner_series(&self) -> &[(Time, ThermodynamicTemperature)] {
        &self.inner
    }

    /// The bath history in degrees Celsius, as measurement logs record it.
    #[must_use]
    pub fn bath_series_celsius(&self) -> Vec<(Time, f64)> {
        celsius(&self.bath)
    }

    /// The inner fluid history in degrees Celsius.
    #[must_use]
    pub fn inner_series_celsius(&self) -> Vec<(Time, f64)> {
        celsius(&self.inner)
    }

    #[must_use]
    pub fn final_bath_temperature(&self) -> Option<ThermodynamicTemperature> {
        self.bath.last().map(|&(_, temperature)| temperature)
    }

    #[must_use]
    pub fn final_inner_temperature(&self) -> Option<ThermodynamicTemperature> {
        self.inner.last().map(|&(_, temperature)| temperature)
    }

    /// The full reported trajectory, for callers that want every node.
    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Compares the simulated bath history against a measured log.
    ///
    /// # Errors
    ///
    /// Returns an error if a measured time falls outside the simulated span.
    pub fn validate_bath(&self, measured: &MeasuredSeries) -> Result<Comparison, AlignError> {
        validation::compare(&self.bath_series_celsius(), measured)
    }

    /// Compares the simulated inner fluid history against a measured log.
    ///
    /// # Errors
    ///
    /// Returns an error if a measured time falls outside the simulated span.
    pub fn validate_inner(&self, measured: &MeasuredSeries) -> Result<Comparison, AlignError> {
        validation::compare(&self.inner_series_celsius(), measured)
    }
}

fn celsius(series: &[(Time, ThermodynamicTemperature)]) -> Vec<(Time, f64)> {
    series
        .iter()
        .map(|&(time, temperature)| (time, temperature.get::<degree_celsius>()))
        .collect()
}
