use uom::si::f64::Time;
use uom::si::time::second;

use crate::support::validation::MeasuredSeries;

/// Thermocouple logs from the reference rig's heating run.
///
/// Both fluids were sampled every five minutes for 135 minutes, 28 points
/// per channel, starting the moment the bucket was set on the plate.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMeasurements {
    /// Bath water temperature, degrees Celsius.
    pub bath: MeasuredSeries,
    /// Inner fluid temperature, degrees Celsius.
    pub inner: MeasuredSeries,
}

const SAMPLE_PERIOD_SECONDS: f64 = 300.0;

const BATH_CELSIUS: [f64; 28] = [
    22.9, 25.8, 28.1, 30.6, 33.1, 34.9, 37.0, 38.7, 40.4, 42.2, 43.8, 45.3, 46.4, 47.9, 49.0,
    50.2, 51.3, 52.3, 52.9, 54.0, 54.8, 55.5, 56.3, 56.9, 57.4, 58.1, 58.5, 58.9,
];

const INNER_CELSIUS: [f64; 28] = [
    22.7, 23.0, 23.8, 25.0, 26.6, 28.3, 30.1, 31.8, 33.5, 35.4, 36.8, 38.4, 40.1, 41.5, 42.8,
    44.1, 45.7, 46.6, 47.8, 48.8, 49.8, 50.7, 51.5, 52.2, 52.9, 53.6, 54.2, 54.4,
];

/// The logged run the reference rig is validated against.
#[must_use]
pub fn reference_measurements() -> ReferenceMeasurements {
    let times: Vec<Time> = (0..BATH_CELSIUS.len())
        .map(|i| Time::new::<second>(SAMPLE_PERIOD_SECONDS * i as f64))
        .collect();

    ReferenceMeasurements {
        bath: MeasuredSeries::new_unchecked(times.clone(), BATH_CELSIUS.to_vec()),
        inner: MeasuredSeries::new_unchecked(times, INNER_CELSIUS.to_vec()),
    }
}
