use twine_core::StepIntegrable;
use uom::si::f64::{ThermodynamicTemperature, Time};

use crate::support::units::TemperatureRate;

/// Instantaneous state of a network solve: the clock time and every node
/// temperature, in node order.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkState {
    pub time: Time,
    pub temperatures: Vec<ThermodynamicTemperature>,
}

/// Output of the network's energy balance: the temperature rate of every
/// node, in node order.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkDerivatives {
    pub rates: Vec<TemperatureRate>,
}

/// The integrated quantity of a transient solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Temperatures(pub Vec<ThermodynamicTemperature>);

/// The derivative of [`Temperatures`] with respect to time.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureRates(pub Vec<TemperatureRate>);

impl StepIntegrable<Time> for Temperatures {
    type Derivative = TemperatureRates;

    fn step(&self, derivative: Self::Derivative, delta: Time) -> Self {
        debug_assert_eq!(
            self.0.len(),
            derivative.0.len(),
            "temperature and rate vectors must have the same node count"
        );

        let next = self
            .0
            .iter()
            .zip(&derivative.0)
            .map(|(&temperature, &rate)| temperature + rate * delta)
            .collect();
        Self(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::f64::TemperatureInterval;
    use uom::si::temperature_interval::kelvin;
    use uom::si::thermodynamic_temperature::degree_celsius;
    use uom::si::time::second;

    fn rate(kelvin_per_second: f64) -> TemperatureRate {
        TemperatureInterval::new::<kelvin>(kelvin_per_second) / Time::new::<second>(1.0)
    }

    #[test]
    fn stepping_advances_each_node_by_its_own_rate() {
        let temperatures = Temperatures(vec![
            ThermodynamicTemperature::new::<degree_celsius>(20.0),
            ThermodynamicTemperature::new::<degree_celsius>(50.0),
        ]);
        let rates = TemperatureRates(vec![rate(0.1), rate(-0.05)]);

        let next = temperatures.step(rates, Time::new::<second>(30.0));

        assert_relative_eq!(next.0[0].get::<degree_celsius>(), 23.0, epsilon = 1e-12);
        assert_relative_eq!(next.0[1].get::<degree_celsius>(), 48.5, epsilon = 1e-12);
    }

    #[test]
    fn a_zero_rate_leaves_the_node_unchanged() {
        let temperatures = Temperatures(vec![ThermodynamicTemperature::new::<degree_celsius>(
            99.9,
        )]);
        let rates = TemperatureRates(vec![rate(0.0)]);

        let next = temperatures.step(rates, Time::new::<second>(3600.0));
        assert_eq!(next.0[0], temperatures.0[0]);
    }
}
