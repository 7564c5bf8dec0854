use std::convert::Infallible;

use twine_core::{DerivativeOf, Model, OdeProblem};
use uom::si::f64::Time;

use super::{
    DerivativeError, Network, NetworkDerivatives, NetworkState, TemperatureRates, Temperatures,
};

/// The network's energy balance as a Twine [`Model`].
///
/// Input is the instantaneous [`NetworkState`]; output is the
/// [`NetworkDerivatives`] at that state. The wrapper borrows its network, so
/// building one is free and any number can coexist.
#[derive(Debug, Clone)]
pub struct NetworkModel<'a> {
    network: &'a Network,
}

impl<'a> NetworkModel<'a> {
    /// Wraps a network for use with Twine solvers.
    #[must_use]
    pub fn new(network: &'a Network) -> Self {
        Self { network }
    }
}

impl Model for NetworkModel<'_> {
    type Input = NetworkState;
    type Output = NetworkDerivatives;
    type Error = DerivativeError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let rates = self.network.derivatives(&input.temperatures)?;
        Ok(NetworkDerivatives { rates })
    }
}

/// Pairs [`NetworkState`] with [`NetworkDerivatives`] for transient
/// integration: temperatures are the integrated quantity and the clock
/// advances with each step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkOde;

impl OdeProblem for NetworkOde {
    type Input = NetworkState;
    type Output = NetworkDerivatives;
    type Delta = Time;
    type State = Temperatures;
    type Error = Infallible;

    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error> {
        Ok(Temperatures(input.temperatures.clone()))
    }

    fn derivative(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error> {
        Ok(TemperatureRates(output.rates.clone()))
    }

    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(NetworkState {
            time: base.time + *delta,
            temperatures: state.0.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::network::{NetworkBuilder, resistance};

    use approx::assert_relative_eq;
    use twine_core::StepIntegrable;
    use uom::si::f64::{HeatCapacity, ThermodynamicTemperature};
    use uom::si::heat_capacity::joule_per_kelvin;
    use uom::si::thermodynamic_temperature::degree_celsius;
    use uom::si::time::second;

    fn two_node_network() -> Network {
        let mut builder = NetworkBuilder::new();
        let a = builder
            .add_node(
                "a",
                HeatCapacity::new::<joule_per_kelvin>(1000.0),
                ThermodynamicTemperature::new::<degree_celsius>(20.0),
            )
            .unwrap();
        let b = builder
            .add_node(
                "b",
                HeatCapacity::new::<joule_per_kelvin>(2000.0),
                ThermodynamicTemperature::new::<degree_celsius>(80.0),
            )
            .unwrap();
        builder
            .link(a, b, resistance::from_kelvin_per_watt(2.0).unwrap())
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn the_model_reports_the_balance_for_a_given_state() {
        let network = two_node_network();
        let model = NetworkModel::new(&network);

        let input = NetworkState {
            time: Time::new::<second>(0.0),
            temperatures: network.initial_temperatures(),
        };
        let output = model.call(&input).unwrap();

        // 30 W cross the link: the cool node warms, the warm node cools.
        assert_relative_eq!(output.rates[0].value, 0.03, max_relative = 1e-12);
        assert_relative_eq!(output.rates[1].value, -0.015, max_relative = 1e-12);
    }

    #[test]
    fn one_step_through_the_problem_advances_time_and_temperatures() {
        let network = two_node_network();
        let model = NetworkModel::new(&network);
        let problem = NetworkOde;

        let input = NetworkState {
            time: Time::new::<second>(0.0),
            temperatures: network.initial_temperatures(),
        };
        let output = model.call(&input).unwrap();

        let state = problem.state(&input).unwrap();
        let derivative = problem.derivative(&input, &output).unwrap();
        let delta = Time::new::<second>(10.0);
        let next = problem
            .build_input(&input, &state.step(derivative, delta), &delta)
            .unwrap();

        assert_relative_eq!(next.time.get::<second>(), 10.0);
        assert_relative_eq!(
            next.temperatures[0].get::<degree_celsius>(),
            20.3,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            next.temperatures[1].get::<degree_celsius>(),
            79.85,
            epsilon = 1e-9
        );
    }
}
