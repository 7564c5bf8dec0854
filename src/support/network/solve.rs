use thiserror::Error;
use twine_solvers::transient::euler;
use uom::ConstZero;
use uom::si::f64::{ThermodynamicTemperature, Time};
use uom::si::time::second;

use crate::support::constraint::{ConstraintError, StrictlyPositive};

use super::{Network, NetworkModel, NetworkOde, NetworkState, TimeGrid, Trajectory, TrajectoryError};

/// Integration settings for a transient solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveConfig {
    /// Internal integration step. Reporting interpolates onto the requested
    /// grid, so this can be chosen for accuracy alone.
    pub step: Time,
    /// Upper bound on internal steps for one solve. Spans that would need
    /// more fail up front instead of being cut short.
    pub max_steps: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            step: Time::new::<second>(1.0),
            max_steps: 2_000_000,
        }
    }
}

/// An error from a transient solve.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SolveError {
    #[error("initial state holds {actual} temperatures but the network has {expected} nodes")]
    InitialStateLength { expected: usize, actual: usize },
    #[error("integration step must be strictly positive")]
    StepSize(#[source] ConstraintError),
    #[error("solve needs {required} internal steps, over the budget of {max_steps}")]
    StepBudget { required: usize, max_steps: usize },
    #[error("integration failed")]
    Integration(#[from] euler::Error),
    #[error("sampling the trajectory onto the report grid failed")]
    Sampling(#[from] TrajectoryError),
}

impl Network {
    /// Integrates the network from its built initial temperatures, reporting
    /// at the grid's times.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is degenerate, the span needs
    /// more internal steps than the budget allows, or the state stops being
    /// finite mid-solve.
    pub fn solve(&self, grid: &TimeGrid, config: &SolveConfig) -> Result<Trajectory, SolveError> {
        self.solve_from(self.initial_temperatures(), grid, config)
    }

    /// Integrates the network from caller-supplied starting temperatures.
    ///
    /// Temperatures are in node order. Integration always starts at time
    /// zero and marches at `config.step` until the grid's final report time
    /// is covered; the dense result is then sampled onto the grid.
    ///
    /// # Errors
    ///
    /// As for [`solve`](Self::solve), plus a length mismatch between the
    /// starting temperatures and the network's nodes.
    pub fn solve_from(
        &self,
        initial: Vec<ThermodynamicTemperature>,
        grid: &TimeGrid,
        config: &SolveConfig,
    ) -> Result<Trajectory, SolveError> {
        if initial.len() != self.node_count() {
            return Err(SolveError::InitialStateLength {
                expected: self.node_count(),
                actual: initial.len(),
            });
        }
        let step = StrictlyPositive::new(config.step)
            .map_err(SolveError::StepSize)?
            .into_inner();

        // One step beyond the whole-number ratio, so accumulated time covers
        // the final report even when end/step rounds just under an integer.
        let required = (grid.end() / step).value.ceil() as usize + 1;
        if required > config.max_steps {
            return Err(SolveError::StepBudget {
                required,
                max_steps: config.max_steps,
            });
        }

        let model = NetworkModel::new(self);
        let initial_state = NetworkState {
            time: Time::ZERO,
            temperatures: initial,
        };
        let solution =
            euler::solve_unobserved(&model, &NetworkOde, initial_state, step, required)?;

        let times = solution
            .history
            .iter()
            .map(|snapshot| snapshot.input.time)
            .collect();
        let samples = solution
            .history
            .into_iter()
            .map(|snapshot| snapshot.input.temperatures)
            .collect();
        let dense = Trajectory::new(times, samples);

        Ok(dense.resample(grid)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::network::{NetworkBuilder, NodeId, Saturation, resistance};
    use crate::support::units::ThermalResistance;

    use approx::assert_relative_eq;
    use uom::si::f64::HeatCapacity;
    use uom::si::heat_capacity::joule_per_kelvin;
    use uom::si::thermodynamic_temperature::degree_celsius;

    fn capacity(value: f64) -> HeatCapacity {
        HeatCapacity::new::<joule_per_kelvin>(value)
    }

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    fn seconds(value: f64) -> Time {
        Time::new::<second>(value)
    }

    fn kelvin_per_watt(value: f64) -> ThermalResistance {
        resistance::from_kelvin_per_watt(value).unwrap()
    }

    /// One mass between a 130 °C source and 22 °C ambient, strongly coupled
    /// to the source. Steady state is the conductance-weighted mean,
    /// (130·50 + 22·0.2) / 50.2 ≈ 129.57 °C.
    fn heated_mass() -> Network {
        let mut builder = NetworkBuilder::new();
        let mass = builder.add_node("mass", capacity(1000.0), celsius(22.0)).unwrap();
        let source = builder.add_boundary("source", celsius(130.0)).unwrap();
        let ambient = builder.add_boundary("ambient", celsius(22.0)).unwrap();
        builder.link(source, mass, kelvin_per_watt(0.02)).unwrap();
        builder.link(mass, ambient, kelvin_per_watt(5.0)).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn a_heated_mass_rises_to_its_steady_state_without_overshoot() {
        let network = heated_mass();
        let grid = TimeGrid::uniform(seconds(3600.0), seconds(300.0)).unwrap();

        let trajectory = network.solve(&grid, &SolveConfig::default()).unwrap();
        let series = trajectory.series_celsius(NodeId(0)).unwrap();

        for window in series.windows(2) {
            assert!(window[1].1 >= window[0].1, "temperature must never fall");
        }
        for &(time, value) in &series[1..] {
            assert!(
                value > 22.0 && value < 130.0,
                "out of bounds at {}s: {value}",
                time.get::<second>()
            );
        }

        let expected = (130.0 * 50.0 + 22.0 * 0.2) / 50.2;
        let (_, final_sample) = trajectory.last().unwrap();
        assert_relative_eq!(
            final_sample[0].get::<degree_celsius>(),
            expected,
            max_relative = 1e-9
        );
    }

    #[test]
    fn the_steady_state_does_not_depend_on_where_the_solve_starts() {
        let network = heated_mass();
        let grid = TimeGrid::uniform(seconds(3600.0), seconds(3600.0)).unwrap();
        let config = SolveConfig::default();

        let from_cold = network.solve(&grid, &config).unwrap();
        let from_hot = network
            .solve_from(vec![celsius(95.0)], &grid, &config)
            .unwrap();

        let (_, cold_final) = from_cold.last().unwrap();
        let (_, hot_final) = from_hot.last().unwrap();
        assert_relative_eq!(
            cold_final[0].get::<degree_celsius>(),
            hot_final[0].get::<degree_celsius>(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn an_isolated_pair_conserves_energy_and_meets_in_the_middle() {
        let mut builder = NetworkBuilder::new();
        let hot = builder.add_node("hot", capacity(800.0), celsius(90.0)).unwrap();
        let cold = builder.add_node("cold", capacity(1200.0), celsius(10.0)).unwrap();
        builder.link(hot, cold, kelvin_per_watt(0.5)).unwrap();
        let network = builder.build().unwrap();

        let grid = TimeGrid::uniform(seconds(7200.0), seconds(600.0)).unwrap();
        let trajectory = network.solve(&grid, &SolveConfig::default()).unwrap();

        let energy = |sample: &[ThermodynamicTemperature]| {
            sample[0].value * 800.0 + sample[1].value * 1200.0
        };
        let (_, first) = trajectory.sample(0).unwrap();
        let initial_energy = energy(first);
        for index in 0..trajectory.len() {
            let (_, sample) = trajectory.sample(index).unwrap();
            let drift = (energy(sample) - initial_energy).abs() / initial_energy;
            assert!(drift < 1e-9, "energy drifted by {drift}");
        }

        // (800·90 + 1200·10) / 2000 = 42 °C, reached well within two hours.
        let (_, last) = trajectory.last().unwrap();
        assert_relative_eq!(last[0].get::<degree_celsius>(), 42.0, max_relative = 1e-9);
        assert_relative_eq!(last[1].get::<degree_celsius>(), 42.0, max_relative = 1e-9);
    }

    #[test]
    fn saturation_pins_a_node_at_its_threshold() {
        let mut builder = NetworkBuilder::new();
        let water = builder.add_node("water", capacity(500.0), celsius(20.0)).unwrap();
        let plate = builder.add_boundary("plate", celsius(130.0)).unwrap();
        builder.link(plate, water, kelvin_per_watt(0.1)).unwrap();
        builder
            .set_saturation(water, Saturation { threshold: celsius(100.0) })
            .unwrap();
        let network = builder.build().unwrap();

        let grid = TimeGrid::uniform(seconds(400.0), seconds(50.0)).unwrap();
        let trajectory = network.solve(&grid, &SolveConfig::default()).unwrap();
        let series = trajectory.series_celsius(NodeId(0)).unwrap();

        // The plateau may overshoot by at most one step's heating, which at
        // the default 1 s step is (130 - 100) / (0.1 · 500) ≈ 0.6 K.
        for &(_, value) in &series {
            assert!(value <= 100.61, "plateau exceeded: {value}");
        }

        let final_value = series[series.len() - 1].1;
        let previous_value = series[series.len() - 2].1;
        assert!(final_value >= 100.0, "plateau never reached: {final_value}");
        assert_eq!(final_value, previous_value, "plateau must hold exactly");
    }

    #[test]
    fn reports_land_exactly_on_the_requested_grid() {
        let network = heated_mass();
        let config = SolveConfig::default();

        let coarse = TimeGrid::uniform(seconds(100.0), seconds(50.0)).unwrap();
        let fine = TimeGrid::uniform(seconds(100.0), seconds(25.0)).unwrap();

        let on_coarse = network.solve(&coarse, &config).unwrap();
        let on_fine = network.solve(&fine, &config).unwrap();

        assert_eq!(on_coarse.times(), coarse.times());
        assert_eq!(on_fine.times(), fine.times());

        // The report grid only selects samples; at shared times the two
        // solves agree bit for bit.
        let (_, coarse_mid) = on_coarse.sample(1).unwrap();
        let (_, fine_mid) = on_fine.sample(2).unwrap();
        assert_eq!(coarse_mid[0], fine_mid[0]);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let network = heated_mass();
        let grid = TimeGrid::uniform(seconds(600.0), seconds(60.0)).unwrap();
        let config = SolveConfig::default();

        let first = network.solve(&grid, &config).unwrap();
        let repeat = network.solve(&grid, &config).unwrap();
        assert_eq!(first, repeat);
    }

    #[test]
    fn mismatched_starting_states_are_rejected() {
        let network = heated_mass();
        let grid = TimeGrid::uniform(seconds(100.0), seconds(50.0)).unwrap();

        let result = network.solve_from(
            vec![celsius(20.0), celsius(20.0)],
            &grid,
            &SolveConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SolveError::InitialStateLength { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn degenerate_steps_are_rejected() {
        let network = heated_mass();
        let grid = TimeGrid::uniform(seconds(100.0), seconds(50.0)).unwrap();

        let config = SolveConfig {
            step: seconds(0.0),
            ..SolveConfig::default()
        };
        assert!(matches!(
            network.solve(&grid, &config),
            Err(SolveError::StepSize(ConstraintError::Zero))
        ));
    }

    #[test]
    fn step_budgets_fail_fast_instead_of_truncating() {
        let network = heated_mass();
        let grid = TimeGrid::uniform(seconds(3600.0), seconds(300.0)).unwrap();

        let config = SolveConfig {
            max_steps: 10,
            ..SolveConfig::default()
        };
        assert!(matches!(
            network.solve(&grid, &config),
            Err(SolveError::StepBudget { required: 3601, max_steps: 10 })
        ));
    }

    #[test]
    fn a_diverging_integration_surfaces_as_a_solver_error() {
        // A 10^6 s step against a 20 s time constant makes explicit Euler
        // violently unstable; the state overflows and the solve must report
        // that rather than return garbage.
        let network = heated_mass();
        let grid = TimeGrid::uniform(seconds(2.0e8), seconds(1.0e6)).unwrap();

        let config = SolveConfig {
            step: seconds(1.0e6),
            ..SolveConfig::default()
        };
        assert!(matches!(
            network.solve(&grid, &config),
            Err(SolveError::Integration(_))
        ));
    }
}
