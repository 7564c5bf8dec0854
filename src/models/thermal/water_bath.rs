//! A heated water bath with a nested inner vessel.
//!
//! The rig is a bain-marie: a steel bucket of water stands on a
//! temperature-controlled hot plate, and a thin-walled can of a second fluid
//! stands inside the bucket. Heat moves along four paths, each reduced to a
//! single thermal resistance:
//!
//! - plate to bath, through the contact patch and the bucket base
//! - bath to ambient, through the side wall and off the free water surface
//! - bath to inner fluid, through the submerged can wall
//! - inner fluid to ambient, off the exposed can top
//!
//! Both fluids are lumped masses, so the rig becomes a two-node thermal
//! network solved by [`support::network`](crate::support::network). The
//! computational core is in the internal [`core`] module; [`WaterBath`] is
//! the [`twine_core::Model`] adapter over it.
//!
//! # Example
//!
//! ```
//! use uom::si::f64::Time;
//! use uom::si::time::second;
//! use waterbath_models::models::thermal::water_bath::{self, WaterBath};
//! use waterbath_models::support::network::{SolveConfig, TimeGrid};
//!
//! let rig = WaterBath::new(water_bath::reference_rig()).unwrap();
//! let grid =
//!     TimeGrid::uniform(Time::new::<second>(600.0), Time::new::<second>(60.0)).unwrap();
//! let solution = rig.solve(&grid, &SolveConfig::default()).unwrap();
//!
//! assert_eq!(solution.bath_series().len(), 11);
//! let (_, start) = solution.bath_series()[0];
//! let (_, end) = solution.bath_series()[10];
//! assert!(end > start);
//! ```

pub(crate) mod core;

pub use self::core::{
    Fluid, ModelError, ParameterError, Parameters, ReferenceMeasurements, Shell, Solution,
    Transfer, reference_measurements, reference_rig,
};

use twine_core::Model;
use uom::ConstZero;
use uom::si::f64::{Length, ThermodynamicTemperature, Time};

use crate::support::network::{
    DerivativeError, Network, NetworkDerivatives, NetworkModel, NetworkState, SolveConfig,
    TimeGrid,
};
use crate::support::sweep::{self, Sweep};

use self::core::Handles;

/// The assembled rig, ready to solve heating runs.
///
/// Construction validates the parameters and reduces the geometry to a
/// thermal network once; solves and sweeps then reuse the same network.
#[derive(Debug, Clone)]
pub struct WaterBath {
    parameters: Parameters,
    network: Network,
    handles: Handles,
}

impl WaterBath {
    /// Builds the rig network from a parameter record.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are non-physical or assemble into
    /// an invalid network.
    pub fn new(parameters: Parameters) -> Result<Self, ModelError> {
        let (network, handles) = core::assemble(&parameters)?;
        Ok(Self {
            parameters,
            network,
            handles,
        })
    }

    /// The parameters the rig was built from.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The underlying thermal network.
    #[must_use]
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The rig's state at the start of a heating run.
    #[must_use]
    pub fn initial_state(&self) -> NetworkState {
        NetworkState {
            time: Time::ZERO,
            temperatures: self.network.initial_temperatures(),
        }
    }

    /// Integrates a heating run, reporting at the grid's times.
    ///
    /// # Errors
    ///
    /// Returns an error if the solve configuration is degenerate or the
    /// integration fails.
    pub fn solve(&self, grid: &TimeGrid, config: &SolveConfig) -> Result<Solution, ModelError> {
        let trajectory = self.network.solve(grid, config)?;
        Ok(Solution::new(trajectory, self.handles)?)
    }
}

/// The rig's energy balance at an instantaneous state.
///
/// This is the same balance [`solve`](WaterBath::solve) integrates,
/// exposed so the rig composes with other Twine models and solvers.
impl Model for WaterBath {
    type Input = NetworkState;
    type Output = NetworkDerivatives;
    type Error = DerivativeError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        NetworkModel::new(&self.network).call(input)
    }
}

/// Solves the rig once per bucket wall thickness, each run from a cold
/// start.
///
/// Outcomes come back in input order. A thickness that fails to build or
/// solve carries its error; the remaining points are unaffected.
pub fn sweep_wall_thickness(
    base: &Parameters,
    thicknesses: impl IntoIterator<Item = Length>,
    grid: &TimeGrid,
    config: &SolveConfig,
) -> Sweep<Length, Solution, ModelError> {
    sweep::run_unobserved(thicknesses, |&thickness| {
        let mut parameters = *base;
        parameters.vessel.wall_thickness = thickness;
        WaterBath::new(parameters)?.solve(grid, config)
    })
}

/// Solves the rig once per plate temperature, each run from a cold start.
///
/// Outcomes come back in input order, failures tagged per point as in
/// [`sweep_wall_thickness`].
pub fn sweep_plate_temperature(
    base: &Parameters,
    plate_temperatures: impl IntoIterator<Item = ThermodynamicTemperature>,
    grid: &TimeGrid,
    config: &SolveConfig,
) -> Sweep<ThermodynamicTemperature, Solution, ModelError> {
    sweep::run_unobserved(plate_temperatures, |&plate_temperature| {
        let mut parameters = *base;
        parameters.plate_temperature = plate_temperature;
        WaterBath::new(parameters)?.solve(grid, config)
    })
}
