//! A lumped-parameter thermal network engine.
//!
//! A network is a set of thermal masses (nodes) joined to each other and to
//! fixed-temperature boundaries by thermal resistances. Each node carries a
//! heat capacity; each link carries the total resistance of the physical path
//! it stands for, composed beforehand with [`resistance::series`] and
//! [`resistance::parallel`]. Integrating the per-node energy balance
//! `dT/dt = ΣQ / C` over time yields a [`Trajectory`] of temperatures at a
//! requested report grid.
//!
//! Networks are assembled with [`NetworkBuilder`], which validates every
//! quantity up front so a solve can only fail for numerical reasons, never
//! from a malformed configuration.
//!
//! # Example
//!
//! A fixed-temperature source warming one thermal mass that also leaks heat
//! to ambient:
//!
//! ```
//! use uom::si::f64::{HeatCapacity, ThermodynamicTemperature, Time};
//! use uom::si::heat_capacity::joule_per_kelvin;
//! use uom::si::thermodynamic_temperature::degree_celsius;
//! use uom::si::time::second;
//! use waterbath_models::support::network::{
//!     NetworkBuilder, SolveConfig, TimeGrid, resistance,
//! };
//! use waterbath_models::support::units::ThermalResistance;
//!
//! fn kelvin_per_watt(value: f64) -> ThermalResistance {
//!     resistance::from_kelvin_per_watt(value).unwrap()
//! }
//!
//! let mut builder = NetworkBuilder::new();
//! let mass = builder
//!     .add_node(
//!         "mass",
//!         HeatCapacity::new::<joule_per_kelvin>(1500.0),
//!         ThermodynamicTemperature::new::<degree_celsius>(20.0),
//!     )
//!     .unwrap();
//! let source = builder
//!     .add_boundary("source", ThermodynamicTemperature::new::<degree_celsius>(90.0))
//!     .unwrap();
//! let ambient = builder
//!     .add_boundary("ambient", ThermodynamicTemperature::new::<degree_celsius>(20.0))
//!     .unwrap();
//! builder.link(source, mass, kelvin_per_watt(0.5)).unwrap();
//! builder.link(mass, ambient, kelvin_per_watt(2.0)).unwrap();
//! let network = builder.build().unwrap();
//!
//! let grid = TimeGrid::uniform(Time::new::<second>(600.0), Time::new::<second>(120.0)).unwrap();
//! let trajectory = network.solve(&grid, &SolveConfig::default()).unwrap();
//!
//! let (_, final_sample) = trajectory.last().unwrap();
//! let final_temp = final_sample[0].get::<degree_celsius>();
//! assert!(final_temp > 20.0 && final_temp < 90.0);
//! ```

pub mod resistance;

mod builder;
mod energy_balance;
mod ode;
mod solve;
mod state;
mod time_grid;
mod trajectory;

use uom::si::f64::{
    HeatCapacity, Power, ThermalConductance, ThermodynamicTemperature,
};

pub use builder::{BuildError, NetworkBuilder};
pub use energy_balance::DerivativeError;
pub use ode::{NetworkModel, NetworkOde};
pub use solve::{SolveConfig, SolveError};
pub use state::{NetworkDerivatives, NetworkState, TemperatureRates, Temperatures};
pub use time_grid::{TimeGrid, TimeGridError};
pub use trajectory::{Trajectory, TrajectoryError};

/// Handle to a node created by a [`NetworkBuilder`].
///
/// Handles are only meaningful with the builder (and resulting [`Network`])
/// that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// Handle to a boundary created by a [`NetworkBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryId(usize);

/// One end of a thermal link: a node or a fixed-temperature boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Node(NodeId),
    Boundary(BoundaryId),
}

impl From<NodeId> for Endpoint {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<BoundaryId> for Endpoint {
    fn from(id: BoundaryId) -> Self {
        Self::Boundary(id)
    }
}

/// A phase-change plateau rule for one node.
///
/// While the node's temperature is at or above the threshold, its derivative
/// is forced to exactly zero. Heat still flows through the node to its
/// neighbours at the instantaneous temperatures; only the node's own rate of
/// change is overridden. The rule is a pure function of instantaneous state,
/// so every derivative evaluation applies it identically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation {
    /// Temperature at which the plateau engages (e.g., a boiling point).
    pub threshold: ThermodynamicTemperature,
}

impl Saturation {
    /// Returns whether the plateau is engaged at the given temperature.
    #[must_use]
    pub fn engaged(&self, temperature: ThermodynamicTemperature) -> bool {
        temperature >= self.threshold
    }
}

#[derive(Debug, Clone)]
struct Node {
    capacity: HeatCapacity,
    initial: ThermodynamicTemperature,
    saturation: Option<Saturation>,
    heat_input: Power,
}

#[derive(Debug, Clone)]
struct Boundary {
    temperature: ThermodynamicTemperature,
}

#[derive(Debug, Clone)]
struct Link {
    a: Endpoint,
    b: Endpoint,
    conductance: ThermalConductance,
}

/// An immutable thermal network, ready to solve.
///
/// Produced by [`NetworkBuilder::build`]. Structure and coefficients are
/// fixed; a solve owns its own state, so one network can back any number of
/// independent solves.
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    boundaries: Vec<Boundary>,
    links: Vec<Link>,
}

impl Network {
    /// Number of nodes in the network.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node temperatures the network was built with, in node order.
    #[must_use]
    pub fn initial_temperatures(&self) -> Vec<ThermodynamicTemperature> {
        self.nodes.iter().map(|node| node.initial).collect()
    }
}
