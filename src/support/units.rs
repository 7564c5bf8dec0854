//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical units (e.g., temperature, power,
//! heat capacity). This module provides extensions that are useful for
//! modeling but aren't included in [`uom`].
//!
//! ## Thermal resistance
//!
//! [`uom`] names the conductance side of the analogy ([`ThermalConductance`],
//! W/K) but not its reciprocal. The [`ThermalResistance`] alias (K/W) fills
//! that gap so resistor-ladder arithmetic reads the way it is written in
//! heat transfer texts.
//!
//! [`ThermalConductance`]: uom::si::f64::ThermalConductance
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait provides a [`minus`](TemperatureDifference::minus) method
//! for subtracting one absolute temperature from another to get a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::degree_celsius;
//! use waterbath_models::support::units::TemperatureDifference;
//!
//! let plate = ThermodynamicTemperature::new::<degree_celsius>(130.0);
//! let bath = ThermodynamicTemperature::new::<degree_celsius>(22.9);
//! let delta_t = plate.minus(bath);
//! // delta_t is a TemperatureInterval, not a ThermodynamicTemperature
//! ```
//!
//! This extension trait is currently needed due to limitations in [`uom`].
//! See [`TemperatureDifference`] for details.

mod quantities;
mod temperature_difference;

pub use quantities::{TemperatureRate, ThermalResistance};
pub use temperature_difference::TemperatureDifference;
