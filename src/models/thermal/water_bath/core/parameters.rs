use num_traits::Zero;
use thiserror::Error;
use uom::ConstZero;
use uom::si::f64::{
    HeatTransfer, Length, Mass, Power, SpecificHeatCapacity, TemperatureInterval,
    ThermalConductivity, ThermodynamicTemperature,
};
use uom::si::heat_transfer::watt_per_square_meter_kelvin;
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::power::watt;
use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
use uom::si::temperature_interval::kelvin;
use uom::si::thermal_conductivity::watt_per_meter_kelvin;
use uom::si::thermodynamic_temperature::degree_celsius;

use crate::support::constraint::{ConstraintError, StrictlyPositive};
use crate::support::units::ThermalResistance;

/// A parameter is outside the range the rig can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParameterError {
    #[error("`{name}` must be strictly positive")]
    Quantity {
        name: &'static str,
        #[source]
        source: ConstraintError,
    },
    #[error("the inner vessel must be narrower than the bath vessel")]
    InnerVesselTooWide,
    #[error("the inner vessel must not be taller than the bath vessel")]
    InnerVesselTooTall,
}

/// A cylindrical vessel wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shell {
    pub radius: Length,
    pub height: Length,
    pub wall_thickness: Length,
    pub wall_conductivity: ThermalConductivity,
}

/// A lumped fluid charge inside a vessel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fluid {
    pub mass: Mass,
    pub specific_heat: SpecificHeatCapacity,
    pub initial_temperature: ThermodynamicTemperature,
    /// Saturation temperature, if the fluid can boil within the run.
    ///
    /// Once the fluid reaches this temperature it holds there; further net
    /// heat goes into phase change rather than temperature rise.
    pub boiling_point: Option<ThermodynamicTemperature>,
}

/// Film and contact allowances for the rig's heat paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    /// Film coefficient on every surface the ambient air touches.
    pub air_coefficient: HeatTransfer,
    /// Film coefficient over the inner fluid's exposed top surface.
    pub inner_film_coefficient: HeatTransfer,
    /// Measured contact allowance between the hot plate and the bath vessel.
    pub plate_contact: ThermalResistance,
    /// Measured contact allowance of the submerged can path.
    pub inner_contact: ThermalResistance,
}

/// Everything needed to assemble the rig.
///
/// The record is plain data and [`Copy`], so sweeps can stamp out variants
/// by mutating a field at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    /// The bucket sitting on the hot plate.
    pub vessel: Shell,
    /// The can standing inside the bucket.
    pub inner_vessel: Shell,
    /// The water charge around the can.
    pub bath_fluid: Fluid,
    /// The fluid charge inside the can.
    pub inner_fluid: Fluid,
    pub transfer: Transfer,
    /// Controlled temperature of the hot plate surface.
    pub plate_temperature: ThermodynamicTemperature,
    pub ambient_temperature: ThermodynamicTemperature,
    /// Extra heat delivered straight into the bath, for powered variants.
    pub heating_power: Power,
}

/// The bench rig the reference measurements were logged on.
///
/// A 3.3 kg water bath in a stainless bucket on a 130 °C plate, with a
/// 232 g charge in an aluminum can standing inside. Contact allowances come
/// from fitting the logged run.
#[must_use]
pub fn reference_rig() -> Parameters {
    Parameters {
        vessel: Shell {
            radius: Length::new::<meter>(89.35e-3),
            height: Length::new::<meter>(12.4e-2),
            wall_thickness: Length::new::<meter>(0.91e-3),
            wall_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(16.2),
        },
        inner_vessel: Shell {
            radius: Length::new::<meter>(33.06e-3),
            height: Length::new::<meter>(6.69e-2),
            wall_thickness: Length::new::<meter>(0.68e-3),
            wall_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(226.0),
        },
        bath_fluid: Fluid {
            mass: Mass::new::<kilogram>(3.331),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4186.0),
            initial_temperature: ThermodynamicTemperature::new::<degree_celsius>(22.9),
            boiling_point: Some(ThermodynamicTemperature::new::<degree_celsius>(100.0)),
        },
        inner_fluid: Fluid {
            mass: Mass::new::<kilogram>(0.232),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(3500.0),
            initial_temperature: ThermodynamicTemperature::new::<degree_celsius>(22.1),
            boiling_point: None,
        },
        transfer: Transfer {
            air_coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(10.0),
            inner_film_coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(6.0),
            plate_contact: kelvin_per_watt(0.95),
            inner_contact: kelvin_per_watt(1.25),
        },
        plate_temperature: ThermodynamicTemperature::new::<degree_celsius>(130.0),
        ambient_temperature: ThermodynamicTemperature::new::<degree_celsius>(22.1),
        heating_power: Power::ZERO,
    }
}

fn kelvin_per_watt(value: f64) -> ThermalResistance {
    TemperatureInterval::new::<kelvin>(value) / Power::new::<watt>(1.0)
}

/// Rejects parameters no physical rig could have.
///
/// Signs and geometry are checked here because they vanish downstream; a
/// negative radius squares into a plausible area. Temperatures, contact
/// resistances, and heating power are validated where they are used, by the
/// network builder and the resistance constructors.
pub(crate) fn validate(parameters: &Parameters) -> Result<(), ParameterError> {
    positive("vessel radius", parameters.vessel.radius)?;
    positive("vessel height", parameters.vessel.height)?;
    positive("vessel wall thickness", parameters.vessel.wall_thickness)?;
    positive("vessel wall conductivity", parameters.vessel.wall_conductivity)?;
    positive("inner vessel radius", parameters.inner_vessel.radius)?;
    positive("inner vessel height", parameters.inner_vessel.height)?;
    positive(
        "inner vessel wall thickness",
        parameters.inner_vessel.wall_thickness,
    )?;
    positive(
        "inner vessel wall conductivity",
        parameters.inner_vessel.wall_conductivity,
    )?;
    positive("bath fluid mass", parameters.bath_fluid.mass)?;
    positive("bath fluid specific heat", parameters.bath_fluid.specific_heat)?;
    positive("inner fluid mass", parameters.inner_fluid.mass)?;
    positive(
        "inner fluid specific heat",
        parameters.inner_fluid.specific_heat,
    )?;
    positive("air film coefficient", parameters.transfer.air_coefficient)?;
    positive(
        "inner film coefficient",
        parameters.transfer.inner_film_coefficient,
    )?;

    if parameters.inner_vessel.radius >= parameters.vessel.radius {
        return Err(ParameterError::InnerVesselTooWide);
    }
    if parameters.inner_vessel.height > parameters.vessel.height {
        return Err(ParameterError::InnerVesselTooTall);
    }

    Ok(())
}

fn positive<T>(name: &'static str, value: T) -> Result<(), ParameterError>
where
    T: PartialOrd + Zero,
{
    match StrictlyPositive::new(value) {
        Ok(_) => Ok(()),
        Err(source) => Err(ParameterError::Quantity { name, source }),
    }
}
