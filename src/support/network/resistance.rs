//! Construction and composition of thermal resistances.
//!
//! Every link in a network carries one total resistance, built here from the
//! physical mechanisms along the path:
//!
//! - [`conduction`] through a solid layer, `R = L / (k A)`
//! - [`convection`] across a fluid film, `R = 1 / (h A)`
//! - [`contact`] constants measured directly, used as-is
//!
//! Mechanisms along a single path combine with [`series`]; alternative paths
//! between the same pair of temperatures combine with [`parallel`]. All
//! inputs are checked once here, so composed values are always strictly
//! positive and finite math flows through the solver untouched.

use thiserror::Error;
use uom::si::f64::{Area, HeatTransfer, Length, Power, TemperatureInterval, ThermalConductivity};
use uom::si::power::watt;
use uom::si::temperature_interval::kelvin;

use crate::support::constraint::{ConstraintError, StrictlyPositive};
use crate::support::units::ThermalResistance;

/// An error encountered while constructing or composing a thermal resistance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResistanceError {
    #[error("layer thickness must be strictly positive")]
    Thickness(#[source] ConstraintError),
    #[error("thermal conductivity must be strictly positive")]
    Conductivity(#[source] ConstraintError),
    #[error("heat transfer area must be strictly positive")]
    Area(#[source] ConstraintError),
    #[error("film coefficient must be strictly positive")]
    Coefficient(#[source] ConstraintError),
    #[error("thermal resistance must be strictly positive")]
    Value(#[source] ConstraintError),
    #[error("combining resistances requires at least one")]
    Empty,
}

/// Resistance of conduction through a solid layer, `R = L / (k A)`.
///
/// # Errors
///
/// Returns an error if the thickness, conductivity, or area is not strictly
/// positive.
pub fn conduction(
    thickness: Length,
    conductivity: ThermalConductivity,
    area: Area,
) -> Result<ThermalResistance, ResistanceError> {
    let thickness = StrictlyPositive::new(thickness).map_err(ResistanceError::Thickness)?;
    let conductivity = StrictlyPositive::new(conductivity).map_err(ResistanceError::Conductivity)?;
    let area = StrictlyPositive::new(area).map_err(ResistanceError::Area)?;

    Ok(thickness.into_inner() / (conductivity.into_inner() * area.into_inner()))
}

/// Resistance of convection across a fluid film, `R = 1 / (h A)`.
///
/// # Errors
///
/// Returns an error if the film coefficient or area is not strictly positive.
pub fn convection(
    coefficient: HeatTransfer,
    area: Area,
) -> Result<ThermalResistance, ResistanceError> {
    let coefficient = StrictlyPositive::new(coefficient).map_err(ResistanceError::Coefficient)?;
    let area = StrictlyPositive::new(area).map_err(ResistanceError::Area)?;

    Ok((coefficient.into_inner() * area.into_inner()).recip())
}

/// A measured contact (or otherwise lumped) resistance, checked and passed
/// through unchanged.
///
/// # Errors
///
/// Returns an error if the resistance is not strictly positive.
pub fn contact(resistance: ThermalResistance) -> Result<ThermalResistance, ResistanceError> {
    let resistance = StrictlyPositive::new(resistance).map_err(ResistanceError::Value)?;
    Ok(resistance.into_inner())
}

/// A thermal resistance from its raw value in kelvin per watt.
///
/// # Errors
///
/// Returns an error if the value is not strictly positive.
pub fn from_kelvin_per_watt(value: f64) -> Result<ThermalResistance, ResistanceError> {
    let value = StrictlyPositive::new(value).map_err(ResistanceError::Value)?;
    Ok(TemperatureInterval::new::<kelvin>(value.into_inner()) / Power::new::<watt>(1.0))
}

/// Total resistance of mechanisms acting in series, `R = Σ Rᵢ`.
///
/// A single resistance passes through unchanged.
///
/// # Errors
///
/// Returns an error if the iterator is empty or any member is not strictly
/// positive.
pub fn series(
    resistances: impl IntoIterator<Item = ThermalResistance>,
) -> Result<ThermalResistance, ResistanceError> {
    let mut iter = resistances.into_iter();
    let first = iter.next().ok_or(ResistanceError::Empty)?;

    let mut total = StrictlyPositive::new(first).map_err(ResistanceError::Value)?;
    for resistance in iter {
        total = total + StrictlyPositive::new(resistance).map_err(ResistanceError::Value)?;
    }
    Ok(total.into_inner())
}

/// Total resistance of paths acting in parallel, `R = 1 / Σ (1 / Rᵢ)`.
///
/// A single resistance passes through unchanged.
///
/// # Errors
///
/// Returns an error if the iterator is empty or any member is not strictly
/// positive.
pub fn parallel(
    resistances: impl IntoIterator<Item = ThermalResistance>,
) -> Result<ThermalResistance, ResistanceError> {
    let mut iter = resistances.into_iter();
    let first = iter.next().ok_or(ResistanceError::Empty)?;

    let mut sum = StrictlyPositive::new(first)
        .map_err(ResistanceError::Value)?
        .into_inner()
        .recip();
    for resistance in iter {
        sum += StrictlyPositive::new(resistance)
            .map_err(ResistanceError::Value)?
            .into_inner()
            .recip();
    }
    Ok(sum.recip())
}
