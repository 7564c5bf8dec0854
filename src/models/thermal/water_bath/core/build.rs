use crate::support::network::resistance;
use crate::support::network::{Network, NetworkBuilder, NodeId, Saturation};

use super::error::ModelError;
use super::geometry;
use super::parameters::{self, Parameters};

/// Node handles of the assembled rig network.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Handles {
    pub bath: NodeId,
    pub inner: NodeId,
}

/// Reduces a parameter record to the rig's thermal network.
///
/// The network has two capacitive nodes, the bath and the inner fluid, and
/// two boundaries, the plate and the ambient air. Each heat path collapses
/// into one link.
pub(crate) fn assemble(parameters: &Parameters) -> Result<(Network, Handles), ModelError> {
    parameters::validate(parameters)?;
    let areas = geometry::areas(parameters);

    let mut builder = NetworkBuilder::new();

    let bath = builder.add_node(
        "bath fluid",
        parameters.bath_fluid.mass * parameters.bath_fluid.specific_heat,
        parameters.bath_fluid.initial_temperature,
    )?;
    let inner = builder.add_node(
        "inner fluid",
        parameters.inner_fluid.mass * parameters.inner_fluid.specific_heat,
        parameters.inner_fluid.initial_temperature,
    )?;

    if let Some(threshold) = parameters.bath_fluid.boiling_point {
        builder.set_saturation(bath, Saturation { threshold })?;
    }
    if let Some(threshold) = parameters.inner_fluid.boiling_point {
        builder.set_saturation(inner, Saturation { threshold })?;
    }
    builder.set_heat_input(bath, parameters.heating_power)?;

    let plate = builder.add_boundary("plate", parameters.plate_temperature)?;
    let ambient = builder.add_boundary("ambient", parameters.ambient_temperature)?;

    // Plate to bath: the contact patch, then conduction through the base.
    let plate_path = resistance::series([
        resistance::contact(parameters.transfer.plate_contact)?,
        resistance::conduction(
            parameters.vessel.wall_thickness,
            parameters.vessel.wall_conductivity,
            areas.plate,
        )?,
    ])?;
    builder.link(plate, bath, plate_path)?;

    // Bath to ambient: conduction through the side wall and its air film,
    // in parallel with the film over the free water surface.
    let through_side = resistance::series([
        resistance::conduction(
            parameters.vessel.wall_thickness,
            parameters.vessel.wall_conductivity,
            areas.vessel_side,
        )?,
        resistance::convection(parameters.transfer.air_coefficient, areas.vessel_side)?,
    ])?;
    let off_surface =
        resistance::convection(parameters.transfer.air_coefficient, areas.bath_surface)?;
    builder.link(
        bath,
        ambient,
        resistance::parallel([through_side, off_surface])?,
    )?;

    // Bath to inner fluid: conduction through the submerged can wall plus
    // the fitted contact allowance.
    let can_path = resistance::series([
        resistance::conduction(
            parameters.inner_vessel.wall_thickness,
            parameters.inner_vessel.wall_conductivity,
            areas.can_wetted,
        )?,
        resistance::contact(parameters.transfer.inner_contact)?,
    ])?;
    builder.link(bath, inner, can_path)?;

    // Inner fluid to ambient: the film over the exposed can top.
    builder.link(
        inner,
        ambient,
        resistance::convection(parameters.transfer.inner_film_coefficient, areas.can_top)?,
    )?;

    let network = builder.build()?;
    Ok((network, Handles { bath, inner }))
}
