use std::f64::consts::PI;

use uom::si::f64::Area;

use super::parameters::Parameters;

/// Heat transfer areas derived from the rig geometry.
///
/// The can stands on the bucket floor, so its side and base are wetted by
/// the bath while its top disc sees the air.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Areas {
    /// Bucket base on the hot plate.
    pub plate: Area,
    /// Bucket side wall, bath to air.
    pub vessel_side: Area,
    /// Free water surface, the annulus around the can.
    pub bath_surface: Area,
    /// Submerged can surface, side plus base.
    pub can_wetted: Area,
    /// Exposed can top disc.
    pub can_top: Area,
}

pub(crate) fn areas(parameters: &Parameters) -> Areas {
    let vessel = &parameters.vessel;
    let can = &parameters.inner_vessel;

    let plate = vessel.radius * vessel.radius * PI;
    let vessel_side = vessel.radius * vessel.height * (2.0 * PI);
    let can_disc = can.radius * can.radius * PI;
    let can_side = can.radius * can.height * (2.0 * PI);

    Areas {
        plate,
        vessel_side,
        bath_surface: plate - can_disc,
        can_wetted: can_side + can_disc,
        can_top: can_disc,
    }
}
