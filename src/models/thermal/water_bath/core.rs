//! Computational core of the water bath rig.
//!
//! Everything here works in plain network terms. Parameter validation,
//! geometry, and assembly reduce a [`Parameters`] record to the two-node
//! thermal network the parent module solves; [`Solution`] and the reference
//! measurements cover the output side.

mod build;
mod error;
mod geometry;
mod measurements;
mod parameters;
mod solution;

pub use error::ModelError;
pub use measurements::{ReferenceMeasurements, reference_measurements};
pub use parameters::{Fluid, ParameterError, Parameters, Shell, Transfer, reference_rig};
pub use solution::Solution;

pub(crate) use build::{Handles, assemble};
