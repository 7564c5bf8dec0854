//! Supporting utilities used by models.
//!
//! These modules are model-building tools rather than models themselves:
//!
//! - [`constraint`]: Type-level numeric constraints for validated inputs.
//! - [`network`]: The lumped thermal network engine (assembly, energy
//!   balance, transient integration).
//! - [`sweep`]: A driver for re-solving a problem across an ordered set of
//!   parameter values.
//! - [`units`]: Extensions to [`uom`].
//! - [`validation`]: Comparison of simulated series against measured data.
//!
//! See the crate-level documentation for how utility code migrates between
//! model-specific, domain-specific, and crate-level homes.

pub mod constraint;
pub mod network;
pub mod sweep;
pub mod units;
pub mod validation;
