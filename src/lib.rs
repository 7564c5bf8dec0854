//! # Water Bath Models
//!
//! Lumped-parameter thermal models of a heated water bath rig for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! The rig is a liquid-filled vessel sitting on a heating plate, with a
//! smaller sealed container of a second liquid standing inside the bath.
//! This crate models it as a network of thermal masses joined by conductive,
//! convective, and contact resistances, integrates the resulting ODEs over
//! time, sweeps physical parameters, and compares predictions against
//! measured temperature series.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models, including the thermal
//!   network engine itself.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code in this crate follows a natural progression as needs emerge:
//!
//! 1. **Model-specific**: Starts in a model's internal `core` module
//! 2. **Domain-specific**: If useful across models in a domain (e.g., `thermal`),
//!    it moves to a domain-level support module
//! 3. **Crate-level**: If useful across multiple domains or potentially useful
//!    outside this crate, it moves to [`support`]
//! 4. **Standalone**: If broadly useful and stable, it may become its own crate
//!    (and be removed from here in a future release)
//!
//! Note: Only utilities at the crate-level (in [`support`]) are part of the public API.
//! Model-specific and domain-specific utility code remains private.

pub mod models;
pub mod support;
