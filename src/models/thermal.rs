//! Thermal systems models.
//!
//! This module contains models for thermal systems. Its first resident is the
//! heated water bath rig; related lumped-capacitance components belong here
//! as they are added.

pub mod water_bath;
