//! In-memory grid engine for catchment rainfall extraction.
//!
//! Provides the geoprocessing operations the reduction pipeline delegates
//! to, on square-celled geographic rasters held in memory:
//! - [`raster`] - The raster grid type and its extent geometry
//! - [`asc`] - ESRI ASCII grid scratch file reader and writer
//! - [`lease`] - Exclusive workspace acquisition and scratch cleanup
//! - [`resample`] - Cubic and nearest-neighbour upsampling
//! - [`zonal`] - Catchment footprint masking and zonal statistics
//!
//! The engine is stateful per workspace: scratch grids share fixed names
//! across iterations, so a workspace admits exactly one extraction at a
//! time, enforced by [`lease::EngineLease`].

pub mod asc;
pub mod lease;
pub mod raster;
pub mod resample;
pub mod zonal;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use lease::{EngineLease, ScratchGuard};
pub use raster::{Extent, Raster};
pub use resample::ResampleMethod;
