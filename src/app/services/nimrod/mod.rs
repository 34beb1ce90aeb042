//! NIMROD composite file decoding.
//!
//! Reads the UK Met Office NIMROD binary format and produces a
//! georeferenced raster windowed to the area the extraction needs:
//! - [`header`] - The 512-byte header record and grid geometry
//! - [`decoder`] - Windowed extraction of the i16 data array
//!
//! Decoded values keep the raw encoding (mm/hr x 32); the reduction
//! pipeline applies the unit correction after zonal statistics.

pub mod decoder;
pub mod header;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use decoder::decode;
pub use header::NimrodHeader;
