//! Application constants for NIMROD processor
//!
//! Fixed values of the NIMROD encoding, the output table layout and the
//! workspace scratch naming used throughout the application.

// =============================================================================
// NIMROD Encoding
// =============================================================================

/// NIMROD rain-rate composites encode mm/hr multiplied by this factor.
///
/// Decoded grid values must be divided by it to recover physical units.
pub const NIMROD_SCALE_FACTOR: f64 = 32.0;

/// Default filename suffix of NIMROD composite files, appended to the
/// snapshot identifier to form the full source filename.
pub const DEFAULT_RADAR_SUFFIX: &str = "_nimrod_ng_radar_rainrate_composite_1km_merged_UK_zip";

// =============================================================================
// Output Table
// =============================================================================

/// Column headings of the output time-series table.
pub const CSV_HEADER: &str = "Year, Month, Date, Hour, Minute, Rainfall (mm/hr)";

// =============================================================================
// Workspace Scratch Files
// =============================================================================

/// Fixed name of the per-snapshot decoded scratch grid.
///
/// The name is reused across iterations, so a workspace supports exactly
/// one extraction at a time. Exclusivity is enforced by the engine lease.
pub const SCRATCH_GRID_NAME: &str = "rain_decoded.asc";

/// Lock file guarding exclusive use of a workspace.
pub const LEASE_LOCK_NAME: &str = ".nimrod_processor.lock";

/// Nodata marker written to scratch ASCII grids.
pub const ASC_NODATA: f64 = -9999.0;

/// Default config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "nimrod.toml";
