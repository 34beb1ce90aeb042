//! Per-snapshot raster reduction pipeline.
//!
//! Turns one NIMROD composite into one area-averaged rainfall rate for
//! the catchment: decode a window around the catchment, round-trip it
//! through the scratch ASCII grid, upsample to the catchment cell size,
//! mask to the boundary footprint, take the zonal mean and correct for
//! the NIMROD encoding factor. The scratch grid uses a fixed name inside
//! the leased workspace and is removed on every exit path.

use std::path::Path;

use crate::app::models::CatchmentDescriptor;
use crate::app::services::engine::lease::{EngineLease, ScratchGuard};
use crate::app::services::engine::resample::{ResampleMethod, resample};
use crate::app::services::engine::{asc, zonal};
use crate::app::services::nimrod;
use crate::constants::{NIMROD_SCALE_FACTOR, SCRATCH_GRID_NAME};
use crate::error::Result;

/// Reduce one composite file to the catchment mean rainfall in mm/hr.
///
/// Any decode or grid failure is returned to the caller, which skips the
/// snapshot; the scratch grid is cleaned up either way.
pub fn reduce_snapshot(
    source: &Path,
    catchment: &CatchmentDescriptor,
    lease: &EngineLease,
    method: ResampleMethod,
) -> Result<f64> {
    let decoded = nimrod::decode(source, catchment.extent)?;

    // Round-trip through the scratch grid, the engine's on-disk exchange
    // format. The guard removes it even when a later step fails.
    let scratch = ScratchGuard::new(lease.scratch_path(SCRATCH_GRID_NAME));
    asc::write(scratch.path(), &decoded)?;
    let rain = asc::read(scratch.path())?;

    let resampled = resample(&rain, catchment.cell_size, method)?;
    let masked = zonal::mask_to_footprint(&resampled, &catchment.boundary)?;
    let mean = zonal::zonal_mean(&masked)?;

    Ok(mean / NIMROD_SCALE_FACTOR)
}
