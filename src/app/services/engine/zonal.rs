//! Catchment footprint masking and zonal statistics.

use crate::app::services::engine::raster::Raster;
use crate::error::{Error, Result};

/// Restrict a raster to the footprint of a boundary raster.
///
/// The output lives on the boundary grid: cells where the boundary has
/// data take the source value at the cell centre, all other cells are
/// nodata. Boundary cells falling outside the source extent stay nodata,
/// they carry no rainfall information.
pub fn mask_to_footprint(src: &Raster, boundary: &Raster) -> Result<Raster> {
    let mut out = Raster::filled(
        boundary.extent(),
        boundary.cell_size(),
        boundary.rows(),
        boundary.cols(),
        f64::NAN,
    )?;

    for row in 0..boundary.rows() {
        for col in 0..boundary.cols() {
            if boundary.value(row, col).is_nan() {
                continue;
            }
            let x = boundary.x_center(col);
            let y = boundary.y_center(row);
            if let Some(value) = src.sample_nearest(x, y) {
                out.set(row, col, value);
            }
        }
    }
    Ok(out)
}

/// Arithmetic mean over the valid cells of a raster.
pub fn zonal_mean(raster: &Raster) -> Result<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &value in raster.values() {
        if !value.is_nan() {
            sum += value;
            count += 1;
        }
    }
    if count == 0 {
        return Err(Error::grid(
            "zonal mean undefined, no valid cells inside the mask",
        ));
    }
    Ok(sum / count as f64)
}
