//! Windowed decoding of NIMROD composite files.
//!
//! A composite is a sequence of big-endian Fortran records, each framed
//! by a u32 byte count: the 512-byte header, then the data array of
//! `rows * cols` i16 values, row-major from the north-west corner.
//! Decoding extracts only the window the catchment needs, padded by one
//! native cell on each side so later upsampling is not starved of
//! neighbours at the catchment edge.

use std::path::Path;

use tracing::debug;

use crate::app::services::engine::raster::{Extent, Raster};
use crate::app::services::nimrod::header::NimrodHeader;
use crate::error::{Error, Result};

/// Decode the part of a composite covering `window`.
///
/// The window is grown by one native cell on every side, then clamped to
/// the grid. Raw values are returned unscaled (mm/hr x 32); negative
/// values mark cells without a radar measurement and decode to nodata.
pub fn decode(path: &Path, window: Extent) -> Result<Raster> {
    let bytes = std::fs::read(path).map_err(|e| Error::decode(path, e.to_string()))?;
    let mut pos = 0usize;

    let header_bytes = record(path, &bytes, &mut pos, "header")?;
    let header = NimrodHeader::parse(path, header_bytes)?;
    let data_bytes = record(path, &bytes, &mut pos, "data")?;

    let expected = header.rows * header.cols * 2;
    if data_bytes.len() != expected {
        return Err(Error::decode(
            path,
            format!(
                "data record is {} bytes, expected {expected} for a {}x{} grid",
                data_bytes.len(),
                header.rows,
                header.cols
            ),
        ));
    }

    let cell = header.cell_size;
    let grid = header.extent();
    let padded = window.pad(cell);
    if padded.x_max <= grid.x_min
        || padded.x_min >= grid.x_max
        || padded.y_max <= grid.y_min
        || padded.y_min >= grid.y_max
    {
        return Err(Error::decode(
            path,
            format!("requested window lies outside the {}x{} grid", header.rows, header.cols),
        ));
    }

    // Index range of cells overlapping the padded window, clamped to the
    // grid.
    let col_first = (((padded.x_min - grid.x_min) / cell).floor().max(0.0)) as usize;
    let col_last =
        ((((padded.x_max - grid.x_min) / cell).ceil() as usize).max(col_first + 1) - 1)
            .min(header.cols - 1);
    let row_first = (((grid.y_max - padded.y_max) / cell).floor().max(0.0)) as usize;
    let row_last =
        ((((grid.y_max - padded.y_min) / cell).ceil() as usize).max(row_first + 1) - 1)
            .min(header.rows - 1);

    let out_rows = row_last - row_first + 1;
    let out_cols = col_last - col_first + 1;
    let mut values = Vec::with_capacity(out_rows * out_cols);
    for row in row_first..=row_last {
        for col in col_first..=col_last {
            let at = (row * header.cols + col) * 2;
            let raw = i16::from_be_bytes([data_bytes[at], data_bytes[at + 1]]);
            values.push(if raw < 0 { f64::NAN } else { raw as f64 });
        }
    }

    let out_extent = Extent {
        x_min: grid.x_min + col_first as f64 * cell,
        x_max: grid.x_min + (col_last + 1) as f64 * cell,
        y_min: grid.y_max - (row_last + 1) as f64 * cell,
        y_max: grid.y_max - row_first as f64 * cell,
    };

    if let Some(valid) = header.validity_time() {
        debug!(
            "Decoded {}: {}x{} window of {}x{} grid, valid {}",
            path.display(),
            out_rows,
            out_cols,
            header.rows,
            header.cols,
            valid
        );
    }

    Raster::new(out_extent, cell, out_rows, out_cols, values)
}

/// Pull the next Fortran record off the byte stream.
///
/// Checks that the leading and trailing byte counts agree; a mismatch
/// means a truncated or foreign file.
fn record<'a>(path: &Path, bytes: &'a [u8], pos: &mut usize, what: &str) -> Result<&'a [u8]> {
    let len = read_marker(path, bytes, pos, what)?;
    if bytes.len() < *pos + len {
        return Err(Error::decode(
            path,
            format!("file truncated inside {what} record"),
        ));
    }
    let body = &bytes[*pos..*pos + len];
    *pos += len;

    let trailer = read_marker(path, bytes, pos, what)?;
    if trailer != len {
        return Err(Error::decode(
            path,
            format!("{what} record trailer {trailer} does not match length {len}"),
        ));
    }
    Ok(body)
}

fn read_marker(path: &Path, bytes: &[u8], pos: &mut usize, what: &str) -> Result<usize> {
    let Some(raw) = bytes.get(*pos..*pos + 4) else {
        return Err(Error::decode(
            path,
            format!("file truncated at {what} record marker"),
        ));
    };
    *pos += 4;
    Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize)
}
