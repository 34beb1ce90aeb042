//! ESRI ASCII grid reader and writer.
//!
//! Scratch grids produced by the decoder travel through this format
//! before the engine operates on them. Nodata cells are written as the
//! configured marker value and come back as NaN; a genuine data value
//! equal to the marker cannot be represented.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::app::services::engine::raster::{Extent, Raster};
use crate::constants::ASC_NODATA;
use crate::error::{Error, Result};

/// Write a raster as an ESRI ASCII grid.
pub fn write(path: &Path, raster: &Raster) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    let extent = raster.extent();
    writeln!(out, "ncols {}", raster.cols())?;
    writeln!(out, "nrows {}", raster.rows())?;
    writeln!(out, "xllcorner {}", extent.x_min)?;
    writeln!(out, "yllcorner {}", extent.y_min)?;
    writeln!(out, "cellsize {}", raster.cell_size())?;
    writeln!(out, "NODATA_value {}", ASC_NODATA)?;

    for row in 0..raster.rows() {
        for col in 0..raster.cols() {
            if col > 0 {
                write!(out, " ")?;
            }
            let v = raster.value(row, col);
            if v.is_nan() {
                write!(out, "{}", ASC_NODATA)?;
            } else {
                write!(out, "{}", v)?;
            }
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

/// Read an ESRI ASCII grid into a raster.
pub fn read(path: &Path) -> Result<Raster> {
    let text = std::fs::read_to_string(path)?;
    let mut tokens = text.split_whitespace();

    let mut header_value = |name: &str| -> Result<f64> {
        let key = tokens
            .next()
            .ok_or_else(|| malformed(path, format!("missing {name} header")))?;
        if !key.eq_ignore_ascii_case(name) {
            return Err(malformed(path, format!("expected {name} header, got {key}")));
        }
        let value = tokens
            .next()
            .ok_or_else(|| malformed(path, format!("missing {name} value")))?;
        value
            .parse::<f64>()
            .map_err(|_| malformed(path, format!("invalid {name} value {value}")))
    };

    let ncols = header_value("ncols")? as usize;
    let nrows = header_value("nrows")? as usize;
    let xllcorner = header_value("xllcorner")?;
    let yllcorner = header_value("yllcorner")?;
    let cellsize = header_value("cellsize")?;
    let nodata = header_value("NODATA_value")?;

    if ncols == 0 || nrows == 0 {
        return Err(malformed(path, format!("empty grid {nrows}x{ncols}")));
    }

    let mut values = Vec::with_capacity(nrows * ncols);
    for token in tokens {
        let v: f64 = token
            .parse()
            .map_err(|_| malformed(path, format!("invalid cell value {token}")))?;
        values.push(if v == nodata { f64::NAN } else { v });
    }
    if values.len() != nrows * ncols {
        return Err(malformed(
            path,
            format!(
                "expected {} cell values, found {}",
                nrows * ncols,
                values.len()
            ),
        ));
    }

    let extent = Extent {
        x_min: xllcorner,
        x_max: xllcorner + ncols as f64 * cellsize,
        y_min: yllcorner,
        y_max: yllcorner + nrows as f64 * cellsize,
    };
    Raster::new(extent, cellsize, nrows, ncols, values)
}

fn malformed(path: &Path, detail: String) -> Error {
    Error::grid(format!("malformed ASCII grid {}: {detail}", path.display()))
}
