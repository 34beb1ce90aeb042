//! NIMROD file header parsing.
//!
//! The header is a single 512-byte Fortran record laid out as 31 general
//! integers (i16), 28 general reals (f32), 45 data-specific reals (f32),
//! 56 bytes of characters and 51 data-specific integers (i16), all
//! big-endian. Only the validity time and grid geometry fields are used
//! here.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::app::services::engine::raster::Extent;
use crate::error::{Error, Result};

/// Byte length of the header record.
pub const HEADER_LEN: usize = 512;

/// Offset of the general real entries within the header.
const GEN_REALS_OFFSET: usize = 62;

/// Grid geometry and validity time of one NIMROD composite.
///
/// `x_left` and `y_top` are the map coordinates of the centre of the
/// north-west cell, as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NimrodHeader {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub rows: usize,
    pub cols: usize,
    pub x_left: f64,
    pub y_top: f64,
    pub cell_size: f64,
}

impl NimrodHeader {
    /// Parse the 512-byte header record.
    pub fn parse(path: &Path, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != HEADER_LEN {
            return Err(Error::decode(
                path,
                format!("header record is {} bytes, expected {HEADER_LEN}", bytes.len()),
            ));
        }

        let gen_int = |ix: usize| -> i16 {
            let at = ix * 2;
            i16::from_be_bytes([bytes[at], bytes[at + 1]])
        };
        let gen_real = |ix: usize| -> f64 {
            let at = GEN_REALS_OFFSET + ix * 4;
            f32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]) as f64
        };

        let rows = gen_int(15);
        let cols = gen_int(16);
        if rows <= 0 || cols <= 0 {
            return Err(Error::decode(
                path,
                format!("header reports degenerate grid {rows}x{cols}"),
            ));
        }

        let y_top = gen_real(2);
        let y_cell = gen_real(3);
        let x_left = gen_real(4);
        let x_cell = gen_real(5);
        if x_cell <= 0.0 || y_cell <= 0.0 {
            return Err(Error::decode(
                path,
                format!("header reports non-positive cell size {x_cell}x{y_cell}"),
            ));
        }
        // The engine rasters are square-celled; every rain-rate composite is.
        if (x_cell - y_cell).abs() > 1e-3 * x_cell {
            return Err(Error::decode(
                path,
                format!("non-square cells unsupported ({x_cell}x{y_cell})"),
            ));
        }

        Ok(Self {
            year: gen_int(0) as i32,
            month: gen_int(1) as u32,
            day: gen_int(2) as u32,
            hour: gen_int(3) as u32,
            minute: gen_int(4) as u32,
            rows: rows as usize,
            cols: cols as usize,
            x_left,
            y_top,
            cell_size: x_cell,
        })
    }

    /// Outer edges of the full grid.
    ///
    /// The stored origin is a cell centre, so the edges sit half a cell
    /// beyond it.
    pub fn extent(&self) -> Extent {
        let half = self.cell_size / 2.0;
        Extent {
            x_min: self.x_left - half,
            x_max: self.x_left - half + self.cols as f64 * self.cell_size,
            y_min: self.y_top + half - self.rows as f64 * self.cell_size,
            y_max: self.y_top + half,
        }
    }

    /// Validity time of the composite, if the header fields form a real
    /// calendar instant.
    pub fn validity_time(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_opt(self.hour, self.minute, 0))
    }
}
