//! Geographic raster grid with square cells.
//!
//! Values are stored row-major starting at the north-west corner, rows
//! running north to south. Nodata cells are NaN.

use crate::error::{Error, Result};

/// Outer edges of a raster in projected map coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Grow the extent by `margin` on every side.
    pub fn pad(&self, margin: f64) -> Extent {
        Extent {
            x_min: self.x_min - margin,
            x_max: self.x_max + margin,
            y_min: self.y_min - margin,
            y_max: self.y_max + margin,
        }
    }

    /// True when the point lies inside the extent, edges included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// A square-celled raster grid over a geographic extent.
#[derive(Debug, Clone)]
pub struct Raster {
    rows: usize,
    cols: usize,
    extent: Extent,
    cell_size: f64,
    values: Vec<f64>,
}

impl Raster {
    /// Build a raster from row-major values.
    pub fn new(
        extent: Extent,
        cell_size: f64,
        rows: usize,
        cols: usize,
        values: Vec<f64>,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::grid("raster must have at least one cell"));
        }
        if cell_size <= 0.0 {
            return Err(Error::grid(format!(
                "cell size must be positive, got {cell_size}"
            )));
        }
        if values.len() != rows * cols {
            return Err(Error::grid(format!(
                "raster shape {rows}x{cols} does not match {} values",
                values.len()
            )));
        }
        Ok(Self {
            rows,
            cols,
            extent,
            cell_size,
            values,
        })
    }

    /// Build a raster with every cell set to `value`.
    pub fn filled(
        extent: Extent,
        cell_size: f64,
        rows: usize,
        cols: usize,
        value: f64,
    ) -> Result<Self> {
        Self::new(extent, cell_size, rows, cols, vec![value; rows * cols])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at a grid position. Row 0 is the northernmost row.
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.cols + col] = value;
    }

    /// Map x coordinate of a cell centre.
    pub fn x_center(&self, col: usize) -> f64 {
        self.extent.x_min + (col as f64 + 0.5) * self.cell_size
    }

    /// Map y coordinate of a cell centre.
    pub fn y_center(&self, row: usize) -> f64 {
        self.extent.y_max - (row as f64 + 0.5) * self.cell_size
    }

    /// Cell indices containing a map point, if it lies inside the extent.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !self.extent.contains(x, y) {
            return None;
        }
        let col = ((x - self.extent.x_min) / self.cell_size) as usize;
        let row = ((self.extent.y_max - y) / self.cell_size) as usize;
        // Points on the east or south edge land one past the last cell.
        Some((row.min(self.rows - 1), col.min(self.cols - 1)))
    }

    /// Value at the cell containing a map point, None outside the extent.
    pub fn sample_nearest(&self, x: f64, y: f64) -> Option<f64> {
        self.cell_at(x, y).map(|(row, col)| self.value(row, col))
    }
}
