//! Core data structures for catchment rainfall extraction.
//!
//! Defines the normalized snapshot timestamp, the per-snapshot rainfall
//! sample, and the read-only catchment descriptor shared by every
//! pipeline invocation.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::app::services::engine::asc;
use crate::app::services::engine::raster::{Extent, Raster};
use crate::error::{Error, Result};

/// One snapshot timestamp, always normalized (minute < 60, hour < 24).
///
/// Produced by the timeline rollover and immutable once emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeStep {
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
}

impl TimeStep {
    /// Canonical snapshot identifier, one-to-one with the timestamp.
    ///
    /// Used both to build the source filename and to label output rows,
    /// e.g. `20080225_2000`.
    pub fn snapshot_id(&self) -> String {
        format!(
            "{}_{:02}{:02}",
            self.date.format("%Y%m%d"),
            self.hour,
            self.minute
        )
    }

    /// Full path of the NIMROD composite file for this snapshot.
    pub fn source_path(&self, radar_dir: &Path, suffix: &str) -> PathBuf {
        radar_dir.join(format!("{}{}", self.snapshot_id(), suffix))
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.snapshot_id())
    }
}

/// Area-averaged rainfall for one successfully processed snapshot.
///
/// Ordering in the output table matches timeline emission order; never
/// mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallSample {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Mean rainfall rate over the catchment in mm/hr.
    pub mean_rate: f64,
}

impl RainfallSample {
    /// Build a sample from a timestamp and a corrected mean rate.
    pub fn new(step: &TimeStep, mean_rate: f64) -> Self {
        Self {
            year: step.date.year(),
            month: step.date.month(),
            day: step.date.day(),
            hour: step.hour,
            minute: step.minute,
            mean_rate,
        }
    }
}

/// Catchment boundary raster plus derived geometry.
///
/// Loaded once per run and read-only for the remainder of it.
#[derive(Debug, Clone)]
pub struct CatchmentDescriptor {
    pub name: String,
    /// Boundary raster; cells outside the catchment are nodata.
    pub boundary: Raster,
    /// Geographic extent of the boundary raster.
    pub extent: Extent,
    /// Native cell size of the boundary raster, the target resolution
    /// for resampling.
    pub cell_size: f64,
}

impl CatchmentDescriptor {
    /// Load the named boundary raster from a geodatabase directory.
    pub fn load(geodatabase: &Path, name: &str) -> Result<Self> {
        let path = geodatabase.join(format!("{name}.asc"));
        if !path.exists() {
            return Err(Error::CatchmentNotFound { path });
        }
        let boundary = asc::read(&path)?;
        let extent = boundary.extent();
        let cell_size = boundary.cell_size();
        Ok(Self {
            name: name.to_string(),
            boundary,
            extent,
            cell_size,
        })
    }
}
