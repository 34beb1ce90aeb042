//! Configuration management and validation.
//!
//! An extraction run is described by an immutable [`RunConfig`] loaded
//! from a TOML file and validated before any work starts. Command-line
//! flags may override the workspace and resample method after loading.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::app::services::engine::resample::ResampleMethod;
use crate::constants::DEFAULT_RADAR_SUFFIX;
use crate::error::{Error, Result};

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Catchment identity and location.
    pub catchment: CatchmentConfig,

    /// Snapshot timing parameters.
    pub timing: TimingConfig,

    /// Source file location and naming.
    pub source: SourceConfig,

    /// Workspace and resampling settings.
    #[serde(default)]
    pub processing: ProcessingConfig,
}

/// Catchment identity and location.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatchmentConfig {
    /// Name of the catchment boundary raster, also used to name the
    /// output table.
    pub name: String,

    /// Directory holding catchment boundary rasters as `{name}.asc`.
    pub geodatabase: PathBuf,
}

/// Snapshot timing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Ordered calendar days as `YYYYMMDD` strings. The rollover walks
    /// this list by index, so the days need not be consecutive.
    pub dates: Vec<String>,

    /// Hour of the first snapshot on the first date.
    #[serde(default)]
    pub start_hour: u32,

    /// Minute of the first snapshot on the first date.
    #[serde(default)]
    pub start_minute: u32,

    /// Interval between snapshots in minutes.
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,

    /// Total number of snapshots to extract.
    pub count: usize,
}

/// Source file location and naming.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Directory holding the NIMROD composite files.
    pub radar_dir: PathBuf,

    /// Filename suffix appended to each snapshot identifier.
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

/// Workspace and resampling settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Directory for scratch grids and the output table.
    #[serde(default = "default_workspace")]
    pub workspace: PathBuf,

    /// Interpolation used when upsampling to the catchment cell size.
    #[serde(default)]
    pub method: ResampleMethod,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workspace: default_workspace(),
            method: ResampleMethod::default(),
        }
    }
}

fn default_step_minutes() -> u32 {
    30
}

fn default_suffix() -> String {
    DEFAULT_RADAR_SUFFIX.to_string()
}

fn default_workspace() -> PathBuf {
    PathBuf::from(".")
}

impl RunConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        let config: RunConfig = toml::from_str(&text).map_err(|e| {
            Error::configuration(format!("cannot parse config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate ranges and formats without touching the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.catchment.name.is_empty() {
            return Err(Error::configuration("catchment name must not be empty"));
        }
        if self.timing.dates.is_empty() {
            return Err(Error::configuration("date list must not be empty"));
        }
        if self.timing.start_hour > 23 {
            return Err(Error::configuration(format!(
                "start_hour {} out of range 0-23",
                self.timing.start_hour
            )));
        }
        if self.timing.start_minute > 59 {
            return Err(Error::configuration(format!(
                "start_minute {} out of range 0-59",
                self.timing.start_minute
            )));
        }
        if self.timing.step_minutes == 0 {
            return Err(Error::configuration("step_minutes must be at least 1"));
        }
        if self.timing.count == 0 {
            return Err(Error::configuration("count must be at least 1"));
        }
        self.parsed_dates().map(|_| ())
    }

    /// Parse the configured date list into calendar days.
    pub fn parsed_dates(&self) -> Result<Vec<NaiveDate>> {
        self.timing
            .dates
            .iter()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y%m%d").map_err(|_| {
                    Error::configuration(format!(
                        "invalid date {:?} in date list, expected YYYYMMDD",
                        s
                    ))
                })
            })
            .collect()
    }

    /// Path of the output table: `{workspace}/{catchment name}.csv`.
    pub fn output_path(&self) -> PathBuf {
        self.processing
            .workspace
            .join(format!("{}.csv", self.catchment.name))
    }
}
