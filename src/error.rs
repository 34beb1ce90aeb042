//! Error handling for NIMROD processing operations.
//!
//! Distinguishes run-fatal conditions (configuration, missing source
//! files, workspace lease) from per-snapshot conditions (decode and grid
//! failures) that the extraction loop recovers from locally.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error(
        "Date list exhausted: {requested} samples requested but the supplied dates only cover {available}"
    )]
    ConfigurationExhausted { requested: usize, available: usize },

    #[error("{count} source file(s) missing or unreadable, aborting before grid setup")]
    MissingSourceFiles { count: usize },

    #[error("Grid engine licence unavailable: {reason}")]
    LicenseUnavailable { reason: String },

    #[error("Catchment raster not found: {path}")]
    CatchmentNotFound { path: PathBuf },

    #[error("Failed to decode NIMROD file {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Grid operation failed: {reason}")]
    Grid { reason: String },
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a decode error for a specific source file
    pub fn decode(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a grid engine error
    pub fn grid(reason: impl Into<String>) -> Self {
        Self::Grid {
            reason: reason.into(),
        }
    }

    /// Create a licence error
    pub fn license_unavailable(reason: impl Into<String>) -> Self {
        Self::LicenseUnavailable {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
