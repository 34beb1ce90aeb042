//! Command-line argument definitions for the NIMROD processor.
//!
//! The CLI is a thin layer over the TOML run configuration: each
//! subcommand takes the config file plus a small set of overrides.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::services::engine::resample::ResampleMethod;
use crate::error::{Error, Result};

/// CLI arguments for the NIMROD catchment rainfall processor
///
/// Converts UK Met Office NIMROD radar rainfall composites into a
/// per-catchment CSV time series of area-averaged rainfall rates.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nimrod-processor",
    version,
    about = "Extract catchment-averaged rainfall time series from NIMROD radar composites",
    long_about = "A batch tool that converts gridded UK Met Office NIMROD radar rainfall \
                  snapshots into a single per-catchment time series of area-averaged rainfall \
                  rates (mm/hr) suitable for hydrological modelling. Snapshot timing, catchment \
                  identity and file locations are supplied in a TOML configuration file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the NIMROD processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract the rainfall time series (main command)
    Extract(ExtractArgs),
    /// Check the configured snapshot files without processing them
    Check(CheckArgs),
}

/// Arguments for the extract command (main extraction run)
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// Path to the run configuration file
    ///
    /// TOML file describing the catchment, the snapshot timing and the
    /// source file locations. Defaults to ./nimrod.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to run configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Workspace directory override
    ///
    /// Directory for the scratch grid and the output table. Overrides
    /// the [processing] workspace setting in the configuration file.
    #[arg(
        short = 'w',
        long = "workspace",
        value_name = "PATH",
        help = "Workspace directory for scratch grids and output"
    )]
    pub workspace: Option<PathBuf>,

    /// Resample method override
    ///
    /// Interpolation used when upsampling the radar grid to the
    /// catchment cell size. Cubic is the default policy; nearest
    /// preserves exact source values.
    #[arg(
        long = "method",
        value_name = "METHOD",
        help = "Resample method: cubic or nearest"
    )]
    pub method: Option<ResampleMethod>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Also disables the progress bar.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the check command (availability precheck only)
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// Path to the run configuration file
    ///
    /// Same file the extract command uses; only the timing and source
    /// sections are exercised.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to run configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl ExtractArgs {
    /// Validate the extract command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl CheckArgs {
    /// Validate the check command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
