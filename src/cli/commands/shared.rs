//! Shared components for CLI commands.

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::cli::args::ExtractArgs;
use crate::config::RunConfig;
use crate::constants::DEFAULT_CONFIG_FILE;
use crate::error::Result;

/// Run statistics for reporting across commands.
#[derive(Debug, Clone, Default)]
pub struct ExtractionStats {
    /// Number of snapshots the timeline requested.
    pub snapshots_requested: usize,
    /// Number of samples written to the output table.
    pub samples_written: usize,
    /// Number of snapshots skipped after a per-snapshot failure.
    pub snapshots_skipped: usize,
    /// Number of source files the precheck found missing.
    pub missing_files: usize,
    /// Total processing time.
    pub elapsed: std::time::Duration,
}

/// Set up structured logging to stderr.
///
/// `RUST_LOG` overrides the level derived from the CLI flags. Safe to
/// call more than once; later calls keep the first subscriber.
pub fn setup_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nimrod_processor={}", log_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Resolve the configuration file path, falling back to the default.
pub fn config_path(config_file: Option<&Path>) -> PathBuf {
    config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load the run configuration and apply extract command overrides.
pub fn load_configuration(args: &ExtractArgs) -> Result<RunConfig> {
    let path = config_path(args.config_file.as_deref());
    info!("Using config file: {}", path.display());

    let mut config = RunConfig::load(&path)?;

    if let Some(workspace) = &args.workspace {
        config.processing.workspace = workspace.clone();
    }
    if let Some(method) = args.method {
        config.processing.method = method;
    }

    Ok(config)
}

/// Create a progress bar with appropriate styling.
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::engine::resample::ResampleMethod;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
        [catchment]
        name = "Severn_Catchment_Raster"
        geodatabase = "work"

        [timing]
        dates = ["20080225"]
        start_hour = 20
        count = 3

        [source]
        radar_dir = "NIMROD_data"
    "#;

    #[test]
    fn stats_default_to_zero() {
        let stats = ExtractionStats::default();
        assert_eq!(stats.snapshots_requested, 0);
        assert_eq!(stats.samples_written, 0);
        assert_eq!(stats.snapshots_skipped, 0);
        assert_eq!(stats.missing_files, 0);
    }

    #[test]
    fn config_path_falls_back_to_default() {
        assert_eq!(config_path(None), PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(
            config_path(Some(Path::new("runs/severn.toml"))),
            PathBuf::from("runs/severn.toml")
        );
    }

    #[test]
    fn cli_overrides_replace_config_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nimrod.toml");
        std::fs::write(&path, CONFIG).unwrap();

        let args = ExtractArgs {
            config_file: Some(path),
            workspace: Some(PathBuf::from("scratch")),
            method: Some(ResampleMethod::Nearest),
            verbose: 0,
            quiet: true,
        };

        let config = load_configuration(&args).unwrap();
        assert_eq!(config.processing.workspace, PathBuf::from("scratch"));
        assert_eq!(config.processing.method, ResampleMethod::Nearest);
    }

    #[test]
    fn absent_overrides_keep_config_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nimrod.toml");
        std::fs::write(&path, CONFIG).unwrap();

        let args = ExtractArgs {
            config_file: Some(path),
            workspace: None,
            method: None,
            verbose: 0,
            quiet: true,
        };

        let config = load_configuration(&args).unwrap();
        assert_eq!(config.processing.workspace, PathBuf::from("."));
        assert_eq!(config.processing.method, ResampleMethod::Cubic);
    }
}
