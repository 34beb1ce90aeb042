//! Check command implementation.
//!
//! Runs the cheap half of the extraction only: build the timeline from
//! the configuration and verify every expected source file is readable.
//! Lets an operator validate an input drop before committing to a long
//! extraction run.

use std::time::Instant;

use colored::*;
use tracing::{debug, info};

use super::shared::{ExtractionStats, config_path, setup_logging};
use crate::app::services::precheck::verify_sources;
use crate::app::services::timeline::build_timeline;
use crate::cli::args::CheckArgs;
use crate::config::RunConfig;
use crate::error::{Error, Result};

/// Check command runner.
pub fn run_check(args: CheckArgs) -> Result<ExtractionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level());

    info!("Checking snapshot availability");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let path = config_path(args.config_file.as_deref());
    info!("Using config file: {}", path.display());
    let config = RunConfig::load(&path)?;

    let dates = config.parsed_dates()?;
    let steps = build_timeline(
        &dates,
        config.timing.start_hour,
        config.timing.start_minute,
        config.timing.step_minutes,
        config.timing.count,
    )?;

    println!(
        "Checking {} snapshot files in {}..",
        steps.len(),
        config.source.radar_dir.display()
    );
    let report = verify_sources(&steps, &config.source.radar_dir, &config.source.suffix);

    let stats = ExtractionStats {
        snapshots_requested: steps.len(),
        samples_written: 0,
        snapshots_skipped: 0,
        missing_files: report.error_count(),
        elapsed: start_time.elapsed(),
    };

    if report.all_present() {
        println!(
            "{} all {} files present ({} to {})",
            "OK:".green().bold(),
            report.checked,
            steps[0],
            steps[steps.len() - 1]
        );
        Ok(stats)
    } else {
        for path in &report.missing {
            println!("{} {}", "missing:".red(), path.display());
        }
        println!(
            "{} {} of {} files missing",
            "FAILED:".red().bold(),
            report.error_count(),
            report.checked
        );
        Err(Error::MissingSourceFiles {
            count: report.error_count(),
        })
    }
}
