//! Extract command implementation.
//!
//! The full extraction run, cheap checks first: build the snapshot
//! timeline, verify every source file is readable, then acquire the
//! workspace lease, load the catchment and reduce each snapshot in
//! timeline order. Per-snapshot failures are logged and skipped; the
//! output table is written once, after the loop completes.

use std::path::Path;
use std::time::Instant;

use colored::*;
use indicatif::HumanDuration;
use tracing::{debug, error, info, warn};

use super::shared::{ExtractionStats, create_progress_bar, load_configuration, setup_logging};
use crate::app::models::{CatchmentDescriptor, RainfallSample};
use crate::app::services::accumulator::TimeSeriesTable;
use crate::app::services::engine::lease::EngineLease;
use crate::app::services::precheck::verify_sources;
use crate::app::services::reduction::reduce_snapshot;
use crate::app::services::timeline::build_timeline;
use crate::cli::args::ExtractArgs;
use crate::config::RunConfig;
use crate::error::{Error, Result};

/// Extract command runner.
pub fn run_extract(args: ExtractArgs) -> Result<ExtractionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level());

    info!("Starting catchment rainfall extraction");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args)?;

    // Timeline and availability precheck run before any engine setup.
    let dates = config.parsed_dates()?;
    let steps = build_timeline(
        &dates,
        config.timing.start_hour,
        config.timing.start_minute,
        config.timing.step_minutes,
        config.timing.count,
    )?;
    info!(
        "Timeline: {} snapshots from {} every {} minutes",
        steps.len(),
        steps[0],
        config.timing.step_minutes
    );

    let report = verify_sources(&steps, &config.source.radar_dir, &config.source.suffix);
    if !report.all_present() {
        for path in &report.missing {
            error!("File not found: {}", path.display());
        }
        return Err(Error::MissingSourceFiles {
            count: report.error_count(),
        });
    }

    // Expensive phase: exclusive workspace, then the catchment raster.
    let lease = EngineLease::acquire(&config.processing.workspace)?;
    let catchment = CatchmentDescriptor::load(&config.catchment.geodatabase, &config.catchment.name)?;
    info!(
        "Catchment {}: {}x{} cells at {} m",
        catchment.name,
        catchment.boundary.rows(),
        catchment.boundary.cols(),
        catchment.cell_size
    );

    let progress_bar = if args.show_progress() {
        Some(create_progress_bar(
            steps.len() as u64,
            "Extracting rainfall",
        ))
    } else {
        None
    };

    let mut table = TimeSeriesTable::new();
    let mut skipped = 0usize;
    for step in &steps {
        let source = step.source_path(&config.source.radar_dir, &config.source.suffix);
        match reduce_snapshot(&source, &catchment, &lease, config.processing.method) {
            Ok(rate) => {
                debug!("Snapshot {}: {:.6} mm/hr", step, rate);
                table.push(RainfallSample::new(step, rate));
            }
            Err(e) => {
                warn!("Skipping snapshot {}: {}", step, e);
                skipped += 1;
            }
        }
        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }
    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    let output_path = config.output_path();
    table.write(&output_path)?;

    let stats = ExtractionStats {
        snapshots_requested: steps.len(),
        samples_written: table.len(),
        snapshots_skipped: skipped,
        missing_files: 0,
        elapsed: start_time.elapsed(),
    };

    if !args.quiet {
        report_summary(&stats, &config, &output_path);
    }
    Ok(stats)
}

/// Print the human-readable run summary.
fn report_summary(stats: &ExtractionStats, config: &RunConfig, output_path: &Path) {
    println!();
    println!("{}", "Extraction complete".green().bold());
    println!(
        "  Catchment:  {}",
        config.catchment.name.as_str().cyan()
    );
    println!(
        "  Snapshots:  {} requested, {} written, {} skipped",
        stats.snapshots_requested,
        stats.samples_written.to_string().green(),
        if stats.snapshots_skipped > 0 {
            stats.snapshots_skipped.to_string().yellow()
        } else {
            "0".normal()
        }
    );
    println!("  Output:     {}", output_path.display());
    println!("  Elapsed:    {}", HumanDuration(stats.elapsed));
}
