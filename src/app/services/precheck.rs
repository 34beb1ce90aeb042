//! Source availability precheck.
//!
//! Runs through the full timeline cheaply before any grid engine setup,
//! opening every expected NIMROD file read-only and counting failures
//! instead of raising on the first one. A nonzero count gates the
//! expensive phase off entirely.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::app::models::TimeStep;

/// Outcome of the availability precheck.
#[derive(Debug, Clone, Default)]
pub struct PrecheckReport {
    /// Number of paths checked, one per timeline entry.
    pub checked: usize,
    /// Paths that could not be opened for reading.
    pub missing: Vec<PathBuf>,
}

impl PrecheckReport {
    /// Total failure count, the gate for the expensive phase.
    pub fn error_count(&self) -> usize {
        self.missing.len()
    }

    /// True when every expected source file was readable.
    pub fn all_present(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Verify every expected source file exists and opens for reading.
///
/// Each file is opened and closed immediately; contents are not decoded
/// here. Failures are accumulated, never propagated.
pub fn verify_sources(steps: &[TimeStep], radar_dir: &Path, suffix: &str) -> PrecheckReport {
    let mut report = PrecheckReport::default();

    for step in steps {
        let path = step.source_path(radar_dir, suffix);
        report.checked += 1;
        match File::open(&path) {
            Ok(file) => drop(file),
            Err(e) => {
                warn!("File not found: {} ({})", path.display(), e);
                report.missing.push(path);
            }
        }
    }

    debug!(
        "Precheck complete: {} checked, {} missing",
        report.checked,
        report.error_count()
    );
    report
}
