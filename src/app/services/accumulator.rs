//! Time-series accumulation and output table serialization.
//!
//! Samples arrive in timeline order, gaps allowed where a snapshot was
//! skipped. The table grows append-only in memory and is written to disk
//! exactly once, after the full sequence has been processed, so a fatal
//! condition mid-run never leaves a partial output file behind.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::app::models::RainfallSample;
use crate::constants::CSV_HEADER;
use crate::error::Result;

/// Append-only table of rainfall samples.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesTable {
    samples: Vec<RainfallSample>,
}

impl TimeSeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sample. No deduplication: the timeline guarantees
    /// identifier uniqueness.
    pub fn push(&mut self, sample: RainfallSample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Render the full table, header first, one row per sample.
    pub fn to_csv(&self) -> String {
        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for sample in &self.samples {
            out.push_str(&format!(
                "{}, {:02}, {:02}, {:02}, {:02}, {:.6}\n",
                sample.year, sample.month, sample.day, sample.hour, sample.minute, sample.mean_rate
            ));
        }
        out
    }

    /// Serialize the table to disk in one pass.
    pub fn write(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        out.write_all(self.to_csv().as_bytes())?;
        out.flush()?;
        info!("Wrote {} samples to {}", self.len(), path.display());
        Ok(())
    }
}
