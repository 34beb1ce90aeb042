//! Command implementations for the NIMROD processor CLI.
//!
//! Each command lives in its own module; shared reporting and
//! configuration plumbing sits in [`shared`].

pub mod check;
pub mod extract;
pub mod shared;

pub use shared::ExtractionStats;

use crate::cli::args::{Args, Commands};
use crate::error::Result;

/// Main command runner.
///
/// Dispatches to the appropriate subcommand handler based on CLI args:
/// - `extract`: the full extraction run with CSV output
/// - `check`: timeline and source availability check only
pub fn run(args: Args) -> Result<ExtractionStats> {
    match args.get_command() {
        Commands::Extract(extract_args) => extract::run_extract(extract_args),
        Commands::Check(check_args) => check::run_check(check_args),
    }
}
