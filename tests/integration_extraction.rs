//! Integration tests for the full extraction run
//!
//! These tests build a synthetic geodatabase, radar file drop and run
//! configuration in a temporary directory, then drive the CLI commands
//! end-to-end and inspect the output table.

use std::path::PathBuf;

use nimrod_processor::cli::args::{Args, CheckArgs, Commands, ExtractArgs};
use nimrod_processor::cli::commands;
use nimrod_processor::error::Error;
use tempfile::TempDir;

/// Serialize a minimal NIMROD composite: Fortran-framed 512-byte header
/// followed by the big-endian i16 data record.
fn nimrod_file(rows: usize, cols: usize, x_min: f64, y_max: f64, cell: f64, values: &[i16]) -> Vec<u8> {
    assert_eq!(values.len(), rows * cols);

    let mut header = vec![0u8; 512];
    let ints: [(usize, i16); 7] = [
        (0, 2008),
        (1, 2),
        (2, 25),
        (3, 20),
        (4, 0),
        (15, rows as i16),
        (16, cols as i16),
    ];
    for (ix, value) in ints {
        header[ix * 2..ix * 2 + 2].copy_from_slice(&value.to_be_bytes());
    }
    let reals: [(usize, f64); 4] = [
        (2, y_max - cell / 2.0),
        (3, cell),
        (4, x_min + cell / 2.0),
        (5, cell),
    ];
    for (ix, value) in reals {
        let at = 62 + ix * 4;
        header[at..at + 4].copy_from_slice(&(value as f32).to_be_bytes());
    }

    let mut data = Vec::with_capacity(values.len() * 2);
    for v in values {
        data.extend_from_slice(&v.to_be_bytes());
    }

    let mut out = Vec::new();
    for body in [&header[..], &data[..]] {
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    }
    out
}

/// A complete run fixture: geodatabase, radar drop, workspace and config.
struct Fixture {
    dir: TempDir,
    config_path: PathBuf,
}

impl Fixture {
    /// Three 30-minute snapshots starting 2008-02-25 20:00, all with a
    /// uniform raw value of 320 (10 mm/hr after correction), over a 4x4
    /// catchment at 250 m.
    fn new() -> Self {
        Self::with_count(3)
    }

    fn with_count(count: usize) -> Self {
        let dir = TempDir::new().unwrap();
        let gdb = dir.path().join("gdb");
        let radar = dir.path().join("radar");
        std::fs::create_dir_all(&gdb).unwrap();
        std::fs::create_dir_all(&radar).unwrap();

        // Catchment boundary: 4x4 cells over (2000..3000)^2, corners out.
        let mut asc = String::from(
            "ncols 4\nnrows 4\nxllcorner 2000\nyllcorner 2000\ncellsize 250\nNODATA_value -9999\n",
        );
        for row in 0..4 {
            for col in 0..4 {
                let outside = (row == 0 || row == 3) && (col == 0 || col == 3);
                asc.push_str(if outside { "-9999" } else { "1" });
                asc.push(if col == 3 { '\n' } else { ' ' });
            }
        }
        std::fs::write(gdb.join("Test_Catchment.asc"), asc).unwrap();

        for id in ["20080225_2000", "20080225_2030", "20080225_2100", "20080225_2130"] {
            std::fs::write(
                radar.join(format!("{id}_rad")),
                nimrod_file(6, 6, 0.0, 6000.0, 1000.0, &[320; 36]),
            )
            .unwrap();
        }

        let config_path = dir.path().join("nimrod.toml");
        let config = format!(
            r#"
[catchment]
name = "Test_Catchment"
geodatabase = "{gdb}"

[timing]
dates = ["20080225"]
start_hour = 20
count = {count}

[source]
radar_dir = "{radar}"
suffix = "_rad"

[processing]
workspace = "{ws}"
"#,
            gdb = gdb.display(),
            radar = radar.display(),
            ws = dir.path().join("ws").display(),
        );
        std::fs::write(&config_path, config).unwrap();

        Self { dir, config_path }
    }

    fn extract_args(&self) -> ExtractArgs {
        ExtractArgs {
            config_file: Some(self.config_path.clone()),
            workspace: None,
            method: None,
            verbose: 0,
            quiet: true,
        }
    }

    fn run_extract(&self) -> Result<commands::ExtractionStats, Error> {
        commands::run(Args {
            command: Some(Commands::Extract(self.extract_args())),
        })
    }

    fn output_path(&self) -> PathBuf {
        self.dir.path().join("ws").join("Test_Catchment.csv")
    }

    fn snapshot_path(&self, id: &str) -> PathBuf {
        self.dir.path().join("radar").join(format!("{id}_rad"))
    }
}

#[test]
fn full_run_writes_the_expected_table() {
    let fixture = Fixture::new();
    let stats = fixture.run_extract().unwrap();

    assert_eq!(stats.snapshots_requested, 3);
    assert_eq!(stats.samples_written, 3);
    assert_eq!(stats.snapshots_skipped, 0);

    let csv = std::fs::read_to_string(fixture.output_path()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Year, Month, Date, Hour, Minute, Rainfall (mm/hr)");
    assert_eq!(lines[1], "2008, 02, 25, 20, 00, 10.000000");
    assert_eq!(lines[2], "2008, 02, 25, 20, 30, 10.000000");
    assert_eq!(lines[3], "2008, 02, 25, 21, 00, 10.000000");
}

#[test]
fn workspace_is_clean_after_the_run() {
    let fixture = Fixture::new();
    fixture.run_extract().unwrap();

    let ws = fixture.dir.path().join("ws");
    let leftovers: Vec<String> = std::fs::read_dir(&ws)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name != "Test_Catchment.csv")
        .collect();
    assert!(leftovers.is_empty(), "leftover files: {leftovers:?}");
}

#[test]
fn missing_source_file_aborts_before_any_output() {
    let fixture = Fixture::new();
    std::fs::remove_file(fixture.snapshot_path("20080225_2030")).unwrap();

    let err = fixture.run_extract().unwrap_err();
    match err {
        Error::MissingSourceFiles { count } => assert_eq!(count, 1),
        other => panic!("unexpected error: {other}"),
    }

    // Aborted before engine setup: no output, no workspace lease.
    assert!(!fixture.output_path().exists());
    assert!(!fixture.dir.path().join("ws").exists());
}

#[test]
fn corrupt_snapshot_skips_one_row_and_keeps_the_rest() {
    let fixture = Fixture::new();
    // Precheck still passes: the file exists and opens.
    std::fs::write(fixture.snapshot_path("20080225_2030"), b"garbage").unwrap();

    let stats = fixture.run_extract().unwrap();
    assert_eq!(stats.samples_written, 2);
    assert_eq!(stats.snapshots_skipped, 1);

    let csv = std::fs::read_to_string(fixture.output_path()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "2008, 02, 25, 20, 00, 10.000000");
    assert_eq!(lines[2], "2008, 02, 25, 21, 00, 10.000000");
}

#[test]
fn rerun_produces_a_byte_identical_table() {
    let fixture = Fixture::new();

    fixture.run_extract().unwrap();
    let first = std::fs::read(fixture.output_path()).unwrap();

    fixture.run_extract().unwrap();
    let second = std::fs::read(fixture.output_path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn exhausted_date_list_is_a_configuration_error() {
    // 20:00 start at 30-minute steps leaves 8 slots on one date.
    let fixture = Fixture::with_count(9);

    let err = fixture.run_extract().unwrap_err();
    match err {
        Error::ConfigurationExhausted {
            requested,
            available,
        } => {
            assert_eq!(requested, 9);
            assert_eq!(available, 8);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!fixture.output_path().exists());
}

#[test]
fn concurrent_lease_turns_into_license_unavailable() {
    let fixture = Fixture::new();
    let ws = fixture.dir.path().join("ws");
    std::fs::create_dir_all(&ws).unwrap();
    std::fs::write(ws.join(".nimrod_processor.lock"), b"").unwrap();

    let err = fixture.run_extract().unwrap_err();
    assert!(matches!(err, Error::LicenseUnavailable { .. }));
    assert!(!fixture.output_path().exists());
}

#[test]
fn check_command_reports_missing_files() {
    let fixture = Fixture::new();
    std::fs::remove_file(fixture.snapshot_path("20080225_2000")).unwrap();
    std::fs::remove_file(fixture.snapshot_path("20080225_2100")).unwrap();

    let err = commands::run(Args {
        command: Some(Commands::Check(CheckArgs {
            config_file: Some(fixture.config_path.clone()),
            verbose: 0,
        })),
    })
    .unwrap_err();

    match err {
        Error::MissingSourceFiles { count } => assert_eq!(count, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn check_command_passes_on_a_complete_drop() {
    let fixture = Fixture::new();

    let stats = commands::run(Args {
        command: Some(Commands::Check(CheckArgs {
            config_file: Some(fixture.config_path.clone()),
            verbose: 0,
        })),
    })
    .unwrap();

    assert_eq!(stats.snapshots_requested, 3);
    assert_eq!(stats.missing_files, 0);
}

#[test]
fn nearest_method_matches_on_a_uniform_field() {
    let fixture = Fixture::new();
    let mut args = fixture.extract_args();
    args.method = Some("nearest".parse().unwrap());

    let stats = commands::run(Args {
        command: Some(Commands::Extract(args)),
    })
    .unwrap();
    assert_eq!(stats.samples_written, 3);

    let csv = std::fs::read_to_string(fixture.output_path()).unwrap();
    assert!(csv.lines().nth(1).unwrap().ends_with("10.000000"));
}
