//! Tests for workspace lease acquisition and scratch cleanup

use tempfile::TempDir;

use super::super::lease::{EngineLease, ScratchGuard};
use crate::constants::LEASE_LOCK_NAME;
use crate::error::Error;

#[test]
fn acquire_creates_workspace_and_lock() {
    let dir = TempDir::new().unwrap();
    let workspace = dir.path().join("scratch");

    let lease = EngineLease::acquire(&workspace).unwrap();
    assert!(workspace.join(LEASE_LOCK_NAME).exists());
    assert_eq!(lease.workspace(), workspace);
    assert_eq!(lease.scratch_path("grid.asc"), workspace.join("grid.asc"));
}

#[test]
fn second_acquire_is_licence_unavailable() {
    let dir = TempDir::new().unwrap();
    let _held = EngineLease::acquire(dir.path()).unwrap();

    match EngineLease::acquire(dir.path()) {
        Err(Error::LicenseUnavailable { .. }) => {}
        other => panic!("expected licence error, got {other:?}"),
    }
}

#[test]
fn drop_releases_the_lease() {
    let dir = TempDir::new().unwrap();
    {
        let _lease = EngineLease::acquire(dir.path()).unwrap();
        assert!(dir.path().join(LEASE_LOCK_NAME).exists());
    }
    assert!(!dir.path().join(LEASE_LOCK_NAME).exists());
    // A later run can acquire again.
    EngineLease::acquire(dir.path()).unwrap();
}

#[test]
fn scratch_guard_removes_file_on_drop() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rain_decoded.asc");
    std::fs::write(&path, "scratch").unwrap();

    {
        let guard = ScratchGuard::new(path.clone());
        assert_eq!(guard.path(), path);
    }
    assert!(!path.exists());
}

#[test]
fn scratch_guard_tolerates_missing_file() {
    let dir = TempDir::new().unwrap();
    let _guard = ScratchGuard::new(dir.path().join("never_created.asc"));
}
