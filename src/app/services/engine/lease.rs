//! Scoped acquisition of the grid engine workspace.
//!
//! Scratch grids use fixed names, so a workspace supports exactly one
//! extraction at a time. [`EngineLease`] models the engine licence as an
//! exclusive lock file in the workspace, released on every exit path
//! through `Drop`.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::LEASE_LOCK_NAME;
use crate::error::{Error, Result};

/// Exclusive hold on a workspace directory.
#[derive(Debug)]
pub struct EngineLease {
    workspace: PathBuf,
    lock_path: PathBuf,
}

impl EngineLease {
    /// Acquire the workspace, creating the directory if needed.
    ///
    /// Fails with `LicenseUnavailable` when the workspace cannot be
    /// prepared or another extraction already holds the lock.
    pub fn acquire(workspace: &Path) -> Result<Self> {
        fs::create_dir_all(workspace).map_err(|e| {
            Error::license_unavailable(format!(
                "cannot prepare workspace {}: {}",
                workspace.display(),
                e
            ))
        })?;

        let lock_path = workspace.join(LEASE_LOCK_NAME);
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(_) => {
                debug!("Acquired workspace lease: {}", lock_path.display());
                Ok(Self {
                    workspace: workspace.to_path_buf(),
                    lock_path,
                })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(Error::license_unavailable(format!(
                    "workspace {} is already leased, remove {} if no other extraction is running",
                    workspace.display(),
                    lock_path.display()
                )))
            }
            Err(e) => Err(Error::license_unavailable(format!(
                "workspace {} is not writable: {}",
                workspace.display(),
                e
            ))),
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Path of a named scratch file inside the leased workspace.
    pub fn scratch_path(&self, name: &str) -> PathBuf {
        self.workspace.join(name)
    }
}

impl Drop for EngineLease {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_path) {
            warn!(
                "Failed to release workspace lease {}: {}",
                self.lock_path.display(),
                e
            );
        } else {
            debug!("Released workspace lease: {}", self.lock_path.display());
        }
    }
}

/// Removes a scratch file when dropped, on success and failure alike.
#[derive(Debug)]
pub struct ScratchGuard {
    path: PathBuf,
}

impl ScratchGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed scratch file: {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove scratch file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}
