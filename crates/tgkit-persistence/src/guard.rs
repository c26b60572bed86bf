//! Marker-file guard against duplicate webhook deliveries.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::atomic::atomic_create;
use crate::error::{PersistenceError, Result};

/// Extension of marker files.
pub const MARKER_EXTENSION: &str = "run";

/// Holds the marker of an update being handled.
///
/// The marker file `{dir}/{update_id}.run` exists for as long as the guard
/// lives, and is removed on drop, including during a panic unwind.
#[derive(Debug)]
pub struct DeliveryGuard {
    path: PathBuf,
    update_id: i64,
    released: bool,
}

impl DeliveryGuard {
    /// Path of the marker for `update_id` in `dir`.
    pub fn marker_path(dir: &Path, update_id: i64) -> PathBuf {
        dir.join(format!("{}.{}", update_id, MARKER_EXTENSION))
    }

    /// Claims `update_id`.
    ///
    /// Returns `Some(guard)` when the caller should handle the update, and
    /// `None` when another handler already holds it.
    pub fn acquire(dir: impl AsRef<Path>, update_id: i64) -> Result<Option<Self>> {
        let path = Self::marker_path(dir.as_ref(), update_id);
        let contents = std::process::id().to_string();

        if !atomic_create(&path, contents.as_bytes())? {
            info!(update_id, path = %path.display(), "Update already in progress, skipping");
            return Ok(None);
        }

        debug!(update_id, path = %path.display(), "Acquired delivery guard");
        Ok(Some(Self {
            path,
            update_id,
            released: false,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn update_id(&self) -> i64 {
        self.update_id
    }

    /// Removes the marker now, reporting failures instead of logging them.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        remove_marker(&self.path).map_err(|source| PersistenceError::RemoveError {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for DeliveryGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match remove_marker(&self.path) {
            Ok(()) => debug!(update_id = self.update_id, "Released delivery guard"),
            Err(e) => warn!(
                update_id = self.update_id,
                path = %self.path.display(),
                error = %e,
                "Failed to remove marker file"
            ),
        }
    }
}

fn remove_marker(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
