//! Atomic file creation.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::error::{PersistenceError, Result};

/// Creates `path` with `data` unless it already exists.
///
/// The data is written to a temporary file in the same directory and then
/// linked into place without overwriting, so concurrent callers never see a
/// partially written file and exactly one of them wins.
///
/// # Returns
/// `true` if the file was created, `false` if it already existed.
///
/// # Errors
/// Returns an error if the directory cannot be created or the write fails.
pub fn atomic_create(path: &Path, data: &[u8]) -> Result<bool> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::DirectoryError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    // Create temp file in same directory (for same-filesystem link)
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file =
        tempfile::NamedTempFile::new_in(dir).map_err(|source| PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

    temp_file
        .write_all(data)
        .and_then(|_| temp_file.flush())
        .map_err(|source| PersistenceError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

    match temp_file.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(PersistenceError::WriteError {
            path: path.to_path_buf(),
            source: e.error,
        }),
    }
}
