// crates/preingest-rs/src/fsio.rs

//! File helpers that attach the offending path to every I/O error.

use crate::error::{PreingestError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| PreingestError::io(path, e))
}

/// Replaces `path` with `contents` via a temporary file in the same
/// directory and a rename, so readers see either the old or the new file.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PreingestError::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| PreingestError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| PreingestError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| PreingestError::io(path, e.error))?;
    Ok(())
}

pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| PreingestError::io(path, e))
}
