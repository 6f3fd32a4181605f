//! Small path queries that carry no retry or tree-walk logic.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// `Ok(false)` when `path` is absent; any other stat failure is returned.
pub fn is_exists(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// True when the directory has no entries. Reads at most one entry.
pub fn is_dir_empty(path: &Path) -> io::Result<bool> {
    let mut entries = fs::read_dir(path)?;
    match entries.next() {
        None => Ok(true),
        Some(Ok(_)) => Ok(false),
        Some(Err(e)) => Err(e),
    }
}

/// Rewrite each path in place as an absolute path. Symlinks are not resolved.
/// Stops at the first failure; earlier paths stay rewritten.
pub fn absolutize(paths: &mut [PathBuf]) -> io::Result<()> {
    for p in paths.iter_mut() {
        let abs = std::path::absolute(&*p)?;
        *p = dunce::simplified(&abs).to_path_buf();
    }
    Ok(())
}
