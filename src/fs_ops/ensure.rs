//! Directory ensure.
//!
//! `ensure_directory` is the idempotent `mkdir -p`: an existing directory is left
//! untouched, an existing non-directory is refused, and a concurrent creator winning
//! the race still counts as success. Modes are re-applied after each mkdir so the
//! umask cannot narrow them.
//!
//! `ensure_many` is the batch variant tuned for paths that are almost always absent:
//! it stats once and falls through to a plain recursive create.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

use crate::errors::{FsError, Result};
use crate::platform::{self, Mode};

use super::helpers::{io_err, is_not_found};

/// Guarantee `path` exists as a directory, creating missing ancestors with `mode`.
pub fn ensure_directory(path: &Path, mode: Mode) -> Result<()> {
    // Fast path: the path resolves to something already.
    if let Ok(meta) = fs::metadata(path) {
        if meta.is_dir() {
            return Ok(());
        }
        return Err(FsError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    // Slow path: climb to the nearest existing ancestor, then mkdir each missing
    // level top-down. Collecting components drops "foo/." style trailing dots.
    let target: PathBuf = path.components().collect();
    let mut missing = vec![target.as_path()];
    let mut cursor = target.parent();
    while let Some(dir) = cursor.filter(|p| !p.as_os_str().is_empty()) {
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => break,
            Ok(_) => {
                return Err(FsError::NotADirectory {
                    path: dir.to_path_buf(),
                });
            }
            Err(_) => {
                missing.push(dir);
                cursor = dir.parent();
            }
        }
    }

    for dir in missing.into_iter().rev() {
        create_level(dir, mode)?;
    }
    Ok(())
}

fn create_level(dir: &Path, mode: Mode) -> Result<()> {
    if let Err(e) = platform::create_dir_with_mode(dir, mode) {
        // Lost a race to another creator.
        if let Ok(meta) = fs::symlink_metadata(dir) {
            if meta.is_dir() {
                trace!(path = %dir.display(), "directory appeared concurrently");
                return Ok(());
            }
        }
        return Err(io_err("mkdir", dir)(e));
    }

    platform::apply_mode(dir, mode).map_err(io_err("chmod", dir))?;
    trace!(path = %dir.display(), mode = format!("{:o}", mode), "created directory");
    Ok(())
}

/// Existence-checked ensure: a present directory is accepted as-is; anything
/// missing is delegated to [`ensure_directory`].
pub fn ensure(path: &Path, mode: Mode) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(FsError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if is_not_found(&e) => ensure_directory(path, mode),
        Err(e) => Err(io_err("stat", path)(e)),
    }
}

/// A directory path paired with the mode it should be created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAndMode {
    pub path: PathBuf,
    pub mode: Mode,
}

/// Ordered batch of directories for [`ensure_many`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathAndModes(Vec<PathAndMode>);

impl PathAndModes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, path: impl Into<PathBuf>, mode: Mode) {
        self.0.push(PathAndMode {
            path: path.into(),
            mode,
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathAndMode> {
        self.0.iter()
    }
}

impl<P: Into<PathBuf>> FromIterator<(P, Mode)> for PathAndModes {
    fn from_iter<I: IntoIterator<Item = (P, Mode)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (p, m) in iter {
            out.append(p, m);
        }
        out
    }
}

impl<'a> IntoIterator for &'a PathAndModes {
    type Item = &'a PathAndMode;
    type IntoIter = std::slice::Iter<'a, PathAndMode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Create every absent path in `paths`. Each pair is attempted; the last failure is returned.
/// This intentionally differs from aborting at the first failed pair: pairs are independent.
///
/// Paths that already exist (of any type) are skipped. Absent ones get a plain
/// recursive create with their own mode, without the race tolerance or chmod
/// of [`ensure_directory`].
pub fn ensure_many(paths: &PathAndModes) -> Result<()> {
    let mut last = None;
    for pm in paths {
        if let Err(e) = ensure_one(pm) {
            warn!(
                path = %pm.path.display(),
                error = %e,
                cause = e.io_source().map(tracing::field::display),
                "directory not ensured; continuing"
            );
            last = Some(e);
        }
    }
    last.map_or(Ok(()), Err)
}

fn ensure_one(pm: &PathAndMode) -> Result<()> {
    match fs::metadata(&pm.path) {
        Ok(_) => Ok(()),
        Err(e) if is_not_found(&e) => {
            platform::create_dir_all_with_mode(&pm.path, pm.mode).map_err(io_err("mkdir -p", &pm.path))?;
            trace!(path = %pm.path.display(), mode = format!("{:o}", pm.mode), "created directory tree");
            Ok(())
        }
        Err(e) => Err(io_err("stat", &pm.path)(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_nested_missing_path() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("a/b/c");
        ensure_directory(&p, 0o755).unwrap();
        assert!(p.is_dir());
    }

    #[test]
    fn existing_directory_is_noop() {
        let dir = tempdir().unwrap();
        ensure_directory(dir.path(), 0o700).unwrap();
        ensure_directory(dir.path(), 0o700).unwrap();
        assert!(dir.path().is_dir());
    }

    #[test]
    fn trailing_dot_component_is_tolerated() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("x").join(".");
        ensure_directory(&p, 0o755).unwrap();
        assert!(dir.path().join("x").is_dir());
    }

    #[test]
    fn file_in_the_way_is_rejected() {
        let dir = tempdir().unwrap();
        let f = dir.path().join("f");
        fs::write(&f, b"x").unwrap();
        let err = ensure_directory(&f, 0o755).unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { ref path } if path == &f));
    }

    #[test]
    fn file_as_ancestor_is_rejected() {
        let dir = tempdir().unwrap();
        let f = dir.path().join("f");
        fs::write(&f, b"x").unwrap();
        let err = ensure_directory(&f.join("sub"), 0o755).unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { .. }));
    }

    #[test]
    fn path_and_modes_collects_in_order() {
        let pams: PathAndModes = vec![("a", 0o700), ("b", 0o755)].into_iter().collect();
        let paths: Vec<_> = pams.iter().map(|p| p.path.clone()).collect();
        assert_eq!(paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(pams.len(), 2);
    }
}
