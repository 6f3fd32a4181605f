//! File and tree copy.
//!
//! Two deliberately different failure policies:
//! - `copy_file` is strict: the first error (open, create, stream, chmod) is returned.
//! - `copy_tree` is best-effort: each entry that fails is logged and recorded in the
//!   returned `TreeCopyReport`, and the walk carries on with the rest. There is no
//!   rollback, so a failed walk leaves a partial destination behind.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::errors::{EntryFailure, FsError, Result};
use crate::platform::{self, Mode};

use super::ensure::ensure_directory;
use super::helpers::io_err;
use super::io_copy;

/// Copy one file. A non-zero `mode` is applied to `dest`; zero copies the source mode.
/// Returns the number of bytes copied.
pub fn copy_file(source: &Path, dest: &Path, mode: Mode) -> Result<u64> {
    let mut src = File::open(source).map_err(io_err("open source", source))?;
    let mut dst = File::create(dest).map_err(io_err("create destination", dest))?;

    let bytes = io_copy::copy_file_contents(&mut src, &mut dst).map_err(io_err("copy", dest))?;

    let mode = if mode != 0 {
        mode
    } else {
        let meta = src.metadata().map_err(io_err("stat", source))?;
        platform::mode_of(&meta)
    };
    platform::apply_mode(dest, mode).map_err(io_err("chmod", dest))?;

    trace!(src = %source.display(), dest = %dest.display(), bytes, mode = format!("{:o}", mode), "copied file");
    Ok(bytes)
}

/// Ensure `dest`'s parent directory (with `dir_mode`), then [`copy_file`] with `file_mode`.
pub fn copy_file_ensure_dir(source: &Path, dest: &Path, file_mode: Mode, dir_mode: Mode) -> Result<u64> {
    if let Some(parent) = non_empty_parent(dest) {
        ensure_directory(parent, dir_mode)?;
    }
    copy_file(source, dest, file_mode)
}

/// Ensure `new`'s parent directory (with `dir_mode`), then rename once, without retry.
pub fn rename(old: &Path, new: &Path, dir_mode: Mode) -> Result<()> {
    if let Some(parent) = non_empty_parent(new) {
        ensure_directory(parent, dir_mode)?;
    }
    fs::rename(old, new).map_err(io_err("rename", old))
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Outcome of a best-effort [`copy_tree`].
#[derive(Debug, Default)]
pub struct TreeCopyReport {
    /// Regular files (and symlink targets) copied successfully.
    pub files_copied: u64,
    /// Directories created or reused at the destination, the root included.
    pub dirs_created: u64,
    pub bytes_copied: u64,
    /// Every entry that could not be copied, in walk order.
    pub failures: Vec<EntryFailure>,
}

impl TreeCopyReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Source paths that failed to copy.
    pub fn failed_paths(&self) -> impl Iterator<Item = &Path> {
        self.failures.iter().map(|f| f.path.as_path())
    }

    /// Collapse into an error if any entry failed.
    pub fn into_result(self, root: &Path) -> Result<TreeCopyReport> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(FsError::PartialTree {
                root: root.to_path_buf(),
                failures: self.failures,
            })
        }
    }

    fn record_failure(&mut self, path: PathBuf, error: FsError) {
        warn!(
            path = %path.display(),
            error = %error,
            cause = error.io_source().map(tracing::field::display),
            "entry not copied; continuing"
        );
        self.failures.push(EntryFailure { path, error });
    }
}

/// Recursively copy `source` into `dest`, preserving per-entry permission bits.
///
/// Failing to stat/create/list the root itself is returned as an error; failures
/// below the root are collected in the report and do not stop the walk. A directory
/// that cannot be created at the destination is recorded once and its subtree skipped.
/// The walk is iterative, so tree depth is bounded by the filesystem, not the stack.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<TreeCopyReport> {
    let mut report = TreeCopyReport::default();

    let meta = fs::metadata(source).map_err(io_err("stat", source))?;
    fs::read_dir(source).map_err(io_err("read_dir", source))?;
    platform::create_dir_all_with_mode(dest, platform::mode_of(&meta)).map_err(io_err("mkdir -p", dest))?;
    report.dirs_created += 1;

    let mut walk = WalkDir::new(source).min_depth(1).into_iter();
    while let Some(next) = walk.next() {
        let entry = match next {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(source).to_path_buf();
                let error = io_err("read_dir", &path)(io::Error::from(e));
                report.record_failure(path, error);
                continue;
            }
        };
        let Ok(rel) = entry.path().strip_prefix(source) else {
            continue;
        };
        let dst_path = dest.join(rel);

        if entry.file_type().is_dir() {
            match copy_dir_entry(&entry, &dst_path) {
                Ok(()) => report.dirs_created += 1,
                Err(e) => {
                    report.record_failure(entry.into_path(), e);
                    walk.skip_current_dir();
                }
            }
        } else {
            match copy_file(entry.path(), &dst_path, 0) {
                Ok(bytes) => {
                    report.files_copied += 1;
                    report.bytes_copied += bytes;
                }
                Err(e) => report.record_failure(entry.into_path(), e),
            }
        }
    }

    info!(
        src = %source.display(),
        dest = %dest.display(),
        files = report.files_copied,
        dirs = report.dirs_created,
        bytes = report.bytes_copied,
        failures = report.failures.len(),
        "tree copy finished"
    );
    Ok(report)
}

/// Create one destination directory with the source directory's mode.
fn copy_dir_entry(entry: &DirEntry, dest: &Path) -> Result<()> {
    let meta = entry
        .metadata()
        .map_err(|e| io_err("stat", entry.path())(io::Error::from(e)))?;
    platform::create_dir_all_with_mode(dest, platform::mode_of(&meta)).map_err(io_err("mkdir -p", dest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_file_propagates_missing_source() {
        let dir = tempdir().unwrap();
        let err = copy_file(&dir.path().join("missing"), &dir.path().join("out"), 0).unwrap_err();
        assert!(matches!(err, FsError::Io { op: "open source", .. }));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn copy_file_into_missing_dir_fails_without_ensure() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a");
        fs::write(&src, b"a").unwrap();
        let err = copy_file(&src, &dir.path().join("no/such/a"), 0).unwrap_err();
        assert!(matches!(err, FsError::Io { op: "create destination", .. }));
    }

    #[test]
    fn copy_file_ensure_dir_creates_parent() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a");
        fs::write(&src, b"abc").unwrap();
        let dst = dir.path().join("x/y/a");
        assert_eq!(copy_file_ensure_dir(&src, &dst, 0, 0o755).unwrap(), 3);
        assert_eq!(fs::read(&dst).unwrap(), b"abc");
    }

    #[test]
    fn rename_creates_destination_parent() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a");
        fs::write(&src, b"a").unwrap();
        let dst = dir.path().join("p/q/a");
        rename(&src, &dst, 0o755).unwrap();
        assert!(!src.exists());
        assert!(dst.exists());
    }

    #[test]
    fn rename_surfaces_ensure_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let src = dir.path().join("a");
        fs::write(&src, b"a").unwrap();
        let err = rename(&src, &blocker.join("a"), 0o755).unwrap_err();
        assert!(matches!(err, FsError::NotADirectory { .. }));
        assert!(src.exists());
    }

    #[test]
    fn report_into_result() {
        let report = TreeCopyReport::default();
        assert!(report.into_result(Path::new("/r")).is_ok());

        let mut report = TreeCopyReport::default();
        report.failures.push(EntryFailure {
            path: PathBuf::from("/r/x"),
            error: FsError::BufferReleased,
        });
        let err = report.into_result(Path::new("/r")).unwrap_err();
        assert!(matches!(err, FsError::PartialTree { ref failures, .. } if failures.len() == 1));
    }
}
