//! Unix implementations of platform helpers.

use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io;
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::Path;

use super::Mode;

const MODE_MASK: Mode = 0o7777;

/// Single-level mkdir with `mode` (still subject to umask).
pub fn create_dir_with_mode(path: &Path, mode: Mode) -> io::Result<()> {
    DirBuilder::new().mode(mode & MODE_MASK).create(path)
}

/// Plain `mkdir -p` with `mode` applied to every created level (subject to umask).
pub fn create_dir_all_with_mode(path: &Path, mode: Mode) -> io::Result<()> {
    DirBuilder::new().recursive(true).mode(mode & MODE_MASK).create(path)
}

/// Explicit chmod; not affected by umask.
pub fn apply_mode(path: &Path, mode: Mode) -> io::Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode & MODE_MASK))
}

/// Permission bits of already-fetched metadata.
pub fn mode_of(meta: &fs::Metadata) -> Mode {
    meta.permissions().mode() & MODE_MASK
}

/// Create/truncate a file for writing; `mode` applies only when the file is new.
pub fn open_file_with_mode(path: &Path, mode: Mode) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode & MODE_MASK)
        .open(path)
}

/// Open for appending; `mode` applies only when the file is new.
pub fn open_append_with_mode(path: &Path, mode: Mode) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(mode & MODE_MASK)
        .open(path)
}
