//! Non-Unix implementations of platform helpers.
//!
//! Notes:
//! - There are no POSIX mode bits; the owner-write bit (0o200) is mapped onto the
//!   readonly attribute and everything else is ignored.
//! - ACL management is out of scope.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use super::Mode;

const OWNER_WRITE: Mode = 0o200;

pub fn create_dir_with_mode(path: &Path, _mode: Mode) -> io::Result<()> {
    fs::create_dir(path)
}

pub fn create_dir_all_with_mode(path: &Path, _mode: Mode) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Toggle the readonly attribute from the owner-write bit.
pub fn apply_mode(path: &Path, mode: Mode) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_readonly(mode & OWNER_WRITE == 0);
    fs::set_permissions(path, perms)
}

/// Synthesize POSIX-looking bits: 0o666 when writable, 0o444 when readonly.
pub fn mode_of(meta: &fs::Metadata) -> Mode {
    if meta.permissions().readonly() { 0o444 } else { 0o666 }
}

pub fn open_file_with_mode(path: &Path, _mode: Mode) -> io::Result<File> {
    OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

pub fn open_append_with_mode(path: &Path, _mode: Mode) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
