//! Write-with-ensured-directory primitives.
//! The parent directory is ensured first, then the reader is streamed into the file.
//! Writes are in place (create/truncate), not atomic.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::Result;
use crate::platform::{self, Mode};

use super::ensure::ensure_directory;
use super::helpers::io_err;
use super::io_copy;

/// Ensure the parent of `path` with `dir_mode`, then create/truncate `path` and fill it
/// from `reader`. The file gets the process default mode. Returns bytes written.
pub fn write_to_file<R: Read + ?Sized>(path: &Path, dir_mode: Mode, reader: &mut R) -> Result<u64> {
    ensure_parent(path, dir_mode)?;
    let f = File::create(path).map_err(io_err("create", path))?;
    io_copy::stream_into(reader, f).map_err(io_err("write", path))
}

/// Like [`write_to_file`], but a newly created file gets `file_mode`.
pub fn write_file<R: Read + ?Sized>(path: &Path, dir_mode: Mode, file_mode: Mode, reader: &mut R) -> Result<u64> {
    ensure_parent(path, dir_mode)?;
    let f = platform::open_file_with_mode(path, file_mode).map_err(io_err("create", path))?;
    io_copy::stream_into(reader, f).map_err(io_err("write", path))
}

fn ensure_parent(path: &Path, dir_mode: Mode) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent, dir_mode),
        _ => Ok(()),
    }
}
