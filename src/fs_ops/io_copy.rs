//! Streaming byte copy.
//!
//! - File-to-file copies go through `io::copy`, which uses in-kernel copy
//!   (copy_file_range/sendfile) on Linux when both ends are plain files.
//! - Arbitrary readers are streamed through a 1 MiB `BufWriter` to cut syscall count.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes appended
//! concurrently after EOF is observed are not included.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

pub(super) const BUF_SIZE: usize = 1024 * 1024;

/// Copy the full remaining contents of `src` into `dst`. Returns bytes copied.
pub(super) fn copy_file_contents(src: &mut File, dst: &mut File) -> io::Result<u64> {
    let bytes = io::copy(src, dst)?;
    dst.flush()?;
    Ok(bytes)
}

/// Stream `reader` to EOF into `dst` through a large write buffer.
pub(super) fn stream_into<R: Read + ?Sized>(reader: &mut R, dst: File) -> io::Result<u64> {
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst);
    let bytes = io::copy(reader, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}
