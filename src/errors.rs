//! Typed error definitions for resilient_fs.
//! Every library operation reports one of these; none of them panic or exit.
//! Variants wrapping an io::Error expose it through `source()` and keep it out of
//! their own message, so chain reporters (`{:#}`, anyhow) print it once.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fs_ops::helpers::describe_io;

pub type Result<T> = std::result::Result<T, FsError>;

#[derive(Debug, Error)]
pub enum FsError {
    /// A path expected to be a directory exists as something else.
    #[error("not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    /// A retried destructive operation failed on every attempt.
    #[error("{op} '{}' failed after {attempts} attempts", .path.display())]
    RetriesExhausted {
        op: &'static str,
        path: PathBuf,
        attempts: u32,
        #[source]
        source: io::Error,
    },

    /// A non-retried I/O failure (open, create, stat, read, chmod).
    #[error("{}", describe_io(.op, .path, .source))]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A tree copy finished, but some entries could not be copied.
    #[error("copy of '{}' left {} uncopied", .root.display(), count_entries(.failures.len()))]
    PartialTree {
        root: PathBuf,
        failures: Vec<EntryFailure>,
    },

    #[error("content buffer was already released")]
    BufferReleased,
}

impl FsError {
    /// Underlying io::Error, when there is exactly one.
    pub fn io_source(&self) -> Option<&io::Error> {
        match self {
            FsError::RetriesExhausted { source, .. } | FsError::Io { source, .. } => Some(source),
            _ => None,
        }
    }

    /// io::ErrorKind of the underlying failure, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        self.io_source().map(io::Error::kind)
    }
}

fn count_entries(n: usize) -> String {
    if n == 1 { "1 entry".to_string() } else { format!("{n} entries") }
}

/// One entry a tree copy could not reproduce at the destination.
#[derive(Debug)]
pub struct EntryFailure {
    /// Source-side path of the entry.
    pub path: PathBuf,
    pub error: FsError,
}
