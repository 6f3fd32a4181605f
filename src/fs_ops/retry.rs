//! Retry-bounded destructive operations.
//!
//! Removal and rename are known to fail transiently on some backends (EBUSY while a
//! scanner holds a handle, ESTALE on NFS, slow unlink). A bounded loop absorbs those
//! without caller-side retries. The default policy retries immediately; a `Backoff`
//! can be configured per call without changing the success/failure contract.

use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use tracing::{debug, trace, warn};

use crate::config::RetryPolicy;
use crate::errors::{FsError, Result};

use super::helpers::{io_err, is_not_found};

/// Run `op` until it succeeds or `policy` runs out of attempts.
///
/// Every failure consumes one attempt; on exhaustion the last io::Error is returned
/// inside `FsError::RetriesExhausted`. `name` and `path` only label the error and logs.
pub fn retry<T, F>(policy: &RetryPolicy, name: &'static str, path: &Path, mut op: F) -> Result<T>
where
    F: FnMut() -> io::Result<T>,
{
    let budget = policy.effective_attempts();
    let mut remaining = budget;
    loop {
        match op() {
            Ok(v) => {
                if remaining < budget {
                    debug!(op = name, path = %path.display(), failed_attempts = budget - remaining, "recovered after retry");
                }
                return Ok(v);
            }
            Err(e) => {
                remaining -= 1;
                if remaining == 0 {
                    warn!(op = name, path = %path.display(), attempts = budget, error = %e, "retry budget exhausted");
                    return Err(FsError::RetriesExhausted {
                        op: name,
                        path: path.to_path_buf(),
                        attempts: budget,
                        source: e,
                    });
                }
                trace!(op = name, path = %path.display(), remaining, error = %e, "attempt failed");
                if let Some(delay) = policy.backoff.delay_for(budget - remaining - 1) {
                    thread::sleep(delay);
                }
            }
        }
    }
}

/// Remove whatever is at `path` (file, symlink or whole directory tree).
/// An absent path is a successful no-op.
pub(crate) fn remove_all(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if is_not_found(&e) => return Ok(()),
        Err(e) => return Err(e),
    };
    let res = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match res {
        Err(e) if is_not_found(&e) => Ok(()),
        other => other,
    }
}

/// Recursively remove `path`, retrying up to the default removal budget.
pub fn retry_remove(path: &Path) -> Result<()> {
    retry_remove_with(path, &RetryPolicy::remove())
}

pub fn retry_remove_with(path: &Path, policy: &RetryPolicy) -> Result<()> {
    retry(policy, "remove", path, || remove_all(path))
}

/// Rename `old` to `new`, retrying up to the default move budget.
/// The parent of `new` is not created; see [`super::copy::rename`] for that.
pub fn retry_move(old: &Path, new: &Path) -> Result<()> {
    retry_move_with(old, new, &RetryPolicy::moves())
}

pub fn retry_move_with(old: &Path, new: &Path, policy: &RetryPolicy) -> Result<()> {
    retry(policy, "rename", old, || fs::rename(old, new))
}

/// Remove every path, attempting all of them; the last failure is returned.
pub fn absent_many<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    let mut last = None;
    for p in paths {
        if let Err(e) = retry_remove(p.as_ref()) {
            last = Some(e);
        }
    }
    last.map_or(Ok(()), Err)
}

/// Empty the directory at `path` but keep the directory itself.
/// A missing directory is already clear. Every child is attempted; the last failure is returned.
pub fn clear(path: &Path) -> Result<()> {
    let entries = match fs::read_dir(path) {
        Ok(rd) => rd,
        Err(e) if is_not_found(&e) => return Ok(()),
        Err(e) => return Err(io_err("read_dir", path)(e)),
    };

    let mut last = None;
    for entry in entries {
        let res = entry
            .map_err(io_err("read_dir", path))
            .and_then(|entry| retry_remove(&entry.path()));
        if let Err(e) = res {
            last = Some(e);
        }
    }
    last.map_or(Ok(()), Err)
}

/// Single `remove_file`; a missing file is a success.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if is_not_found(&e) => Ok(()),
        Err(e) => Err(io_err("remove", path)(e)),
    }
}
