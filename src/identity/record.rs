//! Content identity record: SHA-256 digest, size and latency of one file, plus the
//! raw bytes held in a pooled buffer.
//!
//! Buffer lifetime:
//! - The first `compute` acquires a buffer from the pool; later calls on the same
//!   record clear and refill it, so repeated fingerprinting does not reallocate.
//! - `release` hands the buffer back and clears the record's reference. Calling it
//!   again is a no-op; reading `bytes()` afterwards yields `FsError::BufferReleased`.
//! - Dropping the record releases the buffer as well.

use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::errors::{FsError, Result};
use crate::fs_ops::helpers::io_err;

use super::pool::{BufferPool, PooledBuffer};

/// Digest length in bytes (SHA-256).
pub const DIGEST_LEN: usize = 32;

#[derive(Debug, Default)]
pub struct ContentIdentity {
    pub digest: [u8; DIGEST_LEN],
    /// Bytes digested; equals `bytes()?.len()` after a successful compute.
    pub size: u64,
    /// Wall-clock time of the last compute, recorded on failure too.
    pub latency: Duration,
    buffer: Option<PooledBuffer>,
}

impl ContentIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute a fresh record for `path` using the shared pool.
    pub fn of(path: &Path) -> Result<Self> {
        let mut id = Self::new();
        id.compute(path)?;
        Ok(id)
    }

    /// (Re)compute this record from `path`, drawing a buffer from the shared pool if needed.
    pub fn compute(&mut self, path: &Path) -> Result<()> {
        self.compute_with(path, &BufferPool::shared())
    }

    /// (Re)compute this record from `path`, drawing a buffer from `pool` if needed.
    ///
    /// A stat failure, or a read failure after a successful stat, is returned. On
    /// failure `digest` and `size` are zeroed and `latency` still reflects the attempt.
    pub fn compute_with(&mut self, path: &Path, pool: &Arc<BufferPool>) -> Result<()> {
        let start = Instant::now();
        let res = self.fill(path, pool);
        self.latency = start.elapsed();
        if res.is_err() {
            self.digest = [0; DIGEST_LEN];
            self.size = 0;
            if let Some(buf) = self.buffer.as_mut() {
                buf.clear();
            }
        }
        trace!(path = %path.display(), latency_us = self.latency.as_micros() as u64, ok = res.is_ok(), "content identity computed");
        res
    }

    fn fill(&mut self, path: &Path, pool: &Arc<BufferPool>) -> Result<()> {
        let meta = fs::metadata(path).map_err(io_err("stat", path))?;
        let expected = meta.len();

        if let Some(buf) = self.buffer.as_mut() {
            buf.clear();
            debug!(path = %path.display(), capacity = buf.capacity(), "reusing content buffer");
        }
        let buf = self.buffer.get_or_insert_with(|| pool.acquire());

        let mut file = File::open(path).map_err(io_err("open", path))?;
        let vec = buf.as_mut_vec();
        vec.reserve(usize::try_from(expected).unwrap_or(0));
        file.read_to_end(vec).map_err(io_err("read", path))?;

        let size = vec.len() as u64;
        if size != expected {
            debug!(path = %path.display(), stat_size = expected, read_size = size, "file changed size while reading");
        }
        self.digest.copy_from_slice(&Sha256::digest(vec.as_slice()));
        self.size = size;
        Ok(())
    }

    /// Raw bytes from the last successful compute.
    pub fn bytes(&self) -> Result<&[u8]> {
        self.buffer.as_deref().ok_or(FsError::BufferReleased)
    }

    pub fn is_released(&self) -> bool {
        self.buffer.is_none()
    }

    /// Return the buffer to its pool. Idempotent.
    pub fn release(&mut self) {
        if let Some(buf) = self.buffer.take() {
            buf.release();
        }
    }

    /// Lowercase hex rendering of the digest.
    pub fn hex_digest(&self) -> String {
        hex::encode(self.digest)
    }

    /// Same size and digest.
    pub fn same_content(&self, other: &ContentIdentity) -> bool {
        self.size == other.size && self.digest == other.digest
    }
}
