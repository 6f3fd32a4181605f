//! Shared pool of reusable byte buffers.
//!
//! Design:
//! - Idle buffers live in a `Mutex<VecDeque<Vec<u8>>>`; acquire pops, release pushes.
//! - A `PooledBuffer` owns its bytes exclusively until it is released or dropped,
//!   at which point it is cleared (capacity kept) and handed back.
//! - The pool keeps at most `max_idle` buffers and refuses to pin buffers that grew
//!   beyond `max_retained_capacity`; those are simply freed.
//! - A poisoned mutex is recovered rather than propagated: the free list holds no
//!   invariant a panicking holder could have broken.

use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::trace;

use crate::config::PoolConfig;

static SHARED: OnceLock<Arc<BufferPool>> = OnceLock::new();

/// Thread-safe free list of byte buffers.
pub struct BufferPool {
    free: Mutex<VecDeque<Vec<u8>>>,
    config: PoolConfig,
    acquired: AtomicU64,
    reused: AtomicU64,
    returned: AtomicU64,
    discarded: AtomicU64,
}

/// Snapshot of pool counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Buffers currently waiting in the free list.
    pub idle: usize,
    /// Total `acquire` calls.
    pub acquired: u64,
    /// Acquisitions served from the free list instead of a fresh allocation.
    pub reused: u64,
    /// Buffers put back into the free list.
    pub returned: u64,
    /// Buffers freed on release because the pool was full or they were too large.
    pub discarded: u64,
}

impl BufferPool {
    pub fn new(config: PoolConfig) -> Arc<Self> {
        Arc::new(Self {
            free: Mutex::new(VecDeque::with_capacity(config.max_idle)),
            config,
            acquired: AtomicU64::new(0),
            reused: AtomicU64::new(0),
            returned: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        })
    }

    /// Process-wide pool with default sizing, created on first use.
    pub fn shared() -> Arc<Self> {
        Arc::clone(SHARED.get_or_init(|| BufferPool::new(PoolConfig::default())))
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Take an empty buffer, reusing an idle one when available.
    pub fn acquire(self: &Arc<Self>) -> PooledBuffer {
        self.acquired.fetch_add(1, Ordering::Relaxed);
        let buf = match self.free_list().pop_front() {
            Some(buf) => {
                self.reused.fetch_add(1, Ordering::Relaxed);
                buf
            }
            None => Vec::new(),
        };
        PooledBuffer {
            buf,
            pool: Arc::clone(self),
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            idle: self.free_list().len(),
            acquired: self.acquired.load(Ordering::Relaxed),
            reused: self.reused.load(Ordering::Relaxed),
            returned: self.returned.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }

    fn give_back(&self, mut buf: Vec<u8>) {
        if buf.capacity() > self.config.max_retained_capacity {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            trace!(capacity = buf.capacity(), "buffer too large to pool; freeing");
            return;
        }
        buf.clear();
        let mut free = self.free_list();
        if free.len() >= self.config.max_idle {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            return;
        }
        free.push_back(buf);
        self.returned.fetch_add(1, Ordering::Relaxed);
    }

    fn free_list(&self) -> MutexGuard<'_, VecDeque<Vec<u8>>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}

/// A buffer on loan from a [`BufferPool`]. Returns itself to the pool on drop.
pub struct PooledBuffer {
    buf: Vec<u8>,
    pool: Arc<BufferPool>,
}

impl PooledBuffer {
    /// Zero the length, keep the capacity.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Hand the buffer back to its pool now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }

    pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Deref for PooledBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl AsRef<[u8]> for PooledBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        let buf = mem::take(&mut self.buf);
        self.pool.give_back(buf);
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.buf.len())
            .field("capacity", &self.buf.capacity())
            .finish()
    }
}
