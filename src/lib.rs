//! Core library for `resilient_fs`.
//!
//! Best-effort filesystem mutation for tooling that stages, moves and verifies files
//! against storage that can fail transiently:
//! - idempotent directory ensure (`fs_ops::ensure_directory`, `ensure_many`);
//! - retry-bounded removal and rename (`fs_ops::retry_remove`, `retry_move`);
//! - strict file copy and best-effort tree copy with permission propagation;
//! - content identity (SHA-256 + size + latency) over pooled, reusable buffers.
//!
//! Every operation is synchronous. Nothing here spawns threads or takes locks, except
//! the buffer pool's free list.

pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod identity;
pub mod logging;
pub mod platform;

pub use config::{Backoff, LogLevel, PoolConfig, RetryPolicy, MOVE_ATTEMPTS, REMOVE_ATTEMPTS};
pub use errors::{EntryFailure, FsError, Result};
pub use identity::{BufferPool, ContentIdentity, DIGEST_LEN};
pub use platform::Mode;

/// Convenience prelude for callers and tests.
pub mod prelude {
    pub use crate::config::{Backoff, LogLevel, PoolConfig, RetryPolicy};
    pub use crate::errors::{EntryFailure, FsError, Result as FsResult};
    pub use crate::fs_ops::{
        absent_many, clear, copy_file, copy_file_ensure_dir, copy_tree, ensure, ensure_directory,
        ensure_many, remove_file_if_exists, rename, retry_move, retry_remove, write_file,
        write_to_file, PathAndModes, TreeCopyReport,
    };
    pub use crate::identity::{BufferPool, ContentIdentity, PooledBuffer};
    pub use crate::platform::Mode;
}
