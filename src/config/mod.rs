//! Config module.
//! Typed, in-process configuration only: there is no config file and no environment
//! lookup. Callers embed these types (they are serde-friendly) in their own settings.

pub mod paths;
pub mod types;
mod validate;

pub use paths::path_has_symlink_ancestor;
pub use types::{Backoff, LogLevel, PoolConfig, RetryPolicy};

/// Attempt budget for recursive removal.
pub const REMOVE_ATTEMPTS: u32 = 20;
/// Attempt budget for rename/move.
pub const MOVE_ATTEMPTS: u32 = 20;

pub const DEFAULT_MAX_IDLE_BUFFERS: usize = 16;
/// 64 MiB; larger buffers are dropped on release rather than pinned in the pool.
pub const DEFAULT_MAX_RETAINED_CAPACITY: usize = 64 * 1024 * 1024;
