//! Core configuration types.
//! - RetryPolicy/Backoff bound the destructive-operation retry loops.
//! - PoolConfig sizes the shared content buffer pool.
//! - LogLevel represents verbosity with simple parsing helpers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::{DEFAULT_MAX_IDLE_BUFFERS, DEFAULT_MAX_RETAINED_CAPACITY, MOVE_ATTEMPTS, REMOVE_ATTEMPTS};

/// Program-defined verbosity levels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Delay inserted between two attempts of a retried operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backoff {
    /// Retry immediately.
    #[default]
    None,
    /// Same pause before every retry.
    Fixed(Duration),
    /// `start`, `2*start`, `4*start`... capped at `max`.
    Exponential { start: Duration, max: Duration },
}

impl Backoff {
    /// Pause before retry number `retry` (0 = the first retry after the initial failure).
    pub fn delay_for(&self, retry: u32) -> Option<Duration> {
        match *self {
            Backoff::None => None,
            Backoff::Fixed(d) => Some(d),
            Backoff::Exponential { start, max } => {
                let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
                Some(start.saturating_mul(factor).min(max))
            }
        }
    }
}

/// Attempt budget for a retried destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: REMOVE_ATTEMPTS,
            backoff: Backoff::None,
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, backoff: Backoff) -> Self {
        Self { attempts, backoff }
    }

    /// Policy used by `retry_remove`.
    pub fn remove() -> Self {
        Self::new(REMOVE_ATTEMPTS, Backoff::None)
    }

    /// Policy used by `retry_move`.
    pub fn moves() -> Self {
        Self::new(MOVE_ATTEMPTS, Backoff::None)
    }

    /// Budget actually spent by the retry loop; never below one attempt.
    pub fn effective_attempts(&self) -> u32 {
        self.attempts.max(1)
    }
}

/// Sizing of a `BufferPool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Idle buffers kept for reuse; extra returns are freed.
    pub max_idle: usize,
    /// Buffers that grew beyond this capacity are freed instead of pooled.
    pub max_retained_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle: DEFAULT_MAX_IDLE_BUFFERS,
            max_retained_capacity: DEFAULT_MAX_RETAINED_CAPACITY,
        }
    }
}
