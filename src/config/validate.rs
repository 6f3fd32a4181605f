//! Config validation logic.
//! Rejects budgets and pool sizes that would make the operations meaningless.

use anyhow::{bail, Result};
use tracing::debug;

use super::types::{Backoff, PoolConfig, RetryPolicy};

impl RetryPolicy {
    /// Validate the attempt budget and backoff bounds.
    pub fn validate(&self) -> Result<()> {
        if self.attempts == 0 {
            bail!("retry policy must allow at least one attempt");
        }
        if let Backoff::Exponential { start, max } = self.backoff {
            if start.is_zero() {
                bail!("exponential backoff start must be non-zero");
            }
            if start > max {
                bail!(
                    "exponential backoff start ({:?}) exceeds its cap ({:?})",
                    start,
                    max
                );
            }
        }
        debug!(attempts = self.attempts, backoff = ?self.backoff, "retry policy validated");
        Ok(())
    }
}

impl PoolConfig {
    /// Validate pool sizing.
    pub fn validate(&self) -> Result<()> {
        if self.max_idle == 0 {
            bail!("buffer pool must keep at least one idle buffer");
        }
        if self.max_retained_capacity == 0 {
            bail!("buffer pool max_retained_capacity must be non-zero");
        }
        Ok(())
    }
}
