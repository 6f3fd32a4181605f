//! Content identity: fingerprint files and recycle the read buffers.

mod pool;
mod record;

pub use pool::{BufferPool, PoolStats, PooledBuffer};
pub use record::{ContentIdentity, DIGEST_LEN};
