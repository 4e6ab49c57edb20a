//! The unit of data flowing through a toxic chain.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

/// One unit of proxied data plus the moment it became available to the
/// stage currently holding it.
///
/// The timestamp is not "when these bytes entered the pipeline". A stage
/// that delays a chunk advances the timestamp by the amount it actually
/// waited, so the next stage can count time already served upstream
/// against its own delay target instead of delaying from scratch.
#[derive(Debug, Clone)]
pub struct StreamChunk {
    pub data: Bytes,
    pub timestamp: Instant,
}

impl StreamChunk {
    /// A chunk stamped now. Created by the proxy when bytes arrive on the
    /// underlying connection.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            timestamp: Instant::now(),
        }
    }

    /// Time this chunk has spent waiting for the current stage.
    pub fn age(&self) -> Duration {
        self.timestamp.elapsed()
    }

    /// Record a served delay. Timestamps only ever move forward.
    pub fn advance(&mut self, waited: Duration) {
        self.timestamp += waited;
    }
}
