//! The closed set of toxic kinds and their shared contract.

use serde_json::Value;
use squall_core::ToxicStub;

use crate::{LatencyToxic, NoopToxic, SlowCloseToxic, SlowOpenToxic};

/// Input queue size for toxics that add no meaningful delay.
/// tokio channels cannot be unbuffered, so the floor is one chunk.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1;

/// Input queue size for toxics that hold chunks back, so an induced delay
/// does not immediately backpressure the upstream stage.
pub const DELAY_QUEUE_CAPACITY: usize = 1024;

/// One toxic kind plus its parameters.
///
/// The set is closed: dispatch is an exhaustive match. Construction by
/// kind name from a stored attribute record goes through
/// [`ToxicRegistry`](crate::ToxicRegistry).
#[derive(Debug, Clone, PartialEq)]
pub enum Toxic {
    Latency(LatencyToxic),
    SlowClose(SlowCloseToxic),
    SlowOpen(SlowOpenToxic),
    Noop(NoopToxic),
}

impl Toxic {
    /// Registry name of this kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Toxic::Latency(_) => "latency",
            Toxic::SlowClose(_) => "slow_close",
            Toxic::SlowOpen(_) => "slow_open",
            Toxic::Noop(_) => "noop",
        }
    }

    /// Capacity the chain builder should size this stage's input queue with.
    pub fn queue_capacity(&self) -> usize {
        match self {
            Toxic::Latency(_) | Toxic::SlowOpen(_) => DELAY_QUEUE_CAPACITY,
            Toxic::SlowClose(_) | Toxic::Noop(_) => DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Parameters as the flat key-value record the config layer stores.
    pub fn attributes(&self) -> Value {
        let attributes = match self {
            Toxic::Latency(t) => serde_json::to_value(t),
            Toxic::SlowClose(t) => serde_json::to_value(t),
            Toxic::SlowOpen(t) => serde_json::to_value(t),
            Toxic::Noop(t) => serde_json::to_value(t),
        };
        attributes.expect("toxic parameters serialize to a flat map")
    }

    /// Drive one connection direction until end-of-stream propagates or
    /// the interrupt fires. Returns exactly once; the stage never resumes.
    pub async fn run(&self, stub: &mut ToxicStub) {
        match self {
            Toxic::Latency(t) => t.run(stub).await,
            Toxic::SlowClose(t) => t.run(stub).await,
            Toxic::SlowOpen(t) => t.run(stub).await,
            Toxic::Noop(t) => t.run(stub).await,
        }
    }
}
