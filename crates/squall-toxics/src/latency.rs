//! Latency toxic — passes data through with `latency ± jitter` added.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use squall_core::{StubEvent, ToxicStub};

/// Delays each chunk by `latency` plus a fresh uniform draw from
/// `[-jitter, +jitter)` milliseconds.
///
/// The target counts time the chunk already spent upstream: a chunk that
/// sat 30ms in the queue against a 100ms target waits only 70ms here, and
/// a chunk older than its target is released immediately. The initial TCP
/// handshake is not affected by this toxic; see
/// [`SlowOpenToxic`](crate::SlowOpenToxic) for that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyToxic {
    /// Base delay in milliseconds.
    pub latency: u64,
    /// Jitter bound in milliseconds.
    pub jitter: u64,
}

impl LatencyToxic {
    /// Per-chunk delay target. Ordinary pseudo-randomness; this simulates
    /// timing, it does not hide it.
    fn target(&self) -> Duration {
        let mut target = self.latency as i64;
        if self.jitter > 0 {
            let jitter = self.jitter as i64;
            target += rand::thread_rng().gen_range(-jitter..jitter);
        }
        Duration::from_millis(target.max(0) as u64)
    }

    pub async fn run(&self, stub: &mut ToxicStub) {
        loop {
            match stub.next_event().await {
                StubEvent::Interrupted => return,
                StubEvent::Eos => {
                    // The close signal itself is never delayed here.
                    stub.close_downstream();
                    return;
                }
                StubEvent::Chunk(mut chunk) => {
                    let wait = self.target().saturating_sub(chunk.age());
                    if stub.sleep_or_interrupt(wait).await {
                        tracing::trace!(
                            component = "LatencyToxic",
                            toxic = "latency",
                            sleep_ms = wait.as_millis() as u64,
                            len = chunk.data.len(),
                            "releasing chunk after delay"
                        );
                        chunk.advance(wait);
                        if stub.forward(chunk).await.is_err() {
                            return;
                        }
                    } else {
                        // Interrupted mid-delay: release the chunk untouched
                        // rather than dropping it, then wind down.
                        let _ = stub.forward(chunk).await;
                        return;
                    }
                }
            }
        }
    }
}
