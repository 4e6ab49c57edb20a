//! Slow-open toxic — delays the first chunk of a connection direction.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use squall_core::{StubEvent, ToxicStub};

/// Adds `delay` milliseconds to the first chunk only, simulating a slow
/// TCP handshake — which the latency toxic deliberately does not cover.
///
/// Once the first chunk has been released the stage is warm and every
/// later chunk passes through untouched. End-of-stream is never delayed;
/// only [`SlowCloseToxic`](crate::SlowCloseToxic) touches the close.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlowOpenToxic {
    /// Handshake delay in milliseconds.
    pub delay: u64,
}

impl SlowOpenToxic {
    pub async fn run(&self, stub: &mut ToxicStub) {
        // One-time handshake memory. Lives for this run only: a stage
        // never resumes after returning, so cold/warm cannot leak across
        // connections.
        let mut warm = false;

        loop {
            match stub.next_event().await {
                StubEvent::Interrupted => return,
                StubEvent::Eos => {
                    stub.close_downstream();
                    return;
                }
                StubEvent::Chunk(mut chunk) => {
                    if warm {
                        if stub.forward(chunk).await.is_err() {
                            return;
                        }
                        continue;
                    }

                    let delay = Duration::from_millis(self.delay);
                    tracing::trace!(
                        component = "SlowOpenToxic",
                        toxic = "slow_open",
                        sleep_ms = self.delay,
                        len = chunk.data.len(),
                        "delaying the first chunk of the connection"
                    );
                    if stub.sleep_or_interrupt(delay).await {
                        warm = true;
                        chunk.advance(delay);
                        if stub.forward(chunk).await.is_err() {
                            return;
                        }
                    } else {
                        // Interrupted during the handshake delay: the
                        // chunk still goes out, warm stays false, and the
                        // stage exits.
                        let _ = stub.forward(chunk).await;
                        return;
                    }
                }
            }
        }
    }
}
