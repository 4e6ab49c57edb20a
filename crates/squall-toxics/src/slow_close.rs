//! Slow-close toxic — keeps the connection from closing until after a delay.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use squall_core::{StubEvent, ToxicStub};

/// Forwards chunks untouched, then holds the end-of-stream signal for
/// `delay` milliseconds before letting the close propagate.
///
/// If the interrupt fires while the close is being held, the stage returns
/// without ever closing downstream; teardown on that path belongs to the
/// chain builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlowCloseToxic {
    /// Close delay in milliseconds.
    pub delay: u64,
}

impl SlowCloseToxic {
    pub async fn run(&self, stub: &mut ToxicStub) {
        loop {
            match stub.next_event().await {
                StubEvent::Interrupted => return,
                StubEvent::Chunk(chunk) => {
                    if stub.forward(chunk).await.is_err() {
                        return;
                    }
                }
                StubEvent::Eos => {
                    let delay = Duration::from_millis(self.delay);
                    tracing::trace!(
                        component = "SlowCloseToxic",
                        toxic = "slow_close",
                        sleep_ms = self.delay,
                        "holding the close of the connection"
                    );
                    if stub.sleep_or_interrupt(delay).await {
                        stub.close_downstream();
                    }
                    return;
                }
            }
        }
    }
}
