//! Noop toxic — forwards everything untouched.

use serde::{Deserialize, Serialize};
use squall_core::{StubEvent, ToxicStub};

/// The placeholder stage a chain builder installs where a direction has
/// no real toxic configured. No parameters, no delay, no state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoopToxic {}

impl NoopToxic {
    pub async fn run(&self, stub: &mut ToxicStub) {
        loop {
            match stub.next_event().await {
                StubEvent::Interrupted => return,
                StubEvent::Eos => {
                    stub.close_downstream();
                    return;
                }
                StubEvent::Chunk(chunk) => {
                    if stub.forward(chunk).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}
