//! Test harness — run one toxic as a spawned stage wired to fresh queues.

use squall_core::{StreamChunk, ToxicStub};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::Toxic;

pub struct Stage {
    pub tx: mpsc::Sender<StreamChunk>,
    pub rx: mpsc::Receiver<StreamChunk>,
    pub interrupt: broadcast::Sender<()>,
    pub closed: oneshot::Receiver<()>,
    pub task: JoinHandle<()>,
}

/// Spawn a stage the way the chain builder would: queues sized from the
/// toxic's preferred capacity, a shared-style interrupt, a close signal.
pub fn spawn(toxic: Toxic) -> Stage {
    let capacity = toxic.queue_capacity();
    let (tx, input) = mpsc::channel(capacity);
    let (output, rx) = mpsc::channel(capacity);
    let (interrupt, interrupt_rx) = broadcast::channel(1);
    let (closed_tx, closed) = oneshot::channel();

    let task = tokio::spawn(async move {
        let mut stub = ToxicStub::new(input, output, interrupt_rx, closed_tx);
        toxic.run(&mut stub).await;
    });

    Stage {
        tx,
        rx,
        interrupt,
        closed,
        task,
    }
}

/// Park the current test until every spawned task is blocked, so a stage
/// is known to be sitting in its next wait before the test acts on it.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
