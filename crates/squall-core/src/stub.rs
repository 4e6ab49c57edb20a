//! Stage execution context — the queues and signals one toxic runs against.
//!
//! A stub is built by the chain builder, handed to exactly one stage, and
//! dies with that stage's run loop. Every blocking wait a toxic performs
//! goes through [`ToxicStub::next_event`] or
//! [`ToxicStub::sleep_or_interrupt`], so the interrupt always preempts it.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::chunk::StreamChunk;

/// Outcome of waiting for the next thing a stage must react to.
#[derive(Debug)]
pub enum StubEvent {
    /// A payload chunk arrived on the input queue.
    Chunk(StreamChunk),
    /// Upstream signalled end-of-stream: the input queue is closed and
    /// fully drained. Observed at most once, after every payload chunk.
    Eos,
    /// The interrupt fired. The stage must wind down without closing
    /// downstream.
    Interrupted,
}

pub struct ToxicStub {
    input: mpsc::Receiver<StreamChunk>,
    output: mpsc::Sender<StreamChunk>,
    interrupt: broadcast::Receiver<()>,
    closed: Option<oneshot::Sender<()>>,
}

impl ToxicStub {
    pub fn new(
        input: mpsc::Receiver<StreamChunk>,
        output: mpsc::Sender<StreamChunk>,
        interrupt: broadcast::Receiver<()>,
        closed: oneshot::Sender<()>,
    ) -> Self {
        Self {
            input,
            output,
            interrupt,
            closed: Some(closed),
        }
    }

    /// Wait for whichever comes first: a chunk, end-of-stream, or the
    /// interrupt. A dropped interrupt sender counts as raised.
    pub async fn next_event(&mut self) -> StubEvent {
        tokio::select! {
            _ = self.interrupt.recv() => StubEvent::Interrupted,
            item = self.input.recv() => match item {
                Some(chunk) => StubEvent::Chunk(chunk),
                None => StubEvent::Eos,
            },
        }
    }

    /// Sleep for `wait`, racing the interrupt. Returns true when the full
    /// duration elapsed, false when the interrupt won.
    pub async fn sleep_or_interrupt(&mut self, wait: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(wait) => true,
            _ = self.interrupt.recv() => false,
        }
    }

    /// Hand a chunk to the next stage. Fails only when the downstream
    /// receiver is gone, i.e. the chain is already tearing down.
    pub async fn forward(
        &self,
        chunk: StreamChunk,
    ) -> Result<(), mpsc::error::SendError<StreamChunk>> {
        self.output.send(chunk).await
    }

    /// Signal end-of-stream downstream. At most one signal ever leaves a
    /// stub; later calls are no-ops.
    pub fn close_downstream(&mut self) {
        if let Some(closed) = self.closed.take() {
            let _ = closed.send(());
        }
    }
}
