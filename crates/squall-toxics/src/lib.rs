//! squall-toxics — the toxics and their registry.
//!
//! A toxic is one stage degrading one direction of a proxied connection:
//! it pulls chunks from its input queue, optionally delays them, and pushes
//! them to its output queue until end-of-stream or the chain's interrupt.
//! The chain builder wires stages back-to-back and sizes each input queue
//! from the stage's preferred capacity.

mod latency;
mod noop;
mod registry;
mod slow_close;
mod slow_open;
mod toxic;

#[cfg(test)]
mod test_stage;

pub use latency::LatencyToxic;
pub use noop::NoopToxic;
pub use registry::{ToxicError, ToxicRegistry};
pub use slow_close::SlowCloseToxic;
pub use slow_open::SlowOpenToxic;
pub use toxic::{Toxic, DEFAULT_QUEUE_CAPACITY, DELAY_QUEUE_CAPACITY};
