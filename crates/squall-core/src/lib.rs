//! squall-core — stream chunks and the stage execution context.
//! Every toxic depends on this crate; the proxy's chain builder wires
//! stages together out of the types defined here.

pub mod chunk;
pub mod stub;

pub use chunk::StreamChunk;
pub use stub::{StubEvent, ToxicStub};
