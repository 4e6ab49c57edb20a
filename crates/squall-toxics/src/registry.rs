//! Construction of toxics by kind name.
//!
//! The registry is an explicit value built at startup and handed to the
//! chain builder; nothing here is process-global. The config layer stores
//! one flat attribute record per toxic and asks the registry to decode it
//! back into a runnable [`Toxic`] by kind name.

use std::collections::HashMap;

use serde_json::Value;

use crate::{LatencyToxic, NoopToxic, SlowCloseToxic, SlowOpenToxic, Toxic};

/// Decodes one kind's flat attribute record into a [`Toxic`].
pub type DecodeFn = fn(&Value) -> Result<Toxic, ToxicError>;

#[derive(Debug, thiserror::Error)]
pub enum ToxicError {
    #[error("unknown toxic kind: {0}")]
    UnknownKind(String),
    #[error("invalid attributes for {kind}: {source}")]
    InvalidAttributes {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub struct ToxicRegistry {
    factories: HashMap<&'static str, DecodeFn>,
}

impl ToxicRegistry {
    /// An empty registry. Embedders with custom kinds start here.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// The registry with every built-in toxic kind registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("latency", decode_latency);
        registry.register("slow_close", decode_slow_close);
        registry.register("slow_open", decode_slow_open);
        registry.register("noop", decode_noop);
        registry
    }

    pub fn register(&mut self, kind: &'static str, decode: DecodeFn) {
        self.factories.insert(kind, decode);
    }

    /// Decode a stored attribute record into a toxic of the named kind.
    pub fn create(&self, kind: &str, attributes: &Value) -> Result<Toxic, ToxicError> {
        let decode = self
            .factories
            .get(kind)
            .ok_or_else(|| ToxicError::UnknownKind(kind.to_string()))?;
        decode(attributes)
    }

    /// Registered kind names, sorted for stable listings.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.factories.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for ToxicRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn decode_latency(attributes: &Value) -> Result<Toxic, ToxicError> {
    decode::<LatencyToxic>("latency", attributes).map(Toxic::Latency)
}

fn decode_slow_close(attributes: &Value) -> Result<Toxic, ToxicError> {
    decode::<SlowCloseToxic>("slow_close", attributes).map(Toxic::SlowClose)
}

fn decode_slow_open(attributes: &Value) -> Result<Toxic, ToxicError> {
    decode::<SlowOpenToxic>("slow_open", attributes).map(Toxic::SlowOpen)
}

fn decode_noop(attributes: &Value) -> Result<Toxic, ToxicError> {
    decode::<NoopToxic>("noop", attributes).map(Toxic::Noop)
}

fn decode<T: serde::de::DeserializeOwned>(
    kind: &'static str,
    attributes: &Value,
) -> Result<T, ToxicError> {
    serde_json::from_value(attributes.clone())
        .map_err(|source| ToxicError::InvalidAttributes { kind, source })
}
