use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::NetworkError;

/// A message type carried on exactly one gossip topic.
pub trait P2PMessage: Serialize + DeserializeOwned + Debug + Send + Sync + 'static {
    const TOPIC: &'static str;

    fn encode(&self) -> Result<Vec<u8>, NetworkError> {
        serde_json::to_vec(self).map_err(|source| NetworkError::Encode {
            topic: Self::TOPIC,
            source,
        })
    }

    fn decode(payload: &[u8]) -> Result<Self, NetworkError> {
        serde_json::from_slice(payload).map_err(|source| NetworkError::Decode {
            topic: Self::TOPIC,
            source,
        })
    }
}

/// An encoded message a handler wants published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub topic: &'static str,
    pub payload: Vec<u8>,
}

impl OutboundMessage {
    pub fn new<M: P2PMessage>(message: &M) -> Result<Self, NetworkError> {
        Ok(Self {
            topic: M::TOPIC,
            payload: message.encode()?,
        })
    }
}
