//! Peer-to-peer message plumbing.
//!
//! Messages are typed per gossip topic. A [`MessageHandler`] validates a decoded
//! message before anything is persisted and handles it only once accepted; the
//! [`MessageRouter`] dispatches raw payloads to handlers by topic and reports
//! validation outcomes in the form the gossipsub validator expects.

pub mod error;
mod handler;
pub mod message;
pub mod messages;
mod router;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::NetworkError;
pub use handler::{MessageHandler, ValidationResult};
// Re-export libp2p types for application use
pub use libp2p::gossipsub::MessageAcceptance;
pub use message::{OutboundMessage, P2PMessage};
pub use messages::DecryptionKey;
pub use router::MessageRouter;
