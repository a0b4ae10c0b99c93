use async_trait::async_trait;
use libp2p::gossipsub::MessageAcceptance;

use crate::{
    error::NetworkError,
    message::{OutboundMessage, P2PMessage},
};

/// Outcome of validating an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    /// Message is valid; it is propagated and handed to [`MessageHandler::handle`].
    Accept,
    /// Message is invalid; it is dropped and the sender penalised.
    Reject,
    /// Message cannot be judged right now; it is dropped without penalty.
    Ignore,
}

impl ValidationResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationResult::Accept => "accept",
            ValidationResult::Reject => "reject",
            ValidationResult::Ignore => "ignore",
        }
    }
}

impl From<ValidationResult> for MessageAcceptance {
    fn from(result: ValidationResult) -> Self {
        match result {
            ValidationResult::Accept => MessageAcceptance::Accept,
            ValidationResult::Reject => MessageAcceptance::Reject,
            ValidationResult::Ignore => MessageAcceptance::Ignore,
        }
    }
}

/// Application handler for one message type.
///
/// `validate` must not have side effects. `handle` is only ever called with
/// messages that `validate` accepted.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    type Message: P2PMessage;

    async fn validate(&self, message: &Self::Message) -> ValidationResult;

    async fn handle(&self, message: Self::Message) -> Result<Vec<OutboundMessage>, NetworkError>;
}
