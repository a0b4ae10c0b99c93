use std::{collections::HashMap, sync::Arc, time::Instant};

use async_trait::async_trait;
use libp2p::gossipsub::MessageAcceptance;

use crate::{
    error::NetworkError,
    handler::{MessageHandler, ValidationResult},
    message::{OutboundMessage, P2PMessage},
};

#[async_trait]
trait TopicHandler: Send + Sync {
    async fn validate(&self, payload: &[u8]) -> ValidationResult;

    async fn handle(&self, payload: &[u8]) -> Result<Vec<OutboundMessage>, NetworkError>;
}

struct TypedHandler<H>(H);

#[async_trait]
impl<H: MessageHandler> TopicHandler for TypedHandler<H> {
    async fn validate(&self, payload: &[u8]) -> ValidationResult {
        match H::Message::decode(payload) {
            Ok(message) => self.0.validate(&message).await,
            Err(error) => {
                tracing::debug!(
                    topic = H::Message::TOPIC,
                    %error,
                    "Rejecting undecodable message"
                );
                ValidationResult::Reject
            }
        }
    }

    async fn handle(&self, payload: &[u8]) -> Result<Vec<OutboundMessage>, NetworkError> {
        let message = H::Message::decode(payload)?;
        self.0.handle(message).await
    }
}

/// Dispatches raw gossip payloads to the handler registered for their topic.
#[derive(Clone, Default)]
pub struct MessageRouter {
    handlers: HashMap<&'static str, Arc<dyn TopicHandler>>,
}

impl MessageRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for its message topic, replacing any previous one.
    pub fn register<H>(&mut self, handler: H) -> &mut Self
    where
        H: MessageHandler + 'static,
    {
        self.handlers
            .insert(H::Message::TOPIC, Arc::new(TypedHandler(handler)));
        self
    }

    pub fn topics(&self) -> Vec<&'static str> {
        let mut topics: Vec<_> = self.handlers.keys().copied().collect();
        topics.sort_unstable();
        topics
    }

    /// Gossipsub validation verdict for a payload. Topics without a handler are ignored.
    pub async fn validate(&self, topic: &str, payload: &[u8]) -> MessageAcceptance {
        let Some(handler) = self.handlers.get(topic) else {
            tracing::debug!(topic, "Ignoring message on unregistered topic");
            return MessageAcceptance::Ignore;
        };

        let started = Instant::now();
        let result = handler.validate(payload).await;
        shutter_observability::record_network_message_validation(
            topic,
            result.as_str(),
            started.elapsed(),
        );
        result.into()
    }

    /// Validates a payload and, if accepted, handles it.
    ///
    /// Returns the validation verdict together with the messages the handler
    /// wants published (always empty unless accepted).
    pub async fn process(
        &self,
        topic: &str,
        payload: &[u8],
    ) -> Result<(MessageAcceptance, Vec<OutboundMessage>), NetworkError> {
        let handler = self
            .handlers
            .get(topic)
            .ok_or_else(|| NetworkError::UnknownTopic(topic.to_string()))?;

        let acceptance = self.validate(topic, payload).await;
        if !matches!(acceptance, MessageAcceptance::Accept) {
            return Ok((acceptance, Vec::new()));
        }

        match handler.handle(payload).await {
            Ok(outbound) => {
                shutter_observability::record_network_message_handled(topic, "ok");
                Ok((acceptance, outbound))
            }
            Err(error) => {
                shutter_observability::record_network_message_handled(topic, "error");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::DecryptionKey;

    #[derive(Default)]
    struct CountingHandler {
        accept_instance: u64,
        handled: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MessageHandler for CountingHandler {
        type Message = DecryptionKey;

        async fn validate(&self, message: &DecryptionKey) -> ValidationResult {
            if message.instance_id == self.accept_instance {
                ValidationResult::Accept
            } else {
                ValidationResult::Reject
            }
        }

        async fn handle(
            &self,
            _message: DecryptionKey,
        ) -> Result<Vec<OutboundMessage>, NetworkError> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    fn payload(instance_id: u64) -> Vec<u8> {
        DecryptionKey {
            instance_id,
            eon: 1,
            epoch_id: vec![0; 32],
            key: vec![1; 32],
        }
        .encode()
        .unwrap()
    }

    fn router(handled: Arc<AtomicUsize>) -> MessageRouter {
        let mut router = MessageRouter::new();
        router.register(CountingHandler {
            accept_instance: 42,
            handled,
        });
        router
    }

    #[tokio::test]
    async fn test_only_accepted_messages_are_handled() {
        let handled = Arc::new(AtomicUsize::new(0));
        let router = router(Arc::clone(&handled));

        let (acceptance, _) = router.process("decryptionKey", &payload(43)).await.unwrap();
        assert!(matches!(acceptance, MessageAcceptance::Reject));
        assert_eq!(handled.load(Ordering::SeqCst), 0);

        let (acceptance, outbound) = router
            .process("decryptionKey", &payload(42))
            .await
            .unwrap();
        assert!(matches!(acceptance, MessageAcceptance::Accept));
        assert!(outbound.is_empty());
        assert_eq!(handled.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_garbage_payload_is_rejected() {
        let router = router(Arc::new(AtomicUsize::new(0)));
        assert!(matches!(
            router.validate("decryptionKey", b"not json").await,
            MessageAcceptance::Reject
        ));
    }

    #[tokio::test]
    async fn test_unknown_topic() {
        let router = router(Arc::new(AtomicUsize::new(0)));
        assert!(matches!(
            router.validate("other", &payload(42)).await,
            MessageAcceptance::Ignore
        ));
        assert!(matches!(
            router.process("other", &payload(42)).await,
            Err(NetworkError::UnknownTopic(_))
        ));
        assert_eq!(router.topics(), ["decryptionKey"]);
    }
}
