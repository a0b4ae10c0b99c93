use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    /// Payload received on a topic could not be decoded into its message type
    #[error("Failed to decode message on topic {topic}")]
    Decode {
        topic: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode message for topic {topic}")]
    Encode {
        topic: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("No handler registered for topic {0}")]
    UnknownTopic(String),

    /// Handler failed while processing an accepted message
    #[error("Handler for topic {topic} failed")]
    Handler {
        topic: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl NetworkError {
    pub fn handler(
        topic: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Handler {
            topic,
            source: Box::new(source),
        }
    }
}
