use ark_serialize::SerializationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid {kind} encoding: {source}")]
    InvalidEncoding {
        kind: &'static str,
        #[source]
        source: SerializationError,
    },

    #[error("{0} must not be the identity element")]
    IdentityPoint(&'static str),

    #[error("Secret key must not be zero")]
    ZeroScalar,

    #[error("Epoch id must be {expected} bytes, got {actual}")]
    InvalidEpochIdLength { expected: usize, actual: usize },

    #[error("Failed to serialize {kind}: {source}")]
    Serialization {
        kind: &'static str,
        #[source]
        source: SerializationError,
    },
}

pub type Result<T> = std::result::Result<T, CryptoError>;
