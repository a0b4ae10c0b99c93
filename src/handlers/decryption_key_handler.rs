use async_trait::async_trait;
use shutter_crypto::{EonPublicKey, EpochId, EpochSecretKey, verify_epoch_secret_key};
use shutter_network::{
    DecryptionKey, MessageHandler, NetworkError, OutboundMessage, P2PMessage, ValidationResult,
};
use shutter_repository::{DecryptionKeyEntry, RepositoryError, RepositoryManager, RepositoryScope};

/// Validates decryption keys released by the keypers and stores accepted ones.
///
/// A key is accepted only if it belongs to this instance and verifies against
/// the stored public key of its eon for the claimed epoch.
pub(crate) struct DecryptionKeyHandler {
    instance_id: u64,
    repository: RepositoryManager,
}

impl DecryptionKeyHandler {
    pub(crate) fn new(instance_id: u64, repository: RepositoryManager) -> Self {
        Self {
            instance_id,
            repository,
        }
    }

    /// Loads the public key of `eon`, or the verdict for a key that cannot be
    /// checked against it: `Ignore` on storage failure, `Reject` otherwise.
    async fn eon_public_key(&self, eon: i64) -> Result<EonPublicKey, ValidationResult> {
        let entry = match self.repository.eon_repository().get(eon).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                tracing::debug!(eon, "Rejecting decryption key for unknown eon");
                return Err(ValidationResult::Reject);
            }
            Err(error) => {
                tracing::warn!(eon, error = %error, "Failed to load eon public key");
                return Err(ValidationResult::Ignore);
            }
        };

        EonPublicKey::from_bytes(&entry.public_key).map_err(|error| {
            tracing::warn!(eon, error = %error, "Stored eon public key is malformed");
            ValidationResult::Reject
        })
    }
}

#[async_trait]
impl MessageHandler for DecryptionKeyHandler {
    type Message = DecryptionKey;

    async fn validate(&self, message: &DecryptionKey) -> ValidationResult {
        if message.instance_id != self.instance_id {
            tracing::debug!(
                instance_id = message.instance_id,
                expected_instance_id = self.instance_id,
                "Rejecting decryption key for other instance"
            );
            return ValidationResult::Reject;
        }
        if message.eon < 0 {
            tracing::debug!(eon = message.eon, "Rejecting decryption key with negative eon");
            return ValidationResult::Reject;
        }

        let epoch_id = match EpochId::from_bytes(&message.epoch_id) {
            Ok(epoch_id) => epoch_id,
            Err(error) => {
                tracing::debug!(
                    error = %error,
                    "Rejecting decryption key with malformed epoch id"
                );
                return ValidationResult::Reject;
            }
        };
        let key = match EpochSecretKey::from_bytes(&message.key) {
            Ok(key) => key,
            Err(error) => {
                tracing::debug!(error = %error, "Rejecting malformed decryption key");
                return ValidationResult::Reject;
            }
        };

        let eon_public_key = match self.eon_public_key(message.eon).await {
            Ok(public_key) => public_key,
            Err(verdict) => return verdict,
        };

        if !verify_epoch_secret_key(&key, &eon_public_key, &epoch_id) {
            tracing::debug!(
                eon = message.eon,
                epoch_id = %hex::encode(&message.epoch_id),
                "Rejecting decryption key that does not match eon public key"
            );
            return ValidationResult::Reject;
        }

        ValidationResult::Accept
    }

    async fn handle(&self, message: DecryptionKey) -> Result<Vec<OutboundMessage>, NetworkError> {
        let to_network_error =
            |error: RepositoryError| NetworkError::handler(DecryptionKey::TOPIC, error);
        let epoch_id = hex::encode(&message.epoch_id);

        let uow = self.repository.begin().await.map_err(to_network_error)?;
        let inserted = uow
            .decryption_key_repository()
            .insert(&DecryptionKeyEntry {
                eon: message.eon,
                epoch_id: message.epoch_id,
                key: message.key,
            })
            .await
            .map_err(to_network_error)?;
        uow.commit().await.map_err(to_network_error)?;

        if inserted {
            tracing::info!(eon = message.eon, epoch_id = %epoch_id, "Stored decryption key");
        } else {
            tracing::debug!(
                eon = message.eon,
                epoch_id = %epoch_id,
                "Decryption key already stored"
            );
        }

        Ok(Vec::new())
    }
}
