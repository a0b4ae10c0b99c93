use std::{collections::HashMap, sync::Arc, time::Instant};

use shutter_blockchain::{
    Address, AddressSetReader, BlockchainError, ChainEvent, EventSource, EventSyncUpdate,
    MonitoredContracts, SyncCursor,
};
use shutter_repository::{EventSyncProgress, RepositoryManager, RepositoryScope, UnitOfWork};
use tokio_util::sync::CancellationToken;

use super::{
    error::SyncError,
    handlers::{self, CredentialKind},
};

/// Applies chain events to the local store, one transaction per event.
///
/// The domain mutation and the cursor advance commit together, so the stored
/// cursor always describes a consistent prefix of the event log.
pub(crate) struct EventApplier {
    repository: RepositoryManager,
    address_sets: Arc<dyn AddressSetReader>,
    credential_registries: HashMap<Address, CredentialKind>,
}

impl EventApplier {
    pub(crate) fn new(
        repository: RepositoryManager,
        address_sets: Arc<dyn AddressSetReader>,
        contracts: &MonitoredContracts,
    ) -> Self {
        let credential_registries = HashMap::from([
            (contracts.bls_public_key_registry, CredentialKind::PublicKey),
            (contracts.bls_signature_registry, CredentialKind::Signature),
        ]);

        Self {
            repository,
            address_sets,
            credential_registries,
        }
    }

    /// Consumes updates from `source` until `shutdown` fires or an update fails
    /// to apply.
    pub(crate) async fn run(
        &self,
        source: &dyn EventSource,
        shutdown: &CancellationToken,
    ) -> Result<(), SyncError> {
        loop {
            let update = match source.next(shutdown).await {
                Ok(update) => update,
                Err(BlockchainError::Cancelled) => return Ok(()),
                Err(error) => return Err(error.into()),
            };

            // Dropping an in-flight apply rolls its transaction back.
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => return Ok(()),
                applied = self.apply(&update) => {
                    applied?;
                }
            }
        }
    }

    /// Applies one update and returns the committed cursor.
    #[tracing::instrument(
        name = "sync.apply",
        skip(self, update),
        fields(
            block_number = update.block_number,
            log_index = update.log_index,
            kind = tracing::field::Empty,
        )
    )]
    pub(crate) async fn apply(&self, update: &EventSyncUpdate) -> Result<SyncCursor, SyncError> {
        let kind = update.event.as_ref().map_or("absent", ChainEvent::kind);
        tracing::Span::current().record("kind", kind);
        let started = Instant::now();

        let result = self.apply_and_commit(update).await;

        let status = if result.is_ok() { "ok" } else { "error" };
        shutter_observability::record_sync_event_applied(kind, status, started.elapsed());
        match &result {
            Ok(cursor) => {
                shutter_observability::record_sync_cursor(cursor.block_number, cursor.log_index);
                tracing::trace!(
                    next_block_number = cursor.block_number,
                    next_log_index = cursor.log_index,
                    "Sync cursor advanced"
                );
            }
            Err(error) => tracing::error!(error = %error, "Failed to apply chain event"),
        }

        result
    }

    async fn apply_and_commit(&self, update: &EventSyncUpdate) -> Result<SyncCursor, SyncError> {
        let uow = self.repository.begin().await?;

        match self.apply_in(&uow, update).await {
            Ok(cursor) => {
                uow.commit().await.map_err(SyncError::Commit)?;
                Ok(cursor)
            }
            Err(error) => {
                if let Err(rollback_error) = uow.rollback().await {
                    tracing::warn!(
                        error = %rollback_error,
                        "Failed to roll back event transaction"
                    );
                }
                Err(error)
            }
        }
    }

    async fn apply_in(
        &self,
        uow: &UnitOfWork,
        update: &EventSyncUpdate,
    ) -> Result<SyncCursor, SyncError> {
        match &update.event {
            None => tracing::trace!("No further events in block"),
            Some(ChainEvent::KeypersConfigsListNewConfig(event)) => {
                handlers::handle_keyper_set(uow, self.address_sets.as_ref(), event).await?;
            }
            Some(ChainEvent::DecryptorsConfigsListNewConfig(event)) => {
                handlers::handle_decryptor_set(uow, self.address_sets.as_ref(), event).await?;
            }
            Some(ChainEvent::Registered(registration)) => {
                match self.credential_registries.get(&registration.registry) {
                    Some(kind) => {
                        handlers::handle_registration(uow, *kind, registration).await?;
                    }
                    None => tracing::warn!(
                        registry = %registration.registry,
                        account = %registration.account,
                        "Ignoring registration from unknown registry"
                    ),
                }
            }
            Some(ChainEvent::Unknown { contract, topic0 }) => tracing::debug!(
                contract = %contract,
                topic0 = ?topic0,
                "Ignoring unknown event"
            ),
        }

        let cursor = update.next_cursor().ok_or(SyncError::CursorOverflow {
            block_number: update.block_number,
            log_index: update.log_index,
        })?;
        uow.event_sync_progress_repository()
            .update(EventSyncProgress {
                next_block_number: cursor.block_number,
                next_log_index: cursor.log_index,
            })
            .await?;

        Ok(cursor)
    }
}
