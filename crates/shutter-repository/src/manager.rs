use std::sync::Arc;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, TransactionTrait};
use sea_orm_migration::MigratorTrait;

pub use crate::config::RepositoryManagerConfig;
use crate::{
    error::RepositoryError,
    migrations::Migrator,
    repositories::{
        decryption_key_repository::DecryptionKeyRepository,
        decryptor_identity_repository::DecryptorIdentityRepository,
        decryptor_set_repository::DecryptorSetRepository, eon_repository::EonRepository,
        event_sync_progress_repository::EventSyncProgressRepository,
        keyper_set_repository::KeyperSetRepository,
    },
    unit_of_work::UnitOfWork,
};

/// Repository accessors shared by the pooled manager and by an open transaction.
///
/// Repositories borrow the connection they are created from, so everything
/// obtained from a [`UnitOfWork`] commits or rolls back together.
pub trait RepositoryScope {
    type Conn: ConnectionTrait;

    fn connection(&self) -> &Self::Conn;

    fn event_sync_progress_repository(&self) -> EventSyncProgressRepository<'_, Self::Conn> {
        EventSyncProgressRepository::new(self.connection())
    }

    fn keyper_set_repository(&self) -> KeyperSetRepository<'_, Self::Conn> {
        KeyperSetRepository::new(self.connection())
    }

    fn decryptor_set_repository(&self) -> DecryptorSetRepository<'_, Self::Conn> {
        DecryptorSetRepository::new(self.connection())
    }

    fn decryptor_identity_repository(&self) -> DecryptorIdentityRepository<'_, Self::Conn> {
        DecryptorIdentityRepository::new(self.connection())
    }

    fn decryption_key_repository(&self) -> DecryptionKeyRepository<'_, Self::Conn> {
        DecryptionKeyRepository::new(self.connection())
    }

    fn eon_repository(&self) -> EonRepository<'_, Self::Conn> {
        EonRepository::new(self.connection())
    }
}

#[derive(Clone)]
pub struct RepositoryManager {
    conn: Arc<DatabaseConnection>,
}

impl RepositoryManager {
    /// Creates a new RepositoryManager instance
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if:
    /// - Database connection fails (e.g. database missing, bad credentials)
    /// - Migrations fail
    pub async fn connect(config: &RepositoryManagerConfig) -> Result<Self, RepositoryError> {
        let mut opt = ConnectOptions::new(config.connection_string());
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(true)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        let conn = Arc::new(Database::connect(opt).await?);

        // Apply all pending migrations
        Migrator::up(conn.as_ref(), None).await?;

        Ok(RepositoryManager { conn })
    }

    /// Opens a transaction. Dropping the returned unit of work without
    /// committing rolls it back.
    pub async fn begin(&self) -> Result<UnitOfWork, RepositoryError> {
        let txn = self.conn.begin().await?;
        Ok(UnitOfWork::new(txn))
    }
}

impl RepositoryScope for RepositoryManager {
    type Conn = DatabaseConnection;

    fn connection(&self) -> &DatabaseConnection {
        self.conn.as_ref()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::{
        DecryptionKeyEntry, DecryptorSetMemberEntry, EventSyncProgress, KeyperSetEntry,
    };

    async fn manager() -> RepositoryManager {
        RepositoryManager::connect(&RepositoryManagerConfig::sqlite_in_memory())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_cursor_absent_until_written() {
        let manager = manager().await;
        let progress = manager.event_sync_progress_repository();
        assert_eq!(progress.get().await.unwrap(), None);

        let cursor = EventSyncProgress {
            next_block_number: 12,
            next_log_index: 3,
        };
        progress.update(cursor).await.unwrap();
        progress
            .update(EventSyncProgress {
                next_block_number: 13,
                next_log_index: 0,
            })
            .await
            .unwrap();

        assert_eq!(
            progress.get().await.unwrap(),
            Some(EventSyncProgress {
                next_block_number: 13,
                next_log_index: 0,
            })
        );
    }

    #[tokio::test]
    async fn test_rolled_back_unit_of_work_leaves_no_trace() {
        let manager = manager().await;

        let uow = manager.begin().await.unwrap();
        uow.keyper_set_repository()
            .insert(&KeyperSetEntry {
                activation_block_number: 100,
                keypers: vec!["0x01".to_string()],
                threshold: 1,
            })
            .await
            .unwrap();
        uow.event_sync_progress_repository()
            .update(EventSyncProgress {
                next_block_number: 100,
                next_log_index: 1,
            })
            .await
            .unwrap();
        uow.rollback().await.unwrap();

        assert_eq!(manager.keyper_set_repository().get(100).await.unwrap(), None);
        assert_eq!(
            manager.event_sync_progress_repository().get().await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_dropped_unit_of_work_rolls_back() {
        let manager = manager().await;

        {
            let uow = manager.begin().await.unwrap();
            uow.decryptor_set_repository()
                .insert_member(&DecryptorSetMemberEntry {
                    activation_block_number: 5,
                    index: 0,
                    address: "0xaa".to_string(),
                })
                .await
                .unwrap();
        }

        assert!(
            manager
                .decryptor_set_repository()
                .get_members(5)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_decryptor_members_are_ordered_by_index() {
        let manager = manager().await;
        let uow = manager.begin().await.unwrap();
        for (index, address) in [(1, "0xbb"), (0, "0xaa")] {
            uow.decryptor_set_repository()
                .insert_member(&DecryptorSetMemberEntry {
                    activation_block_number: 9,
                    index,
                    address: address.to_string(),
                })
                .await
                .unwrap();
        }
        uow.commit().await.unwrap();

        let members = manager
            .decryptor_set_repository()
            .get_members(9)
            .await
            .unwrap();
        let addresses: Vec<_> = members.iter().map(|m| m.address.as_str()).collect();
        assert_eq!(addresses, ["0xaa", "0xbb"]);
    }

    #[tokio::test]
    async fn test_credentials_upsert_independently() {
        let manager = manager().await;
        let identities = manager.decryptor_identity_repository();

        identities
            .upsert_bls_signature("0xabc", &[1, 2, 3])
            .await
            .unwrap();
        identities
            .upsert_bls_public_key("0xabc", &[9, 9])
            .await
            .unwrap();

        let identity = identities.get("0xabc").await.unwrap().unwrap();
        assert_eq!(identity.bls_public_key, Some(vec![9, 9]));
        assert_eq!(identity.bls_signature, Some(vec![1, 2, 3]));
        assert!(!identity.signature_verified);

        assert_eq!(identities.mark_signature_verified("0xabc").await.unwrap(), 1);
        assert_eq!(identities.mark_signature_verified("0xabc").await.unwrap(), 0);

        identities
            .upsert_bls_public_key("0xabc", &[7])
            .await
            .unwrap();
        let identity = identities.get("0xabc").await.unwrap().unwrap();
        assert!(identity.signature_verified);
    }

    #[tokio::test]
    async fn test_decryption_key_insert_keeps_first_key() {
        let manager = manager().await;
        let keys = manager.decryption_key_repository();
        let first = DecryptionKeyEntry {
            eon: 7,
            epoch_id: vec![0xee; 32],
            key: vec![1; 32],
        };

        assert!(keys.insert(&first).await.unwrap());
        let second = DecryptionKeyEntry {
            key: vec![2; 32],
            ..first.clone()
        };
        assert!(!keys.insert(&second).await.unwrap());

        assert_eq!(keys.get(7, &[0xee; 32]).await.unwrap(), Some(first));
        assert_eq!(keys.get(7, &[0xef; 32]).await.unwrap(), None);
    }
}
