mod config;
mod config_error;
pub mod error;
mod manager;
mod migrations;
mod models;
mod observability;
mod repositories;
mod types;
mod unit_of_work;

pub use config::{DatabaseDriver, RepositoryManagerConfig, RepositoryManagerConfigRaw};
pub use config_error::ConfigError;
pub use error::RepositoryError;
pub use manager::{RepositoryManager, RepositoryScope};
pub use repositories::{
    decryption_key_repository::DecryptionKeyRepository,
    decryptor_identity_repository::DecryptorIdentityRepository,
    decryptor_set_repository::DecryptorSetRepository, eon_repository::EonRepository,
    event_sync_progress_repository::EventSyncProgressRepository,
    keyper_set_repository::KeyperSetRepository,
};
pub use types::{
    DecryptionKeyEntry, DecryptorIdentityEntry, DecryptorSetMemberEntry, EonPublicKeyEntry,
    EventSyncProgress, KeyperSetEntry,
};
pub use unit_of_work::UnitOfWork;
