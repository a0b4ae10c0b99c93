use sea_orm_migration::{MigrationTrait, MigratorTrait, async_trait::async_trait};

mod m001_create_event_sync_progress;
mod m002_create_keyper_set;
mod m003_create_decryptor_set_member;
mod m004_create_decryptor_identity;
mod m005_create_decryption_key;
mod m006_create_eon_public_key;

pub(crate) struct Migrator;

#[async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_event_sync_progress::Migration),
            Box::new(m002_create_keyper_set::Migration),
            Box::new(m003_create_decryptor_set_member::Migration),
            Box::new(m004_create_decryptor_identity::Migration),
            Box::new(m005_create_decryption_key::Migration),
            Box::new(m006_create_eon_public_key::Migration),
        ]
    }
}
