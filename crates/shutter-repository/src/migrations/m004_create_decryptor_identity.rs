use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, MigrationTrait, SchemaManager, Table},
    schema::{blob_null, boolean, string},
    sea_query,
};

#[derive(Iden)]
enum DecryptorIdentity {
    Table,
    Address,
    BlsPublicKey,
    BlsSignature,
    SignatureVerified,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DecryptorIdentity::Table)
                    .if_not_exists()
                    .col(string(DecryptorIdentity::Address).primary_key())
                    .col(blob_null(DecryptorIdentity::BlsPublicKey))
                    .col(blob_null(DecryptorIdentity::BlsSignature))
                    .col(boolean(DecryptorIdentity::SignatureVerified).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(DecryptorIdentity::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
