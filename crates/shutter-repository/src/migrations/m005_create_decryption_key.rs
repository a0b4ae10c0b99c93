use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, Index, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, blob, string},
    sea_query,
};

#[derive(Iden)]
enum DecryptionKey {
    Table,
    Eon,
    EpochId,
    Key,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DecryptionKey::Table)
                    .if_not_exists()
                    .col(big_integer(DecryptionKey::Eon))
                    .col(string(DecryptionKey::EpochId))
                    .col(blob(DecryptionKey::Key))
                    .primary_key(
                        Index::create()
                            .col(DecryptionKey::Eon)
                            .col(DecryptionKey::EpochId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(DecryptionKey::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
