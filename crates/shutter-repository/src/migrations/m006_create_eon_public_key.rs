use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, blob},
    sea_query,
};

#[derive(Iden)]
enum EonPublicKey {
    Table,
    Eon,
    ActivationBlockNumber,
    PublicKey,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EonPublicKey::Table)
                    .if_not_exists()
                    .col(big_integer(EonPublicKey::Eon).primary_key())
                    .col(big_integer(EonPublicKey::ActivationBlockNumber))
                    .col(blob(EonPublicKey::PublicKey))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(EonPublicKey::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
