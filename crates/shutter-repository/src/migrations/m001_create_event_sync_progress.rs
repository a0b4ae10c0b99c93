use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, integer},
    sea_query,
};

#[derive(Iden)]
enum EventSyncProgress {
    Table,
    Id,
    NextBlockNumber,
    NextLogIndex,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventSyncProgress::Table)
                    .if_not_exists()
                    .col(integer(EventSyncProgress::Id).primary_key())
                    .col(big_integer(EventSyncProgress::NextBlockNumber).default(0))
                    .col(big_integer(EventSyncProgress::NextLogIndex).default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(EventSyncProgress::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
