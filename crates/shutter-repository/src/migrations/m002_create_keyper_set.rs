use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, integer, text},
    sea_query,
};

#[derive(Iden)]
enum KeyperSet {
    Table,
    ActivationBlockNumber,
    Keypers,
    Threshold,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KeyperSet::Table)
                    .if_not_exists()
                    .col(big_integer(KeyperSet::ActivationBlockNumber).primary_key())
                    .col(text(KeyperSet::Keypers))
                    .col(integer(KeyperSet::Threshold))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KeyperSet::Table).if_exists().to_owned())
            .await
    }
}
