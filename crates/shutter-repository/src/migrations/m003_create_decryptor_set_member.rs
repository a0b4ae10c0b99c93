use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, Index, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, integer, string},
    sea_query,
};

#[derive(Iden)]
enum DecryptorSetMember {
    Table,
    ActivationBlockNumber,
    Index,
    Address,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DecryptorSetMember::Table)
                    .if_not_exists()
                    .col(big_integer(DecryptorSetMember::ActivationBlockNumber))
                    .col(integer(DecryptorSetMember::Index))
                    .col(string(DecryptorSetMember::Address))
                    .primary_key(
                        Index::create()
                            .col(DecryptorSetMember::ActivationBlockNumber)
                            .col(DecryptorSetMember::Index),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(DecryptorSetMember::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
