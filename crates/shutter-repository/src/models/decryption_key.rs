#![allow(unreachable_pub)]

use sea_orm::{
    entity::prelude::{DeriveRelation, EnumIter},
    prelude::{ActiveModelBehavior, DeriveEntityModel, DerivePrimaryKey, PrimaryKeyTrait},
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "decryption_key")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub eon: i64,
    /// Lowercase hex of the raw epoch identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub epoch_id: String,
    pub key: Vec<u8>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
