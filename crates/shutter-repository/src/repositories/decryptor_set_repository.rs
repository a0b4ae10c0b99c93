use std::time::Instant;

use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    error::Result,
    models::decryptor_set_member::{ActiveModel, Column, Entity, Model},
    observability::observe,
    types::DecryptorSetMemberEntry,
};

pub struct DecryptorSetRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> DecryptorSetRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn insert_member(&self, entry: &DecryptorSetMemberEntry) -> Result<()> {
        let started = Instant::now();
        let model = ActiveModel {
            activation_block_number: ActiveValue::Set(entry.activation_block_number),
            index: ActiveValue::Set(entry.index),
            address: ActiveValue::Set(entry.address.clone()),
        };
        let result = Entity::insert(model)
            .exec_without_returning(self.conn)
            .await
            .map(|_| ())
            .map_err(Into::into);

        observe("decryptor_set", "insert_member", started, result, |_| 1)
    }

    /// Members of the set activated at `activation_block_number`, ordered by index.
    pub async fn get_members(
        &self,
        activation_block_number: i64,
    ) -> Result<Vec<DecryptorSetMemberEntry>> {
        let started = Instant::now();
        let result = Entity::find()
            .filter(Column::ActivationBlockNumber.eq(activation_block_number))
            .order_by_asc(Column::Index)
            .all(self.conn)
            .await
            .map(|rows| rows.into_iter().map(Self::to_entry).collect())
            .map_err(Into::into);

        observe("decryptor_set", "get_members", started, result, Vec::len)
    }

    fn to_entry(model: Model) -> DecryptorSetMemberEntry {
        DecryptorSetMemberEntry {
            activation_block_number: model.activation_block_number,
            index: model.index,
            address: model.address,
        }
    }
}
