use std::time::Instant;

use sea_orm::{ActiveValue, ConnectionTrait, EntityTrait, sea_query::OnConflict};

use crate::{
    error::Result,
    models::eon_public_key::{ActiveModel, Column, Entity, Model},
    observability::observe,
    types::EonPublicKeyEntry,
};

/// Aggregate eon public keys produced by key generation.
pub struct EonRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> EonRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Stores or replaces the public key of an eon.
    ///
    /// The node's key-generation (DKG) path is the writer; this crate does not run
    /// it, so in production the table is filled by that component. Until an eon is
    /// written here, decryption keys for it are rejected by the network validator.
    pub async fn insert(&self, entry: &EonPublicKeyEntry) -> Result<()> {
        let started = Instant::now();
        let model = ActiveModel {
            eon: ActiveValue::Set(entry.eon),
            activation_block_number: ActiveValue::Set(entry.activation_block_number),
            public_key: ActiveValue::Set(entry.public_key.clone()),
        };
        let result = Entity::insert(model)
            .on_conflict(
                OnConflict::column(Column::Eon)
                    .update_columns([Column::ActivationBlockNumber, Column::PublicKey])
                    .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await
            .map(|_| ())
            .map_err(Into::into);

        observe("eon_public_key", "insert", started, result, |_| 1)
    }

    pub async fn get(&self, eon: i64) -> Result<Option<EonPublicKeyEntry>> {
        let started = Instant::now();
        let result = Entity::find_by_id(eon)
            .one(self.conn)
            .await
            .map(|row| row.map(Self::to_entry))
            .map_err(Into::into);

        observe("eon_public_key", "get", started, result, |row| {
            usize::from(row.is_some())
        })
    }

    fn to_entry(model: Model) -> EonPublicKeyEntry {
        EonPublicKeyEntry {
            eon: model.eon,
            activation_block_number: model.activation_block_number,
            public_key: model.public_key,
        }
    }
}
