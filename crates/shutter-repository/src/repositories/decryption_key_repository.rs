use std::time::Instant;

use sea_orm::{ActiveValue, ConnectionTrait, EntityTrait, sea_query::OnConflict};

use crate::{
    error::{RepositoryError, Result},
    models::decryption_key::{ActiveModel, Column, Entity, Model},
    observability::observe,
    types::DecryptionKeyEntry,
};

pub struct DecryptionKeyRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> DecryptionKeyRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Stores a key unless one already exists for `(eon, epoch_id)`.
    /// Returns whether a row was written; an existing key is never replaced.
    pub async fn insert(&self, entry: &DecryptionKeyEntry) -> Result<bool> {
        let started = Instant::now();
        let model = ActiveModel {
            eon: ActiveValue::Set(entry.eon),
            epoch_id: ActiveValue::Set(hex::encode(&entry.epoch_id)),
            key: ActiveValue::Set(entry.key.clone()),
        };
        let result = Entity::insert(model)
            .on_conflict(
                OnConflict::columns([Column::Eon, Column::EpochId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await
            .map(|rows| rows > 0)
            .map_err(Into::into);

        observe("decryption_key", "insert", started, result, |inserted| {
            usize::from(*inserted)
        })
    }

    pub async fn get(&self, eon: i64, epoch_id: &[u8]) -> Result<Option<DecryptionKeyEntry>> {
        let started = Instant::now();
        let result = async {
            let row = Entity::find_by_id((eon, hex::encode(epoch_id)))
                .one(self.conn)
                .await?;
            row.map(Self::to_entry).transpose()
        }
        .await;

        observe("decryption_key", "get", started, result, |row| {
            usize::from(row.is_some())
        })
    }

    fn to_entry(model: Model) -> Result<DecryptionKeyEntry> {
        let epoch_id = hex::decode(&model.epoch_id)
            .map_err(|err| RepositoryError::invalid_value("epoch_id", err.to_string()))?;
        Ok(DecryptionKeyEntry {
            eon: model.eon,
            epoch_id,
            key: model.key,
        })
    }
}
