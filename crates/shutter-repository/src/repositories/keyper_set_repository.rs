use std::time::Instant;

use sea_orm::{ActiveValue, ConnectionTrait, EntityTrait};

use crate::{
    error::Result,
    models::keyper_set::{ActiveModel, Entity, Model},
    observability::observe,
    types::KeyperSetEntry,
};

const ADDRESS_SEPARATOR: char = ',';

pub struct KeyperSetRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> KeyperSetRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, entry: &KeyperSetEntry) -> Result<()> {
        let started = Instant::now();
        let model = ActiveModel {
            activation_block_number: ActiveValue::Set(entry.activation_block_number),
            keypers: ActiveValue::Set(encode_addresses(&entry.keypers)),
            threshold: ActiveValue::Set(entry.threshold),
        };
        let result = Entity::insert(model)
            .exec_without_returning(self.conn)
            .await
            .map(|_| ())
            .map_err(Into::into);

        observe("keyper_set", "insert", started, result, |_| 1)
    }

    pub async fn get(&self, activation_block_number: i64) -> Result<Option<KeyperSetEntry>> {
        let started = Instant::now();
        let result = Entity::find_by_id(activation_block_number)
            .one(self.conn)
            .await
            .map(|row| row.map(Self::to_entry))
            .map_err(Into::into);

        observe("keyper_set", "get", started, result, |row| {
            usize::from(row.is_some())
        })
    }

    fn to_entry(model: Model) -> KeyperSetEntry {
        KeyperSetEntry {
            activation_block_number: model.activation_block_number,
            keypers: decode_addresses(&model.keypers),
            threshold: model.threshold,
        }
    }
}

fn encode_addresses(addresses: &[String]) -> String {
    addresses.join(&ADDRESS_SEPARATOR.to_string())
}

fn decode_addresses(encoded: &str) -> Vec<String> {
    encoded
        .split(ADDRESS_SEPARATOR)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect()
}
