use std::time::Instant;

use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    sea_query::{Expr, OnConflict},
};

use crate::{
    error::Result,
    models::decryptor_identity::{ActiveModel, Column, Entity, Model},
    observability::observe,
    types::DecryptorIdentityEntry,
};

/// Which credential column an upsert writes.
#[derive(Debug, Clone, Copy)]
enum Credential {
    PublicKey,
    Signature,
}

pub struct DecryptorIdentityRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> DecryptorIdentityRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn get(&self, address: &str) -> Result<Option<DecryptorIdentityEntry>> {
        let started = Instant::now();
        let result = Entity::find_by_id(address.to_string())
            .one(self.conn)
            .await
            .map(|row| row.map(Self::to_entry))
            .map_err(Into::into);

        observe("decryptor_identity", "get", started, result, |row| {
            usize::from(row.is_some())
        })
    }

    /// Creates the identity if needed and sets its BLS public key, leaving the
    /// signature and verification flag untouched.
    pub async fn upsert_bls_public_key(&self, address: &str, public_key: &[u8]) -> Result<()> {
        let started = Instant::now();
        let result = self
            .upsert_credential(address, Credential::PublicKey, public_key)
            .await;
        observe(
            "decryptor_identity",
            "upsert_bls_public_key",
            started,
            result,
            |_| 1,
        )
    }

    /// Creates the identity if needed and sets its BLS signature, leaving the
    /// public key and verification flag untouched.
    pub async fn upsert_bls_signature(&self, address: &str, signature: &[u8]) -> Result<()> {
        let started = Instant::now();
        let result = self
            .upsert_credential(address, Credential::Signature, signature)
            .await;
        observe(
            "decryptor_identity",
            "upsert_bls_signature",
            started,
            result,
            |_| 1,
        )
    }

    /// Sets `signature_verified`. There is no way to clear the flag.
    pub async fn mark_signature_verified(&self, address: &str) -> Result<u64> {
        let started = Instant::now();
        let result = Entity::update_many()
            .col_expr(Column::SignatureVerified, Expr::value(true))
            .filter(Column::Address.eq(address))
            .filter(Column::SignatureVerified.eq(false))
            .exec(self.conn)
            .await
            .map(|res| res.rows_affected)
            .map_err(Into::into);

        observe(
            "decryptor_identity",
            "mark_signature_verified",
            started,
            result,
            |rows| *rows as usize,
        )
    }

    async fn upsert_credential(
        &self,
        address: &str,
        credential: Credential,
        value: &[u8],
    ) -> Result<()> {
        let (model, column) = match credential {
            Credential::PublicKey => (
                ActiveModel {
                    address: ActiveValue::Set(address.to_string()),
                    bls_public_key: ActiveValue::Set(Some(value.to_vec())),
                    ..Default::default()
                },
                Column::BlsPublicKey,
            ),
            Credential::Signature => (
                ActiveModel {
                    address: ActiveValue::Set(address.to_string()),
                    bls_signature: ActiveValue::Set(Some(value.to_vec())),
                    ..Default::default()
                },
                Column::BlsSignature,
            ),
        };

        Entity::insert(model)
            .on_conflict(
                OnConflict::column(Column::Address)
                    .update_column(column)
                    .to_owned(),
            )
            .exec_without_returning(self.conn)
            .await?;
        Ok(())
    }

    fn to_entry(model: Model) -> DecryptorIdentityEntry {
        DecryptorIdentityEntry {
            address: model.address,
            bls_public_key: model.bls_public_key,
            bls_signature: model.bls_signature,
            signature_verified: model.signature_verified,
        }
    }
}
