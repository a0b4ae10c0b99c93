//! Domain handlers for chain configuration events. Each runs inside the
//! transaction of the event being applied.

use shutter_blockchain::{
    Address, AddressSet, AddressSetReader, NewDecryptorConfig, NewKeyperConfig, Registration,
};
use shutter_repository::{DecryptorSetMemberEntry, KeyperSetEntry, RepositoryScope, UnitOfWork};

use super::{
    error::SyncError,
    reconciler::{ReconcileOutcome, reconcile_signature},
};

/// Which credential a BLS registry contract records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CredentialKind {
    PublicKey,
    Signature,
}

impl CredentialKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            CredentialKind::PublicKey => "bls_public_key",
            CredentialKind::Signature => "bls_signature",
        }
    }
}

fn activation_block_number(value: u64) -> Result<i64, SyncError> {
    i64::try_from(value).map_err(|_| SyncError::ActivationBlockOverflow(value))
}

fn member_index(index: usize, len: usize) -> Result<i32, SyncError> {
    i32::try_from(index).map_err(|_| SyncError::MemberIndexOverflow(len))
}

fn checksummed(addresses: &[Address]) -> Vec<String> {
    addresses
        .iter()
        .map(|address| address.to_checksum(None))
        .collect()
}

/// Records the keyper set activated by a `KeypersConfigsList.NewConfig` event.
///
/// Membership is read at the current head: sets are append-only, so the entry
/// at `index` is the one the event announced.
pub(crate) async fn handle_keyper_set(
    uow: &UnitOfWork,
    address_sets: &dyn AddressSetReader,
    event: &NewKeyperConfig,
) -> Result<(), SyncError> {
    let activation_block_number = activation_block_number(event.activation_block_number)?;
    let threshold =
        i32::try_from(event.threshold).map_err(|_| SyncError::ThresholdOverflow(event.threshold))?;

    let keypers = address_sets
        .get_addresses_at_index(AddressSet::Keypers, event.index)
        .await?;

    uow.keyper_set_repository()
        .insert(&KeyperSetEntry {
            activation_block_number,
            keypers: checksummed(&keypers),
            threshold,
        })
        .await?;

    tracing::info!(
        activation_block_number,
        index = event.index,
        keypers = keypers.len(),
        threshold,
        "Keyper set registered"
    );
    Ok(())
}

/// Records one member row per address of the decryptor set activated by a
/// `DecryptorsConfigsList.NewConfig` event.
pub(crate) async fn handle_decryptor_set(
    uow: &UnitOfWork,
    address_sets: &dyn AddressSetReader,
    event: &NewDecryptorConfig,
) -> Result<(), SyncError> {
    let activation_block_number = activation_block_number(event.activation_block_number)?;

    let decryptors = address_sets
        .get_addresses_at_index(AddressSet::Decryptors, event.index)
        .await?;

    let repository = uow.decryptor_set_repository();
    for (position, address) in checksummed(&decryptors).into_iter().enumerate() {
        repository
            .insert_member(&DecryptorSetMemberEntry {
                activation_block_number,
                index: member_index(position, decryptors.len())?,
                address,
            })
            .await?;
    }

    tracing::info!(
        activation_block_number,
        index = event.index,
        decryptors = decryptors.len(),
        "Decryptor set registered"
    );
    Ok(())
}

/// Stores a registered BLS credential and re-checks the account's identity.
pub(crate) async fn handle_registration(
    uow: &UnitOfWork,
    kind: CredentialKind,
    registration: &Registration,
) -> Result<ReconcileOutcome, SyncError> {
    let address = registration.account.to_checksum(None);
    let repository = uow.decryptor_identity_repository();
    match kind {
        CredentialKind::PublicKey => {
            repository
                .upsert_bls_public_key(&address, registration.data.as_ref())
                .await?
        }
        CredentialKind::Signature => {
            repository
                .upsert_bls_signature(&address, registration.data.as_ref())
                .await?
        }
    }

    tracing::info!(
        address = %address,
        credential = kind.as_str(),
        "Decryptor credential registered"
    );

    Ok(reconcile_signature(uow, &registration.account).await?)
}
