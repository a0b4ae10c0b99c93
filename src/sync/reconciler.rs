use shutter_blockchain::Address;
use shutter_repository::{RepositoryError, RepositoryScope};

/// What a reconciliation pass concluded about a decryptor's BLS identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReconcileOutcome {
    /// The identity was verified earlier; nothing was checked or written.
    AlreadyVerified,
    /// The public key or the signature has not been registered yet.
    Incomplete,
    /// Both credentials are present but the signature does not verify.
    Invalid,
    /// The signature verified and the identity is now marked as verified.
    Verified,
}

impl ReconcileOutcome {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ReconcileOutcome::AlreadyVerified => "already_verified",
            ReconcileOutcome::Incomplete => "incomplete",
            ReconcileOutcome::Invalid => "invalid",
            ReconcileOutcome::Verified => "verified",
        }
    }
}

/// Verifies a decryptor's registered BLS signature over its own address once
/// both credentials are known.
///
/// Runs against whatever scope the caller provides, so when called from an
/// event transaction the verified flag commits together with the credential
/// that completed the pair.
pub(crate) async fn reconcile_signature<S: RepositoryScope>(
    scope: &S,
    account: &Address,
) -> Result<ReconcileOutcome, RepositoryError> {
    let address = account.to_checksum(None);
    let repository = scope.decryptor_identity_repository();

    let outcome = match repository.get(&address).await? {
        None => ReconcileOutcome::Incomplete,
        Some(identity) if identity.signature_verified => ReconcileOutcome::AlreadyVerified,
        Some(identity) => match (
            identity.bls_public_key.as_deref(),
            identity.bls_signature.as_deref(),
        ) {
            (Some(public_key), Some(signature))
                if !public_key.is_empty() && !signature.is_empty() =>
            {
                if shutter_crypto::verify_signature(public_key, signature, account.as_slice()) {
                    repository.mark_signature_verified(&address).await?;
                    tracing::info!(address = %address, "Decryptor BLS signature verified");
                    ReconcileOutcome::Verified
                } else {
                    tracing::warn!(
                        address = %address,
                        "Registered BLS signature does not verify against registered public key"
                    );
                    ReconcileOutcome::Invalid
                }
            }
            _ => ReconcileOutcome::Incomplete,
        },
    };

    shutter_observability::record_sync_signature_verification(outcome.as_str());
    Ok(outcome)
}
