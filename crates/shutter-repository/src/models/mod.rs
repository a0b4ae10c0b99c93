pub(crate) mod decryption_key;
pub(crate) mod decryptor_identity;
pub(crate) mod decryptor_set_member;
pub(crate) mod eon_public_key;
pub(crate) mod event_sync_progress;
pub(crate) mod keyper_set;
