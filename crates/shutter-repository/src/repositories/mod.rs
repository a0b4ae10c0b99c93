pub(crate) mod decryption_key_repository;
pub(crate) mod decryptor_identity_repository;
pub(crate) mod decryptor_set_repository;
pub(crate) mod eon_repository;
pub(crate) mod event_sync_progress_repository;
pub(crate) mod keyper_set_repository;
