/// Position of the next chain event the decryptor has not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventSyncProgress {
    pub next_block_number: u64,
    pub next_log_index: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyperSetEntry {
    pub activation_block_number: i64,
    /// Checksummed hex addresses in registration order.
    pub keypers: Vec<String>,
    pub threshold: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptorSetMemberEntry {
    pub activation_block_number: i64,
    pub index: i32,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptorIdentityEntry {
    pub address: String,
    pub bls_public_key: Option<Vec<u8>>,
    pub bls_signature: Option<Vec<u8>>,
    pub signature_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptionKeyEntry {
    pub eon: i64,
    pub epoch_id: Vec<u8>,
    pub key: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EonPublicKeyEntry {
    pub eon: i64,
    pub activation_block_number: i64,
    pub public_key: Vec<u8>,
}
