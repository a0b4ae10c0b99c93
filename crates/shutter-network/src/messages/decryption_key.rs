use serde::{Deserialize, Serialize};

use crate::message::P2PMessage;

/// Decryption key for one epoch of an eon, released by the keypers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptionKey {
    #[serde(rename = "instanceID")]
    pub instance_id: u64,
    pub eon: i64,
    #[serde(rename = "epochID", with = "hex::serde")]
    pub epoch_id: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub key: Vec<u8>,
}

impl P2PMessage for DecryptionKey {
    const TOPIC: &'static str = "decryptionKey";
}
