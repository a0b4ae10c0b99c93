//! BN254 primitives used by keypers and decryptors: BLS identity signatures
//! and the per-epoch threshold decryption key check.

mod bls;
mod eon;
mod error;
mod hash;

pub use bls::{BlsPublicKey, BlsSecretKey, BlsSignature, verify_signature};
pub use eon::{EonPublicKey, EonSecretKey, EpochId, EpochSecretKey, verify_epoch_secret_key};
pub use error::{CryptoError, Result};
pub use hash::hash_to_g1;
