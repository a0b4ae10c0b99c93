use ark_bn254::{Bn254, Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup, pairing::Pairing};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::{
    error::{CryptoError, Result},
    hash::hash_to_g1,
};

const EPOCH_ID_DOMAIN: &[u8] = b"SHUTTER_EPOCH_ID_BN254G1_KECCAK256";

/// Identity of a single decryption epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EpochId([u8; EpochId::LEN]);

impl EpochId {
    pub const LEN: usize = 32;

    /// Big-endian encoding of a sequence number, left padded to 32 bytes.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; Self::LEN];
        bytes[Self::LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidEpochIdLength {
                    expected: Self::LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn to_g1(self) -> G1Affine {
        hash_to_g1(EPOCH_ID_DOMAIN, &self.0)
    }
}

/// Aggregate public key of an eon, a point in G2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EonPublicKey(G2Affine);

/// Eon secret. Keypers only ever hold shares of it; a whole one exists in tests.
#[derive(Clone)]
pub struct EonSecretKey(Fr);

/// Decryption key released for one epoch, a point in G1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochSecretKey(G1Affine);

impl EonSecretKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let scalar = Fr::from_be_bytes_mod_order(bytes);
        if scalar.is_zero() {
            return Err(CryptoError::ZeroScalar);
        }
        Ok(Self(scalar))
    }

    pub fn public_key(&self) -> EonPublicKey {
        EonPublicKey((G2Affine::generator() * self.0).into_affine())
    }

    pub fn epoch_secret_key(&self, epoch_id: &EpochId) -> EpochSecretKey {
        EpochSecretKey((epoch_id.to_g1() * self.0).into_affine())
    }
}

impl EonPublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = G2Affine::deserialize_compressed(bytes).map_err(|source| {
            CryptoError::InvalidEncoding {
                kind: "eon public key",
                source,
            }
        })?;
        if point.is_zero() {
            return Err(CryptoError::IdentityPoint("eon public key"));
        }
        Ok(Self(point))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.0.compressed_size());
        self.0
            .serialize_compressed(&mut bytes)
            .map_err(|source| CryptoError::Serialization {
                kind: "eon public key",
                source,
            })?;
        Ok(bytes)
    }
}

impl EpochSecretKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = G1Affine::deserialize_compressed(bytes).map_err(|source| {
            CryptoError::InvalidEncoding {
                kind: "epoch secret key",
                source,
            }
        })?;
        Ok(Self(point))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.0.compressed_size());
        self.0
            .serialize_compressed(&mut bytes)
            .map_err(|source| CryptoError::Serialization {
                kind: "epoch secret key",
                source,
            })?;
        Ok(bytes)
    }
}

/// Checks that `key` is the decryption key for `epoch_id` under the eon whose
/// public key is `eon_public_key`: `e(key, g2) == e(H(epoch_id), eon_public_key)`.
pub fn verify_epoch_secret_key(
    key: &EpochSecretKey,
    eon_public_key: &EonPublicKey,
    epoch_id: &EpochId,
) -> bool {
    if key.0.is_zero() {
        return false;
    }
    Bn254::pairing(key.0, G2Affine::generator())
        == Bn254::pairing(epoch_id.to_g1(), eon_public_key.0)
}
