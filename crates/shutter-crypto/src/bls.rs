use ark_bn254::{Bn254, Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup, pairing::Pairing};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::{
    error::{CryptoError, Result},
    hash::hash_to_g1,
};

const BLS_SIGNATURE_DOMAIN: &[u8] = b"SHUTTER_BLS_SIG_BN254G1_KECCAK256";

/// BLS public key, a point in G2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlsPublicKey(G2Affine);

/// BLS signature, a point in G1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlsSignature(G1Affine);

#[derive(Clone)]
pub struct BlsSecretKey(Fr);

impl BlsSecretKey {
    /// Interprets `bytes` as a big-endian scalar reduced modulo the group order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let scalar = Fr::from_be_bytes_mod_order(bytes);
        if scalar.is_zero() {
            return Err(CryptoError::ZeroScalar);
        }
        Ok(Self(scalar))
    }

    pub fn public_key(&self) -> BlsPublicKey {
        BlsPublicKey((G2Affine::generator() * self.0).into_affine())
    }

    pub fn sign(&self, message: &[u8]) -> BlsSignature {
        let point = hash_to_g1(BLS_SIGNATURE_DOMAIN, message);
        BlsSignature((point * self.0).into_affine())
    }
}

impl BlsPublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = G2Affine::deserialize_compressed(bytes).map_err(|source| {
            CryptoError::InvalidEncoding {
                kind: "BLS public key",
                source,
            }
        })?;
        if point.is_zero() {
            return Err(CryptoError::IdentityPoint("BLS public key"));
        }
        Ok(Self(point))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.0.compressed_size());
        self.0
            .serialize_compressed(&mut bytes)
            .map_err(|source| CryptoError::Serialization {
                kind: "BLS public key",
                source,
            })?;
        Ok(bytes)
    }

    /// Checks `e(signature, g2) == e(H(message), public_key)`.
    pub fn verify(&self, message: &[u8], signature: &BlsSignature) -> bool {
        let point = hash_to_g1(BLS_SIGNATURE_DOMAIN, message);
        Bn254::pairing(signature.0, G2Affine::generator()) == Bn254::pairing(point, self.0)
    }
}

impl BlsSignature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let point = G1Affine::deserialize_compressed(bytes).map_err(|source| {
            CryptoError::InvalidEncoding {
                kind: "BLS signature",
                source,
            }
        })?;
        if point.is_zero() {
            return Err(CryptoError::IdentityPoint("BLS signature"));
        }
        Ok(Self(point))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.0.compressed_size());
        self.0
            .serialize_compressed(&mut bytes)
            .map_err(|source| CryptoError::Serialization {
                kind: "BLS signature",
                source,
            })?;
        Ok(bytes)
    }
}

/// Verifies an encoded signature against an encoded public key.
///
/// Empty or malformed encodings never verify.
pub fn verify_signature(public_key: &[u8], signature: &[u8], message: &[u8]) -> bool {
    let (Ok(public_key), Ok(signature)) = (
        BlsPublicKey::from_bytes(public_key),
        BlsSignature::from_bytes(signature),
    ) else {
        return false;
    };
    public_key.verify(message, &signature)
}
