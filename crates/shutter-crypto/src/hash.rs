use ark_bn254::{Fq, G1Affine};
use ark_ff::PrimeField;
use sha3::{Digest, Keccak256};

/// Maps `message` onto G1 by try-and-increment over Keccak-256.
///
/// Each attempt hashes `domain || counter || message` into a base field element
/// and keeps the first x coordinate that lies on the curve. G1 of BN254 has
/// cofactor 1, so the resulting point is always in the prime order subgroup.
pub fn hash_to_g1(domain: &[u8], message: &[u8]) -> G1Affine {
    let mut counter: u32 = 0;
    loop {
        let digest = Keccak256::new()
            .chain_update(domain)
            .chain_update(counter.to_be_bytes())
            .chain_update(message)
            .finalize();
        let x = Fq::from_be_bytes_mod_order(&digest);
        if let Some(point) = G1Affine::get_point_from_x_unchecked(x, false) {
            return point;
        }
        counter = counter.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use ark_ec::AffineRepr;

    use super::*;

    #[test]
    fn hash_is_deterministic_and_on_curve() {
        let a = hash_to_g1(b"test", b"message");
        let b = hash_to_g1(b"test", b"message");
        assert_eq!(a, b);
        assert!(a.is_on_curve());
        assert!(a.is_in_correct_subgroup_assuming_on_curve());
        assert!(!a.is_zero());
    }

    #[test]
    fn domain_separates_outputs() {
        assert_ne!(hash_to_g1(b"one", b"m"), hash_to_g1(b"two", b"m"));
        assert_ne!(hash_to_g1(b"one", b"m"), hash_to_g1(b"one", b"n"));
    }
}
