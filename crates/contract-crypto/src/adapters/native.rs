//! # Native Crypto Provider
//!
//! Default implementation of the provider boundary over pure-Rust and
//! `blst` primitives.
//!
//! | Concern | Crate |
//! |---------|-------|
//! | SHA2-256/384 | `sha2` |
//! | SHA3-256/384, Keccak-256 | `sha3` |
//! | KMAC128 | `tiny-keccak` |
//! | ECDSA P-256 | `p256` |
//! | ECDSA secp256k1 | `k256` |
//! | BLS12-381 | `blst` (`min_sig`: G1 signatures, G2 public keys) |
//!
//! ## Encodings
//!
//! ECDSA keys arrive as `X || Y` (64 bytes) and are parsed as uncompressed
//! SEC1 points by prefixing `0x04`. ECDSA signatures are `r || s`.
//! BLS keys and signatures use compressed point serialization.

use crate::domain::algorithms::{
    HashAlgorithm, SignatureAlgorithm, ECDSA_PUBLIC_KEY_LEN, KMAC_OUTPUT_LEN,
};
use crate::ports::outbound::{CryptoProvider, ProviderError};
use blst::min_sig::{AggregatePublicKey, AggregateSignature, PublicKey, Signature};
use blst::BLST_ERROR;
use sha2::{Digest, Sha256, Sha384};
use sha3::{Keccak256, Sha3_256, Sha3_384};
use tiny_keccak::{Hasher, Kmac};
use tracing::trace;

/// DST for hashing the (already KMAC-expanded) message to G1.
pub const BLS_SIG_DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_POP_";

/// DST for proofs of possession.
pub const BLS_POP_DST: &[u8] = b"BLS_POP_BLS12381G1_XMD:SHA-256_SSWU_RO_POP_";

/// SEC1 tag for an uncompressed point.
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Provider backed by `sha2`, `sha3`, `tiny-keccak`, `p256`, `k256` and `blst`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCryptoProvider;

impl NativeCryptoProvider {
    pub fn new() -> Self {
        Self
    }
}

impl CryptoProvider for NativeCryptoProvider {
    fn raw_hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
        match algorithm {
            HashAlgorithm::SHA2_256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::SHA2_384 => Sha384::digest(data).to_vec(),
            HashAlgorithm::SHA3_256 => Sha3_256::digest(data).to_vec(),
            HashAlgorithm::SHA3_384 => Sha3_384::digest(data).to_vec(),
            HashAlgorithm::KECCAK_256 => Keccak256::digest(data).to_vec(),
            // Plain KMAC without key or customization
            HashAlgorithm::KMAC128_BLS_BLS12_381 => {
                self.raw_kmac128(&[], &[], data, KMAC_OUTPUT_LEN)
            }
        }
    }

    fn raw_kmac128(
        &self,
        key: &[u8],
        customizer: &[u8],
        data: &[u8],
        output_len: usize,
    ) -> Vec<u8> {
        let mut kmac = Kmac::v128(key, customizer);
        kmac.update(data);
        let mut output = vec![0u8; output_len];
        kmac.finalize(&mut output);
        output
    }

    fn raw_verify(
        &self,
        algorithm: SignatureAlgorithm,
        public_key: &[u8],
        signature: &[u8],
        message: &[u8],
    ) -> bool {
        match algorithm {
            SignatureAlgorithm::ECDSA_P256 => verify_p256(public_key, signature, message),
            SignatureAlgorithm::ECDSA_secp256k1 => verify_k256(public_key, signature, message),
            SignatureAlgorithm::BLS_BLS12_381 => {
                verify_bls(public_key, signature, message, BLS_SIG_DST)
            }
        }
    }

    fn raw_validate_key(&self, algorithm: SignatureAlgorithm, public_key: &[u8]) -> bool {
        match algorithm {
            SignatureAlgorithm::ECDSA_P256 => p256_key(public_key).is_some(),
            SignatureAlgorithm::ECDSA_secp256k1 => k256_key(public_key).is_some(),
            // Rejects off-curve points, points outside G2 and the identity
            SignatureAlgorithm::BLS_BLS12_381 => PublicKey::key_validate(public_key).is_ok(),
        }
    }

    fn raw_verify_pop(&self, public_key: &[u8], proof: &[u8]) -> bool {
        verify_bls(public_key, proof, public_key, BLS_POP_DST)
    }

    fn raw_aggregate_signatures(&self, signatures: &[&[u8]]) -> Result<Vec<u8>, ProviderError> {
        let decoded = signatures
            .iter()
            .enumerate()
            .map(|(index, bytes)| {
                Signature::from_bytes(bytes).map_err(|_| ProviderError::Decoding { index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&Signature> = decoded.iter().collect();

        let aggregate = AggregateSignature::aggregate(&refs, false)
            .map_err(|e| ProviderError::Aggregation(format!("{e:?}")))?;
        trace!(
            "[contract-crypto] aggregated {} BLS signatures",
            signatures.len()
        );
        Ok(aggregate.to_signature().to_bytes().to_vec())
    }

    fn raw_aggregate_public_keys(&self, public_keys: &[&[u8]]) -> Result<Vec<u8>, ProviderError> {
        let decoded = public_keys
            .iter()
            .enumerate()
            .map(|(index, bytes)| {
                PublicKey::from_bytes(bytes).map_err(|_| ProviderError::Decoding { index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&PublicKey> = decoded.iter().collect();

        let aggregate = AggregatePublicKey::aggregate(&refs, false)
            .map_err(|e| ProviderError::Aggregation(format!("{e:?}")))?;
        trace!(
            "[contract-crypto] aggregated {} BLS public keys",
            public_keys.len()
        );
        Ok(aggregate.to_public_key().to_bytes().to_vec())
    }
}

// =============================================================================
// ECDSA
// =============================================================================

/// `X || Y` to `0x04 || X || Y`.
fn sec1_uncompressed(public_key: &[u8]) -> Option<[u8; ECDSA_PUBLIC_KEY_LEN + 1]> {
    if public_key.len() != ECDSA_PUBLIC_KEY_LEN {
        return None;
    }
    let mut sec1 = [0u8; ECDSA_PUBLIC_KEY_LEN + 1];
    sec1[0] = SEC1_UNCOMPRESSED;
    sec1[1..].copy_from_slice(public_key);
    Some(sec1)
}

fn p256_key(public_key: &[u8]) -> Option<p256::ecdsa::VerifyingKey> {
    let sec1 = sec1_uncompressed(public_key)?;
    p256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).ok()
}

fn k256_key(public_key: &[u8]) -> Option<k256::ecdsa::VerifyingKey> {
    let sec1 = sec1_uncompressed(public_key)?;
    k256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1).ok()
}

fn verify_p256(public_key: &[u8], signature: &[u8], digest: &[u8]) -> bool {
    use p256::ecdsa::signature::hazmat::PrehashVerifier;

    let Some(key) = p256_key(public_key) else {
        return false;
    };
    let Ok(sig) = p256::ecdsa::Signature::from_slice(signature) else {
        return false;
    };
    key.verify_prehash(digest, &sig).is_ok()
}

fn verify_k256(public_key: &[u8], signature: &[u8], digest: &[u8]) -> bool {
    use k256::ecdsa::signature::hazmat::PrehashVerifier;

    let Some(key) = k256_key(public_key) else {
        return false;
    };
    let Ok(sig) = k256::ecdsa::Signature::from_slice(signature) else {
        return false;
    };
    // k256 only verifies low-S signatures; both forms are valid here
    let sig = sig.normalize_s().unwrap_or(sig);
    key.verify_prehash(digest, &sig).is_ok()
}

// =============================================================================
// BLS
// =============================================================================

/// Pairing check with the signature subgroup check enabled.
///
/// The key is not re-validated; that happened when its value was built.
fn verify_bls(public_key: &[u8], signature: &[u8], message: &[u8], dst: &[u8]) -> bool {
    let Ok(pk) = PublicKey::from_bytes(public_key) else {
        return false;
    };
    let Ok(sig) = Signature::from_bytes(signature) else {
        return false;
    };
    sig.verify(true, message, dst, &[], &pk, false) == BLST_ERROR::BLST_SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        bls_keypair, bls_pop, k256_keypair, p256_keypair, sign_bls, sign_k256, sign_p256,
    };

    #[test]
    fn test_p256_round_trip() {
        let provider = NativeCryptoProvider::new();
        let (sk, pk) = p256_keypair(1);
        let digest = provider.raw_hash(HashAlgorithm::SHA2_256, b"hello");
        let sig = sign_p256(&sk, &digest);

        assert!(provider.raw_verify(SignatureAlgorithm::ECDSA_P256, &pk, &sig, &digest));
        let other = provider.raw_hash(HashAlgorithm::SHA2_256, b"world");
        assert!(!provider.raw_verify(SignatureAlgorithm::ECDSA_P256, &pk, &sig, &other));
    }

    #[test]
    fn test_k256_accepts_high_s() {
        let provider = NativeCryptoProvider::new();
        let (sk, pk) = k256_keypair(2);
        let digest = provider.raw_hash(HashAlgorithm::SHA3_256, b"hello");
        let sig = sign_k256(&sk, &digest);
        assert!(provider.raw_verify(SignatureAlgorithm::ECDSA_secp256k1, &pk, &sig, &digest));

        let mut high = sig.clone();
        let s: [u8; 32] = sig[32..].try_into().unwrap();
        high[32..].copy_from_slice(&invert_s(&s));
        assert!(provider.raw_verify(SignatureAlgorithm::ECDSA_secp256k1, &pk, &high, &digest));
    }

    /// s' = n - s over the secp256k1 group order.
    fn invert_s(s: &[u8; 32]) -> [u8; 32] {
        const ORDER: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C,
            0xD0, 0x36, 0x41, 0x41,
        ];
        let mut result = [0u8; 32];
        let mut borrow = 0i32;
        for i in (0..32).rev() {
            let diff = ORDER[i] as i32 - s[i] as i32 - borrow;
            if diff < 0 {
                result[i] = (diff + 256) as u8;
                borrow = 1;
            } else {
                result[i] = diff as u8;
                borrow = 0;
            }
        }
        result
    }

    #[test]
    fn test_ecdsa_key_validation() {
        let provider = NativeCryptoProvider::new();
        let (_, p256_pk) = p256_keypair(3);
        let (_, k256_pk) = k256_keypair(3);

        assert!(provider.raw_validate_key(SignatureAlgorithm::ECDSA_P256, &p256_pk));
        assert!(provider.raw_validate_key(SignatureAlgorithm::ECDSA_secp256k1, &k256_pk));
        assert!(!provider.raw_validate_key(SignatureAlgorithm::ECDSA_P256, &[0u8; 64]));
        assert!(!provider.raw_validate_key(SignatureAlgorithm::ECDSA_P256, &k256_pk));
    }

    #[test]
    fn test_bls_round_trip() {
        let provider = NativeCryptoProvider::new();
        let (sk, pk) = bls_keypair(4);
        let sig = sign_bls(&sk, b"message");

        assert!(provider.raw_validate_key(SignatureAlgorithm::BLS_BLS12_381, &pk));
        assert!(provider.raw_verify(SignatureAlgorithm::BLS_BLS12_381, &pk, &sig, b"message"));
        assert!(!provider.raw_verify(SignatureAlgorithm::BLS_BLS12_381, &pk, &sig, b"other"));
    }

    #[test]
    fn test_bls_rejects_garbage_key() {
        let provider = NativeCryptoProvider::new();
        assert!(!provider.raw_validate_key(SignatureAlgorithm::BLS_BLS12_381, &[0x11; 96]));
    }

    #[test]
    fn test_bls_pop() {
        let provider = NativeCryptoProvider::new();
        let (sk, pk) = bls_keypair(5);
        let (_, other_pk) = bls_keypair(6);
        let proof = bls_pop(&sk);

        assert!(provider.raw_verify_pop(&pk, &proof));
        assert!(!provider.raw_verify_pop(&other_pk, &proof));
        // A message signature is not a proof
        assert!(!provider.raw_verify_pop(&pk, &sign_bls(&sk, &pk)));
    }

    #[test]
    fn test_aggregate_rejects_bad_encoding() {
        let provider = NativeCryptoProvider::new();
        let (sk, _) = bls_keypair(7);
        let good = sign_bls(&sk, b"m");
        let bad = [0xFFu8; 48];

        let result = provider.raw_aggregate_signatures(&[&good, &bad]);
        assert_eq!(result, Err(ProviderError::Decoding { index: 1 }));
    }
}
