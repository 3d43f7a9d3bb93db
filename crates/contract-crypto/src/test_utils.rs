//! # Test Utilities
//!
//! Scripted provider for exercising policy logic without curve math, plus
//! deterministic key fixtures for the native provider.

use crate::adapters::native::{BLS_POP_DST, BLS_SIG_DST};
use crate::domain::algorithms::{
    HashAlgorithm, SignatureAlgorithm, BLS_PUBLIC_KEY_LEN, BLS_SIGNATURE_LEN,
};
use crate::ports::outbound::{CryptoProvider, ProviderError};
use std::sync::atomic::{AtomicUsize, Ordering};

// =============================================================================
// MOCK PROVIDER
// =============================================================================

/// Provider with scripted answers.
///
/// * `raw_hash` echoes its input, so tests can assert the exact bytes the
///   domain layer built.
/// * `raw_kmac128` returns [`MockProvider::kmac_transcript`].
/// * Aggregation adds inputs byte-wise (wrapping), which is commutative.
#[derive(Debug)]
pub struct MockProvider {
    key_valid: bool,
    verify_result: bool,
    pop_result: bool,
    rejected_signatures: Vec<Vec<u8>>,
    validate_calls: AtomicUsize,
    verify_calls: AtomicUsize,
    pop_calls: AtomicUsize,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Accepts every key, signature and proof.
    pub fn new() -> Self {
        Self {
            key_valid: true,
            verify_result: true,
            pop_result: true,
            rejected_signatures: Vec::new(),
            validate_calls: AtomicUsize::new(0),
            verify_calls: AtomicUsize::new(0),
            pop_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_key_validity(mut self, valid: bool) -> Self {
        self.key_valid = valid;
        self
    }

    pub fn with_verify_result(mut self, result: bool) -> Self {
        self.verify_result = result;
        self
    }

    pub fn with_pop_result(mut self, result: bool) -> Self {
        self.pop_result = result;
        self
    }

    /// Make `raw_verify` fail for this exact signature.
    pub fn rejecting(mut self, signature: &[u8]) -> Self {
        self.rejected_signatures.push(signature.to_vec());
        self
    }

    pub fn validate_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn pop_calls(&self) -> usize {
        self.pop_calls.load(Ordering::SeqCst)
    }

    /// `key || 0xFF || customizer || 0xFF || data`, resized to `output_len`.
    pub fn kmac_transcript(
        key: &[u8],
        customizer: &[u8],
        data: &[u8],
        output_len: usize,
    ) -> Vec<u8> {
        let mut out = Vec::with_capacity(output_len);
        out.extend_from_slice(key);
        out.push(0xFF);
        out.extend_from_slice(customizer);
        out.push(0xFF);
        out.extend_from_slice(data);
        out.resize(output_len, 0);
        out
    }
}

fn wrapping_sum(inputs: &[&[u8]], len: usize) -> Result<Vec<u8>, ProviderError> {
    let mut sum = vec![0u8; len];
    for (index, input) in inputs.iter().enumerate() {
        if input.len() != len {
            return Err(ProviderError::Decoding { index });
        }
        for (acc, byte) in sum.iter_mut().zip(input.iter()) {
            *acc = acc.wrapping_add(*byte);
        }
    }
    Ok(sum)
}

impl CryptoProvider for MockProvider {
    fn raw_hash(&self, _algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
        data.to_vec()
    }

    fn raw_kmac128(
        &self,
        key: &[u8],
        customizer: &[u8],
        data: &[u8],
        output_len: usize,
    ) -> Vec<u8> {
        Self::kmac_transcript(key, customizer, data, output_len)
    }

    fn raw_verify(
        &self,
        _algorithm: SignatureAlgorithm,
        _public_key: &[u8],
        signature: &[u8],
        _message: &[u8],
    ) -> bool {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.verify_result
            && !self
                .rejected_signatures
                .iter()
                .any(|rejected| rejected.as_slice() == signature)
    }

    fn raw_validate_key(&self, _algorithm: SignatureAlgorithm, _public_key: &[u8]) -> bool {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        self.key_valid
    }

    fn raw_verify_pop(&self, _public_key: &[u8], _proof: &[u8]) -> bool {
        self.pop_calls.fetch_add(1, Ordering::SeqCst);
        self.pop_result
    }

    fn raw_aggregate_signatures(&self, signatures: &[&[u8]]) -> Result<Vec<u8>, ProviderError> {
        wrapping_sum(signatures, BLS_SIGNATURE_LEN)
    }

    fn raw_aggregate_public_keys(&self, public_keys: &[&[u8]]) -> Result<Vec<u8>, ProviderError> {
        wrapping_sum(public_keys, BLS_PUBLIC_KEY_LEN)
    }
}

// =============================================================================
// KEY FIXTURES
// =============================================================================

/// `X || Y` encoding of an uncompressed SEC1 point.
fn strip_sec1_tag(sec1: &[u8]) -> Vec<u8> {
    sec1[1..].to_vec()
}

/// Deterministic P-256 key pair; `seed` must be non-zero.
pub fn p256_keypair(seed: u8) -> (p256::ecdsa::SigningKey, Vec<u8>) {
    let sk = p256::ecdsa::SigningKey::from_slice(&[seed; 32]).expect("seed is a valid scalar");
    let pk = strip_sec1_tag(sk.verifying_key().to_encoded_point(false).as_bytes());
    (sk, pk)
}

/// Deterministic secp256k1 key pair; `seed` must be non-zero.
pub fn k256_keypair(seed: u8) -> (k256::ecdsa::SigningKey, Vec<u8>) {
    let sk = k256::ecdsa::SigningKey::from_slice(&[seed; 32]).expect("seed is a valid scalar");
    let pk = strip_sec1_tag(sk.verifying_key().to_encoded_point(false).as_bytes());
    (sk, pk)
}

/// `r || s` over a pre-hashed message.
pub fn sign_p256(sk: &p256::ecdsa::SigningKey, digest: &[u8]) -> Vec<u8> {
    use p256::ecdsa::signature::hazmat::PrehashSigner;

    let sig: p256::ecdsa::Signature = sk.sign_prehash(digest).expect("signing failed");
    sig.to_bytes().to_vec()
}

/// `r || s` over a pre-hashed message.
pub fn sign_k256(sk: &k256::ecdsa::SigningKey, digest: &[u8]) -> Vec<u8> {
    use k256::ecdsa::signature::hazmat::PrehashSigner;

    let sig: k256::ecdsa::Signature = sk.sign_prehash(digest).expect("signing failed");
    sig.to_bytes().to_vec()
}

/// Deterministic BLS key pair with a compressed G2 public key.
pub fn bls_keypair(seed: u8) -> (blst::min_sig::SecretKey, Vec<u8>) {
    let sk = blst::min_sig::SecretKey::key_gen(&[seed; 32], &[]).expect("valid IKM");
    let pk = sk.sk_to_pk().to_bytes().to_vec();
    (sk, pk)
}

/// Compressed G1 signature over an already expanded message.
pub fn sign_bls(sk: &blst::min_sig::SecretKey, message: &[u8]) -> Vec<u8> {
    sk.sign(message, BLS_SIG_DST, &[]).to_bytes().to_vec()
}

/// Proof of possession for `sk`'s public key.
pub fn bls_pop(sk: &blst::min_sig::SecretKey) -> Vec<u8> {
    let pk = sk.sk_to_pk().to_bytes();
    sk.sign(&pk, BLS_POP_DST, &[]).to_bytes().to_vec()
}
