//! # Outbound Ports (Driven Ports / SPI)
//!
//! The cryptographic provider boundary. Curve arithmetic and raw hash
//! computation live behind this trait; the domain layer only decides what
//! to feed it.

use crate::domain::algorithms::{HashAlgorithm, SignatureAlgorithm};
use crate::domain::errors::CryptoError;
use thiserror::Error;

/// Error from provider operations that can reject their input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Input is not a valid point encoding
    #[error("Point decoding failed at input {index}")]
    Decoding { index: usize },

    /// Group operation failed
    #[error("Aggregation failed: {0}")]
    Aggregation(String),
}

impl From<ProviderError> for CryptoError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Decoding { index } => {
                CryptoError::Decoding(format!("input {index} is not a valid point encoding"))
            }
            ProviderError::Aggregation(reason) => CryptoError::Decoding(reason),
        }
    }
}

/// Raw cryptographic math.
///
/// Implementations must be deterministic and non-blocking. Every method
/// takes raw bytes; length and pairing policy has already been enforced by
/// the caller.
pub trait CryptoProvider: Send + Sync {
    /// Plain digest of `data`.
    fn raw_hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8>;

    /// KMAC128 with explicit key, customization string and output length.
    fn raw_kmac128(&self, key: &[u8], customizer: &[u8], data: &[u8], output_len: usize)
        -> Vec<u8>;

    /// Check `signature` over the already-hashed `message`.
    ///
    /// For BLS this includes the signature's subgroup check.
    fn raw_verify(
        &self,
        algorithm: SignatureAlgorithm,
        public_key: &[u8],
        signature: &[u8],
        message: &[u8],
    ) -> bool;

    /// On-curve check for ECDSA, G2 subgroup membership for BLS.
    fn raw_validate_key(&self, algorithm: SignatureAlgorithm, public_key: &[u8]) -> bool;

    /// BLS proof of possession check.
    fn raw_verify_pop(&self, public_key: &[u8], proof: &[u8]) -> bool;

    /// Sum of compressed G1 points, without subgroup checks.
    fn raw_aggregate_signatures(&self, signatures: &[&[u8]]) -> Result<Vec<u8>, ProviderError>;

    /// Sum of compressed G2 points, without subgroup checks.
    fn raw_aggregate_public_keys(&self, public_keys: &[&[u8]]) -> Result<Vec<u8>, ProviderError>;
}
