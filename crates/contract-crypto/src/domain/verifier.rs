//! # Verifier
//!
//! Single-signature verification with policy applied before any
//! cryptographic work:
//!
//! 1. the key must be valid
//! 2. hash algorithm and domain tag must be legal for the key's algorithm
//! 3. the signature must have the algorithm's length
//! 4. the message is hashed with the tag
//! 5. the provider checks the raw signature
//!
//! Every rejection is a `false`, never an error.

use super::algorithms::{HashAlgorithm, SignatureAlgorithm};
use super::errors::CryptoError;
use super::hashing::DomainSeparatedHasher;
use super::public_key::PublicKeyValue;
use crate::ports::outbound::CryptoProvider;
use std::fmt;
use tracing::debug;

/// Why a verification returned `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    InvalidKey,
    IllegalPairing,
    SignatureLength { expected: usize, actual: usize },
    BadSignature,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::InvalidKey => f.write_str("public key is not valid"),
            Rejection::IllegalPairing => f.write_str("hash algorithm or domain tag not allowed"),
            Rejection::SignatureLength { expected, actual } => {
                write!(f, "signature length {actual}, expected {expected}")
            }
            Rejection::BadSignature => f.write_str("signature does not match"),
        }
    }
}

/// Dispatches verification to the provider.
pub struct Verifier<'p, P: CryptoProvider + ?Sized> {
    provider: &'p P,
}

impl<'p, P: CryptoProvider + ?Sized> Clone for Verifier<'p, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'p, P: CryptoProvider + ?Sized> Copy for Verifier<'p, P> {}

impl<'p, P: CryptoProvider + ?Sized> Verifier<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// `true` iff `signature` authenticates `data` under `domain_tag`.
    pub fn verify(
        &self,
        public_key: &PublicKeyValue,
        signature: &[u8],
        data: &[u8],
        domain_tag: &str,
        hash_algorithm: HashAlgorithm,
    ) -> bool {
        match self.check(public_key, signature, data, domain_tag, hash_algorithm) {
            Ok(()) => true,
            Err(rejection) => {
                debug!(
                    "[contract-crypto] {} verification rejected: {}",
                    public_key.algorithm(),
                    rejection
                );
                false
            }
        }
    }

    /// Same as [`Verifier::verify`], reporting the reason for a rejection.
    pub fn check(
        &self,
        public_key: &PublicKeyValue,
        signature: &[u8],
        data: &[u8],
        domain_tag: &str,
        hash_algorithm: HashAlgorithm,
    ) -> Result<(), Rejection> {
        if !public_key.is_valid() {
            return Err(Rejection::InvalidKey);
        }

        let algorithm = public_key.algorithm();
        if !algorithm.accepts(hash_algorithm, domain_tag) {
            return Err(Rejection::IllegalPairing);
        }

        let expected = algorithm.signature_len();
        if signature.len() != expected {
            return Err(Rejection::SignatureLength {
                expected,
                actual: signature.len(),
            });
        }

        let message = DomainSeparatedHasher::new(self.provider)
            .hash_with_tag(hash_algorithm, data, domain_tag)
            // Pairing rules only admit tags the hasher accepts
            .map_err(|_| Rejection::IllegalPairing)?;

        if self
            .provider
            .raw_verify(algorithm, public_key.raw(), signature, &message)
        {
            Ok(())
        } else {
            Err(Rejection::BadSignature)
        }
    }

    /// BLS proof of possession check.
    ///
    /// # Errors
    /// * `UnsupportedOperation` if the key is not a BLS key
    pub fn verify_pop(
        &self,
        public_key: &PublicKeyValue,
        proof: &[u8],
    ) -> Result<bool, CryptoError> {
        Ok(self.check_pop(public_key, proof)?.is_ok())
    }

    /// Same as [`Verifier::verify_pop`], reporting why a proof was refused.
    ///
    /// The outer `Result` carries the structural error, the inner one the
    /// rejection reason.
    pub fn check_pop(
        &self,
        public_key: &PublicKeyValue,
        proof: &[u8],
    ) -> Result<Result<(), Rejection>, CryptoError> {
        let algorithm = public_key.algorithm();
        if algorithm != SignatureAlgorithm::BLS_BLS12_381 {
            return Err(CryptoError::UnsupportedOperation {
                operation: "verifyPoP",
                algorithm,
            });
        }

        if !public_key.is_valid() {
            return Ok(Err(Rejection::InvalidKey));
        }
        let expected = algorithm.signature_len();
        if proof.len() != expected {
            return Ok(Err(Rejection::SignatureLength {
                expected,
                actual: proof.len(),
            }));
        }

        if self.provider.raw_verify_pop(public_key.raw(), proof) {
            Ok(Ok(()))
        } else {
            Ok(Err(Rejection::BadSignature))
        }
    }
}
