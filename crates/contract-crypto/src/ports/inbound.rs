//! # Inbound Ports (Driving Ports / API)
//!
//! The surface contract code and the account model call into.

use crate::domain::algorithms::{HashAlgorithm, SignatureAlgorithm};
use crate::domain::errors::CryptoError;
use crate::domain::hashing::Digest;
use crate::domain::key_list::{KeyList, KeyListSignature};
use crate::domain::public_key::PublicKeyValue;

/// Primary cryptography API.
///
/// Implementations must be thread-safe (`Send + Sync`). Verification
/// methods are total: adversarial input yields `false`, never an error.
pub trait CryptoApi: Send + Sync {
    // =========================================================================
    // Hashing
    // =========================================================================

    /// Untagged digest.
    fn hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> Digest;

    /// Domain-separated digest.
    ///
    /// # Errors
    /// * `TagTooLong` for SHA2/SHA3 with a tag over 32 bytes
    fn hash_with_tag(
        &self,
        algorithm: HashAlgorithm,
        data: &[u8],
        tag: &str,
    ) -> Result<Digest, CryptoError>;

    // =========================================================================
    // Keys
    // =========================================================================

    /// Build a public key value.
    ///
    /// # Errors
    /// * `Encoding` if the byte length does not match the algorithm
    fn public_key(
        &self,
        raw: &[u8],
        algorithm: SignatureAlgorithm,
    ) -> Result<PublicKeyValue, CryptoError>;

    /// Validity as computed at construction.
    fn validate_public_key(&self, public_key: &PublicKeyValue) -> bool;

    // =========================================================================
    // Verification
    // =========================================================================

    fn verify(
        &self,
        public_key: &PublicKeyValue,
        signature: &[u8],
        data: &[u8],
        domain_tag: &str,
        hash_algorithm: HashAlgorithm,
    ) -> bool;

    /// # Errors
    /// * `UnsupportedOperation` for non-BLS keys
    fn verify_pop(&self, public_key: &PublicKeyValue, proof: &[u8]) -> Result<bool, CryptoError>;

    fn verify_key_list(
        &self,
        key_list: &KeyList,
        signatures: &[KeyListSignature],
        data: &[u8],
    ) -> bool;

    // =========================================================================
    // BLS Aggregation
    // =========================================================================

    /// # Errors
    /// * `EmptyInput`, `Decoding`
    fn aggregate_signatures(&self, signatures: &[Vec<u8>]) -> Result<Vec<u8>, CryptoError>;

    /// # Errors
    /// * `EmptyInput`, `WrongAlgorithmForAggregation`
    fn aggregate_public_keys(
        &self,
        keys: &[&PublicKeyValue],
    ) -> Result<PublicKeyValue, CryptoError>;
}
