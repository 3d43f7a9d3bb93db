//! # Crypto Errors
//!
//! Structural errors: the call itself was malformed and must abort.
//!
//! Authorization failures (bad signature, wrong tag, revoked key, not enough
//! weight) are never represented here; they surface as `false`.

use super::algorithms::SignatureAlgorithm;
use thiserror::Error;

/// Errors raised by construction, hashing, key list mutation and aggregation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Raw bytes have the wrong length for the algorithm
    #[error("Invalid {algorithm} encoding: expected {expected} bytes, got {actual}")]
    Encoding {
        algorithm: SignatureAlgorithm,
        expected: usize,
        actual: usize,
    },

    /// Domain tag does not fit into the fixed-length prefix
    #[error("Domain tag too long: {len} bytes exceeds the {max} byte limit")]
    TagTooLong { len: usize, max: usize },

    /// Aggregation over nothing
    #[error("Cannot aggregate an empty list")]
    EmptyInput,

    /// An aggregation input is not a decodable point encoding
    #[error("Decoding failed: {0}")]
    Decoding(String),

    /// Public key aggregation is only defined for BLS keys
    #[error("Cannot aggregate {0} public keys, only BLS_BLS12_381 keys")]
    WrongAlgorithmForAggregation(SignatureAlgorithm),

    /// Key index not present in the key list
    #[error("Unknown key index: {0}")]
    UnknownKeyIndex(usize),

    /// Operation is not defined for the key's algorithm
    #[error("Unsupported operation {operation} for {algorithm}")]
    UnsupportedOperation {
        operation: &'static str,
        algorithm: SignatureAlgorithm,
    },

    /// Name or raw value does not denote a known algorithm
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Weight literal could not be parsed
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    /// The key list reached its configured capacity
    #[error("Key list is full: {max} entries")]
    KeyListFull { max: usize },

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
