//! # Contract Crypto
//!
//! Cryptographic verification layer for a smart-contract runtime:
//! domain-separated hashing, signature verification across ECDSA P-256,
//! ECDSA secp256k1 and BLS12-381, weighted multi-signature key lists and
//! BLS aggregation.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): algorithm registry, hashing rules, key
//!   values, verification policy, key lists, aggregation
//! - **Ports Layer** (`ports/`): `CryptoApi` (inbound), `CryptoProvider` (outbound)
//! - **Adapters Layer** (`adapters/`): `NativeCryptoProvider`
//! - **Service Layer** (`service.rs`): wires configuration and logging
//!
//! ## Determinism
//!
//! Hashing and verification results must be identical on every executor.
//! The domain tag literal, KMAC key template, KMAC customizer and output
//! length are constants in [`domain::algorithms`], never configuration.
//!
//! ## Failure Model
//!
//! - Malformed calls (wrong key length, oversized tag, empty aggregation)
//!   return [`CryptoError`]
//! - Failed authorization (bad signature, wrong tag, revoked key, too little
//!   weight) returns `false`

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export public API
pub use adapters::native::NativeCryptoProvider;
pub use config::CryptoConfig;
pub use domain::algorithms::{HashAlgorithm, SignatureAlgorithm, USER_DOMAIN_TAG};
pub use domain::bls::BlsAggregator;
pub use domain::errors::CryptoError;
pub use domain::hashing::{Digest, DomainSeparatedHasher};
pub use domain::key_list::{KeyList, KeyListEntry, KeyListRejection, KeyListSignature};
pub use domain::public_key::PublicKeyValue;
pub use domain::verifier::{Rejection, Verifier};
pub use domain::weight::Weight;
pub use ports::inbound::CryptoApi;
pub use ports::outbound::{CryptoProvider, ProviderError};
pub use service::CryptoService;
