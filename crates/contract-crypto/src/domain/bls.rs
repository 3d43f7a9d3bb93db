//! # BLS Aggregation (BLS12-381)
//!
//! Signatures are G1 points (48 bytes compressed), public keys are G2 points
//! (96 bytes compressed).
//!
//! ## Rogue-key defense
//!
//! Inputs are not subgroup-checked here. Every key is expected to have
//! passed a proof of possession before it is aggregated; aggregation trusts
//! that, rather than re-checking on every call. Group addition is
//! commutative and associative, so results do not depend on input order or
//! on whether an input is itself an aggregate.

use super::algorithms::{SignatureAlgorithm, BLS_SIGNATURE_LEN};
use super::errors::CryptoError;
use super::public_key::PublicKeyValue;
use crate::ports::outbound::CryptoProvider;
use tracing::debug;

/// Aggregates BLS signatures and public keys through the provider.
pub struct BlsAggregator<'p, P: CryptoProvider + ?Sized> {
    provider: &'p P,
}

impl<'p, P: CryptoProvider + ?Sized> BlsAggregator<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Sum of the given compressed G1 signatures.
    ///
    /// # Errors
    /// * `EmptyInput` if `signatures` is empty
    /// * `Decoding` if any element is not a G1 point encoding
    pub fn aggregate_signatures<S: AsRef<[u8]>>(
        &self,
        signatures: &[S],
    ) -> Result<Vec<u8>, CryptoError> {
        if signatures.is_empty() {
            return Err(CryptoError::EmptyInput);
        }

        let raw: Vec<&[u8]> = signatures.iter().map(AsRef::as_ref).collect();
        if let Some(index) = raw.iter().position(|sig| sig.len() != BLS_SIGNATURE_LEN) {
            return Err(CryptoError::Decoding(format!(
                "signature {index} has {} bytes, expected {BLS_SIGNATURE_LEN}",
                raw[index].len()
            )));
        }

        let aggregate = self.provider.raw_aggregate_signatures(&raw)?;
        debug!("[contract-crypto] aggregated {} signatures", raw.len());
        Ok(aggregate)
    }

    /// Sum of the given BLS public keys, as a new key value.
    ///
    /// The result is marked valid without re-validation.
    ///
    /// # Errors
    /// * `EmptyInput` if `keys` is empty
    /// * `WrongAlgorithmForAggregation` if any key is not a BLS key
    pub fn aggregate_public_keys(
        &self,
        keys: &[&PublicKeyValue],
    ) -> Result<PublicKeyValue, CryptoError> {
        if keys.is_empty() {
            return Err(CryptoError::EmptyInput);
        }
        if let Some(key) = keys
            .iter()
            .find(|key| key.algorithm() != SignatureAlgorithm::BLS_BLS12_381)
        {
            return Err(CryptoError::WrongAlgorithmForAggregation(key.algorithm()));
        }

        let raw: Vec<&[u8]> = keys.iter().map(|key| key.raw()).collect();
        let aggregate = self.provider.raw_aggregate_public_keys(&raw)?;
        debug!("[contract-crypto] aggregated {} public keys", raw.len());
        PublicKeyValue::aggregated(aggregate)
    }
}
