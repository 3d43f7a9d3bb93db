//! # Public Key Value
//!
//! Immutable public key with a validity flag computed once, at construction.
//!
//! A correctly sized but off-curve (or out-of-subgroup) key is still a
//! value: it is built with `is_valid == false` and never verifies anything.

use super::algorithms::SignatureAlgorithm;
use super::errors::CryptoError;
use crate::ports::outbound::CryptoProvider;
use std::fmt;
use tracing::trace;

/// Raw public key bytes tagged with their algorithm.
///
/// There are no setters; clones share nothing mutable and are safe to send
/// across verification threads.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKeyValue {
    raw: Box<[u8]>,
    algorithm: SignatureAlgorithm,
    is_valid: bool,
}

impl PublicKeyValue {
    /// Build a key, validating its length and asking the provider once
    /// whether it is a valid group element.
    ///
    /// # Errors
    /// * `Encoding` if `raw` does not have the algorithm's key length
    pub fn new<P: CryptoProvider + ?Sized>(
        raw: &[u8],
        algorithm: SignatureAlgorithm,
        provider: &P,
    ) -> Result<Self, CryptoError> {
        check_length(raw, algorithm)?;
        let is_valid = provider.raw_validate_key(algorithm, raw);
        trace!(
            "[contract-crypto] constructed {} key, valid={}",
            algorithm,
            is_valid
        );

        Ok(Self {
            raw: raw.into(),
            algorithm,
            is_valid,
        })
    }

    /// Key produced by aggregation; validity is inherited from its inputs.
    pub(crate) fn aggregated(raw: Vec<u8>) -> Result<Self, CryptoError> {
        let algorithm = SignatureAlgorithm::BLS_BLS12_381;
        check_length(&raw, algorithm)?;

        Ok(Self {
            raw: raw.into_boxed_slice(),
            algorithm,
            is_valid: true,
        })
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }
}

fn check_length(raw: &[u8], algorithm: SignatureAlgorithm) -> Result<(), CryptoError> {
    let expected = algorithm.public_key_len();
    if raw.len() != expected {
        return Err(CryptoError::Encoding {
            algorithm,
            expected,
            actual: raw.len(),
        });
    }
    Ok(())
}

impl fmt::Debug for PublicKeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKeyValue({}, 0x", self.algorithm)?;
        for byte in self.raw.iter().take(4) {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..., valid={})", self.is_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::native::NativeCryptoProvider;
    use crate::test_utils::{p256_keypair, MockProvider};

    #[test]
    fn test_wrong_length_is_encoding_error() {
        let provider = MockProvider::new();
        let result = PublicKeyValue::new(&[0u8; 63], SignatureAlgorithm::ECDSA_P256, &provider);

        assert_eq!(
            result,
            Err(CryptoError::Encoding {
                algorithm: SignatureAlgorithm::ECDSA_P256,
                expected: 64,
                actual: 63,
            })
        );
        assert_eq!(provider.validate_calls(), 0);
    }

    #[test]
    fn test_bls_expects_96_bytes() {
        let provider = MockProvider::new();
        let bls = SignatureAlgorithm::BLS_BLS12_381;

        assert!(PublicKeyValue::new(&[0u8; 64], bls, &provider).is_err());
        assert!(PublicKeyValue::new(&[0u8; 96], bls, &provider).is_ok());
    }

    #[test]
    fn test_off_curve_key_is_constructed_invalid() {
        let provider = NativeCryptoProvider::new();
        let key = PublicKeyValue::new(&[0x01; 64], SignatureAlgorithm::ECDSA_P256, &provider)
            .expect("well-sized key must construct");

        assert!(!key.is_valid());
        assert_eq!(key.raw(), &[0x01; 64][..]);
    }

    #[test]
    fn test_on_curve_key_is_valid() {
        let provider = NativeCryptoProvider::new();
        let (_, raw) = p256_keypair(7);
        let key = PublicKeyValue::new(&raw, SignatureAlgorithm::ECDSA_P256, &provider).unwrap();

        assert!(key.is_valid());
        assert_eq!(key.algorithm(), SignatureAlgorithm::ECDSA_P256);
    }

    #[test]
    fn test_validity_computed_once() {
        let provider = MockProvider::new();
        let key =
            PublicKeyValue::new(&[0u8; 64], SignatureAlgorithm::ECDSA_secp256k1, &provider)
                .unwrap();

        let _ = key.is_valid();
        let _ = key.clone().is_valid();
        assert_eq!(provider.validate_calls(), 1);
    }

    #[test]
    fn test_debug_is_truncated() {
        let provider = MockProvider::new();
        let key = PublicKeyValue::new(&[0xAB; 96], SignatureAlgorithm::BLS_BLS12_381, &provider)
            .unwrap();

        assert_eq!(
            format!("{key:?}"),
            "PublicKeyValue(BLS_BLS12_381, 0xabababab..., valid=true)"
        );
    }
}
