//! # Crypto Service
//!
//! Application service implementing `CryptoApi`.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`CryptoApi`)
//! - Owns the outbound port (`CryptoProvider`)
//! - Delegates policy to the domain layer and adds logging and configuration

use crate::config::CryptoConfig;
use crate::domain::algorithms::{HashAlgorithm, SignatureAlgorithm};
use crate::domain::bls::BlsAggregator;
use crate::domain::errors::CryptoError;
use crate::domain::hashing::{Digest, DomainSeparatedHasher};
use crate::domain::key_list::{KeyList, KeyListSignature};
use crate::domain::public_key::PublicKeyValue;
use crate::domain::verifier::Verifier;
use crate::ports::inbound::CryptoApi;
use crate::ports::outbound::CryptoProvider;
use tracing::{debug, warn};

/// Crypto Service.
///
/// Stateless apart from its configuration; share it freely across threads.
pub struct CryptoService<P: CryptoProvider> {
    provider: P,
    config: CryptoConfig,
}

impl<P: CryptoProvider> CryptoService<P> {
    /// Create a service with default configuration.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: CryptoConfig::default(),
        }
    }

    /// Create a service with explicit configuration.
    ///
    /// # Errors
    /// * `InvalidConfig` if the configuration does not validate
    pub fn with_config(provider: P, config: CryptoConfig) -> Result<Self, CryptoError> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Empty key list honoring the configured capacity.
    pub fn new_key_list(&self) -> KeyList {
        match self.config.max_key_list_entries {
            Some(max) => KeyList::with_max_entries(max),
            None => KeyList::new(),
        }
    }

    fn verifier(&self) -> Verifier<'_, P> {
        Verifier::new(&self.provider)
    }

    fn log_rejection(&self, what: &str, reason: &dyn std::fmt::Display) {
        if self.config.log_rejections {
            warn!("[contract-crypto] {} rejected: {}", what, reason);
        } else {
            debug!("[contract-crypto] {} rejected: {}", what, reason);
        }
    }

    fn log_error<T>(operation: &str, result: Result<T, CryptoError>) -> Result<T, CryptoError> {
        if let Err(ref e) = result {
            warn!("[contract-crypto] {} failed: {}", operation, e);
        }
        result
    }
}

impl<P: CryptoProvider> CryptoApi for CryptoService<P> {
    fn hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> Digest {
        DomainSeparatedHasher::new(&self.provider).hash(algorithm, data)
    }

    fn hash_with_tag(
        &self,
        algorithm: HashAlgorithm,
        data: &[u8],
        tag: &str,
    ) -> Result<Digest, CryptoError> {
        Self::log_error(
            "hash_with_tag",
            DomainSeparatedHasher::new(&self.provider).hash_with_tag(algorithm, data, tag),
        )
    }

    fn public_key(
        &self,
        raw: &[u8],
        algorithm: SignatureAlgorithm,
    ) -> Result<PublicKeyValue, CryptoError> {
        Self::log_error(
            "public_key",
            PublicKeyValue::new(raw, algorithm, &self.provider),
        )
    }

    fn validate_public_key(&self, public_key: &PublicKeyValue) -> bool {
        public_key.is_valid()
    }

    fn verify(
        &self,
        public_key: &PublicKeyValue,
        signature: &[u8],
        data: &[u8],
        domain_tag: &str,
        hash_algorithm: HashAlgorithm,
    ) -> bool {
        match self
            .verifier()
            .check(public_key, signature, data, domain_tag, hash_algorithm)
        {
            Ok(()) => true,
            Err(rejection) => {
                self.log_rejection("verify", &rejection);
                false
            }
        }
    }

    fn verify_pop(&self, public_key: &PublicKeyValue, proof: &[u8]) -> Result<bool, CryptoError> {
        match Self::log_error("verify_pop", self.verifier().check_pop(public_key, proof))? {
            Ok(()) => Ok(true),
            Err(rejection) => {
                self.log_rejection("verify_pop", &rejection);
                Ok(false)
            }
        }
    }

    fn verify_key_list(
        &self,
        key_list: &KeyList,
        signatures: &[KeyListSignature],
        data: &[u8],
    ) -> bool {
        match key_list.check(signatures, data, &self.verifier()) {
            Ok(()) => true,
            Err(rejection) => {
                self.log_rejection("key list", &rejection);
                false
            }
        }
    }

    fn aggregate_signatures(&self, signatures: &[Vec<u8>]) -> Result<Vec<u8>, CryptoError> {
        Self::log_error(
            "aggregate_signatures",
            BlsAggregator::new(&self.provider).aggregate_signatures(signatures),
        )
    }

    fn aggregate_public_keys(
        &self,
        keys: &[&PublicKeyValue],
    ) -> Result<PublicKeyValue, CryptoError> {
        Self::log_error(
            "aggregate_public_keys",
            BlsAggregator::new(&self.provider).aggregate_public_keys(keys),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::algorithms::USER_DOMAIN_TAG;
    use crate::domain::weight::Weight;
    use crate::test_utils::MockProvider;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Run `f` with a WARN-level subscriber and return what it printed.
    fn warnings_during(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    fn revoked_list(service: &CryptoService<MockProvider>) -> KeyList {
        let key = service
            .public_key(&[1u8; 64], SignatureAlgorithm::ECDSA_P256)
            .unwrap();
        let mut list = service.new_key_list();
        list.add(key, HashAlgorithm::SHA2_256, Weight::FULL).unwrap();
        list.revoke(0).unwrap();
        list
    }

    #[test]
    fn test_with_config_validates() {
        let config = CryptoConfig {
            log_rejections: false,
            max_key_list_entries: Some(0),
        };
        assert!(CryptoService::with_config(MockProvider::new(), config).is_err());
    }

    #[test]
    fn test_new_key_list_honors_capacity() {
        let config = CryptoConfig::default().with_max_key_list_entries(1);
        let service = CryptoService::with_config(MockProvider::new(), config).unwrap();
        let key = service
            .public_key(&[1u8; 64], SignatureAlgorithm::ECDSA_P256)
            .unwrap();

        let mut list = service.new_key_list();
        list.add(key.clone(), HashAlgorithm::SHA2_256, Weight::FULL)
            .unwrap();
        assert_eq!(
            list.add(key, HashAlgorithm::SHA2_256, Weight::FULL),
            Err(CryptoError::KeyListFull { max: 1 })
        );
    }

    #[test]
    fn test_verify_through_api() {
        let service = CryptoService::new(MockProvider::new());
        let key = service
            .public_key(&[1u8; 64], SignatureAlgorithm::ECDSA_secp256k1)
            .unwrap();

        assert!(service.validate_public_key(&key));
        assert!(service.verify(&key, &[0u8; 64], b"d", USER_DOMAIN_TAG, HashAlgorithm::SHA2_256));
        assert!(!service.verify(&key, &[0u8; 64], b"d", "", HashAlgorithm::SHA2_256));
    }

    #[test]
    fn test_structural_errors_propagate() {
        let service = CryptoService::new(MockProvider::new());

        assert!(matches!(
            service.public_key(&[0u8; 10], SignatureAlgorithm::BLS_BLS12_381),
            Err(CryptoError::Encoding { .. })
        ));
        assert_eq!(service.aggregate_signatures(&[]), Err(CryptoError::EmptyInput));
        assert!(matches!(
            service.hash_with_tag(HashAlgorithm::SHA2_256, b"d", &"x".repeat(40)),
            Err(CryptoError::TagTooLong { .. })
        ));
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CryptoService<MockProvider>>();
        assert_send_sync::<PublicKeyValue>();
        assert_send_sync::<KeyList>();
    }

    #[test]
    fn test_key_list_rejection_reason_is_logged() {
        let config = CryptoConfig::default().with_log_rejections(true);
        let service = CryptoService::with_config(MockProvider::new(), config).unwrap();
        let list = revoked_list(&service);
        let sigs = [KeyListSignature::new(0, vec![0u8; 64])];

        let out = warnings_during(|| assert!(!service.verify_key_list(&list, &sigs, b"d")));
        assert!(out.contains("key list rejected: key 0 is revoked"), "{out}");
    }

    #[test]
    fn test_rejections_stay_below_warn_by_default() {
        let service = CryptoService::new(MockProvider::new());
        let list = revoked_list(&service);
        let sigs = [KeyListSignature::new(0, vec![0u8; 64])];

        let out = warnings_during(|| assert!(!service.verify_key_list(&list, &sigs, b"d")));
        assert!(out.is_empty(), "{out}");
    }

    #[test]
    fn test_pop_rejection_reason_is_logged() {
        let config = CryptoConfig::default().with_log_rejections(true);
        let service = CryptoService::with_config(MockProvider::new(), config).unwrap();
        let key = service
            .public_key(&[1u8; 96], SignatureAlgorithm::BLS_BLS12_381)
            .unwrap();

        let out = warnings_during(|| assert_eq!(service.verify_pop(&key, &[0u8; 47]), Ok(false)));
        assert!(out.contains("signature length 47, expected 48"), "{out}");
        assert_eq!(service.provider().pop_calls(), 0);
    }

    #[test]
    fn test_verify_rejection_reason_is_logged() {
        let config = CryptoConfig::default().with_log_rejections(true);
        let service = CryptoService::with_config(MockProvider::new(), config).unwrap();
        let key = service
            .public_key(&[1u8; 64], SignatureAlgorithm::ECDSA_P256)
            .unwrap();

        let out = warnings_during(|| {
            assert!(!service.verify(&key, &[0u8; 64], b"d", "", HashAlgorithm::SHA2_256));
        });
        assert!(out.contains("hash algorithm or domain tag not allowed"), "{out}");
    }
}
