//! Fuzz target for single-key verification.
//!
//! Verification is total: any key, signature, tag and algorithm pairing
//! must produce a boolean without panicking.

#![no_main]

use contract_crypto::{
    CryptoApi, CryptoService, HashAlgorithm, NativeCryptoProvider, SignatureAlgorithm,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct VerifyFuzzInput {
    /// Raw signature algorithm selector
    signature_algorithm: u8,
    /// Raw hash algorithm selector
    hash_algorithm: u8,
    public_key: Vec<u8>,
    signature: Vec<u8>,
    data: Vec<u8>,
    tag: String,
}

fuzz_target!(|input: VerifyFuzzInput| {
    let Some(signature_algorithm) = SignatureAlgorithm::from_raw_value(input.signature_algorithm)
    else {
        return;
    };
    let Some(hash_algorithm) = HashAlgorithm::from_raw_value(input.hash_algorithm) else {
        return;
    };

    let service = CryptoService::new(NativeCryptoProvider::new());

    // Wrong lengths are the only structural failure
    let key = match service.public_key(&input.public_key, signature_algorithm) {
        Ok(key) => key,
        Err(_) => {
            assert_ne!(input.public_key.len(), signature_algorithm.public_key_len());
            return;
        }
    };

    let result = service.verify(
        &key,
        &input.signature,
        &input.data,
        &input.tag,
        hash_algorithm,
    );

    // Deterministic
    let again = service.verify(
        &key,
        &input.signature,
        &input.data,
        &input.tag,
        hash_algorithm,
    );
    assert_eq!(result, again);

    // An invalid key never authorizes anything
    if !key.is_valid() {
        assert!(!result);
    }
});
