//! Fuzz target for BLS aggregation.
//!
//! Arbitrary signature bytes must aggregate or fail with an error, never
//! panic, and the result must not depend on input order.

#![no_main]

use contract_crypto::{CryptoApi, CryptoService, NativeCryptoProvider};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct AggregateFuzzInput {
    /// Signature bytes (48 bytes for BLS12-381 G1)
    signatures: Vec<[u8; 48]>,
}

fuzz_target!(|input: AggregateFuzzInput| {
    let service = CryptoService::new(NativeCryptoProvider::new());
    let signatures: Vec<Vec<u8>> = input.signatures.iter().map(|s| s.to_vec()).collect();

    let forward = service.aggregate_signatures(&signatures);

    let mut reversed = signatures.clone();
    reversed.reverse();
    let backward = service.aggregate_signatures(&reversed);

    match (forward, backward) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(_), Err(_)) => {}
        (a, b) => panic!("order changed the outcome: {a:?} vs {b:?}"),
    }
});
