//! # Domain Layer
//!
//! Policy and dispatch logic. All curve and hash math is reached through
//! the `CryptoProvider` port.

pub mod algorithms;
pub mod bls;
pub mod errors;
pub mod hashing;
pub mod key_list;
pub mod public_key;
pub mod verifier;
pub mod weight;
