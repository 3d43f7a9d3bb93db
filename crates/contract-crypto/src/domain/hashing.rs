//! # Domain-Separated Hashing
//!
//! Builds the exact byte input for each hash algorithm before handing it to
//! the provider:
//!
//! | Algorithm | Tagged input |
//! |-----------|--------------|
//! | SHA2 / SHA3 | `zeroPad(tag, 32) \|\| data`, or `data` when the tag is empty |
//! | KMAC128 | `KMAC128(key = "APP_" \|\| tag \|\| suffix, custom = "H2C", data)` |
//! | KECCAK_256 | `data`, tag ignored |

use super::algorithms::{
    HashAlgorithm, Separation, KMAC_CUSTOMIZER, KMAC_KEY_PREFIX, KMAC_KEY_SUFFIX, KMAC_OUTPUT_LEN,
};
use super::errors::CryptoError;
use crate::ports::outbound::CryptoProvider;

/// Hash output; its length is `HashAlgorithm::digest_len`.
pub type Digest = Vec<u8>;

/// Applies domain separation rules on top of a provider.
pub struct DomainSeparatedHasher<'p, P: CryptoProvider + ?Sized> {
    provider: &'p P,
}

impl<'p, P: CryptoProvider + ?Sized> DomainSeparatedHasher<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Untagged digest.
    ///
    /// For KMAC128 this is the tagged construction with an empty tag, so the
    /// key literal is still applied.
    pub fn hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> Digest {
        match algorithm.rules().separation {
            Separation::KmacCustomization => self.kmac(data, ""),
            Separation::FixedPrefix { .. } | Separation::Untagged => {
                self.provider.raw_hash(algorithm, data)
            }
        }
    }

    /// Digest of `data` separated by `tag`.
    ///
    /// # Errors
    /// * `TagTooLong` if a prefix-separated algorithm gets a tag over 32 bytes
    pub fn hash_with_tag(
        &self,
        algorithm: HashAlgorithm,
        data: &[u8],
        tag: &str,
    ) -> Result<Digest, CryptoError> {
        match algorithm.rules().separation {
            Separation::FixedPrefix { len } => {
                if tag.is_empty() {
                    return Ok(self.provider.raw_hash(algorithm, data));
                }
                let message = prefixed_message(tag, data, len)?;
                Ok(self.provider.raw_hash(algorithm, &message))
            }
            Separation::KmacCustomization => Ok(self.kmac(data, tag)),
            Separation::Untagged => Ok(self.provider.raw_hash(algorithm, data)),
        }
    }

    fn kmac(&self, data: &[u8], tag: &str) -> Digest {
        self.provider
            .raw_kmac128(&kmac_key(tag), KMAC_CUSTOMIZER, data, KMAC_OUTPUT_LEN)
    }
}

/// `zeroPad(utf8(tag), len) || data`.
fn prefixed_message(tag: &str, data: &[u8], len: usize) -> Result<Vec<u8>, CryptoError> {
    let tag = tag.as_bytes();
    if tag.len() > len {
        return Err(CryptoError::TagTooLong {
            len: tag.len(),
            max: len,
        });
    }

    let mut message = Vec::with_capacity(len + data.len());
    message.extend_from_slice(tag);
    message.resize(len, 0);
    message.extend_from_slice(data);
    Ok(message)
}

/// `"APP_" || tag || "BLS_SIG_BLS12381G1_XOF:KMAC128_SSWU_RO_POP_"`.
pub(crate) fn kmac_key(tag: &str) -> Vec<u8> {
    let mut key =
        Vec::with_capacity(KMAC_KEY_PREFIX.len() + tag.len() + KMAC_KEY_SUFFIX.len());
    key.extend_from_slice(KMAC_KEY_PREFIX);
    key.extend_from_slice(tag.as_bytes());
    key.extend_from_slice(KMAC_KEY_SUFFIX);
    key
}
