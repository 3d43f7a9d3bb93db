//! # Algorithm Registry
//!
//! Closed sets of hash and signature algorithms, each bound to a static
//! rule record. Every consensus-relevant constant lives here.
//!
//! ## Dispatch
//!
//! ```text
//! SignatureAlgorithm ──rules()──→ SignatureRules { key len, sig len, hashes, tag }
//! HashAlgorithm      ──rules()──→ HashRules      { digest len, separation }
//! ```

use super::errors::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The only domain tag accepted for ECDSA verification of user signatures.
pub const USER_DOMAIN_TAG: &str = "FLOW-V0.0-user";

/// Length the tag is zero-padded to for prefix-separated hashes.
pub const TAG_PREFIX_LEN: usize = 32;

/// KMAC customization string used for BLS message hashing.
pub const KMAC_CUSTOMIZER: &[u8] = b"H2C";

/// Leading part of the KMAC key, placed before the tag.
pub const KMAC_KEY_PREFIX: &[u8] = b"APP_";

/// Trailing part of the KMAC key, placed after the tag.
pub const KMAC_KEY_SUFFIX: &[u8] = b"BLS_SIG_BLS12381G1_XOF:KMAC128_SSWU_RO_POP_";

/// KMAC128 output length in bytes.
pub const KMAC_OUTPUT_LEN: usize = 1024;

/// ECDSA public key length (`X || Y`).
pub const ECDSA_PUBLIC_KEY_LEN: usize = 64;

/// ECDSA signature length (`r || s`).
pub const ECDSA_SIGNATURE_LEN: usize = 64;

/// BLS public key length (compressed G2).
pub const BLS_PUBLIC_KEY_LEN: usize = 96;

/// BLS signature length (compressed G1).
pub const BLS_SIGNATURE_LEN: usize = 48;

// =============================================================================
// HASH ALGORITHMS
// =============================================================================

/// How a domain tag is mixed into the hashed message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Separation {
    /// `zeroPad(tag, 32) || data`; an empty tag leaves `data` untouched.
    FixedPrefix { len: usize },
    /// The tag is embedded into the KMAC key.
    KmacCustomization,
    /// The tag is ignored.
    Untagged,
}

/// Static behaviour record for a hash algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashRules {
    pub digest_len: usize,
    pub separation: Separation,
}

const SHA_256_RULES: HashRules = HashRules {
    digest_len: 32,
    separation: Separation::FixedPrefix {
        len: TAG_PREFIX_LEN,
    },
};

const SHA_384_RULES: HashRules = HashRules {
    digest_len: 48,
    separation: Separation::FixedPrefix {
        len: TAG_PREFIX_LEN,
    },
};

const KMAC_RULES: HashRules = HashRules {
    digest_len: KMAC_OUTPUT_LEN,
    separation: Separation::KmacCustomization,
};

const KECCAK_RULES: HashRules = HashRules {
    digest_len: 32,
    separation: Separation::Untagged,
};

/// Supported hash algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum HashAlgorithm {
    SHA2_256,
    SHA2_384,
    SHA3_256,
    SHA3_384,
    KMAC128_BLS_BLS12_381,
    KECCAK_256,
}

impl HashAlgorithm {
    /// Every variant, in raw-value order.
    pub const ALL: [HashAlgorithm; 6] = [
        HashAlgorithm::SHA2_256,
        HashAlgorithm::SHA2_384,
        HashAlgorithm::SHA3_256,
        HashAlgorithm::SHA3_384,
        HashAlgorithm::KMAC128_BLS_BLS12_381,
        HashAlgorithm::KECCAK_256,
    ];

    pub const fn rules(self) -> &'static HashRules {
        match self {
            HashAlgorithm::SHA2_256 | HashAlgorithm::SHA3_256 => &SHA_256_RULES,
            HashAlgorithm::SHA2_384 | HashAlgorithm::SHA3_384 => &SHA_384_RULES,
            HashAlgorithm::KMAC128_BLS_BLS12_381 => &KMAC_RULES,
            HashAlgorithm::KECCAK_256 => &KECCAK_RULES,
        }
    }

    pub const fn digest_len(self) -> usize {
        self.rules().digest_len
    }

    /// Raw value as exposed to contract code.
    pub const fn raw_value(self) -> u8 {
        match self {
            HashAlgorithm::SHA2_256 => 1,
            HashAlgorithm::SHA2_384 => 2,
            HashAlgorithm::SHA3_256 => 3,
            HashAlgorithm::SHA3_384 => 4,
            HashAlgorithm::KMAC128_BLS_BLS12_381 => 5,
            HashAlgorithm::KECCAK_256 => 6,
        }
    }

    pub fn from_raw_value(raw: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.raw_value() == raw)
    }

    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::SHA2_256 => "SHA2_256",
            HashAlgorithm::SHA2_384 => "SHA2_384",
            HashAlgorithm::SHA3_256 => "SHA3_256",
            HashAlgorithm::SHA3_384 => "SHA3_384",
            HashAlgorithm::KMAC128_BLS_BLS12_381 => "KMAC128_BLS_BLS12_381",
            HashAlgorithm::KECCAK_256 => "KECCAK_256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name() == s)
            .ok_or_else(|| CryptoError::UnknownAlgorithm(s.to_string()))
    }
}

// =============================================================================
// SIGNATURE ALGORITHMS
// =============================================================================

/// Which domain tags `verify` accepts for an algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagRule {
    /// Exactly this literal.
    Fixed(&'static str),
    /// Any UTF-8 string.
    Any,
}

impl TagRule {
    pub fn accepts(self, tag: &str) -> bool {
        match self {
            TagRule::Fixed(expected) => tag == expected,
            TagRule::Any => true,
        }
    }
}

/// Static behaviour record for a signature algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignatureRules {
    pub public_key_len: usize,
    pub signature_len: usize,
    pub hash_algorithms: &'static [HashAlgorithm],
    pub tag: TagRule,
}

static ECDSA_RULES: SignatureRules = SignatureRules {
    public_key_len: ECDSA_PUBLIC_KEY_LEN,
    signature_len: ECDSA_SIGNATURE_LEN,
    hash_algorithms: &[HashAlgorithm::SHA2_256, HashAlgorithm::SHA3_256],
    tag: TagRule::Fixed(USER_DOMAIN_TAG),
};

static BLS_RULES: SignatureRules = SignatureRules {
    public_key_len: BLS_PUBLIC_KEY_LEN,
    signature_len: BLS_SIGNATURE_LEN,
    hash_algorithms: &[HashAlgorithm::KMAC128_BLS_BLS12_381],
    tag: TagRule::Any,
};

/// Supported signature algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum SignatureAlgorithm {
    ECDSA_P256,
    ECDSA_secp256k1,
    BLS_BLS12_381,
}

impl SignatureAlgorithm {
    /// Every variant, in raw-value order.
    pub const ALL: [SignatureAlgorithm; 3] = [
        SignatureAlgorithm::ECDSA_P256,
        SignatureAlgorithm::ECDSA_secp256k1,
        SignatureAlgorithm::BLS_BLS12_381,
    ];

    pub fn rules(self) -> &'static SignatureRules {
        match self {
            SignatureAlgorithm::ECDSA_P256 | SignatureAlgorithm::ECDSA_secp256k1 => &ECDSA_RULES,
            SignatureAlgorithm::BLS_BLS12_381 => &BLS_RULES,
        }
    }

    pub fn public_key_len(self) -> usize {
        self.rules().public_key_len
    }

    pub fn signature_len(self) -> usize {
        self.rules().signature_len
    }

    /// Whether `verify` may run with this hash algorithm and tag.
    pub fn accepts(self, hash_algorithm: HashAlgorithm, tag: &str) -> bool {
        let rules = self.rules();
        rules.hash_algorithms.contains(&hash_algorithm) && rules.tag.accepts(tag)
    }

    /// Tag key lists use when verifying with a key of this algorithm.
    pub fn key_list_domain_tag(self) -> &'static str {
        USER_DOMAIN_TAG
    }

    pub const fn raw_value(self) -> u8 {
        match self {
            SignatureAlgorithm::ECDSA_P256 => 1,
            SignatureAlgorithm::ECDSA_secp256k1 => 2,
            SignatureAlgorithm::BLS_BLS12_381 => 3,
        }
    }

    pub fn from_raw_value(raw: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.raw_value() == raw)
    }

    pub const fn name(self) -> &'static str {
        match self {
            SignatureAlgorithm::ECDSA_P256 => "ECDSA_P256",
            SignatureAlgorithm::ECDSA_secp256k1 => "ECDSA_secp256k1",
            SignatureAlgorithm::BLS_BLS12_381 => "BLS_BLS12_381",
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name() == s)
            .ok_or_else(|| CryptoError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecdsa_pairing_rules() {
        for alg in [
            SignatureAlgorithm::ECDSA_P256,
            SignatureAlgorithm::ECDSA_secp256k1,
        ] {
            assert!(alg.accepts(HashAlgorithm::SHA2_256, USER_DOMAIN_TAG));
            assert!(alg.accepts(HashAlgorithm::SHA3_256, USER_DOMAIN_TAG));
            assert!(!alg.accepts(HashAlgorithm::SHA2_384, USER_DOMAIN_TAG));
            assert!(!alg.accepts(HashAlgorithm::KECCAK_256, USER_DOMAIN_TAG));
            assert!(!alg.accepts(HashAlgorithm::SHA2_256, ""));
            assert!(!alg.accepts(HashAlgorithm::SHA2_256, "FLOW-V0.0-user "));
        }
    }

    #[test]
    fn test_bls_pairing_rules() {
        let bls = SignatureAlgorithm::BLS_BLS12_381;
        assert!(bls.accepts(HashAlgorithm::KMAC128_BLS_BLS12_381, ""));
        assert!(bls.accepts(HashAlgorithm::KMAC128_BLS_BLS12_381, "any tag at all"));
        assert!(!bls.accepts(HashAlgorithm::SHA2_256, USER_DOMAIN_TAG));
    }

    #[test]
    fn test_lengths() {
        assert_eq!(SignatureAlgorithm::ECDSA_P256.public_key_len(), 64);
        assert_eq!(SignatureAlgorithm::ECDSA_secp256k1.signature_len(), 64);
        assert_eq!(SignatureAlgorithm::BLS_BLS12_381.public_key_len(), 96);
        assert_eq!(SignatureAlgorithm::BLS_BLS12_381.signature_len(), 48);
        assert_eq!(HashAlgorithm::SHA3_384.digest_len(), 48);
        assert_eq!(HashAlgorithm::KECCAK_256.digest_len(), 32);
    }

    #[test]
    fn test_raw_values_round_trip() {
        for alg in HashAlgorithm::ALL {
            assert_eq!(HashAlgorithm::from_raw_value(alg.raw_value()), Some(alg));
        }
        for alg in SignatureAlgorithm::ALL {
            assert_eq!(SignatureAlgorithm::from_raw_value(alg.raw_value()), Some(alg));
        }
        assert_eq!(HashAlgorithm::from_raw_value(0), None);
        assert_eq!(SignatureAlgorithm::from_raw_value(4), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "ECDSA_secp256k1".parse::<SignatureAlgorithm>().unwrap(),
            SignatureAlgorithm::ECDSA_secp256k1
        );
        assert_eq!(
            "KMAC128_BLS_BLS12_381".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::KMAC128_BLS_BLS12_381
        );
        assert!(matches!(
            "MD5".parse::<HashAlgorithm>(),
            Err(CryptoError::UnknownAlgorithm(_))
        ));
    }
}
