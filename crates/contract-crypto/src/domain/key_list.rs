//! # Key List
//!
//! Append-only, index-addressed weighted keys with one-way revocation.
//!
//! ## Entry lifecycle
//!
//! ```text
//! add ──→ Active ──revoke──→ Revoked (terminal)
//! ```
//!
//! ## Verification
//!
//! A signature set authorizes iff every submitted signature names a known,
//! active, not-yet-seen index and verifies, and the weights of those entries
//! sum to at least `Weight::FULL`. Any failed check rejects the whole set.
//!
//! ## Concurrency
//!
//! `add`/`revoke` take `&mut self`, so the borrow checker enforces the
//! single-writer discipline; `get`/`verify` take `&self` and may run in
//! parallel.

use super::algorithms::HashAlgorithm;
use super::errors::CryptoError;
use super::public_key::PublicKeyValue;
use super::verifier::{Rejection, Verifier};
use super::weight::Weight;
use crate::ports::outbound::CryptoProvider;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Why a signature set failed to authorize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyListRejection {
    UnknownIndex(usize),
    Revoked(usize),
    Duplicate(usize),
    Signature { index: usize, rejection: Rejection },
    BelowThreshold(Weight),
}

impl fmt::Display for KeyListRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyListRejection::UnknownIndex(index) => write!(f, "unknown key index {index}"),
            KeyListRejection::Revoked(index) => write!(f, "key {index} is revoked"),
            KeyListRejection::Duplicate(index) => write!(f, "key {index} submitted twice"),
            KeyListRejection::Signature { index, rejection } => {
                write!(f, "signature for key {index}: {rejection}")
            }
            KeyListRejection::BelowThreshold(total) => {
                write!(f, "weight {total} below threshold {}", Weight::FULL)
            }
        }
    }
}

/// One weighted key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyListEntry {
    index: usize,
    public_key: Arc<PublicKeyValue>,
    hash_algorithm: HashAlgorithm,
    weight: Weight,
    revoked: bool,
}

impl KeyListEntry {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn public_key(&self) -> &Arc<PublicKeyValue> {
        &self.public_key
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash_algorithm
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked
    }
}

/// A signature attributed to a key index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyListSignature {
    pub key_index: usize,
    pub signature: Vec<u8>,
}

impl KeyListSignature {
    pub fn new(key_index: usize, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            key_index,
            signature: signature.into(),
        }
    }
}

/// Weighted multi-signature key list.
#[derive(Clone, Debug, Default)]
pub struct KeyList {
    entries: Vec<KeyListEntry>,
    max_entries: Option<usize>,
}

impl KeyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key list that refuses to grow past `max_entries`.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: Some(max_entries),
        }
    }

    /// Append an active entry and return its index.
    ///
    /// # Errors
    /// * `KeyListFull` if a capacity was configured and is reached
    pub fn add(
        &mut self,
        public_key: impl Into<Arc<PublicKeyValue>>,
        hash_algorithm: HashAlgorithm,
        weight: Weight,
    ) -> Result<usize, CryptoError> {
        if let Some(max) = self.max_entries {
            if self.entries.len() >= max {
                return Err(CryptoError::KeyListFull { max });
            }
        }

        let index = self.entries.len();
        self.entries.push(KeyListEntry {
            index,
            public_key: public_key.into(),
            hash_algorithm,
            weight,
            revoked: false,
        });
        Ok(index)
    }

    /// Entry at `index`, revoked or not.
    pub fn get(&self, index: usize) -> Option<&KeyListEntry> {
        self.entries.get(index)
    }

    /// Mark the entry revoked and return it. Revoking twice is a no-op.
    ///
    /// # Errors
    /// * `UnknownKeyIndex` if `index` is out of range
    pub fn revoke(&mut self, index: usize) -> Result<&KeyListEntry, CryptoError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(CryptoError::UnknownKeyIndex(index))?;
        entry.revoked = true;
        Ok(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyListEntry> {
        self.entries.iter()
    }

    /// Sum of all non-revoked weights.
    pub fn total_active_weight(&self) -> Weight {
        self.entries
            .iter()
            .filter(|entry| !entry.revoked)
            .fold(Weight::ZERO, |acc, entry| acc.saturating_add(entry.weight))
    }

    /// `true` iff `signatures` authorize `data` with at least full weight.
    pub fn verify<P: CryptoProvider + ?Sized>(
        &self,
        signatures: &[KeyListSignature],
        data: &[u8],
        verifier: &Verifier<'_, P>,
    ) -> bool {
        match self.check(signatures, data, verifier) {
            Ok(()) => true,
            Err(rejection) => {
                debug!("[contract-crypto] key list rejected: {}", rejection);
                false
            }
        }
    }

    /// Same as [`KeyList::verify`], reporting the first failed check.
    ///
    /// Signatures are checked in submission order; the first unknown,
    /// revoked, repeated or unverifiable index rejects the whole set before
    /// the weight is compared.
    pub fn check<P: CryptoProvider + ?Sized>(
        &self,
        signatures: &[KeyListSignature],
        data: &[u8],
        verifier: &Verifier<'_, P>,
    ) -> Result<(), KeyListRejection> {
        let mut seen = HashSet::with_capacity(signatures.len());
        let mut total = Weight::ZERO;

        for submitted in signatures {
            let index = submitted.key_index;

            let entry = self
                .entries
                .get(index)
                .ok_or(KeyListRejection::UnknownIndex(index))?;
            if entry.revoked {
                return Err(KeyListRejection::Revoked(index));
            }
            if !seen.insert(index) {
                return Err(KeyListRejection::Duplicate(index));
            }

            let key = &entry.public_key;
            let tag = key.algorithm().key_list_domain_tag();
            verifier
                .check(key, &submitted.signature, data, tag, entry.hash_algorithm)
                .map_err(|rejection| KeyListRejection::Signature { index, rejection })?;

            total = total.saturating_add(entry.weight);
        }

        if !total.meets_threshold() {
            return Err(KeyListRejection::BelowThreshold(total));
        }
        Ok(())
    }
}
