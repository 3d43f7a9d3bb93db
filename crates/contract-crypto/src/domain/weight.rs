//! Fixed-point key weights.
//!
//! Weights are unsigned with eight decimal places, the same scale contract
//! code uses for `UFix64`. `1.0` is the full authorization threshold.

use super::errors::CryptoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of fractional decimal digits.
pub const WEIGHT_DECIMALS: u32 = 8;

/// Raw units per `1.0`.
pub const WEIGHT_SCALE: u64 = 10u64.pow(WEIGHT_DECIMALS);

/// Non-negative fixed-point weight.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Weight(u64);

impl Weight {
    pub const ZERO: Weight = Weight(0);

    /// The fixed threshold a signature set must reach.
    pub const FULL: Weight = Weight(WEIGHT_SCALE);

    /// From raw fixed-point units (`1.0 == 100_000_000`).
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whole units only, saturating on overflow.
    pub const fn from_integer(units: u64) -> Self {
        Self(units.saturating_mul(WEIGHT_SCALE))
    }

    /// Accumulation never wraps; a saturated sum is already past any threshold.
    pub const fn saturating_add(self, other: Weight) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub const fn meets_threshold(self) -> bool {
        self.0 >= Self::FULL.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:0width$}",
            self.0 / WEIGHT_SCALE,
            self.0 % WEIGHT_SCALE,
            width = WEIGHT_DECIMALS as usize
        )
    }
}

impl FromStr for Weight {
    type Err = CryptoError;

    /// Parses `"1"`, `"0.5"`, `"0.00000001"`; at most eight decimals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CryptoError::InvalidWeight(s.to_string());

        let (integer, fraction) = match s.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (s, ""),
        };
        if integer.is_empty()
            || !integer.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
            || fraction.len() > WEIGHT_DECIMALS as usize
            || (s.contains('.') && fraction.is_empty())
        {
            return Err(invalid());
        }

        let integer: u64 = integer.parse().map_err(|_| invalid())?;
        let fraction: u64 = if fraction.is_empty() {
            0
        } else {
            let padding = WEIGHT_DECIMALS - fraction.len() as u32;
            fraction.parse::<u64>().map_err(|_| invalid())? * 10u64.pow(padding)
        };

        integer
            .checked_mul(WEIGHT_SCALE)
            .and_then(|units| units.checked_add(fraction))
            .map(Weight)
            .ok_or_else(invalid)
    }
}
