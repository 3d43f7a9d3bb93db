//! Service configuration.
//!
//! Only operational knobs live here. Anything that changes hashing or
//! verification results is a constant in `domain::algorithms`.

use crate::domain::errors::CryptoError;
use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for [`crate::service::CryptoService`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoConfig {
    /// Log rejected verifications at `warn` instead of `debug`.
    pub log_rejections: bool,
    /// Capacity of key lists created by the service; `None` means host limits only.
    pub max_key_list_entries: Option<usize>,
}

impl CryptoConfig {
    /// Create a new configuration with validation.
    pub fn new(
        log_rejections: bool,
        max_key_list_entries: Option<usize>,
    ) -> Result<Self, CryptoError> {
        let config = Self {
            log_rejections,
            max_key_list_entries,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CONTRACT_CRYPTO_LOG_REJECTIONS`: `true`/`1` to warn on rejections (default: false)
    /// - `CONTRACT_CRYPTO_MAX_KEY_LIST_ENTRIES`: key list capacity (default: unbounded)
    ///
    /// # Errors
    /// * `InvalidConfig` on unparsable values or a failed `validate`
    pub fn from_env() -> Result<Self, CryptoError> {
        let log_rejections = match env::var("CONTRACT_CRYPTO_LOG_REJECTIONS") {
            Ok(value) => parse_bool(&value).ok_or_else(|| {
                CryptoError::InvalidConfig(format!(
                    "CONTRACT_CRYPTO_LOG_REJECTIONS must be a boolean, got {value:?}"
                ))
            })?,
            Err(_) => false,
        };

        let max_key_list_entries = match env::var("CONTRACT_CRYPTO_MAX_KEY_LIST_ENTRIES") {
            Ok(value) => Some(value.parse::<usize>().map_err(|_| {
                CryptoError::InvalidConfig(format!(
                    "CONTRACT_CRYPTO_MAX_KEY_LIST_ENTRIES must be an integer, got {value:?}"
                ))
            })?),
            Err(_) => None,
        };

        Self::new(log_rejections, max_key_list_entries)
    }

    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.max_key_list_entries == Some(0) {
            return Err(CryptoError::InvalidConfig(
                "max_key_list_entries cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style method to set rejection logging
    pub fn with_log_rejections(mut self, enabled: bool) -> Self {
        self.log_rejections = enabled;
        self
    }

    /// Builder-style method to set key list capacity
    pub fn with_max_key_list_entries(mut self, max: usize) -> Self {
        self.max_key_list_entries = Some(max);
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
