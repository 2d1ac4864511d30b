//! Cart configuration

use std::{fs, path::Path};

use rusty_money::iso::{self, Currency};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Cart engine settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CartConfig {
    /// Storage key the whole cart is written under
    pub storage_key: String,

    /// Base URL storage-relative image paths are joined to
    pub storage_base_url: String,

    /// Category assigned to products without one
    pub default_category: String,

    /// Currency of all cart amounts (ISO 4217 code in config files)
    #[serde(deserialize_with = "deserialize_currency")]
    pub currency: &'static Currency,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: "cart".to_string(),
            storage_base_url: "/storage".to_string(),
            default_category: "Uncategorized".to_string(),
            currency: iso::IDR,
        }
    }
}

impl CartConfig {
    /// Parse configuration from YAML. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] for malformed YAML, unknown fields or an
    /// unknown currency code.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the storage base URL.
    pub fn with_storage_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.storage_base_url = base_url.into();
        self
    }

    /// Set the fallback category.
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: &'static Currency) -> Self {
        self.currency = currency;
        self
    }
}

fn deserialize_currency<'de, D>(deserializer: D) -> Result<&'static Currency, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;

    iso::find(code.trim())
        .ok_or_else(|| serde::de::Error::custom(format!("Unknown currency code: {code}")))
}
