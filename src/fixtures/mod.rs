//! Fixtures
//!
//! YAML catalogs and cart scripts for tests and demos. Fixture files live under
//! `fixtures/catalogs/<name>.yml` and `fixtures/scripts/<name>.yml`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::products::ProductSnapshot;

pub mod scripts;

pub use scripts::{Script, ScriptStep};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product has no id, so it cannot be targeted by id
    #[error("Product has no id: {0}")]
    MissingProductId(String),
}

/// Default fixture directory of this crate.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Wrapper for catalogs in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: FxHashMap<String, ProductSnapshot>,
}

/// Product snapshots keyed by fixture name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: FxHashMap<String, ProductSnapshot>,
}

impl Catalog {
    /// Load `fixtures/catalogs/<name>.yml` from the default fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_file(
            fixtures_dir()
                .join("catalogs")
                .join(format!("{name}.yml")),
        )
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] if the YAML is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        Ok(Self {
            products: fixture.products,
        })
    }

    /// Look up a product by fixture key.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] if no product has that key.
    pub fn product(&self, key: &str) -> Result<&ProductSnapshot, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Fixture keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.products.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
