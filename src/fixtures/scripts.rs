//! Cart Script Fixtures

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    cart::CartCommand,
    fixtures::{Catalog, FixtureError, fixtures_dir},
    products::ProductId,
};

fn one() -> u32 {
    1
}

/// One step of a cart script, referring to products by catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Add a product
    Add {
        /// Catalog key
        product: String,
        /// Quantity to add
        #[serde(default = "one")]
        quantity: u32,
    },

    /// Remove a product
    Remove {
        /// Catalog key
        product: String,
    },

    /// Set a product's quantity
    Update {
        /// Catalog key
        product: String,
        /// New quantity
        quantity: u32,
    },

    /// Increment a product's quantity
    Increment {
        /// Catalog key
        product: String,
    },

    /// Decrement a product's quantity
    Decrement {
        /// Catalog key
        product: String,
    },

    /// Clear the cart
    Clear,
}

/// A named catalog plus the steps to run against a cart.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Catalog set the steps refer to
    pub catalog: String,

    /// Steps in order
    pub steps: Vec<ScriptStep>,
}

impl Script {
    /// Load `fixtures/scripts/<name>.yml` from the default fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_file(fixtures_dir().join("scripts").join(format!("{name}.yml")))
    }

    /// Load a script from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    /// Load the catalog named by the script.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn load_catalog(&self) -> Result<Catalog, FixtureError> {
        Catalog::from_set(&self.catalog)
    }

    /// Translate the steps into cart commands.
    ///
    /// # Errors
    ///
    /// Returns an error if a step names a product missing from `catalog`, or a
    /// product without an id is targeted by id.
    pub fn commands(&self, catalog: &Catalog) -> Result<Vec<CartCommand>, FixtureError> {
        self.steps
            .iter()
            .map(|step| step.to_command(catalog))
            .collect()
    }
}

impl ScriptStep {
    /// Translate the step into a cart command.
    ///
    /// # Errors
    ///
    /// See [`Script::commands`].
    pub fn to_command(&self, catalog: &Catalog) -> Result<CartCommand, FixtureError> {
        let command = match self {
            ScriptStep::Add { product, quantity } => CartCommand::Add {
                product: catalog.product(product)?.clone(),
                quantity: *quantity,
            },
            ScriptStep::Remove { product } => CartCommand::Remove(product_id(catalog, product)?),
            ScriptStep::Update { product, quantity } => {
                CartCommand::UpdateQuantity(product_id(catalog, product)?, *quantity)
            }
            ScriptStep::Increment { product } => {
                CartCommand::Increment(product_id(catalog, product)?)
            }
            ScriptStep::Decrement { product } => {
                CartCommand::Decrement(product_id(catalog, product)?)
            }
            ScriptStep::Clear => CartCommand::Clear,
        };

        Ok(command)
    }
}

fn product_id(catalog: &Catalog, key: &str) -> Result<ProductId, FixtureError> {
    catalog
        .product(key)?
        .id
        .clone()
        .ok_or_else(|| FixtureError::MissingProductId(key.to_string()))
}
