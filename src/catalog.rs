//! Catalog
//!
//! The add-to-cart triggers shown next to the cart. Each trigger carries a static
//! `(name, price)` pair that is forwarded to the cart when clicked.

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::prices::{PriceError, parse_price};

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A trigger has an empty name
    #[error("Catalog entry has an empty name")]
    EmptyName,

    /// Two triggers share a name
    #[error("Duplicate catalog entry: {0}")]
    DuplicateName(String),

    /// A trigger has an invalid price
    #[error("Invalid price for {name}: {source}")]
    InvalidPrice {
        /// Entry name
        name: String,
        /// Parse failure
        source: PriceError,
    },
}

/// An add-to-cart trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct AddButton {
    name: String,
    price: Money<'static, Currency>,
}

impl AddButton {
    /// Create a trigger for an item name and unit price.
    pub fn new(name: impl Into<String>, price: Money<'static, Currency>) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Create a trigger from a price string (e.g. `"2.00"`).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPrice`] if the price cannot be parsed.
    pub fn parse(
        name: impl Into<String>,
        price: &str,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let name = name.into();

        match parse_price(price, currency) {
            Ok(price) => Ok(Self { name, price }),
            Err(source) => Err(CatalogError::InvalidPrice { name, source }),
        }
    }

    /// Item name forwarded to the cart.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price forwarded to the cart.
    pub fn price(&self) -> &Money<'static, Currency> {
        &self.price
    }
}

/// Wrapper for catalog entries in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<ProductFixture>,
}

/// Catalog entry in YAML
#[derive(Debug, Deserialize)]
struct ProductFixture {
    name: String,

    /// Price without currency (e.g., "2.00")
    price: String,
}

/// Ordered set of add-to-cart triggers, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    buttons: Vec<AddButton>,
    positions: FxHashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from a list of triggers.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is empty or used twice.
    pub fn with_buttons(buttons: impl IntoIterator<Item = AddButton>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for button in buttons {
            catalog.push(button)?;
        }

        Ok(catalog)
    }

    /// Parse a catalog from YAML, reading prices in the given currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or an entry is invalid.
    pub fn from_yaml_str(contents: &str, currency: &'static Currency) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;
        let mut catalog = Self::new();

        for product in fixture.products {
            catalog.push(AddButton::parse(product.name, &product.price, currency)?)?;
        }

        Ok(catalog)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Catalog::from_yaml_str`] fails.
    pub fn load(path: impl AsRef<Path>, currency: &'static Currency) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents, currency)
    }

    /// Append a trigger.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or already present.
    pub fn push(&mut self, button: AddButton) -> Result<(), CatalogError> {
        if button.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }

        if self.positions.contains_key(&button.name) {
            return Err(CatalogError::DuplicateName(button.name));
        }

        self.positions.insert(button.name.clone(), self.buttons.len());
        self.buttons.push(button);

        Ok(())
    }

    /// Get a trigger by name.
    pub fn get(&self, name: &str) -> Option<&AddButton> {
        self.positions
            .get(name)
            .and_then(|position| self.buttons.get(*position))
    }

    /// Iterate over the triggers in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &AddButton> {
        self.buttons.iter()
    }

    /// Get the number of triggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
