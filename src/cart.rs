//! Cart

use std::num::NonZeroU32;

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::CartConfig,
    lines::CartLine,
    prices::PriceError,
    totals::{TaxRate, Totals},
};

new_key_type! {
    /// Cart Line Key
    pub struct LineKey;
}

/// Rejected input for a cart mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    /// The item name was empty.
    #[error("item name is empty")]
    EmptyName,

    /// The unit price is below zero (item name).
    #[error("price of {0} is negative")]
    NegativePrice(String),

    /// The unit price is in a different currency than the cart.
    #[error("item {name} has currency {item}, but cart has currency {cart}")]
    CurrencyMismatch {
        /// Item name
        name: String,
        /// Currency of the supplied price
        item: &'static str,
        /// Currency of the cart
        cart: &'static str,
    },

    /// The price could not be parsed.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Errors related to cart mutations or totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The input was rejected; the cart is unchanged.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// No line exists for the item name.
    #[error("Line {0} not found")]
    LineNotFound(String),

    /// The line quantity cannot grow any further (item name).
    #[error("Quantity of {0} would overflow")]
    QuantityOverflow(String),

    /// The totals cannot be represented.
    #[error("Cart totals overflowed")]
    Overflow,
}

/// The transition a mutation applied to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// A new line was created with quantity one.
    Added,

    /// The quantity grew to the given value.
    Incremented(NonZeroU32),

    /// The quantity shrank to the given value.
    Decremented(NonZeroU32),

    /// The line was removed.
    Removed,
}

/// In-memory shopping cart.
///
/// Lines are keyed by item name and listed in the order they were first added.
#[derive(Debug, Clone)]
pub struct Cart {
    lines: SlotMap<LineKey, CartLine>,
    keys: FxHashMap<String, LineKey>,
    order: SmallVec<[LineKey; 8]>,
    currency: &'static Currency,
    tax_rate: TaxRate,
}

impl Cart {
    /// Create an empty cart in the given currency with the default tax rate.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self::with_tax_rate(currency, TaxRate::default())
    }

    /// Create an empty cart with the given currency and tax rate.
    #[must_use]
    pub fn with_tax_rate(currency: &'static Currency, tax_rate: TaxRate) -> Self {
        Cart {
            lines: SlotMap::with_key(),
            keys: FxHashMap::default(),
            order: SmallVec::new(),
            currency,
            tax_rate,
        }
    }

    /// Create an empty cart from configuration.
    #[must_use]
    pub fn with_config(config: &CartConfig) -> Self {
        Self::with_tax_rate(config.currency, config.tax_rate)
    }

    /// Add one unit of an item.
    ///
    /// An existing line keeps the unit price it was created with; only its quantity grows.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidInput`]: empty name, negative price or a price in another currency.
    /// - [`CartError::QuantityOverflow`]: the existing line cannot grow any further.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        unit_price: Money<'static, Currency>,
    ) -> Result<LineChange, CartError> {
        let name = name.into();

        self.validate(&name, &unit_price)?;

        if let Some(line) = self.line_mut(&name) {
            if line.unit_price() != &unit_price {
                debug!(
                    item = %name,
                    kept = line.unit_price().to_minor_units(),
                    ignored = unit_price.to_minor_units(),
                    "keeping first unit price"
                );
            }

            return increment(line);
        }

        debug!(item = %name, price = unit_price.to_minor_units(), "adding line");

        let key = self.lines.insert(CartLine::new(name.clone(), unit_price));

        self.keys.insert(name, key);
        self.order.push(key);

        Ok(LineChange::Added)
    }

    /// Add one to the quantity of an existing line.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`]: no line for `name`; the cart is unchanged.
    /// - [`CartError::QuantityOverflow`]: the line cannot grow any further.
    pub fn increment_line(&mut self, name: &str) -> Result<LineChange, CartError> {
        let line = self
            .line_mut(name)
            .ok_or_else(|| CartError::LineNotFound(name.to_string()))?;

        increment(line)
    }

    /// Remove one from the quantity of an existing line, removing the line at zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if there is no line for `name`; the cart is unchanged.
    pub fn decrement_line(&mut self, name: &str) -> Result<LineChange, CartError> {
        let key = *self
            .keys
            .get(name)
            .ok_or_else(|| CartError::LineNotFound(name.to_string()))?;

        let line = self
            .lines
            .get_mut(key)
            .ok_or_else(|| CartError::LineNotFound(name.to_string()))?;

        if let Some(quantity) = line.decrement() {
            debug!(item = name, quantity = quantity.get(), "decremented line");

            return Ok(LineChange::Decremented(quantity));
        }

        self.lines.remove(key);
        self.keys.remove(name);
        self.order.retain(|k| *k != key);

        debug!(item = name, "removed line");

        Ok(LineChange::Removed)
    }

    /// Calculate subtotal, tax and total for the current lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the totals cannot be represented.
    pub fn totals(&self) -> Result<Totals, CartError> {
        if self.is_empty() {
            return Ok(Totals::zero(self.currency, self.tax_rate));
        }

        let subtotal_minor = self
            .iter()
            .try_fold(0_i64, |acc, line| acc.checked_add(line.line_total_minor()?))
            .ok_or(CartError::Overflow)?;

        Totals::from_subtotal_minor(subtotal_minor, self.currency, self.tax_rate)
            .ok_or(CartError::Overflow)
    }

    /// Get the line for an item name.
    pub fn get(&self, name: &str) -> Option<&CartLine> {
        self.keys.get(name).and_then(|key| self.lines.get(*key))
    }

    /// Check whether the cart has a line for an item name.
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains_key(name)
    }

    /// Iterate over the lines in the order they were first added.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.order.iter().filter_map(|key| self.lines.get(*key))
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Get the tax rate applied to the subtotal.
    #[must_use]
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub(crate) fn line_mut(&mut self, name: &str) -> Option<&mut CartLine> {
        let key = *self.keys.get(name)?;

        self.lines.get_mut(key)
    }

    fn validate(&self, name: &str, unit_price: &Money<'_, Currency>) -> Result<(), InvalidInput> {
        if name.trim().is_empty() {
            return Err(InvalidInput::EmptyName);
        }

        if unit_price.to_minor_units() < 0 {
            return Err(InvalidInput::NegativePrice(name.to_string()));
        }

        let item_currency = unit_price.currency();

        if item_currency != self.currency {
            return Err(InvalidInput::CurrencyMismatch {
                name: name.to_string(),
                item: item_currency.iso_alpha_code,
                cart: self.currency.iso_alpha_code,
            });
        }

        Ok(())
    }
}

fn increment(line: &mut CartLine) -> Result<LineChange, CartError> {
    let quantity = line
        .increment()
        .ok_or_else(|| CartError::QuantityOverflow(line.name().to_string()))?;

    debug!(item = line.name(), quantity = quantity.get(), "incremented line");

    Ok(LineChange::Incremented(quantity))
}
