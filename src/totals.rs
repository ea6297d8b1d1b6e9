//! Totals

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::prices::{from_minor_units, to_minor_units};

/// Default tax rate as a fraction (21%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(21, 0, 0, false, 2);

/// Errors related to tax rates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxRateError {
    /// Tax rate fraction outside `0..=1`.
    #[error("tax rate {0} is outside 0%..=100%")]
    OutOfRange(Decimal),
}

/// Tax rate applied to the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRate(Percentage);

impl TaxRate {
    /// Create a tax rate from a fraction (e.g. `0.21` for 21%).
    ///
    /// # Errors
    ///
    /// Returns [`TaxRateError::OutOfRange`] if the fraction is negative or above one.
    pub fn from_fraction(fraction: Decimal) -> Result<Self, TaxRateError> {
        if (fraction.is_sign_negative() && !fraction.is_zero()) || fraction > Decimal::ONE {
            return Err(TaxRateError::OutOfRange(fraction));
        }

        Ok(Self(Percentage::from(fraction)))
    }

    /// The rate as a fraction.
    pub fn fraction(self) -> Decimal {
        // decimal_percentage doesn't expose the inner Decimal
        self.0 * Decimal::ONE
    }

    /// The rate in percent points (e.g. `21`), normalised for display.
    pub fn percent_points(self) -> Decimal {
        self.fraction()
            .checked_mul(Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::ZERO)
            .normalize()
    }

    /// Tax owed on an amount, unrounded. `None` on overflow.
    pub fn tax_on(self, amount: Decimal) -> Option<Decimal> {
        self.fraction().checked_mul(amount)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self(Percentage::from(DEFAULT_TAX_RATE))
    }
}

/// Totals derived from the current cart state.
///
/// Amounts are kept unrounded in major units; rounding to the currency's minor unit only
/// happens through the `rounded_*` accessors or when formatting for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
    tax_rate: TaxRate,
    currency: &'static Currency,
}

impl Totals {
    /// Totals of an empty cart.
    pub fn zero(currency: &'static Currency, tax_rate: TaxRate) -> Self {
        Self {
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            tax_rate,
            currency,
        }
    }

    /// Derive tax and total from a subtotal given in minor units. `None` on overflow.
    pub fn from_subtotal_minor(
        subtotal_minor: i64,
        currency: &'static Currency,
        tax_rate: TaxRate,
    ) -> Option<Self> {
        let subtotal = from_minor_units(subtotal_minor, currency);
        let tax = tax_rate.tax_on(subtotal)?;
        let total = subtotal.checked_add(tax)?;

        Some(Self {
            subtotal,
            tax,
            total,
            tax_rate,
            currency,
        })
    }

    /// Sum of all line totals before tax.
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Tax on the subtotal, unrounded.
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    /// Subtotal plus tax, unrounded.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// The rate the tax was computed with.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Currency of all amounts.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Subtotal rounded to minor units.
    pub fn rounded_subtotal(&self) -> Option<Money<'static, Currency>> {
        self.rounded(self.subtotal)
    }

    /// Tax rounded to minor units.
    pub fn rounded_tax(&self) -> Option<Money<'static, Currency>> {
        self.rounded(self.tax)
    }

    /// Total rounded to minor units.
    ///
    /// Rounded from the unrounded total, so it can differ by one minor unit from the sum of
    /// [`Totals::rounded_subtotal`] and [`Totals::rounded_tax`].
    pub fn rounded_total(&self) -> Option<Money<'static, Currency>> {
        self.rounded(self.total)
    }

    fn rounded(&self, amount: Decimal) -> Option<Money<'static, Currency>> {
        to_minor_units(amount, self.currency).map(|minor| Money::from_minor(minor, self.currency))
    }
}
