//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur while parsing a price string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The price string was empty.
    #[error("price is empty")]
    Empty,

    /// The price string is not a finite decimal number.
    #[error("price is not a number: {0}")]
    NotANumber(String),

    /// The price is below zero.
    #[error("price must not be negative: {0}")]
    Negative(String),

    /// The price has more decimal places than the currency's minor unit allows.
    #[error("price {0} has more than {1} decimal places")]
    TooPrecise(String, u32),

    /// The price cannot be represented in minor units.
    #[error("price is out of range: {0}")]
    OutOfRange(String),
}

/// Parse a decimal price string (e.g. `"2.00"`) into money in the given currency.
///
/// # Errors
///
/// - [`PriceError::Empty`]: The string is empty or only whitespace.
/// - [`PriceError::NotANumber`]: The string is not a decimal number (`NaN`, `inf`, `abc`, ...).
/// - [`PriceError::Negative`]: The amount is below zero.
/// - [`PriceError::TooPrecise`]: The amount is finer than the currency's minor unit.
/// - [`PriceError::OutOfRange`]: The amount does not fit in minor units.
pub fn parse_price(
    s: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, PriceError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(PriceError::Empty);
    }

    let (negative, integer, fraction) =
        split_plain_decimal(trimmed).ok_or_else(|| PriceError::NotANumber(s.to_string()))?;

    // Checked on the digits themselves: Decimal parsing rounds past 28 decimal places.
    let fraction = fraction.trim_end_matches('0');

    if !u32::try_from(fraction.len()).is_ok_and(|places| places <= currency.exponent) {
        return Err(PriceError::TooPrecise(s.to_string(), currency.exponent));
    }

    let sign = if negative { "-" } else { "" };
    let canonical = if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    };

    let amount = Decimal::from_str_exact(&canonical)
        .map_err(|_err| PriceError::OutOfRange(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(s.to_string()));
    }

    let minor_units =
        to_minor_units(amount, currency).ok_or_else(|| PriceError::OutOfRange(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Split `[+-]digits[.digits]` into negativity, integer and fraction digits.
///
/// Exponent notation, digit separators and bare `.5` / `5.` forms are not prices.
fn split_plain_decimal(s: &str) -> Option<(bool, &str, &str)> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (integer, fraction) = match unsigned.split_once('.') {
        Some((_, "")) => return None,
        Some(parts) => parts,
        None => (unsigned, ""),
    };

    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    if !is_digits(integer) || (!fraction.is_empty() && !is_digits(fraction)) {
        return None;
    }

    Some((negative, integer, fraction))
}

/// Convert a major-unit amount into minor units, rounding half away from zero.
pub(crate) fn to_minor_units(amount: Decimal, currency: &Currency) -> Option<i64> {
    let scale = 10_i64.checked_pow(currency.exponent).map(Decimal::from)?;

    amount
        .round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(scale)?
        .to_i64()
}

/// Convert minor units into an exact major-unit amount.
pub(crate) fn from_minor_units(minor_units: i64, currency: &Currency) -> Decimal {
    Decimal::new(minor_units, currency.exponent)
}

/// Format an amount as the currency symbol followed by the amount, rounded to the
/// currency's minor unit (e.g. `€4.84`).
pub fn format_amount(amount: Decimal, currency: &Currency) -> String {
    let rounded =
        amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);
    let precision = usize::try_from(currency.exponent).unwrap_or(2);

    format!("{}{rounded:.precision$}", currency.symbol)
}

/// Format money for display (see [`format_amount`]).
pub fn format_money(money: &Money<'_, Currency>) -> String {
    let currency = money.currency();

    format_amount(from_minor_units(money.to_minor_units(), currency), currency)
}
