//! Configuration

use std::{fs, path::Path};

use rust_decimal::Decimal;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;
use thiserror::Error;

use crate::totals::{TaxRate, TaxRateError};

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid tax rate format
    #[error("Invalid tax rate format: {0}")]
    InvalidTaxRate(String),

    /// Tax rate outside the accepted range
    #[error(transparent)]
    TaxRate(#[from] TaxRateError),
}

/// Cart settings shared by the store and its renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartConfig {
    /// Currency of every price in the cart
    pub currency: &'static Currency,

    /// Tax applied to the subtotal
    pub tax_rate: TaxRate,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            currency: EUR,
            tax_rate: TaxRate::default(),
        }
    }
}

/// Config file layout; missing keys fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFixture {
    currency: Option<String>,
    tax_rate: Option<String>,
}

impl CartConfig {
    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, the currency is unknown or the tax rate is
    /// invalid.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let fixture: ConfigFixture = serde_norway::from_str(contents)?;
        let defaults = Self::default();

        let currency = match fixture.currency.as_deref() {
            Some(code) => parse_currency(code)?,
            None => defaults.currency,
        };

        let tax_rate = match fixture.tax_rate.as_deref() {
            Some(rate) => parse_tax_rate(rate)?,
            None => defaults.tax_rate,
        };

        Ok(Self { currency, tax_rate })
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`CartConfig::from_yaml_str`] fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }
}

/// Look up a supported currency by ISO code.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for unsupported codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    match code.trim() {
        "EUR" => Ok(EUR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        other => Err(ConfigError::UnknownCurrency(other.to_string())),
    }
}

/// Parse tax rate string (e.g., "21%" or "0.21") into a `TaxRate`
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or the rate is outside `0%..=100%`.
pub fn parse_tax_rate(s: &str) -> Result<TaxRate, ConfigError> {
    let trimmed = s.trim();

    let fraction = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| ConfigError::InvalidTaxRate(s.to_string()))?
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or_else(|| ConfigError::InvalidTaxRate(s.to_string()))?
    } else {
        trimmed
            .parse::<Decimal>()
            .map_err(|_err| ConfigError::InvalidTaxRate(s.to_string()))?
    };

    Ok(TaxRate::from_fraction(fraction)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_config_is_eur_with_21_percent() {
        let config = CartConfig::default();

        assert_eq!(config.currency, EUR);
        assert_eq!(config.tax_rate.fraction(), Decimal::new(21, 2));
    }

    #[test]
    fn from_yaml_str_reads_all_fields() -> TestResult {
        let config = CartConfig::from_yaml_str("currency: GBP\ntax_rate: \"20%\"\n")?;

        assert_eq!(config.currency, GBP);
        assert_eq!(config.tax_rate.fraction(), Decimal::new(20, 2));

        Ok(())
    }

    #[test]
    fn from_yaml_str_falls_back_to_defaults() -> TestResult {
        let config = CartConfig::from_yaml_str("tax_rate: \"0.09\"\n")?;

        assert_eq!(config.currency, EUR);
        assert_eq!(config.tax_rate.fraction(), Decimal::new(9, 2));

        Ok(())
    }

    #[test]
    fn from_yaml_str_rejects_unknown_currency() {
        let result = CartConfig::from_yaml_str("currency: ABC\n");

        assert!(matches!(result, Err(ConfigError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn from_yaml_str_rejects_unknown_fields() {
        let result = CartConfig::from_yaml_str("discount: \"10%\"\n");

        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn parse_tax_rate_accepts_both_formats() -> TestResult {
        assert_eq!(parse_tax_rate("21%")?.fraction(), Decimal::new(21, 2));
        assert_eq!(parse_tax_rate(" 0.21 ")?.fraction(), Decimal::new(21, 2));
        assert_eq!(parse_tax_rate("0%")?.fraction(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn parse_tax_rate_rejects_invalid_format() {
        assert!(matches!(
            parse_tax_rate("twenty"),
            Err(ConfigError::InvalidTaxRate(_))
        ));
    }

    #[test]
    fn parse_tax_rate_rejects_out_of_range() {
        assert!(matches!(
            parse_tax_rate("150%"),
            Err(ConfigError::TaxRate(TaxRateError::OutOfRange(_)))
        ));
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "currency: USD")?;

        let config = CartConfig::load(file.path())?;

        assert_eq!(config.currency, USD);

        Ok(())
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = CartConfig::load("does/not/exist.yml");

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
