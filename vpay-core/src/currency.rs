//! Currency codes and minor-unit conversion.

use crate::amount::Amount;
use compact_str::CompactString;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// ISO 4217 currency code, e.g. `INR`.
pub type CurrencyCode = CompactString;

/// Default currency of the checkout.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Minor units per major unit for the default currency (paise per rupee).
pub const DEFAULT_MINOR_UNIT_FACTOR: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurrencyError {
    #[error("no minor-unit factor configured for currency {0}")]
    UnknownCurrency(CurrencyCode),
    #[error("amount {amount} overflows minor units of {currency}")]
    Overflow { amount: Amount, currency: CurrencyCode },
}

/// Minor-unit factor per currency code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinorUnits {
    factors: HashMap<CurrencyCode, u64>,
}

impl Default for MinorUnits {
    fn default() -> Self {
        let mut factors = HashMap::new();
        factors.insert(
            CurrencyCode::const_new(DEFAULT_CURRENCY),
            DEFAULT_MINOR_UNIT_FACTOR,
        );
        Self { factors }
    }
}

impl MinorUnits {
    /// Build a table from explicit factors. The default currency is always
    /// present unless overridden.
    pub fn new(factors: impl IntoIterator<Item = (CurrencyCode, u64)>) -> Self {
        let mut table = Self::default();
        for (code, factor) in factors {
            table.factors.insert(code.to_ascii_uppercase().into(), factor);
        }
        table
    }

    /// Factor for `currency`, if configured.
    pub fn factor(&self, currency: &str) -> Option<u64> {
        self.factors.get(currency.to_ascii_uppercase().as_str()).copied()
    }

    /// Convert a major-unit amount to minor units.
    pub fn to_minor(&self, amount: Amount, currency: &str) -> Result<u64, CurrencyError> {
        let factor = self
            .factor(currency)
            .ok_or_else(|| CurrencyError::UnknownCurrency(currency.into()))?;
        amount
            .checked_mul(factor)
            .ok_or_else(|| CurrencyError::Overflow {
                amount,
                currency: currency.into(),
            })
    }

    /// Convert a minor-unit amount back to major units.
    pub fn to_major(&self, minor: u64, currency: &str) -> Result<Decimal, CurrencyError> {
        let factor = self
            .factor(currency)
            .ok_or_else(|| CurrencyError::UnknownCurrency(currency.into()))?;
        Ok(Decimal::from(minor) / Decimal::from(factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_inr_paise() {
        let table = MinorUnits::default();
        assert_eq!(table.factor("INR"), Some(100));
        assert_eq!(table.factor("inr"), Some(100));
        assert_eq!(table.to_minor(250, "INR"), Ok(25_000));
    }

    #[test]
    fn test_to_major_keeps_fraction() {
        let table = MinorUnits::default();
        assert_eq!(table.to_major(12_345, "INR"), Ok(Decimal::new(12_345, 2)));
        assert_eq!(table.to_major(25_000, "INR"), Ok(Decimal::from(250)));
    }

    #[test]
    fn test_configured_currencies() {
        let table = MinorUnits::new([("jpy".into(), 1), ("KWD".into(), 1000)]);
        assert_eq!(table.to_minor(500, "JPY"), Ok(500));
        assert_eq!(table.to_minor(2, "KWD"), Ok(2000));
        assert_eq!(table.to_minor(2, "INR"), Ok(200));
    }

    #[test]
    fn test_unknown_currency_and_overflow() {
        let table = MinorUnits::default();
        assert_eq!(
            table.to_minor(1, "USD"),
            Err(CurrencyError::UnknownCurrency("USD".into()))
        );
        assert!(matches!(
            table.to_minor(u64::MAX, "INR"),
            Err(CurrencyError::Overflow { .. })
        ));
    }
}
