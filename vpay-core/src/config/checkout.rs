//! Checkout currency settings.

use crate::currency::{CurrencyCode, MinorUnits};

/// Currency of newly created orders and the minor-unit table used to
/// convert amounts in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub currency: CurrencyCode,
    pub minor_units: MinorUnits,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::const_new(crate::currency::DEFAULT_CURRENCY),
            minor_units: MinorUnits::default(),
        }
    }
}
