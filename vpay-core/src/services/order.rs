//! Order creation.

use crate::amount::Amount;
use crate::config::CheckoutConfig;
use crate::currency::{CurrencyCode, CurrencyError};
use crate::gateway::{GatewayError, NewProviderOrder, PaymentProviderGateway};
use crate::intent::{IntentTracker, PaymentIntent, TrackerError};
use kanau::processor::Processor;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Placeholder note value when the payer gave no UPI id.
pub const UPI_NOT_PROVIDED: &str = "Not provided";

/// Value of the `payment_method` order note.
pub const PAYMENT_METHOD_NOTE: &str = "voice_payment";

/// Create a provider order for a spoken amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrder {
    /// Amount in major units; `None` when the request carried no usable amount.
    pub amount: Option<Amount>,
    pub upi_id: Option<String>,
}

/// What the browser needs to open the provider checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: String,
    pub amount_minor: u64,
    pub currency: CurrencyCode,
    pub provider_key_id: String,
}

#[derive(Debug, Error)]
pub enum CreateOrderError {
    #[error("invalid amount")]
    InvalidAmount,

    #[error("provider error: {0}")]
    Provider(#[from] GatewayError),

    #[error("provider returned order {order_id} for {returned} minor units, expected {expected}")]
    AmountMismatch {
        order_id: String,
        expected: u64,
        returned: u64,
    },

    #[error("tracking error: {0}")]
    Tracking(#[from] TrackerError),
}

impl From<CurrencyError> for CreateOrderError {
    fn from(_: CurrencyError) -> Self {
        Self::InvalidAmount
    }
}

/// Interpret a JSON `amount` field.
///
/// Accepts positive whole numbers, including floats with no fractional
/// part (`250.0`). Strings, negatives, fractions, and null yield `None`.
pub fn requested_amount(value: &serde_json::Value) -> Option<Amount> {
    let number = value.as_number()?;
    if let Some(amount) = number.as_u64() {
        return Some(amount);
    }
    let float = number.as_f64()?;
    if float.is_finite() && float >= 1.0 && float.fract() == 0.0 && float <= u64::MAX as f64 {
        Some(float as u64)
    } else {
        None
    }
}

pub struct OrderService {
    provider: Arc<dyn PaymentProviderGateway>,
    tracker: Arc<IntentTracker>,
    checkout: CheckoutConfig,
}

impl OrderService {
    pub fn new(
        provider: Arc<dyn PaymentProviderGateway>,
        tracker: Arc<IntentTracker>,
        checkout: CheckoutConfig,
    ) -> Self {
        Self {
            provider,
            tracker,
            checkout,
        }
    }

    /// Public key id the browser checkout is opened with.
    pub fn provider_key_id(&self) -> &str {
        self.provider.key_id()
    }
}

impl Processor<CreateOrder> for OrderService {
    type Output = OrderRecord;
    type Error = CreateOrderError;

    #[tracing::instrument(skip_all, err, name = "OrderService:CreateOrder")]
    async fn process(&self, command: CreateOrder) -> Result<OrderRecord, CreateOrderError> {
        let amount = command
            .amount
            .filter(|amount| *amount > 0)
            .ok_or(CreateOrderError::InvalidAmount)?;
        let currency = self.checkout.currency.clone();
        let amount_minor = self.checkout.minor_units.to_minor(amount, &currency)?;

        let mut notes = BTreeMap::new();
        notes.insert(
            "upi_id".to_owned(),
            command
                .upi_id
                .filter(|upi| !upi.trim().is_empty())
                .unwrap_or_else(|| UPI_NOT_PROVIDED.to_owned()),
        );
        notes.insert("payment_method".to_owned(), PAYMENT_METHOD_NOTE.to_owned());

        let order = self
            .provider
            .create_order(NewProviderOrder {
                amount_minor,
                currency: currency.clone(),
                notes: notes.clone(),
                auto_capture: true,
            })
            .await
            .map_err(|e| {
                error!(error = %e, amount_minor, %currency, "Provider order creation failed");
                e
            })?;

        if order.amount_minor != amount_minor {
            warn!(
                order_id = %order.id,
                expected = amount_minor,
                returned = order.amount_minor,
                "Provider order amount differs from request"
            );
            return Err(CreateOrderError::AmountMismatch {
                order_id: order.id,
                expected: amount_minor,
                returned: order.amount_minor,
            });
        }

        self.tracker
            .insert(PaymentIntent::new(
                order.id.clone(),
                amount_minor,
                order.currency.clone(),
                notes,
            ))
            .await?;

        info!(order_id = %order.id, amount, %currency, "Order created");

        Ok(OrderRecord {
            order_id: order.id,
            amount_minor,
            currency: order.currency,
            provider_key_id: self.provider_key_id().to_owned(),
        })
    }
}
