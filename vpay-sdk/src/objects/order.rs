use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Body of `POST /create-order`.
///
/// `amount` is kept as a raw JSON value so that the server can answer a
/// missing or non-numeric amount with its own validation error instead of
/// a deserialization rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in major currency units (e.g. rupees).
    #[serde(default)]
    pub amount: serde_json::Value,
    /// Optional UPI identifier, forwarded to the provider as an order note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upi_id: Option<String>,
}

impl CreateOrderRequest {
    pub fn new(amount: u64, upi_id: Option<String>) -> Self {
        Self {
            amount: serde_json::Value::from(amount),
            upi_id,
        }
    }
}

/// Response of `POST /create-order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    /// Provider-assigned order id.
    pub order_id: String,
    /// Amount in minor units (e.g. paise).
    pub amount: u64,
    pub currency: CompactString,
    /// Public key id the browser needs to open the provider checkout.
    pub provider_key_id: String,
}
