use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /verify-payment`.
///
/// Field names follow the server API, but the provider checkout's native
/// `razorpay_*` names are accepted too so the checkout callback payload can
/// be forwarded as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default, alias = "razorpay_order_id")]
    pub order_id: Option<String>,
    #[serde(default, alias = "razorpay_payment_id")]
    pub payment_id: Option<String>,
    #[serde(default, alias = "razorpay_signature")]
    pub signature: Option<String>,
}

/// Response of `POST /verify-payment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerifyPaymentResponse {
    Verified(PaymentVerified),
    Rejected(PaymentRejected),
}

/// The payment was verified and confirmed by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentVerified {
    pub success: bool,
    pub message: String,
    pub payment_id: String,
    /// Provider-confirmed amount in major units.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Provider payment status (e.g. `captured`).
    pub status: String,
}

/// The signature did not match; the intent is now failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRejected {
    pub success: bool,
    pub message: String,
}

impl VerifyPaymentResponse {
    pub fn is_success(&self) -> bool {
        match self {
            VerifyPaymentResponse::Verified(v) => v.success,
            VerifyPaymentResponse::Rejected(_) => false,
        }
    }
}
