//! External collaborators: the payment provider and the speech-to-text
//! service.
//!
//! Both are consumed through traits so services can be constructed with
//! the HTTP implementations in production and with in-process fakes in
//! tests.

pub mod razorpay;
pub mod whisper;

pub use razorpay::RazorpayGateway;
pub use whisper::WhisperHttpTranscriber;

use crate::currency::CurrencyCode;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors surfaced by gateway calls.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure.
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream service answered with an error.
    #[error("API error (status {status}): {code}: {description}")]
    Api {
        status: u16,
        code: String,
        description: String,
    },

    /// The upstream answered 2xx but with an unexpected body.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Credentials are missing.
    #[error("gateway is not configured")]
    NotConfigured,
}

/// Order creation request sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProviderOrder {
    pub amount_minor: u64,
    pub currency: CurrencyCode,
    pub notes: BTreeMap<String, String>,
    /// Ask the provider to capture the payment automatically.
    pub auto_capture: bool,
}

/// Order as recorded by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOrder {
    pub id: String,
    pub amount_minor: u64,
    pub currency: CurrencyCode,
}

/// Authoritative payment record fetched from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPayment {
    pub id: String,
    pub amount_minor: u64,
    pub currency: CurrencyCode,
    /// Provider status string, e.g. `captured` or `authorized`.
    pub status: String,
    pub order_id: Option<String>,
}

/// Order creation, checkout-signature verification, and payment lookup.
#[async_trait]
pub trait PaymentProviderGateway: Send + Sync {
    /// Create a provider order. Not idempotent; callers must not retry
    /// blindly.
    async fn create_order(&self, order: NewProviderOrder) -> Result<ProviderOrder, GatewayError>;

    /// Check a checkout signature for `(order_id, payment_id)`.
    ///
    /// `Ok(false)` means the signature is well-formed input that does not
    /// match; `Err` means the check itself could not be performed.
    async fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, GatewayError>;

    /// Fetch the authoritative payment record.
    async fn fetch_payment(&self, payment_id: &str) -> Result<ProviderPayment, GatewayError>;

    /// Public key id the browser checkout needs.
    fn key_id(&self) -> &str;

    /// Whether credentials are configured.
    fn is_configured(&self) -> bool;
}

/// One uploaded recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Bytes,
    pub file_name: String,
    pub content_type: Option<String>,
}

impl AudioClip {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: "audio.wav".to_owned(),
            content_type: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Opaque speech-to-text service.
#[async_trait]
pub trait TranscriptionGateway: Send + Sync {
    async fn transcribe(&self, audio: AudioClip, language: &str) -> Result<String, GatewayError>;

    /// Name of the model behind this gateway, for health reporting.
    fn model_name(&self) -> &str;
}
