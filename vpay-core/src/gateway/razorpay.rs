//! Payment provider gateway over the Razorpay REST API.
//!
//! Orders and payments are HTTP calls authenticated with basic auth
//! (`key_id:key_secret`). Checkout signatures are verified locally with
//! [`vpay_sdk::signature`], which is how the provider's own SDKs do it.

use super::{GatewayError, NewProviderOrder, PaymentProviderGateway, ProviderOrder, ProviderPayment};
use crate::config::ProviderConfig;
use crate::currency::CurrencyCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use vpay_sdk::signature::{self, SignatureError};

/// `POST /orders` body.
#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: u64,
    currency: &'a str,
    payment_capture: u8,
    notes: &'a BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OrderEntity {
    id: String,
    amount: u64,
    currency: CurrencyCode,
}

#[derive(Debug, Deserialize)]
struct PaymentEntity {
    id: String,
    amount: u64,
    currency: CurrencyCode,
    status: String,
    #[serde(default)]
    order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

pub struct RazorpayGateway {
    config: ProviderConfig,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Replace the default `reqwest::Client`.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, GatewayError> {
        self.config
            .api_base
            .join(path)
            .map_err(|e| GatewayError::UnexpectedResponse(format!("invalid endpoint {path}: {e}")))
    }

    fn ensure_configured(&self) -> Result<(), GatewayError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(GatewayError::NotConfigured)
        }
    }
}

/// Decode a provider response, mapping non-2xx bodies to [`GatewayError::Api`].
async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GatewayError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let (code, description) = match serde_json::from_slice::<ErrorEnvelope>(&body) {
            Ok(envelope) => (envelope.error.code, envelope.error.description),
            Err(_) => (
                "UNKNOWN".to_owned(),
                String::from_utf8_lossy(&body).into_owned(),
            ),
        };
        return Err(GatewayError::Api {
            status: status.as_u16(),
            code,
            description,
        });
    }

    serde_json::from_slice(&body).map_err(|e| GatewayError::UnexpectedResponse(e.to_string()))
}

#[async_trait]
impl PaymentProviderGateway for RazorpayGateway {
    async fn create_order(&self, order: NewProviderOrder) -> Result<ProviderOrder, GatewayError> {
        self.ensure_configured()?;
        let body = CreateOrderBody {
            amount: order.amount_minor,
            currency: &order.currency,
            payment_capture: u8::from(order.auto_capture),
            notes: &order.notes,
        };

        let response = self
            .http_client
            .post(self.endpoint("orders")?)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret()))
            .json(&body)
            .send()
            .await?;

        let entity: OrderEntity = decode(response).await?;
        debug!(order_id = %entity.id, amount = entity.amount, "Provider order created");

        Ok(ProviderOrder {
            id: entity.id,
            amount_minor: entity.amount,
            currency: entity.currency,
        })
    }

    async fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, GatewayError> {
        self.ensure_configured()?;
        match signature::verify_payment(order_id, payment_id, signature, self.config.secret_bytes())
        {
            Ok(()) => Ok(true),
            Err(SignatureError::SignatureMismatch) => Ok(false),
            Err(SignatureError::InvalidHex) => {
                warn!(%order_id, %payment_id, "Checkout signature is not valid hex");
                Ok(false)
            }
        }
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<ProviderPayment, GatewayError> {
        self.ensure_configured()?;
        let response = self
            .http_client
            .get(self.endpoint(&format!("payments/{payment_id}"))?)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret()))
            .send()
            .await?;

        let entity: PaymentEntity = decode(response).await?;
        Ok(ProviderPayment {
            id: entity.id,
            amount_minor: entity.amount,
            currency: entity.currency,
            status: entity.status,
            order_id: entity.order_id,
        })
    }

    fn key_id(&self) -> &str {
        &self.config.key_id
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}
