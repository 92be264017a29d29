use bytes::Bytes;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use url::Url;

use super::ClientError;
use crate::objects::{
    CreateOrderRequest, CreateOrderResponse, HealthResponse, IntentResponse, ProviderKeyResponse,
    TranscribeResponse, VerifyPaymentRequest, VerifyPaymentResponse,
};

/// Typed HTTP client for the Voice Pay server.
///
/// Mirrors the flow of the browser checkout page: upload a recording,
/// create an order for the recognized amount, then forward the provider
/// checkout result for verification.
#[derive(Debug, Clone)]
pub struct VoicePayClient {
    http: Client,
    base_url: Url,
}

impl VoicePayClient {
    /// Create a new client for the server at `base_url`
    /// (e.g. `http://localhost:5000`).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    /// The order id is pushed as a single escaped path segment.
    fn intent_url(&self, order_id: &str) -> Result<Url, ClientError> {
        let mut url = self.endpoint("/orders/")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(order_id);
        Ok(url)
    }

    /// `POST /transcribe` – upload a recording as the `audio` form field.
    pub async fn transcribe(
        &self,
        audio: impl Into<Bytes>,
        file_name: &str,
    ) -> Result<TranscribeResponse, ClientError> {
        let part = Part::stream(audio.into()).file_name(file_name.to_owned());
        let form = Form::new().part("audio", part);
        let url = self.endpoint("/transcribe")?;
        let resp = self.http.post(url).multipart(form).send().await?;
        parse_response(resp).await
    }

    /// `POST /create-order` – create a provider order for `amount` major units.
    pub async fn create_order(
        &self,
        amount: u64,
        upi_id: Option<String>,
    ) -> Result<CreateOrderResponse, ClientError> {
        let url = self.endpoint("/create-order")?;
        let resp = self
            .http
            .post(url)
            .json(&CreateOrderRequest::new(amount, upi_id))
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /verify-payment` – verify a checkout result.
    ///
    /// A signature mismatch is answered by the server with status 400 and a
    /// structured body; that body is returned as
    /// [`VerifyPaymentResponse::Rejected`] rather than as an error.
    pub async fn verify_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<VerifyPaymentResponse, ClientError> {
        let url = self.endpoint("/verify-payment")?;
        let body = VerifyPaymentRequest {
            order_id: Some(order_id.to_owned()),
            payment_id: Some(payment_id.to_owned()),
            signature: Some(signature.to_owned()),
        };
        let resp = self.http.post(url).json(&body).send().await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        if status.is_success() || status == reqwest::StatusCode::BAD_REQUEST {
            if let Ok(parsed) = serde_json::from_slice::<VerifyPaymentResponse>(&bytes) {
                return Ok(parsed);
            }
        }
        Err(ClientError::Api {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// `GET /get-provider-key` – public key id for the checkout SDK.
    pub async fn provider_key(&self) -> Result<ProviderKeyResponse, ClientError> {
        let url = self.endpoint("/get-provider-key")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /orders/{order_id}` – current state of a tracked intent.
    pub async fn intent(&self, order_id: &str) -> Result<IntentResponse, ClientError> {
        let url = self.intent_url(order_id)?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.endpoint("/health")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
