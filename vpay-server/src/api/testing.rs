//! Stub gateways for router tests.

use crate::state::AppState;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use vpay_core::config::CheckoutConfig;
use vpay_core::gateway::{
    AudioClip, GatewayError, NewProviderOrder, PaymentProviderGateway, ProviderOrder,
    ProviderPayment, TranscriptionGateway,
};
use vpay_core::intent::IntentTracker;
use vpay_sdk::signature;

pub const STUB_SECRET: &[u8] = b"stub_secret";
pub const STUB_KEY_ID: &str = "rzp_test_stub";

#[derive(Default)]
pub struct StubProvider {
    next_id: AtomicUsize,
    payments: Mutex<HashMap<String, ProviderPayment>>,
    /// Delay applied to order creation, to exercise request timeouts.
    pub create_delay: Mutex<Option<Duration>>,
    pub fail_create: std::sync::atomic::AtomicBool,
}

impl StubProvider {
    pub fn add_payment(&self, payment_id: &str, amount_minor: u64, status: &str) {
        self.payments.lock().unwrap().insert(
            payment_id.to_owned(),
            ProviderPayment {
                id: payment_id.to_owned(),
                amount_minor,
                currency: "INR".into(),
                status: status.to_owned(),
                order_id: None,
            },
        );
    }

    pub fn sign(order_id: &str, payment_id: &str) -> String {
        signature::sign_payment(order_id, payment_id, STUB_SECRET)
    }
}

#[async_trait]
impl PaymentProviderGateway for StubProvider {
    async fn create_order(&self, order: NewProviderOrder) -> Result<ProviderOrder, GatewayError> {
        let delay = *self.create_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(GatewayError::Api {
                status: 401,
                code: "BAD_REQUEST_ERROR".into(),
                description: "Authentication failed".into(),
            });
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(ProviderOrder {
            id: format!("order_stub{n}"),
            amount_minor: order.amount_minor,
            currency: order.currency,
        })
    }

    async fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, GatewayError> {
        Ok(signature::verify_payment(order_id, payment_id, signature, STUB_SECRET).is_ok())
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<ProviderPayment, GatewayError> {
        self.payments
            .lock()
            .unwrap()
            .get(payment_id)
            .cloned()
            .ok_or_else(|| GatewayError::UnexpectedResponse("no such payment".into()))
    }

    fn key_id(&self) -> &str {
        STUB_KEY_ID
    }

    fn is_configured(&self) -> bool {
        true
    }
}

pub struct StubTranscriber(pub &'static str);

#[async_trait]
impl TranscriptionGateway for StubTranscriber {
    async fn transcribe(&self, audio: AudioClip, _language: &str) -> Result<String, GatewayError> {
        if audio.bytes.starts_with(b"FAIL") {
            return Err(GatewayError::UnexpectedResponse("stub failure".into()));
        }
        Ok(self.0.to_owned())
    }

    fn model_name(&self) -> &str {
        "stub-whisper"
    }
}

pub fn state(provider: Arc<StubProvider>, transcript: &'static str) -> AppState {
    AppState::new(
        provider,
        Arc::new(StubTranscriber(transcript)),
        Arc::new(IntentTracker::new()),
        CheckoutConfig::default(),
        "en".to_owned(),
        Duration::from_millis(200),
    )
}
