//! In-process gateway fakes for service tests.

use crate::currency::CurrencyCode;
use crate::gateway::{
    AudioClip, GatewayError, NewProviderOrder, PaymentProviderGateway, ProviderOrder,
    ProviderPayment, TranscriptionGateway,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use vpay_sdk::signature;

pub const FAKE_SECRET: &[u8] = b"fake_secret";

#[derive(Default)]
pub struct FakeProvider {
    orders: Mutex<Vec<NewProviderOrder>>,
    payments: Mutex<HashMap<String, ProviderPayment>>,
    next_id: AtomicUsize,
    fail_create: AtomicBool,
    fail_fetch: AtomicBool,
    fetch_calls: AtomicUsize,
    verify_delay: Mutex<Option<Duration>>,
}

impl FakeProvider {
    pub fn fail_create_order(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_verify_delay(&self, delay: Duration) {
        *self.verify_delay.lock().unwrap() = Some(delay);
    }

    pub fn created_orders(&self) -> Vec<NewProviderOrder> {
        self.orders.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Register a payment the provider will report for `payment_id`.
    pub fn add_payment(&self, payment_id: &str, order_id: &str, amount_minor: u64, status: &str) {
        self.payments.lock().unwrap().insert(
            payment_id.to_owned(),
            ProviderPayment {
                id: payment_id.to_owned(),
                amount_minor,
                currency: CurrencyCode::const_new("INR"),
                status: status.to_owned(),
                order_id: Some(order_id.to_owned()),
            },
        );
    }

    /// The signature the real provider would issue.
    pub fn sign(order_id: &str, payment_id: &str) -> String {
        signature::sign_payment(order_id, payment_id, FAKE_SECRET)
    }
}

#[async_trait]
impl PaymentProviderGateway for FakeProvider {
    async fn create_order(&self, order: NewProviderOrder) -> Result<ProviderOrder, GatewayError> {
        self.orders.lock().unwrap().push(order.clone());
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(GatewayError::Api {
                status: 400,
                code: "BAD_REQUEST_ERROR".into(),
                description: "fake failure".into(),
            });
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(ProviderOrder {
            id: format!("order_fake{n}"),
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
        let delay = *self.verify_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(signature::verify_payment(order_id, payment_id, signature, FAKE_SECRET).is_ok())
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<ProviderPayment, GatewayError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(GatewayError::UnexpectedResponse("fake fetch failure".into()));
        }
        self.payments
            .lock()
            .unwrap()
            .get(payment_id)
            .cloned()
            .ok_or_else(|| GatewayError::Api {
                status: 400,
                code: "BAD_REQUEST_ERROR".into(),
                description: "The id provided does not exist".into(),
            })
    }

    fn key_id(&self) -> &str {
        "rzp_test_fake"
    }

    fn is_configured(&self) -> bool {
        true
    }
}

pub struct FakeTranscriber {
    pub text: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeTranscriber {
    pub fn saying(text: &str) -> Self {
        Self {
            text: Some(text.to_owned()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TranscriptionGateway for FakeTranscriber {
    async fn transcribe(&self, _audio: AudioClip, _language: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text
            .clone()
            .ok_or_else(|| GatewayError::UnexpectedResponse("fake transcription failure".into()))
    }

    fn model_name(&self) -> &str {
        "fake-whisper"
    }
}
