//! Application state shared across all request handlers.

use std::sync::Arc;
use std::time::Duration;
use vpay_core::config::CheckoutConfig;
use vpay_core::gateway::{PaymentProviderGateway, TranscriptionGateway};
use vpay_core::intent::IntentTracker;
use vpay_core::services::{OrderService, TranscriptionService, VerificationService};

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub transcription: Arc<TranscriptionService>,
    pub orders: Arc<OrderService>,
    pub verification: Arc<VerificationService>,
    pub tracker: Arc<IntentTracker>,
    pub provider: Arc<dyn PaymentProviderGateway>,
    /// Upper bound on how long a handler waits for a provider round trip.
    pub request_timeout: Duration,
}

impl AppState {
    /// Wire the services around one provider, one transcriber and one
    /// intent tracker.
    pub fn new(
        provider: Arc<dyn PaymentProviderGateway>,
        transcriber: Arc<dyn TranscriptionGateway>,
        tracker: Arc<IntentTracker>,
        checkout: CheckoutConfig,
        language: String,
        request_timeout: Duration,
    ) -> Self {
        Self {
            transcription: Arc::new(TranscriptionService::new(transcriber, language)),
            orders: Arc::new(OrderService::new(
                provider.clone(),
                tracker.clone(),
                checkout.clone(),
            )),
            verification: Arc::new(VerificationService::new(
                provider.clone(),
                tracker.clone(),
                checkout,
            )),
            tracker,
            provider,
            request_timeout,
        }
    }
}
