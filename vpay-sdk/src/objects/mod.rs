//! Request and response bodies of the Voice Pay HTTP API.

pub mod intent;
pub mod order;
pub mod payment;
pub mod status;
pub mod transcribe;

pub use intent::{IntentResponse, IntentStatus};
pub use order::{CreateOrderRequest, CreateOrderResponse};
pub use payment::{PaymentRejected, PaymentVerified, VerifyPaymentRequest, VerifyPaymentResponse};
pub use status::{ErrorResponse, HealthResponse, ProviderKeyResponse};
pub use transcribe::TranscribeResponse;
