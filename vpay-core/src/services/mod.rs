//! Request-level services.
//!
//! Each service is a [`kanau::processor::Processor`] over one command type:
//!
//! - `TranscriptionService`: `TranscribeAudio` → transcript + parsed amount
//! - `OrderService`: `CreateOrder` → provider order + tracked intent
//! - `VerificationService`: `VerifyPayment` → verified or rejected outcome

pub mod order;
pub mod transcription;
pub mod verification;

#[cfg(test)]
pub(crate) mod fakes;

pub use order::{CreateOrder, CreateOrderError, OrderRecord, OrderService};
pub use transcription::{TranscribeAudio, TranscribeError, TranscriptionResult, TranscriptionService};
pub use verification::{
    RejectionReason, VerificationOutcome, VerificationService, VerifyError, VerifyPayment,
};
