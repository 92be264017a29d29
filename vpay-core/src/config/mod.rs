//! Runtime configuration types.
//!
//! These are the validated values the services run with. Reading and
//! validating the config file is handled by the server crate.

mod checkout;
mod intents;
mod provider;
mod transcription;

pub use checkout::CheckoutConfig;
pub use intents::IntentConfig;
pub use provider::{DEFAULT_PROVIDER_API_BASE, ProviderConfig};
pub use transcription::{
    DEFAULT_TRANSCRIPTION_ENDPOINT, DEFAULT_TRANSCRIPTION_LANGUAGE, DEFAULT_TRANSCRIPTION_MODEL,
    TranscriptionConfig,
};
