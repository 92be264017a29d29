//! TOML file configuration structures.
//!
//! These structs directly map to the `vpay-config.toml` file format. Every
//! section is optional; an empty file yields a server on the default port
//! with no provider credentials.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::{Ipv4Addr, SocketAddr};
use vpay_core::config::{
    DEFAULT_PROVIDER_API_BASE, DEFAULT_TRANSCRIPTION_ENDPOINT, DEFAULT_TRANSCRIPTION_LANGUAGE,
    DEFAULT_TRANSCRIPTION_MODEL,
};
use vpay_core::currency::{DEFAULT_CURRENCY, DEFAULT_MINOR_UNIT_FACTOR};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default)]
    pub intents: IntentsConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:5000").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// How long create-order and verify-payment wait for the provider
    /// before answering 504.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
            allowed_origins: Vec::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 5000))
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Payment provider credentials.
///
/// `RAZORPAY_KEY_ID` and `RAZORPAY_KEY_SECRET` override these values.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub key_id: String,
    #[serde(default)]
    pub key_secret: String,
    #[serde(default = "default_provider_api_base")]
    pub api_base: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            key_secret: String::new(),
            api_base: default_provider_api_base(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

fn default_provider_api_base() -> String {
    DEFAULT_PROVIDER_API_BASE.to_owned()
}

/// Speech-to-text service settings.
///
/// `TRANSCRIPTION_API_KEY` overrides `api_key`.
#[derive(Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    #[serde(default = "default_transcription_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_transcription_model")]
    pub model: String,
    #[serde(default = "default_transcription_language")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_transcription_endpoint(),
            model: default_transcription_model(),
            language: default_transcription_language(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for TranscriptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("language", &self.language)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn default_transcription_endpoint() -> String {
    DEFAULT_TRANSCRIPTION_ENDPOINT.to_owned()
}

fn default_transcription_model() -> String {
    DEFAULT_TRANSCRIPTION_MODEL.to_owned()
}

fn default_transcription_language() -> String {
    DEFAULT_TRANSCRIPTION_LANGUAGE.to_owned()
}

/// Checkout currency and minor-unit factors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency orders are created in.
    #[serde(default = "default_currency_code")]
    pub code: String,
    /// Minor units per major unit, keyed by currency code.
    #[serde(default = "default_minor_units")]
    pub minor_units: BTreeMap<String, u64>,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: default_currency_code(),
            minor_units: default_minor_units(),
        }
    }
}

fn default_currency_code() -> String {
    DEFAULT_CURRENCY.to_owned()
}

fn default_minor_units() -> BTreeMap<String, u64> {
    BTreeMap::from([(DEFAULT_CURRENCY.to_owned(), DEFAULT_MINOR_UNIT_FACTOR)])
}

/// In-memory intent retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentsConfig {
    /// Unpaid intents are dropped after this many seconds.
    #[serde(default = "default_created_ttl_secs")]
    pub created_ttl_secs: u64,
    /// Other intents are dropped this many seconds after their last change.
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for IntentsConfig {
    fn default() -> Self {
        Self {
            created_ttl_secs: default_created_ttl_secs(),
            retention_secs: default_retention_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_created_ttl_secs() -> u64 {
    60 * 60
}

fn default_retention_secs() -> u64 {
    24 * 60 * 60
}

fn default_sweep_interval_secs() -> u64 {
    60
}
