//! Configuration module for vpay-server.
//!
//! Handles loading configuration from the TOML file, CLI arguments and
//! credential environment variables.

pub mod file;

use crate::config::file::FileConfig;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use vpay_core::config::{CheckoutConfig, IntentConfig, ProviderConfig, TranscriptionConfig};
use vpay_core::currency::{CurrencyCode, MinorUnits};

pub const ENV_PROVIDER_KEY_ID: &str = "RAZORPAY_KEY_ID";
pub const ENV_PROVIDER_KEY_SECRET: &str = "RAZORPAY_KEY_SECRET";
pub const ENV_TRANSCRIPTION_API_KEY: &str = "TRANSCRIPTION_API_KEY";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("invalid URL for {field}: {source}")]
    UrlError {
        field: &'static str,
        source: url::ParseError,
    },

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub listen: SocketAddr,
    pub allowed_origins: Vec<String>,
    pub request_timeout: Duration,
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub server: ServerSettings,
    pub provider: ProviderConfig,
    pub transcription: TranscriptionConfig,
    pub checkout: CheckoutConfig,
    pub intents: IntentConfig,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// A missing file is not an error; every section has defaults and the
    /// credentials usually come from the environment.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %self.config_path.display(),
                    "Config file not found, using defaults"
                );
                FileConfig::default()
            }
            Err(e) => return Err(e.into()),
        };
        self.process(file_config, |key| std::env::var(key).ok())
    }

    /// Apply overrides, validate and build the runtime configuration.
    fn process<F>(&self, mut file_config: FileConfig, env: F) -> Result<LoadedConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }
        apply_env_overrides(&mut file_config, env);
        validate(&file_config)?;
        build_loaded_config(file_config)
    }
}

/// Credentials from the environment take precedence over the file.
fn apply_env_overrides<F>(config: &mut FileConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());
    if let Some(key_id) = non_empty(ENV_PROVIDER_KEY_ID) {
        config.provider.key_id = key_id;
    }
    if let Some(key_secret) = non_empty(ENV_PROVIDER_KEY_SECRET) {
        config.provider.key_secret = key_secret;
    }
    if let Some(api_key) = non_empty(ENV_TRANSCRIPTION_API_KEY) {
        config.transcription.api_key = Some(api_key);
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.server.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "server.request_timeout_secs must be positive".into(),
        ));
    }
    if config.intents.sweep_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "intents.sweep_interval_secs must be positive".into(),
        ));
    }
    for (code, factor) in &config.currency.minor_units {
        if *factor == 0 {
            return Err(ConfigError::ValidationError(format!(
                "minor-unit factor of {code} must be positive"
            )));
        }
    }
    let has_factor = config
        .currency
        .minor_units
        .keys()
        .any(|code| code.eq_ignore_ascii_case(&config.currency.code));
    if !has_factor {
        return Err(ConfigError::ValidationError(format!(
            "no minor-unit factor configured for currency {}",
            config.currency.code
        )));
    }
    Ok(())
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::UrlError { field, source })
}

fn build_loaded_config(file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
    let FileConfig {
        server,
        provider,
        transcription,
        currency,
        intents,
    } = file_config;

    let minor_units = MinorUnits::new(
        currency
            .minor_units
            .into_iter()
            .map(|(code, factor)| (CurrencyCode::from(code), factor)),
    );

    Ok(LoadedConfig {
        server: ServerSettings {
            listen: server.listen,
            allowed_origins: server.allowed_origins,
            request_timeout: Duration::from_secs(server.request_timeout_secs),
        },
        provider: ProviderConfig::new(
            provider.key_id,
            provider.key_secret,
            parse_url("provider.api_base", &provider.api_base)?,
        ),
        transcription: TranscriptionConfig {
            endpoint: parse_url("transcription.endpoint", &transcription.endpoint)?,
            model: transcription.model,
            language: transcription.language,
            api_key: transcription.api_key,
        },
        checkout: CheckoutConfig {
            currency: currency.code.to_ascii_uppercase().into(),
            minor_units,
        },
        intents: IntentConfig {
            created_ttl: Duration::from_secs(intents.created_ttl_secs),
            retention: Duration::from_secs(intents.retention_secs),
            sweep_interval: Duration::from_secs(intents.sweep_interval_secs),
        },
    })
}
