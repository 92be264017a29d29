//! Payment provider credentials.

use url::Url;

/// Default REST base of the payment provider.
pub const DEFAULT_PROVIDER_API_BASE: &str = "https://api.razorpay.com/v1/";

/// Payment provider API credentials.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Public key id, handed to the browser checkout.
    pub key_id: String,
    /// Key secret used for API basic auth and checkout signatures.
    key_secret: String,
    /// REST base URL, ending with a slash.
    pub api_base: Url,
}

impl ProviderConfig {
    /// A base without a trailing slash gets one, so relative endpoints
    /// resolve under its last path segment.
    pub fn new(key_id: String, key_secret: String, mut api_base: Url) -> Self {
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }
        Self {
            key_id,
            key_secret,
            api_base,
        }
    }

    /// Whether both key id and key secret are present.
    pub fn is_configured(&self) -> bool {
        !self.key_id.is_empty() && !self.key_secret.is_empty()
    }

    pub fn key_secret(&self) -> &str {
        &self.key_secret
    }

    /// Get the secret key bytes for HMAC signing.
    pub fn secret_bytes(&self) -> &[u8] {
        self.key_secret.as_bytes()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}
