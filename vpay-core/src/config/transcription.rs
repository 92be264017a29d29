//! Speech-to-text service configuration.

use url::Url;

/// Default OpenAI-compatible transcription endpoint.
pub const DEFAULT_TRANSCRIPTION_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const DEFAULT_TRANSCRIPTION_LANGUAGE: &str = "en";

#[derive(Clone)]
pub struct TranscriptionConfig {
    pub endpoint: Url,
    pub model: String,
    /// Language hint passed with every request.
    pub language: String,
    /// Optional bearer token; local Whisper servers usually need none.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for TranscriptionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .field("language", &self.language)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
