//! Transcription gateway for OpenAI-compatible Whisper servers.
//!
//! Works against the hosted `/v1/audio/transcriptions` endpoint as well as
//! self-hosted Whisper servers exposing the same multipart interface.

use super::{AudioClip, GatewayError, TranscriptionGateway};
use crate::config::TranscriptionConfig;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TranscriptionBody {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    message: String,
}

pub struct WhisperHttpTranscriber {
    config: TranscriptionConfig,
    http_client: reqwest::Client,
}

impl WhisperHttpTranscriber {
    pub fn new(config: TranscriptionConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn form(&self, audio: AudioClip, language: &str) -> Result<Form, GatewayError> {
        let mut part = Part::stream(audio.bytes).file_name(audio.file_name);
        if let Some(mime) = audio.content_type.as_deref() {
            part = part
                .mime_str(mime)
                .map_err(|e| GatewayError::UnexpectedResponse(format!("invalid mime type: {e}")))?;
        }
        Ok(Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("language", language.to_owned())
            .text("response_format", "json"))
    }
}

#[async_trait]
impl TranscriptionGateway for WhisperHttpTranscriber {
    async fn transcribe(&self, audio: AudioClip, language: &str) -> Result<String, GatewayError> {
        let size = audio.bytes.len();
        let form = self.form(audio, language)?;

        let mut request = self
            .http_client
            .post(self.config.endpoint.clone())
            .multipart(form);
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let (code, description) = match serde_json::from_slice::<ErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.error.kind, envelope.error.message),
                Err(_) => (
                    "UNKNOWN".to_owned(),
                    String::from_utf8_lossy(&body).into_owned(),
                ),
            };
            return Err(GatewayError::Api {
                status: status.as_u16(),
                code,
                description,
            });
        }

        let parsed: TranscriptionBody = serde_json::from_slice(&body)
            .map_err(|e| GatewayError::UnexpectedResponse(e.to_string()))?;
        debug!(bytes = size, chars = parsed.text.len(), "Audio transcribed");
        Ok(parsed.text)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_body_decodes() {
        let body: TranscriptionBody =
            serde_json::from_str(r#"{"text":" Pay two hundred fifty rupees."}"#).unwrap();
        assert_eq!(body.text, " Pay two hundred fifty rupees.");
    }

    #[test]
    fn test_error_body_decodes() {
        let envelope: ErrorEnvelope = serde_json::from_str(
            r#"{"error":{"message":"Invalid file format.","type":"invalid_request_error"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.error.kind, "invalid_request_error");
        assert_eq!(envelope.error.message, "Invalid file format.");
    }

    #[test]
    fn test_rejects_bad_mime() {
        let transcriber = WhisperHttpTranscriber::new(TranscriptionConfig {
            endpoint: url::Url::parse(crate::config::DEFAULT_TRANSCRIPTION_ENDPOINT).unwrap(),
            model: "whisper-1".into(),
            language: "en".into(),
            api_key: None,
        });
        let mut clip = AudioClip::new(vec![0u8; 4]);
        clip.content_type = Some("not a mime".into());
        assert!(transcriber.form(clip, "en").is_err());
    }
}
