use crate::amount::{Amount, parse_amount};
use crate::gateway::{AudioClip, GatewayError, TranscriptionGateway};
use kanau::processor::Processor;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Transcribe an uploaded voice clip and extract the spoken amount.
#[derive(Debug, Clone)]
pub struct TranscribeAudio {
    pub audio: AudioClip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionResult {
    pub text: String,
    /// `None` when the transcript contains no positive amount.
    pub amount: Option<Amount>,
}

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("no audio file provided")]
    EmptyAudio,

    #[error("transcription failed: {0}")]
    Gateway(#[from] GatewayError),
}

pub struct TranscriptionService {
    gateway: Arc<dyn TranscriptionGateway>,
    language: String,
}

impl TranscriptionService {
    pub fn new(gateway: Arc<dyn TranscriptionGateway>, language: impl Into<String>) -> Self {
        Self {
            gateway,
            language: language.into(),
        }
    }

    pub fn model_name(&self) -> &str {
        self.gateway.model_name()
    }
}

impl Processor<TranscribeAudio> for TranscriptionService {
    type Output = TranscriptionResult;
    type Error = TranscribeError;

    #[tracing::instrument(skip_all, err, name = "TranscriptionService:TranscribeAudio")]
    async fn process(&self, command: TranscribeAudio) -> Result<TranscriptionResult, TranscribeError> {
        if command.audio.is_empty() {
            return Err(TranscribeError::EmptyAudio);
        }
        let size = command.audio.bytes.len();

        let text = self
            .gateway
            .transcribe(command.audio, &self.language)
            .await
            .map_err(|e| {
                error!(error = %e, bytes = size, "Transcription gateway failed");
                e
            })?;
        let text = text.trim().to_owned();
        let amount = parse_amount(&text);

        info!(bytes = size, ?amount, "Voice clip transcribed");
        Ok(TranscriptionResult { text, amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeTranscriber;
    use std::sync::atomic::Ordering;

    fn clip() -> TranscribeAudio {
        TranscribeAudio {
            audio: AudioClip::new(vec![1u8, 2, 3, 4]),
        }
    }

    #[tokio::test]
    async fn test_extracts_amount_from_transcript() {
        let service =
            TranscriptionService::new(Arc::new(FakeTranscriber::saying(" Pay two hundred fifty rupees. ")), "en");
        let result = service.process(clip()).await.unwrap();
        assert_eq!(result.text, "Pay two hundred fifty rupees.");
        assert_eq!(result.amount, Some(250));
    }

    #[tokio::test]
    async fn test_no_amount_is_not_an_error() {
        let service = TranscriptionService::new(Arc::new(FakeTranscriber::saying("hello there")), "en");
        let result = service.process(clip()).await.unwrap();
        assert_eq!(result.text, "hello there");
        assert_eq!(result.amount, None);
    }

    #[tokio::test]
    async fn test_empty_audio_skips_gateway() {
        let transcriber = Arc::new(FakeTranscriber::saying("250"));
        let service = TranscriptionService::new(transcriber.clone(), "en");
        let err = service
            .process(TranscribeAudio {
                audio: AudioClip::new(Vec::new()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TranscribeError::EmptyAudio));
        assert_eq!(transcriber.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let service = TranscriptionService::new(Arc::new(FakeTranscriber::failing()), "en");
        assert!(matches!(
            service.process(clip()).await,
            Err(TranscribeError::Gateway(_))
        ));
        assert_eq!(service.model_name(), "fake-whisper");
    }
}
