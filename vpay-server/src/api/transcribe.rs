use super::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use kanau::processor::Processor;
use vpay_core::gateway::AudioClip;
use vpay_core::services::{TranscribeAudio, TranscribeError};
use vpay_sdk::objects::TranscribeResponse;

/// Multipart field carrying the recording.
const AUDIO_FIELD: &str = "audio";

/// `POST /transcribe`: transcribe a voice clip and extract the amount.
///
/// An unrecognized amount is not an error; it comes back as `null` so the
/// caller can ask the user to speak again.
pub(super) async fn transcribe(
    state: State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let mut multipart = multipart?;

    let mut audio = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await?;

        let mut clip = AudioClip::new(bytes);
        if let Some(file_name) = file_name.filter(|name| !name.is_empty()) {
            clip.file_name = file_name;
        }
        clip.content_type = content_type;
        audio = Some(clip);
        break;
    }
    let audio = audio.ok_or(TranscribeError::EmptyAudio)?;

    let result = state.transcription.process(TranscribeAudio { audio }).await?;

    Ok(Json(TranscribeResponse {
        success: true,
        text: result.text,
        amount: result.amount,
    }))
}
