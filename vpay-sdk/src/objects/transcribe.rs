use serde::{Deserialize, Serialize};

/// Response of `POST /transcribe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub success: bool,
    /// Raw transcript.
    pub text: String,
    /// Spoken amount in major units, or `null` when none was recognized.
    pub amount: Option<u64>,
}
