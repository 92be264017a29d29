use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle state of a payment intent as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    Created,
    AwaitingVerification,
    Verified,
    Failed,
}

impl std::fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentStatus::Created => write!(f, "created"),
            IntentStatus::AwaitingVerification => write!(f, "awaiting_verification"),
            IntentStatus::Verified => write!(f, "verified"),
            IntentStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Response of `GET /orders/{order_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResponse {
    pub order_id: String,
    pub status: IntentStatus,
    /// Amount in minor units.
    pub amount: u64,
    pub currency: CompactString,
    pub payment_id: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Unix timestamp of when the intent was created.
    pub created_at: i64,
}
