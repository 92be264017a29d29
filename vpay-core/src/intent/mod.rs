//! Payment intents and their lifecycle.
//!
//! An intent is created when the provider accepts an order and is finalized
//! exactly once, as either `Verified` or `Failed`. Every state change goes
//! through [`IntentState::can_transition_to`]; anything outside the table is
//! rejected instead of overwriting the current state.

mod state;
mod tracker;

pub use state::{IntentState, TransitionError};
pub use tracker::{IntentGuard, IntentTracker, TrackerError};

use crate::currency::CurrencyCode;
use std::collections::BTreeMap;
use time::OffsetDateTime;
use vpay_sdk::objects::IntentResponse;

/// One attempted payment, keyed by the provider order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    pub order_id: String,
    pub amount_minor: u64,
    pub currency: CurrencyCode,
    pub state: IntentState,
    /// Set once the client reports a completed payment that verifies.
    pub payment_id: Option<String>,
    /// Free-form annotations (UPI id, payment method). Opaque to the core.
    pub metadata: BTreeMap<String, String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl PaymentIntent {
    /// A freshly created intent in state `Created`.
    pub fn new(
        order_id: String,
        amount_minor: u64,
        currency: CurrencyCode,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            order_id,
            amount_minor,
            currency,
            state: IntentState::Created,
            payment_id: None,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `next` if the transition table allows it.
    pub fn transition(&mut self, next: IntentState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(next) {
            return Err(TransitionError {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        self.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn to_response(&self) -> IntentResponse {
        IntentResponse {
            order_id: self.order_id.clone(),
            status: self.state.into(),
            amount: self.amount_minor,
            currency: self.currency.clone(),
            payment_id: self.payment_id.clone(),
            metadata: self.metadata.clone(),
            created_at: self.created_at.unix_timestamp(),
        }
    }
}
