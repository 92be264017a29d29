use vpay_sdk::objects::IntentStatus;

/// Lifecycle state of a [`PaymentIntent`](super::PaymentIntent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentState {
    Created,
    AwaitingVerification,
    Verified,
    Failed,
}

/// A transition that is not in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal intent transition {from:?} -> {to:?}")]
pub struct TransitionError {
    pub from: IntentState,
    pub to: IntentState,
}

impl IntentState {
    /// `Verified` and `Failed` admit no further transition.
    pub fn is_terminal(self) -> bool {
        matches!(self, IntentState::Verified | IntentState::Failed)
    }

    /// The complete transition table.
    pub fn can_transition_to(self, next: IntentState) -> bool {
        use IntentState::*;
        match (self, next) {
            (Created, AwaitingVerification) => true,
            (AwaitingVerification, Verified) => true,
            (AwaitingVerification, Failed) => true,
            (Created, _) | (AwaitingVerification, _) | (Verified, _) | (Failed, _) => false,
        }
    }
}

impl From<IntentState> for IntentStatus {
    fn from(value: IntentState) -> Self {
        match value {
            IntentState::Created => IntentStatus::Created,
            IntentState::AwaitingVerification => IntentStatus::AwaitingVerification,
            IntentState::Verified => IntentStatus::Verified,
            IntentState::Failed => IntentStatus::Failed,
        }
    }
}
