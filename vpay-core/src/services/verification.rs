//! Checkout result verification.
//!
//! The whole verification of one order runs while holding that order's
//! intent lock, so two concurrent attempts on the same order are strictly
//! ordered: the first one finalizes the intent and the second one sees a
//! terminal state and is rejected as `AlreadyFinalized`.

use crate::config::CheckoutConfig;
use crate::currency::CurrencyCode;
use crate::gateway::{GatewayError, PaymentProviderGateway};
use crate::intent::{IntentState, IntentTracker, TransitionError};
use kanau::processor::Processor;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Verify a checkout result reported by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyPayment {
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub signature: Option<String>,
}

/// Why a verification attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    InvalidSignature,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::InvalidSignature => write!(f, "invalid signature"),
        }
    }
}

/// Result of a verification attempt that reached a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Signature matched and the provider confirmed the payment.
    Verified {
        order_id: String,
        payment_id: String,
        /// Provider-confirmed amount in major units.
        amount: Decimal,
        amount_minor: u64,
        currency: CurrencyCode,
        /// Provider payment status string.
        status: String,
    },
    /// Signature did not match; the intent is now `Failed`.
    Rejected {
        order_id: String,
        reason: RejectionReason,
    },
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified { .. })
    }
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("missing payment details")]
    MissingFields,

    #[error("unknown order {0}")]
    UnknownOrder(String),

    #[error("order {order_id} is already {state:?}")]
    AlreadyFinalized {
        order_id: String,
        state: IntentState,
    },

    /// The provider could not be reached or answered unexpectedly. The
    /// intent stays `AwaitingVerification` and may be verified again.
    #[error("provider error: {0}")]
    Provider(#[from] GatewayError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

struct Fields {
    order_id: String,
    payment_id: String,
    signature: String,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl VerifyPayment {
    fn into_fields(self) -> Result<Fields, VerifyError> {
        match (
            required(self.order_id),
            required(self.payment_id),
            required(self.signature),
        ) {
            (Some(order_id), Some(payment_id), Some(signature)) => Ok(Fields {
                order_id,
                payment_id,
                signature,
            }),
            _ => Err(VerifyError::MissingFields),
        }
    }
}

pub struct VerificationService {
    provider: Arc<dyn PaymentProviderGateway>,
    tracker: Arc<IntentTracker>,
    checkout: CheckoutConfig,
}

impl VerificationService {
    pub fn new(
        provider: Arc<dyn PaymentProviderGateway>,
        tracker: Arc<IntentTracker>,
        checkout: CheckoutConfig,
    ) -> Self {
        Self {
            provider,
            tracker,
            checkout,
        }
    }
}

impl Processor<VerifyPayment> for VerificationService {
    type Output = VerificationOutcome;
    type Error = VerifyError;

    #[tracing::instrument(skip_all, err, name = "VerificationService:VerifyPayment")]
    async fn process(&self, command: VerifyPayment) -> Result<VerificationOutcome, VerifyError> {
        let Fields {
            order_id,
            payment_id,
            signature,
        } = command.into_fields()?;

        let mut intent = self
            .tracker
            .lock(&order_id)
            .await
            .ok_or_else(|| VerifyError::UnknownOrder(order_id.clone()))?;

        if intent.is_terminal() {
            warn!(%order_id, %payment_id, state = ?intent.state, "Verification attempted on finalized order");
            return Err(VerifyError::AlreadyFinalized {
                order_id,
                state: intent.state,
            });
        }
        if intent.state == IntentState::Created {
            intent.transition(IntentState::AwaitingVerification)?;
        }

        let signature_ok = self
            .provider
            .verify_signature(&order_id, &payment_id, &signature)
            .await
            .map_err(|e| {
                error!(%order_id, %payment_id, error = %e, "Signature check could not be performed");
                e
            })?;

        if !signature_ok {
            intent.transition(IntentState::Failed)?;
            warn!(%order_id, %payment_id, "Payment signature verification failed");
            return Ok(VerificationOutcome::Rejected {
                order_id,
                reason: RejectionReason::InvalidSignature,
            });
        }

        let payment = self.provider.fetch_payment(&payment_id).await.map_err(|e| {
            error!(%order_id, %payment_id, error = %e, "Failed to fetch payment from provider");
            e
        })?;

        let amount = self
            .checkout
            .minor_units
            .to_major(payment.amount_minor, &payment.currency)
            .map_err(|e| {
                error!(%order_id, %payment_id, error = %e, "Provider payment in unsupported currency");
                GatewayError::UnexpectedResponse(e.to_string())
            })?;

        intent.transition(IntentState::Verified)?;
        intent.payment_id = Some(payment_id.clone());

        if payment.amount_minor != intent.amount_minor {
            warn!(
                %order_id,
                %payment_id,
                ordered = intent.amount_minor,
                paid = payment.amount_minor,
                "Provider-confirmed amount differs from ordered amount"
            );
        }
        info!(%order_id, %payment_id, %amount, status = %payment.status, "Payment verified");

        Ok(VerificationOutcome::Verified {
            order_id,
            payment_id,
            amount,
            amount_minor: payment.amount_minor,
            currency: payment.currency,
            status: payment.status,
        })
    }
}
