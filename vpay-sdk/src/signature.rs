//! Checkout signature scheme of the payment provider.
//!
//! When the hosted checkout completes, the provider hands the browser three
//! values: the order id, the payment id, and a signature. The signature is
//!
//! ```text
//! hex(HMAC-SHA256("{order_id}|{payment_id}", key_secret))
//! ```
//!
//! and only someone holding the merchant key secret can produce it, so a
//! valid signature proves the completion message came from the provider.

use ring::hmac;

/// Separator placed between order id and payment id in the signed message.
pub const PAYLOAD_SEPARATOR: char = '|';

/// Errors produced by signature operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("invalid hex encoding")]
    InvalidHex,
    #[error("invalid signature")]
    SignatureMismatch,
}

impl From<ring::error::Unspecified> for SignatureError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::SignatureMismatch
    }
}

fn signed_payload(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}{PAYLOAD_SEPARATOR}{payment_id}")
}

/// Compute the hex signature the provider would issue for this pair.
pub fn sign_payment(order_id: &str, payment_id: &str, key_secret: &[u8]) -> String {
    let tag = hmac::sign(
        &hmac::Key::new(hmac::HMAC_SHA256, key_secret),
        signed_payload(order_id, payment_id).as_bytes(),
    );
    hex::encode(tag.as_ref())
}

/// Verify a provider-issued checkout signature.
///
/// The comparison runs in constant time. Any malformed signature (odd
/// length, non-hex characters) is reported as [`SignatureError::InvalidHex`]
/// and should be treated by callers the same way as a mismatch.
pub fn verify_payment(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    key_secret: &[u8],
) -> Result<(), SignatureError> {
    let expected = hex::decode(signature.trim()).map_err(|_| SignatureError::InvalidHex)?;
    hmac::verify(
        &hmac::Key::new(hmac::HMAC_SHA256, key_secret),
        signed_payload(order_id, payment_id).as_bytes(),
        &expected,
    )?;
    Ok(())
}
