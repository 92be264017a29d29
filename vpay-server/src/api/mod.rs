//! HTTP API handlers.
//!
//! # Endpoints
//!
//! - `POST /transcribe`         – multipart `audio` upload → transcript + amount
//! - `POST /create-order`       – create a provider order for an amount
//! - `POST /verify-payment`     – verify a checkout signature and finalize
//! - `GET  /get-provider-key`   – public key id for the browser checkout
//! - `GET  /orders/{order_id}`  – tracked intent snapshot
//!
//! Every failure is answered with `{"error": "..."}`, except a signature
//! mismatch which is a regular `{"success": false, "message": ...}` body.

mod payment;
mod transcribe;

#[cfg(test)]
pub(crate) mod testing;

use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit,
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use std::time::Duration;
use tokio::task::JoinError;
use vpay_core::services::{CreateOrderError, TranscribeError, VerifyError};
use vpay_sdk::objects::ErrorResponse;

/// Uploads above this size are rejected before reaching the transcriber.
const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/transcribe",
            post(transcribe::transcribe).layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES)),
        )
        .route("/create-order", post(payment::create_order))
        .route("/verify-payment", post(payment::verify_payment))
        .route("/get-provider-key", get(payment::get_provider_key))
        .route("/orders/{order_id}", get(payment::get_intent))
}

/// Run `work` on its own task and wait at most `timeout` for it.
///
/// On timeout the task keeps running, so a provider call that was already
/// issued still finishes and updates the intent tracker.
async fn detached<F, T, E>(timeout: Duration, work: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    ApiError: From<E>,
{
    let handle = tokio::spawn(work);
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(result)) => result.map_err(ApiError::from),
        Ok(Err(e)) => Err(ApiError::Task(e)),
        Err(_) => Err(ApiError::Timeout(timeout)),
    }
}

/// Errors that can occur in API handlers.
#[derive(Debug)]
pub enum ApiError {
    Transcribe(TranscribeError),
    CreateOrder(CreateOrderError),
    Verify(VerifyError),
    /// The request body was not the expected JSON.
    InvalidJson(JsonRejection),
    /// The request was not a readable multipart upload.
    InvalidUpload(String),
    OrderNotFound,
    Timeout(Duration),
    Task(JoinError),
}

impl From<TranscribeError> for ApiError {
    fn from(e: TranscribeError) -> Self {
        Self::Transcribe(e)
    }
}

impl From<CreateOrderError> for ApiError {
    fn from(e: CreateOrderError) -> Self {
        Self::CreateOrder(e)
    }
}

impl From<VerifyError> for ApiError {
    fn from(e: VerifyError) -> Self {
        Self::Verify(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::InvalidJson(e)
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(e: MultipartRejection) -> Self {
        Self::InvalidUpload(e.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self::InvalidUpload(e.body_text())
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    error_body(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Transcribe(TranscribeError::EmptyAudio) => {
                error_body(StatusCode::BAD_REQUEST, "No audio file provided")
            }
            ApiError::Transcribe(TranscribeError::Gateway(e)) => {
                tracing::error!(error = %e, "Transcription failed");
                internal_error()
            }
            ApiError::CreateOrder(CreateOrderError::InvalidAmount) => {
                error_body(StatusCode::BAD_REQUEST, "Invalid amount")
            }
            ApiError::CreateOrder(e) => {
                tracing::error!(error = %e, "Order creation failed");
                internal_error()
            }
            ApiError::Verify(VerifyError::MissingFields) => {
                error_body(StatusCode::BAD_REQUEST, "Missing payment details")
            }
            ApiError::Verify(VerifyError::UnknownOrder(order_id)) => {
                tracing::warn!(%order_id, "Verification for unknown order");
                error_body(StatusCode::BAD_REQUEST, "Unknown order")
            }
            ApiError::Verify(VerifyError::AlreadyFinalized { .. }) => {
                error_body(StatusCode::CONFLICT, "Order already finalized")
            }
            ApiError::Verify(e) => {
                tracing::error!(error = %e, "Payment verification failed");
                internal_error()
            }
            ApiError::InvalidJson(e) => error_body(StatusCode::BAD_REQUEST, e.body_text()),
            ApiError::InvalidUpload(message) => error_body(StatusCode::BAD_REQUEST, message),
            ApiError::OrderNotFound => error_body(StatusCode::NOT_FOUND, "Order not found"),
            ApiError::Timeout(timeout) => {
                tracing::warn!(
                    timeout_secs = timeout.as_secs(),
                    "Provider did not answer in time, request continues in background"
                );
                error_body(StatusCode::GATEWAY_TIMEOUT, "Payment provider timed out")
            }
            ApiError::Task(e) => {
                tracing::error!(error = %e, "Request task failed");
                internal_error()
            }
        }
    }
}
