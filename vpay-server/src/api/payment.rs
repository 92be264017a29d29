use super::{ApiError, detached};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kanau::processor::Processor;
use vpay_core::services::order::requested_amount;
use vpay_core::services::{CreateOrder, VerificationOutcome, VerifyPayment};
use vpay_sdk::objects::{
    CreateOrderRequest, CreateOrderResponse, IntentResponse, PaymentRejected, PaymentVerified,
    ProviderKeyResponse, VerifyPaymentRequest,
};

const VERIFIED_MESSAGE: &str = "Payment verified successfully";
const REJECTED_MESSAGE: &str = "Payment verification failed - Invalid signature";

/// `POST /create-order`: create a provider order for a spoken amount.
///
/// The amount is in major units; the response carries minor units.
pub(super) async fn create_order(
    state: State<AppState>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let Json(body) = body?;
    let command = CreateOrder {
        amount: requested_amount(&body.amount),
        upi_id: body.upi_id,
    };

    let orders = state.orders.clone();
    let record = detached(state.request_timeout, async move {
        orders.process(command).await
    })
    .await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: record.order_id,
        amount: record.amount_minor,
        currency: record.currency,
        provider_key_id: record.provider_key_id,
    }))
}

/// `POST /verify-payment`: verify the checkout result for an order.
///
/// A signature mismatch finalizes the order as failed and is answered with
/// 400 and `success: false`. Retrying a finalized order yields 409.
pub(super) async fn verify_payment(
    state: State<AppState>,
    body: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let command = VerifyPayment {
        order_id: body.order_id,
        payment_id: body.payment_id,
        signature: body.signature,
    };

    let verification = state.verification.clone();
    let outcome = detached(state.request_timeout, async move {
        verification.process(command).await
    })
    .await?;

    let response = match outcome {
        VerificationOutcome::Verified {
            payment_id,
            amount,
            status,
            ..
        } => Json(PaymentVerified {
            success: true,
            message: VERIFIED_MESSAGE.to_owned(),
            payment_id,
            amount,
            status,
        })
        .into_response(),
        VerificationOutcome::Rejected { .. } => (
            StatusCode::BAD_REQUEST,
            Json(PaymentRejected {
                success: false,
                message: REJECTED_MESSAGE.to_owned(),
            }),
        )
            .into_response(),
    };
    Ok(response)
}

/// `GET /get-provider-key`: key id for initializing the browser checkout.
pub(super) async fn get_provider_key(state: State<AppState>) -> Json<ProviderKeyResponse> {
    Json(ProviderKeyResponse {
        key_id: state.orders.provider_key_id().to_owned(),
    })
}

/// `GET /orders/{order_id}`: current state of a tracked order.
pub(super) async fn get_intent(
    state: State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<IntentResponse>, ApiError> {
    let intent = state
        .tracker
        .get(&order_id)
        .await
        .ok_or(ApiError::OrderNotFound)?;
    Ok(Json(intent.to_response()))
}
