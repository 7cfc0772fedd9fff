//! HTTP handlers for billing endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::billing::{
    CheckoutItem, CreateCheckoutCommand, ReceiveCallbackCommand,
};
use crate::domain::billing::BillingError;
use crate::domain::foundation::{OwnedByUser, Role, TransactionId};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    AttachProofRequest, CheckoutRequest, CheckoutResponse, PlanListResponse, PlanResponse,
    SubscriptionResponse, TransactionListResponse, TransactionResponse, WebhookAckResponse,
};

/// GET /api/subscription - the caller's live subscription
pub async fn get_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let subscription = state
        .subscriptions
        .find_live_by_user(&user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No subscription"))?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}

/// POST /api/subscription/cancel - cancel at period end
pub async fn cancel_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let mut subscription = state
        .subscriptions
        .find_live_by_user(&user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No subscription"))?;

    subscription.cancel()?;
    state.subscriptions.update(&subscription).await?;

    Ok(Json(SubscriptionResponse::from(subscription)))
}

/// GET /api/plans - list active subscription plans
pub async fn list_plans(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let plans = state.subscriptions.list_active_plans().await?;
    let response = PlanListResponse {
        plans: plans.into_iter().map(PlanResponse::from).collect(),
    };
    Ok(Json(response))
}

/// POST /api/checkout - start a purchase
pub async fn create_checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = match request.item_type.as_str() {
        "course" => CheckoutItem::Course(
            request
                .item_id
                .parse()
                .map_err(|_| ApiError::bad_request("item_id must be a UUID"))?,
        ),
        "plan" => CheckoutItem::Plan(
            request
                .item_id
                .parse()
                .map_err(|_| ApiError::bad_request("item_id must be a UUID"))?,
        ),
        other => {
            return Err(ApiError::bad_request(format!(
                "item_type must be 'course' or 'plan', got '{}'",
                other
            )))
        }
    };

    let handler = state.create_checkout_handler();
    let result = handler
        .handle(CreateCheckoutCommand {
            user_id: user.user_id,
            email: user.email,
            item,
            payment_method: request.payment_method,
        })
        .await?;

    let response = CheckoutResponse {
        transaction: TransactionResponse::from(result.transaction),
        redirect_url: result.redirect_url,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/transactions - list the caller's transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.transactions.list_by_user(&user.user_id).await?;
    let response = TransactionListResponse {
        transactions: transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect(),
    };
    Ok(Json(response))
}

/// GET /api/transactions/:id - transaction details (owner/admin)
pub async fn get_transaction(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(transaction_id): Path<TransactionId>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .transactions
        .find_by_id(&transaction_id)
        .await?
        .ok_or_else(|| BillingError::not_found(transaction_id))?;

    if user.role != Role::Admin {
        transaction.check_ownership(&user.user_id)?;
    }

    Ok(Json(TransactionResponse::from(transaction)))
}

/// POST /api/transactions/:id/proof - attach a proof-of-payment reference
pub async fn attach_proof(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(transaction_id): Path<TransactionId>,
    Json(request): Json<AttachProofRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut transaction = state
        .transactions
        .find_by_id(&transaction_id)
        .await?
        .ok_or_else(|| BillingError::not_found(transaction_id))?;

    transaction.check_ownership(&user.user_id)?;
    transaction.attach_proof(request.reference)?;
    state.transactions.update(&transaction).await?;

    Ok(Json(TransactionResponse::from(transaction)))
}

/// POST /api/webhooks/payment - payment gateway notification
///
/// No bearer auth: the notification carries its own signature.
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.receive_callback_handler();
    handler
        .handle(ReceiveCallbackCommand {
            payload: body.to_vec(),
        })
        .await?;

    Ok(Json(WebhookAckResponse { status: "ok" }))
}
