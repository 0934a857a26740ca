//! JSON API routes: checkout, account bridge and payout requests.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::account::{AccountCredentials, AccountSnapshot};
use crate::domain::checkout::CheckoutSession;
use crate::domain::payout::NewPayoutRequest;
use crate::domain::user::id_from_string_or_number;

use super::error::ApiError;
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckoutBody {
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutReply {
    pub url: String,
}

pub async fn stripe_checkout(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CheckoutBody>,
) -> Result<Json<CheckoutReply>, ApiError> {
    let session = CheckoutSession::for_amount(body.amount, &state.site_url)?;
    let url = state.payments.create_checkout_session(&session).await?;
    Ok(Json(CheckoutReply { url }))
}

pub async fn mt5_account(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<AccountCredentials>,
) -> Result<Json<AccountSnapshot>, ApiError> {
    let snapshot = state.bridge.fetch_account(&credentials).await?;
    Ok(Json(snapshot))
}

#[derive(Debug, Deserialize)]
pub struct PayoutBody {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub user_id: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PayoutReply {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn payout_request(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PayoutBody>,
) -> Response {
    let request = NewPayoutRequest::pending(body.user_id, body.amount);
    match state.database.insert_payout_request(&request).await {
        Ok(()) => Json(PayoutReply {
            success: true,
            error: None,
        })
        .into_response(),
        Err(err) => {
            let api_error = ApiError::from(err);
            (
                api_error.status,
                Json(PayoutReply {
                    success: false,
                    error: Some(api_error.message),
                }),
            )
                .into_response()
        }
    }
}
