//! Stripe Checkout adapter.
//!
//! Creates hosted checkout sessions through the Stripe REST API. Requests are
//! form encoded with bracketed keys, which is how Stripe expects nested
//! parameters.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::checkout::CheckoutSession;
use crate::domain::error::TruefundedError;
use crate::domain::settings::Settings;
use crate::ports::payment_port::PaymentPort;

const SESSIONS_PATH: &str = "/v1/checkout/sessions";

#[derive(Debug)]
pub struct StripeAdapter {
    client: Client,
    secret_key: String,
    api_base: String,
}

impl StripeAdapter {
    pub fn new(
        secret_key: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TruefundedError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TruefundedError::Payment {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            secret_key: secret_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, TruefundedError> {
        Self::new(
            settings.payment_secret_key.clone(),
            settings.payment_api_base.clone(),
            settings.http_timeout,
        )
    }
}

/// Flattens a session into Stripe's bracketed form fields.
pub fn session_form(session: &CheckoutSession) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_string(), session.mode.as_str().to_string()),
        ("success_url".to_string(), session.success_url.clone()),
        ("cancel_url".to_string(), session.cancel_url.clone()),
    ];
    for (i, method) in session.payment_method_types.iter().enumerate() {
        form.push((format!("payment_method_types[{i}]"), method.clone()));
    }
    for (i, item) in session.line_items.iter().enumerate() {
        let prefix = format!("line_items[{i}]");
        form.push((
            format!("{prefix}[price_data][currency]"),
            item.currency.clone(),
        ));
        form.push((
            format!("{prefix}[price_data][product_data][name]"),
            item.name.clone(),
        ));
        form.push((
            format!("{prefix}[price_data][unit_amount]"),
            item.unit_amount.to_string(),
        ));
        form.push((format!("{prefix}[quantity]"), item.quantity.to_string()));
    }
    form
}

#[derive(Deserialize)]
struct SessionResponse {
    id: String,
    url: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

fn describe_failure(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => format!(
            "{} ({}): {}",
            status,
            env.error.kind.as_deref().unwrap_or("unknown_error"),
            env.error.message.as_deref().unwrap_or("no message")
        ),
        Err(_) => format!("{status}: {body}"),
    }
}

#[async_trait]
impl PaymentPort for StripeAdapter {
    async fn create_checkout_session(
        &self,
        session: &CheckoutSession,
    ) -> Result<String, TruefundedError> {
        let url = format!("{}{}", self.api_base, SESSIONS_PATH);
        tracing::info!(
            amount_minor = session.total_minor_units(),
            "creating checkout session"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&session_form(session))
            .send()
            .await
            .map_err(|e| TruefundedError::Payment {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TruefundedError::Payment {
                reason: describe_failure(status, &body),
            });
        }

        let created: SessionResponse =
            response.json().await.map_err(|e| TruefundedError::Payment {
                reason: format!("unreadable session response: {e}"),
            })?;

        tracing::info!(session_id = %created.id, "checkout session created");
        created
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| TruefundedError::Payment {
                reason: format!("session {} has no redirect url", created.id),
            })
    }
}
