//! Supabase adapter over the PostgREST HTTP interface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use crate::domain::error::TruefundedError;
use crate::domain::payout::NewPayoutRequest;
use crate::domain::settings::Settings;
use crate::domain::user::User;
use crate::ports::database_port::DatabasePort;

pub const USERS_TABLE: &str = "users";
pub const PAYOUT_REQUESTS_TABLE: &str = "payout_requests";

#[derive(Debug)]
pub struct SupabaseAdapter {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseAdapter {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TruefundedError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TruefundedError::Database {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, TruefundedError> {
        Self::new(
            settings.database_url.clone(),
            settings.database_key.clone(),
            settings.http_timeout,
        )
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

async fn check_status(
    table: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, TruefundedError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TruefundedError::Database {
        reason: format!("{table}: {status}: {body}"),
    })
}

#[async_trait]
impl DatabasePort for SupabaseAdapter {
    async fn insert_payout_request(
        &self,
        request: &NewPayoutRequest,
    ) -> Result<(), TruefundedError> {
        tracing::info!(user_id = %request.user_id, amount = request.amount, "inserting payout request");
        let response = self
            .authorized(self.client.post(self.table_url(PAYOUT_REQUESTS_TABLE)))
            .header("Prefer", "return=minimal")
            .json(request)
            .send()
            .await
            .map_err(|e| TruefundedError::Database {
                reason: e.to_string(),
            })?;
        check_status(PAYOUT_REQUESTS_TABLE, response).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, TruefundedError> {
        let response = self
            .authorized(self.client.get(self.table_url(USERS_TABLE)))
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(|e| TruefundedError::Database {
                reason: e.to_string(),
            })?;
        let users: Vec<User> = check_status(USERS_TABLE, response)
            .await?
            .json()
            .await
            .map_err(|e| TruefundedError::Database {
                reason: format!("{USERS_TABLE}: unreadable rows: {e}"),
            })?;
        tracing::debug!(count = users.len(), "fetched users");
        Ok(users)
    }
}
