//! HTTP request handlers for the HTML pages.

use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::adapters::chart_svg::account_chart_svg;
use crate::domain::account::AccountCredentials;
use crate::domain::pricing::PLANS;

use super::auth::{Backend, Credentials};
use super::templates::{
    AccountTemplate, AdminTemplate, DashboardTemplate, HomeTemplate, LoginTemplate,
    PricingTemplate,
};
use super::{AppState, WebError, render_page};

pub type AuthSession = axum_login::AuthSession<Backend>;

const DEFAULT_LANDING: &str = "/dashboard";

pub async fn home(headers: HeaderMap) -> Result<Response, WebError> {
    render_page(&headers, "Home", &HomeTemplate { plans: PLANS })
}

pub async fn pricing(headers: HeaderMap) -> Result<Response, WebError> {
    render_page(&headers, "Pricing", &PricingTemplate::new(PLANS))
}

#[derive(Debug, serde::Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

pub async fn login_form(
    headers: HeaderMap,
    Query(query): Query<NextQuery>,
) -> Result<Response, WebError> {
    let next = safe_next(query.next.as_deref());
    let template = LoginTemplate {
        error: None,
        username: "",
        next,
    };
    render_page(&headers, "Log in", &template)
}

#[derive(Debug, serde::Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

pub async fn login(
    mut auth_session: AuthSession,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let next = safe_next(form.next.as_deref()).to_string();
    let creds = Credentials {
        username: form.username.clone(),
        password: form.password,
    };

    let operator = match auth_session.authenticate(creds).await {
        Ok(Some(operator)) => operator,
        Ok(None) => {
            tracing::warn!(username = %form.username, "failed login attempt");
            let template = LoginTemplate {
                error: Some("Invalid username or password"),
                username: &form.username,
                next: &next,
            };
            let mut response = render_page(&headers, "Log in", &template)?;
            *response.status_mut() = StatusCode::UNAUTHORIZED;
            return Ok(response);
        }
        Err(e) => return Err(WebError::internal(e.to_string()).for_request(&headers)),
    };

    auth_session
        .login(&operator)
        .await
        .map_err(|e| WebError::internal(e.to_string()).for_request(&headers))?;
    tracing::info!(username = %operator.username, "operator logged in");

    Ok(Redirect::to(&next).into_response())
}

pub async fn logout(mut auth_session: AuthSession) -> Result<Response, WebError> {
    auth_session
        .logout()
        .await
        .map_err(|e| WebError::internal(e.to_string()))?;
    Ok(Redirect::to("/login").into_response())
}

/// Only same-site absolute paths are accepted as post-login targets.
/// Browsers treat `\` like `/`, so `/\host` would leave the site.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => DEFAULT_LANDING,
    }
}

pub async fn dashboard(
    auth_session: AuthSession,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let username = auth_session
        .user
        .as_ref()
        .map(|u| u.username.as_str())
        .unwrap_or_default();
    render_page(&headers, "Dashboard", &DashboardTemplate { username })
}

pub async fn account_summary(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(credentials): Form<AccountCredentials>,
) -> Result<Response, WebError> {
    let snapshot = state
        .bridge
        .fetch_account(&credentials)
        .await
        .map_err(|e| WebError::from(e).for_request(&headers))?;
    let chart = account_chart_svg(&snapshot);
    let template = AccountTemplate::new(&credentials.login, &snapshot, &chart);
    render_page(&headers, "Account", &template)
}

pub async fn admin(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let users = state
        .database
        .list_users()
        .await
        .map_err(|e| WebError::from(e).for_request(&headers))?;
    tracing::info!(count = users.len(), "rendering admin table");
    render_page(&headers, "Admin", &AdminTemplate::new(&users))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn not_found() -> WebError {
    WebError::not_found("Page not found")
}
