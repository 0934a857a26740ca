//! Web server adapter.
//!
//! Axum server with server-rendered pages, an HTMX-driven dashboard, and the
//! JSON API routes. Dashboard and admin pages sit behind an axum-login gate.

mod api;
mod auth;
mod error;
mod handlers;
mod templates;

pub use api::*;
pub use auth::{Backend, Credentials, Operator, hash_password};
pub use error::{ApiError, WebError, status_from_error};
pub use handlers::*;
pub use templates::*;

use askama::Template;
use axum::{
    Router,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_login::{AuthManagerLayerBuilder, login_required};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::Key, cookie::SameSite};

use crate::domain::error::TruefundedError;
use crate::domain::settings::AuthSettings;
use crate::ports::account_bridge_port::AccountBridgePort;
use crate::ports::database_port::DatabasePort;
use crate::ports::payment_port::PaymentPort;

pub struct AppState {
    pub payments: Arc<dyn PaymentPort + Send + Sync>,
    pub database: Arc<dyn DatabasePort + Send + Sync>,
    pub bridge: Arc<dyn AccountBridgePort + Send + Sync>,
    /// Base URL checkout redirects return to.
    pub site_url: String,
}

pub fn build_router(state: AppState, auth: &AuthSettings) -> Result<Router, TruefundedError> {
    let key = Key::try_from(auth.session_secret.as_slice())
        .map_err(|e| TruefundedError::config_invalid("auth", "session_secret", e.to_string()))?;

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(auth.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            auth.session_lifetime_secs,
        )))
        .with_signed(key);
    let auth_layer =
        AuthManagerLayerBuilder::new(Backend::from_settings(auth), session_layer).build();

    let protected = Router::new()
        .route("/dashboard", get(handlers::dashboard))
        .route("/dashboard/account", post(handlers::account_summary))
        .route("/admin", get(handlers::admin))
        .route_layer(login_required!(Backend, login_url = "/login"));

    Ok(Router::new()
        .merge(protected)
        .route("/", get(handlers::home))
        .route("/pricing", get(handlers::pricing))
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/health", get(handlers::health))
        .route("/api/stripe", post(api::stripe_checkout))
        .route("/api/mt5", post(api::mt5_account))
        .route("/api/payout", post(api::payout_request))
        .nest_service("/static", ServeDir::new("static"))
        .fallback(handlers::not_found)
        .layer(auth_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state)))
}

fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}

/// Renders a page template, wrapped in the site layout unless HTMX asked for
/// the fragment alone.
fn render_page<T: Template>(
    headers: &HeaderMap,
    title: &str,
    template: &T,
) -> Result<Response, WebError> {
    let fail = |e: askama::Error| WebError::from(e).for_request(headers);
    let content = template.render().map_err(fail)?;
    if is_htmx_request(headers) {
        return Ok(Html(content).into_response());
    }
    let page = BasePage {
        title,
        content: &content,
    };
    Ok(Html(page.render().map_err(fail)?).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn htmx_header_is_detected() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx_request(&headers));
        headers.insert("HX-Request", HeaderValue::from_static("true"));
        assert!(is_htmx_request(&headers));
    }

    #[test]
    fn fragment_requests_skip_the_layout() {
        let template = ErrorTemplate {
            message: "m",
            status: 418,
        };
        let mut headers = HeaderMap::new();
        headers.insert("HX-Request", HeaderValue::from_static("true"));
        let fragment = render_page(&headers, "T", &template).unwrap();
        let full = render_page(&HeaderMap::new(), "T", &template).unwrap();
        assert_eq!(fragment.status(), axum::http::StatusCode::OK);
        assert_eq!(full.status(), axum::http::StatusCode::OK);
    }
}
