//! HTML and JSON error responses.

use askama::Template;
use axum::{
    Json,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::TruefundedError;

use super::is_htmx_request;
use super::templates::{BasePage, ErrorTemplate};

/// Error rendered as an HTML page, or as the bare error fragment when the
/// request came from HTMX.
#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
    pub htmx: bool,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            htmx: false,
        }
    }

    /// Marks the error as a fragment response when `headers` carry `HX-Request`.
    pub fn for_request(mut self, headers: &HeaderMap) -> Self {
        self.htmx = is_htmx_request(headers);
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<TruefundedError> for WebError {
    fn from(err: TruefundedError) -> Self {
        log_error(&err);
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        tracing::error!(error = %err, "template render failed");
        Self::internal(err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let fragment = ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        }
        .render();
        let body = match fragment {
            Ok(content) if self.htmx => Ok(content),
            Ok(content) => BasePage {
                title: "Error",
                content: &content,
            }
            .render(),
            Err(e) => Err(e),
        };
        match body {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, self.message).into_response(),
        }
    }
}

/// Error rendered as `{ "error": "..." }` for the JSON API. Upstream detail
/// stays in the log; callers see a fixed message per service.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<TruefundedError> for ApiError {
    fn from(err: TruefundedError) -> Self {
        log_error(&err);
        Self {
            status: status_from_error(&err),
            message: public_message(&err),
        }
    }
}

fn public_message(err: &TruefundedError) -> String {
    match err {
        TruefundedError::Payment { .. } => "payment provider unavailable".to_string(),
        TruefundedError::Database { .. } => "database unavailable".to_string(),
        TruefundedError::Bridge { .. } => "account bridge unavailable".to_string(),
        TruefundedError::InvalidAmount { .. } => err.to_string(),
        TruefundedError::ConfigParse { .. }
        | TruefundedError::ConfigMissing { .. }
        | TruefundedError::ConfigInvalid { .. }
        | TruefundedError::Io(_) => "internal error".to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

pub fn status_from_error(err: &TruefundedError) -> StatusCode {
    match err {
        TruefundedError::InvalidAmount { .. } => StatusCode::BAD_REQUEST,
        TruefundedError::Payment { .. }
        | TruefundedError::Database { .. }
        | TruefundedError::Bridge { .. } => StatusCode::BAD_GATEWAY,
        TruefundedError::ConfigParse { .. }
        | TruefundedError::ConfigMissing { .. }
        | TruefundedError::ConfigInvalid { .. }
        | TruefundedError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_error(err: &TruefundedError) {
    if err.is_upstream() {
        tracing::error!(error = %err, "upstream call failed");
    } else {
        tracing::warn!(error = %err, "request rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let err = TruefundedError::Database {
            reason: "timeout".into(),
        };
        assert_eq!(status_from_error(&err), StatusCode::BAD_GATEWAY);
        let err = TruefundedError::Payment {
            reason: "declined".into(),
        };
        assert_eq!(status_from_error(&err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_amount_maps_to_bad_request() {
        let err = TruefundedError::InvalidAmount {
            amount: -1.0,
            reason: "amount must be positive".into(),
        };
        assert_eq!(status_from_error(&err), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(err).status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_hides_upstream_detail() {
        let err = TruefundedError::Database {
            reason: "payout_requests: 401: {\"message\":\"JWT expired\"}".into(),
        };
        let api_error = ApiError::from(err);
        assert_eq!(api_error.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api_error.message, "database unavailable");

        let err = TruefundedError::InvalidAmount {
            amount: 0.0,
            reason: "amount must be positive".into(),
        };
        assert!(ApiError::from(err).message.contains("amount must be positive"));
    }

    #[test]
    fn htmx_error_is_a_bare_fragment() {
        let mut headers = HeaderMap::new();
        headers.insert("HX-Request", axum::http::HeaderValue::from_static("true"));
        let err = WebError::not_found("gone").for_request(&headers);
        assert!(err.htmx);
        let plain = WebError::not_found("gone").for_request(&HeaderMap::new());
        assert!(!plain.htmx);
    }

    #[test]
    fn web_error_renders_full_page() {
        let response = WebError::not_found("No such page").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
