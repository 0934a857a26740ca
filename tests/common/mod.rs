#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use std::sync::{Arc, LazyLock, Mutex};
use truefunded::adapters::mt5_bridge_adapter::StubMt5Bridge;
use truefunded::adapters::web::{AppState, build_router};
use truefunded::domain::checkout::CheckoutSession;
use truefunded::domain::error::TruefundedError;
use truefunded::domain::payout::NewPayoutRequest;
use truefunded::domain::settings::AuthSettings;
use truefunded::domain::user::User;
use truefunded::ports::database_port::DatabasePort;
use truefunded::ports::payment_port::PaymentPort;

pub const TEST_USERNAME: &str = "ops";
pub const TEST_PASSWORD: &str = "testpass123";
pub const SITE_URL: &str = "https://truefunded.test";
pub const CHECKOUT_URL: &str = "https://checkout.stripe.com/c/pay/cs_test_abc";

static TEST_PASSWORD_HASH: LazyLock<String> = LazyLock::new(|| {
    use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version, password_hash::SaltString};
    let salt = SaltString::from_b64("dGVzdHNhbHR0ZXN0c2FsdA").unwrap();
    let params = Params::new(8, 1, 1, None).unwrap();
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(TEST_PASSWORD.as_bytes(), &salt)
        .unwrap()
        .to_string()
});

pub fn test_auth_settings() -> AuthSettings {
    AuthSettings {
        username: TEST_USERNAME.to_string(),
        password_hash: TEST_PASSWORD_HASH.clone(),
        session_secret: vec![7u8; 64],
        session_lifetime_secs: 3600,
        secure_cookies: false,
    }
}

#[derive(Default)]
pub struct MockPayments {
    pub sessions: Mutex<Vec<CheckoutSession>>,
    pub fail_with: Option<String>,
}

impl MockPayments {
    pub fn failing(reason: &str) -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            fail_with: Some(reason.to_string()),
        }
    }
}

#[async_trait]
impl PaymentPort for MockPayments {
    async fn create_checkout_session(
        &self,
        session: &CheckoutSession,
    ) -> Result<String, TruefundedError> {
        self.sessions.lock().unwrap().push(session.clone());
        match &self.fail_with {
            Some(reason) => Err(TruefundedError::Payment {
                reason: reason.clone(),
            }),
            None => Ok(CHECKOUT_URL.to_string()),
        }
    }
}

#[derive(Default)]
pub struct MockDatabase {
    pub users: Vec<User>,
    pub payouts: Mutex<Vec<NewPayoutRequest>>,
    pub fail_with: Option<String>,
}

impl MockDatabase {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            fail_with: Some(reason.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl DatabasePort for MockDatabase {
    async fn insert_payout_request(
        &self,
        request: &NewPayoutRequest,
    ) -> Result<(), TruefundedError> {
        if let Some(reason) = &self.fail_with {
            return Err(TruefundedError::Database {
                reason: reason.clone(),
            });
        }
        self.payouts.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, TruefundedError> {
        if let Some(reason) = &self.fail_with {
            return Err(TruefundedError::Database {
                reason: reason.clone(),
            });
        }
        Ok(self.users.clone())
    }
}

pub fn make_user(id: &str, email: &str, balance: f64, profit: f64) -> User {
    User {
        id: id.to_string(),
        email: Some(email.to_string()),
        role: None,
        account_size: Some(balance - profit),
        balance: Some(balance),
        profit: Some(profit),
    }
}

pub fn make_users(n: usize) -> Vec<User> {
    (0..n)
        .map(|i| make_user(&format!("u{i}"), &format!("trader{i}@truefunded.test"), 10_000.0, 0.0))
        .collect()
}

pub fn create_app(payments: Arc<MockPayments>, database: Arc<MockDatabase>) -> Router {
    let state = AppState {
        payments,
        database,
        bridge: Arc::new(StubMt5Bridge::new()),
        site_url: SITE_URL.to_string(),
    };
    build_router(state, &test_auth_settings()).unwrap()
}

pub fn create_default_app() -> Router {
    create_app(
        Arc::new(MockPayments::default()),
        Arc::new(MockDatabase::default()),
    )
}

pub fn extract_cookies(response: &axum::http::Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .collect()
}

pub fn build_cookie_header(set_cookies: &[String]) -> String {
    set_cookies
        .iter()
        .map(|sc| sc.split(';').next().unwrap_or("").to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    let form_data = format!("username={}&password={}", username, password);
    Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_data))
        .unwrap()
}

pub fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Logs the test operator in and returns the session cookie header.
pub async fn login_cookie(app: &Router) -> String {
    use tower::ServiceExt;

    let response = app
        .clone()
        .oneshot(login_request(TEST_USERNAME, TEST_PASSWORD))
        .await
        .unwrap();
    assert!(
        response.status().is_redirection(),
        "login failed with {}",
        response.status()
    );
    build_cookie_header(&extract_cookies(&response))
}

pub async fn body_string(response: axum::http::Response<Body>) -> String {
    use http_body_util::BodyExt;

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}
