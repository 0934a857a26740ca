//! Authentication backend for axum-login.
//!
//! Single-operator model: credentials come from the `[auth]` config section.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum_login::{AuthUser, AuthnBackend, UserId};
use std::sync::Arc;

use crate::domain::settings::AuthSettings;

/// The signed-in operator. Sessions are keyed by username and invalidated
/// when the configured password hash changes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Operator {
    pub username: String,
    session_hash: Vec<u8>,
}

impl AuthUser for Operator {
    type Id = String;

    fn id(&self) -> String {
        self.username.clone()
    }

    fn session_auth_hash(&self) -> &[u8] {
        &self.session_hash
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
#[error("password check did not complete: {0}")]
pub struct AuthError(#[from] tokio::task::JoinError);

/// Backend holding the one operator account from `[auth]`.
#[derive(Clone)]
pub struct Backend {
    operator: Operator,
    password_hash: Arc<str>,
}

impl Backend {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            operator: Operator {
                username,
                session_hash: password_hash.as_bytes().to_vec(),
            },
            password_hash: password_hash.into(),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(settings.username.clone(), settings.password_hash.clone())
    }
}

fn password_matches(password: &str, phc: &str) -> bool {
    PasswordHash::new(phc)
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok()
        })
        .unwrap_or(false)
}

impl AuthnBackend for Backend {
    type User = Operator;
    type Credentials = Credentials;
    type Error = AuthError;

    async fn authenticate(&self, creds: Credentials) -> Result<Option<Operator>, AuthError> {
        if creds.username != self.operator.username {
            return Ok(None);
        }
        // argon2 verification blocks for tens of milliseconds
        let phc = Arc::clone(&self.password_hash);
        let matched =
            tokio::task::spawn_blocking(move || password_matches(&creds.password, &phc)).await?;
        Ok(matched.then(|| self.operator.clone()))
    }

    async fn get_user(&self, user_id: &UserId<Self>) -> Result<Option<Operator>, AuthError> {
        Ok((*user_id == self.operator.username).then(|| self.operator.clone()))
    }
}

/// Hashes a password into the PHC string stored as `[auth] password_hash`.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::PasswordHasher;
    use argon2::password_hash::SaltString;

    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}
