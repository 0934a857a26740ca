//! Resolved runtime settings.
//!
//! Built once at startup from a [`ConfigPort`] and handed to each adapter, so
//! a missing key fails the process before it serves a single request.

use std::time::Duration;

use crate::domain::error::TruefundedError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_PAYMENT_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: i64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SESSION_LIFETIME_SECS: i64 = 86_400;

/// Session signing keys are 64 bytes, supplied as 128 hex characters.
pub const SESSION_SECRET_LEN: usize = 64;

#[derive(Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub database_key: String,
    pub payment_secret_key: String,
    pub payment_api_base: String,
    pub site_url: String,
    pub bind_addr: String,
    pub http_timeout: Duration,
    pub log_level: String,
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TruefundedError> {
        let database_url = require_url(config, "database", "url")?;
        let database_key = require(config, "database", "key")?;
        let payment_secret_key = require(config, "payment", "secret_key")?;
        let site_url = require_url(config, "site", "url")?;

        let payment_api_base = match optional(config, "payment", "api_base") {
            Some(_) => require_url(config, "payment", "api_base")?,
            None => DEFAULT_PAYMENT_API_BASE.to_string(),
        };

        let bind_addr =
            optional(config, "server", "bind").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let timeout_secs = positive_int(config, "http", "timeout_secs", DEFAULT_HTTP_TIMEOUT_SECS)?;

        let log_level =
            optional(config, "log", "level").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            database_url,
            database_key,
            payment_secret_key,
            payment_api_base,
            site_url,
            bind_addr,
            http_timeout: Duration::from_secs(timeout_secs as u64),
            log_level,
        })
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url)
            .field("database_key", &redact(&self.database_key))
            .field("payment_secret_key", &redact(&self.payment_secret_key))
            .field("payment_api_base", &self.payment_api_base)
            .field("site_url", &self.site_url)
            .field("bind_addr", &self.bind_addr)
            .field("http_timeout", &self.http_timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Operator login and session cookie settings, only needed by `serve`.
#[derive(Clone)]
pub struct AuthSettings {
    pub username: String,
    pub password_hash: String,
    pub session_secret: Vec<u8>,
    pub session_lifetime_secs: i64,
    pub secure_cookies: bool,
}

impl AuthSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TruefundedError> {
        let username = require(config, "auth", "username")?;
        let password_hash = require(config, "auth", "password_hash")?;
        if argon2::PasswordHash::new(&password_hash).is_err() {
            return Err(TruefundedError::config_invalid(
                "auth",
                "password_hash",
                "not a PHC password hash string (see `truefunded hash-password`)",
            ));
        }

        let secret_hex = require(config, "auth", "session_secret")?;
        let session_secret = hex::decode(secret_hex.trim()).map_err(|e| {
            TruefundedError::config_invalid("auth", "session_secret", e.to_string())
        })?;
        if session_secret.len() < SESSION_SECRET_LEN {
            return Err(TruefundedError::config_invalid(
                "auth",
                "session_secret",
                format!(
                    "session_secret must be at least {} hex characters",
                    SESSION_SECRET_LEN * 2
                ),
            ));
        }

        let session_lifetime_secs = positive_int(
            config,
            "auth",
            "session_lifetime",
            DEFAULT_SESSION_LIFETIME_SECS,
        )?;

        Ok(Self {
            username,
            password_hash,
            session_secret,
            session_lifetime_secs,
            secure_cookies: config.get_bool("auth", "secure_cookies", false),
        })
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("session_secret", &"<redacted>")
            .field("session_lifetime_secs", &self.session_lifetime_secs)
            .field("secure_cookies", &self.secure_cookies)
            .finish()
    }
}

fn optional(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Optional whole number of seconds; present values must parse and be > 0.
fn positive_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<i64, TruefundedError> {
    let Some(raw) = optional(config, section, key) else {
        return Ok(default);
    };
    match raw.parse::<i64>() {
        Ok(v) if v > 0 => Ok(v),
        Ok(_) => Err(TruefundedError::config_invalid(
            section,
            key,
            format!("{key} must be positive"),
        )),
        Err(e) => Err(TruefundedError::config_invalid(
            section,
            key,
            format!("{raw:?} is not a whole number: {e}"),
        )),
    }
}

fn require(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, TruefundedError> {
    optional(config, section, key).ok_or_else(|| TruefundedError::config_missing(section, key))
}

fn require_url(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<String, TruefundedError> {
    let raw = require(config, section, key)?;
    let parsed = url::Url::parse(&raw)
        .map_err(|e| TruefundedError::config_invalid(section, key, e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(TruefundedError::config_invalid(
            section,
            key,
            format!("unsupported scheme {}", parsed.scheme()),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
