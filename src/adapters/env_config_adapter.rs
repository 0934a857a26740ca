//! Process environment configuration adapter.
//!
//! The environment is snapshotted once when the adapter is built; nothing
//! reads `std::env` after startup.

use std::collections::HashMap;

use crate::ports::config_port::ConfigPort;

/// `(section, key)` to environment variable names, first match wins.
const ENV_KEYS: &[(&str, &str, &[&str])] = &[
    ("database", "url", &["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"]),
    (
        "database",
        "key",
        &["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"],
    ),
    ("payment", "secret_key", &["STRIPE_SECRET_KEY"]),
    ("payment", "api_base", &["STRIPE_API_BASE"]),
    ("site", "url", &["SITE_URL", "NEXT_PUBLIC_SITE_URL"]),
    ("server", "bind", &["BIND_ADDR"]),
    ("http", "timeout_secs", &["HTTP_TIMEOUT_SECS"]),
    ("log", "level", &["LOG_LEVEL"]),
    ("auth", "username", &["ADMIN_USERNAME"]),
    ("auth", "password_hash", &["ADMIN_PASSWORD_HASH"]),
    ("auth", "session_secret", &["SESSION_SECRET"]),
    ("auth", "session_lifetime", &["SESSION_LIFETIME"]),
    ("auth", "secure_cookies", &["SECURE_COOKIES"]),
];

pub struct EnvConfigAdapter {
    vars: HashMap<String, String>,
}

impl EnvConfigAdapter {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Environment variable names consulted for a config key.
    pub fn names_for(section: &str, key: &str) -> &'static [&'static str] {
        ENV_KEYS
            .iter()
            .find(|(s, k, _)| *s == section && *k == key)
            .map(|(_, _, names)| *names)
            .unwrap_or(&[])
    }
}

impl ConfigPort for EnvConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        Self::names_for(section, key)
            .iter()
            .find_map(|name| {
                self.vars
                    .get(*name)
                    .filter(|v| !v.trim().is_empty())
                    .cloned()
            })
    }
}

/// Environment values override the config file.
pub struct LayeredConfig {
    layers: Vec<Box<dyn ConfigPort + Send + Sync>>,
}

impl LayeredConfig {
    pub fn new(env: EnvConfigAdapter, file: Option<Box<dyn ConfigPort + Send + Sync>>) -> Self {
        let mut layers: Vec<Box<dyn ConfigPort + Send + Sync>> = vec![Box::new(env)];
        layers.extend(file);
        Self { layers }
    }
}

impl ConfigPort for LayeredConfig {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.layers
            .iter()
            .find_map(|layer| layer.get_string(section, key))
    }
}
