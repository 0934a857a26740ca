//! Domain error types.

/// Top-level error type for truefunded.
#[derive(Debug, thiserror::Error)]
pub enum TruefundedError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid amount {amount}: {reason}")]
    InvalidAmount { amount: f64, reason: String },

    #[error("payment provider error: {reason}")]
    Payment { reason: String },

    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("account bridge error: {reason}")]
    Bridge { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TruefundedError {
    pub fn config_missing(section: &str, key: &str) -> Self {
        Self::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }
    }

    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures of an external service rather than of local input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Payment { .. } | Self::Database { .. } | Self::Bridge { .. }
        )
    }
}

impl From<&TruefundedError> for std::process::ExitCode {
    fn from(err: &TruefundedError) -> Self {
        let code: u8 = match err {
            TruefundedError::Io(_) | TruefundedError::InvalidAmount { .. } => 1,
            TruefundedError::ConfigParse { .. }
            | TruefundedError::ConfigMissing { .. }
            | TruefundedError::ConfigInvalid { .. } => 2,
            TruefundedError::Payment { .. }
            | TruefundedError::Database { .. }
            | TruefundedError::Bridge { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
