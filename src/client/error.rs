//! Error types for the FatSecret client.
//!
//! API-level failures arrive as an in-body `{"error": {"code", "message"}}`
//! envelope and are split into four categories by code. Transport, decoding
//! and OAuth handshake problems get their own variants.

use thiserror::Error;

/// A specialized `Result` type for FatSecret operations.
pub type Result<T> = std::result::Result<T, FatsecretError>;

#[derive(Error, Debug)]
pub enum FatsecretError {
    /// Codes 1, 10-12, 20-21 and anything the API documents no category for
    #[error("general error {code}: {message}")]
    General { code: i64, message: String },

    /// Codes 2-9: missing, invalid or expired OAuth credentials
    #[error("authentication error {code}: {message}")]
    Authentication { code: i64, message: String },

    /// Codes 101-108: a request parameter was missing or invalid
    #[error("parameter error {code}: {message}")]
    Parameter { code: i64, message: String },

    /// Codes 201-207: application or profile level errors
    #[error("application error {code}: {message}")]
    Application { code: i64, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The OAuth token dance did not produce a usable token
    #[error("OAuth error: {0}")]
    OAuth(String),

    /// The interactive login page did not look the way it should
    #[error("login form error: {0}")]
    LoginForm(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl FatsecretError {
    /// Build the error category matching a remote error code.
    pub fn from_code(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            2..=9 => FatsecretError::Authentication { code, message },
            101..=108 => FatsecretError::Parameter { code, message },
            201..=207 => FatsecretError::Application { code, message },
            _ => FatsecretError::General { code, message },
        }
    }

    /// The remote error code, if this error came from an error envelope.
    pub fn code(&self) -> Option<i64> {
        match self {
            FatsecretError::General { code, .. }
            | FatsecretError::Authentication { code, .. }
            | FatsecretError::Parameter { code, .. }
            | FatsecretError::Application { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` if the remote API rejected the call.
    pub fn is_api_error(&self) -> bool {
        self.code().is_some()
    }

    /// Returns `true` for authentication-related failures, remote or local.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            FatsecretError::Authentication { .. } | FatsecretError::OAuth(_)
        )
    }
}
