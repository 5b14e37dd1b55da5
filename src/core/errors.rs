//! Custom error types for DeepL API calls

use reqwest::StatusCode;
use thiserror::Error;

/// Status code DeepL uses to signal an exhausted character quota
pub const QUOTA_EXCEEDED_STATUS: u16 = 456;

/// DeepL client errors
#[derive(Error, Debug)]
pub enum DeepLError {
    /// Request could not be sent or its body could not be read
    #[error("deepl translate: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-2xx response from the API
    #[error("{}", status_text(*.code))]
    Status {
        code: u16,
    },

    /// Response body was not the expected JSON
    #[error("decode deepl response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The API answered successfully but without any translation
    #[error("deepl responded with no translations")]
    EmptyResponse,

    /// The caller's cancellation signal fired before the response arrived
    #[error("request cancelled")]
    Cancelled,

    /// The caller's deadline elapsed before the response arrived
    #[error("request timeout")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl DeepLError {
    /// HTTP status code, for [`DeepLError::Status`]
    pub fn status(&self) -> Option<u16> {
        match self {
            DeepLError::Status { code } => Some(*code),
            _ => None,
        }
    }

    /// Whether the character quota of the account is used up
    pub fn is_quota_exceeded(&self) -> bool {
        self.status() == Some(QUOTA_EXCEEDED_STATUS)
    }
}

fn status_text(code: u16) -> &'static str {
    if code == QUOTA_EXCEEDED_STATUS {
        return "Quota exceeded. The character limit has been reached.";
    }

    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("")
}

/// Result type for DeepL operations
pub type Result<T> = std::result::Result<T, DeepLError>;
