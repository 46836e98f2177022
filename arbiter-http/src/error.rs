//! Error types for the HTTP adapter

use crate::HttpResponse;
use arbiter_i18n::I18nError;
use serde_json::json;
use thiserror::Error;

/// Errors raised while turning a request or a failure into a response.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A violation message could not be resolved in any bundle
    #[error("Message not found: {key} (searched {})", .chain.join(" -> "))]
    MessageNotFound { key: String, chain: Vec<String> },

    /// Any other message rendering error
    #[error("Message rendering failed: {0}")]
    I18n(I18nError),

    /// The response body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The request body could not be read
    #[error("Bad Request: {0}")]
    BadRequest(String),
}

impl From<I18nError> for HttpError {
    fn from(err: I18nError) -> Self {
        match err {
            I18nError::MessageNotFound { key, chain } => HttpError::MessageNotFound { key, chain },
            other => HttpError::I18n(other),
        }
    }
}

impl HttpError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            HttpError::BadRequest(_) => 400,
            HttpError::MessageNotFound { .. } | HttpError::I18n(_) | HttpError::Serialization(_) => {
                500
            }
        }
    }

    /// Client errors are routine; server errors are worth a warning.
    pub fn log_level(&self) -> arbiter_log::Level {
        if self.status_code() >= 500 {
            arbiter_log::Level::Warn
        } else {
            arbiter_log::Level::Debug
        }
    }

    /// Render as a JSON error response.
    pub fn into_response(self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({ "error": self.to_string(), "status": status });

        match self.log_level() {
            arbiter_log::Level::Debug => {
                arbiter_log::debug!(target: "arbiter::http", "Responding {} to: {}", status, self)
            }
            _ => arbiter_log::warn!(target: "arbiter::http", "Responding {} to: {}", status, self),
        }

        HttpResponse::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(body.to_string().into_bytes())
    }
}

/// Errors raised while loading a [`ValidationConfig`](crate::ValidationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration value is malformed
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Unknown configuration file format
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
