//! Error types for i18n operations

use thiserror::Error;

/// Errors that can occur while resolving or loading messages.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Invalid locale string
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// No bundle in the fallback chain defines the key
    #[error("Message not found: {key} (searched {})", .chain.join(" -> "))]
    MessageNotFound { key: String, chain: Vec<String> },

    /// Malformed resource file or resource name
    #[error("Failed to parse message resource: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl I18nError {
    /// The missing key, when this is a [`I18nError::MessageNotFound`].
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            I18nError::MessageNotFound { key, .. } => Some(key),
            _ => None,
        }
    }
}
