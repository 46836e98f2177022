// HTTP request and response types

use crate::HttpError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Header carrying the client's language preferences.
pub const ACCEPT_LANGUAGE: &str = "Accept-Language";

/// Minimal HTTP request wrapper
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The raw `Accept-Language` header, if any.
    pub fn accept_language(&self) -> Option<&str> {
        self.header(ACCEPT_LANGUAGE)
    }

    /// Parse the request body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| HttpError::BadRequest(format!("Invalid JSON: {}", e)))
    }
}

/// HTTP response wrapper
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn bad_request() -> Self {
        Self::new(400)
    }

    pub fn unprocessable_entity() -> Self {
        Self::new(422)
    }

    pub fn internal_server_error() -> Self {
        Self::new(500)
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self, HttpError> {
        self.body =
            serde_json::to_vec(value).map_err(|e| HttpError::Serialization(e.to_string()))?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Get a header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Parse the response body as JSON
    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Serialization(e.to_string()))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let req = HttpRequest::new("POST", "/users").with_header("accept-language", "pt-BR");
        assert_eq!(req.accept_language(), Some("pt-BR"));
        assert_eq!(req.header("ACCEPT-LANGUAGE"), Some("pt-BR"));
        assert_eq!(req.header("Content-Type"), None);
    }

    #[test]
    fn test_request_json() {
        let req = HttpRequest::new("POST", "/").with_body(r#"{"a": 1}"#);
        let value: serde_json::Value = req.json().unwrap();
        assert_eq!(value["a"], 1);

        let bad = HttpRequest::new("POST", "/").with_body("{");
        assert!(matches!(bad.json::<serde_json::Value>(), Err(HttpError::BadRequest(_))));
    }

    #[test]
    fn test_with_json_sets_content_type() {
        let response = HttpResponse::unprocessable_entity()
            .with_json(&serde_json::json!({"errors": []}))
            .unwrap();

        assert_eq!(response.status, 422);
        assert!(!response.is_success());
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.body, br#"{"errors":[]}"#);
    }
}
