//! HTTP adapter for Arbiter validation
//!
//! Turns a [`ValidationFailure`](arbiter_validation::ValidationFailure) into a
//! `422 Unprocessable Entity` response whose messages are localized for the
//! client's `Accept-Language`.
//!
//! # Examples
//!
//! ```
//! use arbiter_http::prelude::*;
//! use arbiter_validation::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct CreateUser {
//!     email: String,
//!     age: u32,
//! }
//!
//! impl Validate for CreateUser {
//!     fn rules(v: &mut Validator<'_, '_, Self>) {
//!         v.property("email", |u| &u.email).is_email();
//!         v.property("age", |u| &u.age).is_between(18, 130);
//!     }
//! }
//!
//! let handler = ValidationExceptionHandler::new(ValidationConfig::default());
//! let req = HttpRequest::new("POST", "/users")
//!     .with_header("Accept-Language", "pt-BR")
//!     .with_body(r#"{"email": "nope", "age": 7}"#);
//!
//! let response = ValidationPipe::parse::<CreateUser>(&req, &handler).unwrap_err();
//! assert_eq!(response.status, 422);
//!
//! let body: serde_json::Value = response.json().unwrap();
//! assert_eq!(body["errors"][0]["message"], "Deve ser um e-mail válido");
//! assert_eq!(body["errors"][1]["message"], "Deve estar entre 18 e 130");
//! ```

mod config;
mod error;
mod handler;
mod http;
mod payload;
mod pipe;

pub use config::{FileFormat, ValidationConfig};
pub use error::{ConfigError, HttpError, Result};
pub use handler::ValidationExceptionHandler;
pub use http::{ACCEPT_LANGUAGE, HttpRequest, HttpResponse};
pub use payload::{UnprocessableEntity, ValidationConstraint, ValidationError, ValidationParam};
pub use pipe::ValidationPipe;

#[doc(hidden)]
pub use arbiter_validation as __validation;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        HttpError, HttpRequest, HttpResponse, UnprocessableEntity, ValidationConfig,
        ValidationExceptionHandler, ValidationPipe,
    };
}
