// Validation failure to 422 response

use crate::{HttpError, HttpRequest, HttpResponse, UnprocessableEntity, ValidationConfig};
use arbiter_i18n::{Locale, negotiate_locale, parse_accept_language};
use arbiter_validation::{I18nContext, ValidationFailure, map_to_message};
use std::borrow::Cow;

/// Renders a [`ValidationFailure`] as a localized `422 Unprocessable Entity`.
///
/// ```
/// use arbiter_http::{ValidationConfig, ValidationExceptionHandler};
/// use arbiter_validation::prelude::*;
///
/// let age = 12u32;
/// let failure = validate(&age, |v| {
///     v.property("age", |a| a).is_greater_than_or_equal_to(18);
/// })
/// .unwrap_err();
///
/// let handler = ValidationExceptionHandler::new(ValidationConfig::default());
/// let response = handler.handle(&failure, Some("pt-BR,pt;q=0.9"))?;
///
/// assert_eq!(response.status, 422);
/// let body: serde_json::Value = response.json()?;
/// assert_eq!(body["errors"][0]["message"], "Deve ser maior ou igual a 18");
/// # Ok::<(), arbiter_http::HttpError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ValidationExceptionHandler {
    config: ValidationConfig,
    context: Cow<'static, I18nContext>,
}

impl ValidationExceptionHandler {
    /// Handler using the built-in messages and formatters.
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            context: Cow::Borrowed(I18nContext::builtin()),
        }
    }

    /// Use application resources and formatters.
    pub fn with_context(mut self, context: I18nContext) -> Self {
        self.context = Cow::Owned(context);
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn context(&self) -> &I18nContext {
        &self.context
    }

    /// Pick the response locale for an `Accept-Language` header.
    pub fn negotiate(&self, accept_language: Option<&str>) -> Locale {
        let requested = accept_language
            .map(parse_accept_language)
            .unwrap_or_default();
        let locale = negotiate_locale(
            &requested,
            &self.config.supported_locales,
            &self.config.default_locale,
        )
        .clone();

        arbiter_log::debug!(
            target: "arbiter::http",
            "Negotiated locale {} from Accept-Language {:?}",
            locale,
            accept_language
        );
        locale
    }

    /// Localized payload of `failure` in `locale`.
    pub fn payload(
        &self,
        failure: &ValidationFailure,
        locale: &Locale,
    ) -> Result<UnprocessableEntity, HttpError> {
        map_to_message(failure, &self.context, &self.config.bundle_base_name, locale)
            .collect::<Result<UnprocessableEntity, _>>()
            .map_err(HttpError::from)
    }

    /// Build the 422 response for `failure`.
    pub fn handle(
        &self,
        failure: &ValidationFailure,
        accept_language: Option<&str>,
    ) -> Result<HttpResponse, HttpError> {
        let locale = self.negotiate(accept_language);
        let payload = self.payload(failure, &locale).inspect_err(|e| {
            arbiter_log::error!(target: "arbiter::http", "Cannot render validation failure: {}", e);
        })?;

        let mut response = HttpResponse::unprocessable_entity();
        if !locale.is_root() {
            response = response.with_header("Content-Language", locale.tag());
        }
        response.with_json(&payload)
    }

    /// Like [`handle`](Self::handle), reading `Accept-Language` from `req`.
    pub fn handle_request(
        &self,
        failure: &ValidationFailure,
        req: &HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        self.handle(failure, req.accept_language())
    }

    /// Like [`handle_request`](Self::handle_request), turning handler errors
    /// into their own responses.
    pub fn respond(&self, failure: &ValidationFailure, req: &HttpRequest) -> HttpResponse {
        self.handle_request(failure, req)
            .unwrap_or_else(HttpError::into_response)
    }
}

impl Default for ValidationExceptionHandler {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_i18n::Resources;
    use arbiter_validation::prelude::*;

    fn failure() -> ValidationFailure {
        let name = String::new();
        validate(&name, |v| {
            v.property("name", |n| n).is_not_blank();
        })
        .unwrap_err()
    }

    #[test]
    fn test_negotiation() {
        let handler = ValidationExceptionHandler::default();

        assert_eq!(handler.negotiate(Some("pt-BR")), Locale::pt_br());
        assert_eq!(handler.negotiate(Some("pt-PT,pt;q=0.9")), Locale::pt_br());
        assert_eq!(handler.negotiate(Some("de-DE,en-US;q=0.5")), Locale::en());
        assert!(handler.negotiate(Some("de-DE")).is_root());
        assert!(handler.negotiate(None).is_root());
    }

    #[test]
    fn test_default_locale_from_config() {
        let handler =
            ValidationExceptionHandler::new(ValidationConfig::new().with_default_locale(Locale::pt_br()));
        let response = handler.handle(&failure(), Some("fr")).unwrap();

        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["errors"][0]["message"], "Não deve estar em branco");
        assert_eq!(response.header("Content-Language"), Some("pt-BR"));
    }

    #[test]
    fn test_handle_request_reads_header() {
        let handler = ValidationExceptionHandler::default();
        let req = HttpRequest::new("POST", "/users").with_header("accept-language", "en");

        let response = handler.handle_request(&failure(), &req).unwrap();
        assert_eq!(response.status, 422);
        assert_eq!(response.header("Content-Type"), Some("application/json"));

        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["errors"][0]["property"], "name");
        assert_eq!(body["errors"][0]["value"], "");
        assert_eq!(body["errors"][0]["message"], "Must not be blank");
        assert_eq!(body["errors"][0]["constraint"]["name"], "NotBlank");
        assert_eq!(body["errors"][0]["constraint"]["params"], serde_json::json!([]));
    }

    #[test]
    fn test_missing_message_is_500() {
        let value = 3;
        let failure = validate(&value, |v| {
            v.property("value", |n| n)
                .validate(Constraint::new("Unknown"), |_| false);
        })
        .unwrap_err();

        let handler = ValidationExceptionHandler::default()
            .with_context(I18nContext::with_resources(&Resources::new()));
        let err = handler.handle(&failure, Some("en")).unwrap_err();
        assert!(matches!(err, HttpError::MessageNotFound { ref key, .. } if key == "Unknown.message"));

        let req = HttpRequest::new("POST", "/");
        assert_eq!(handler.respond(&failure, &req).status, 500);
    }
}
