// Validation pipe for automatic request validation

use crate::{HttpRequest, HttpResponse, ValidationExceptionHandler};
use arbiter_validation::Validate;
use serde::de::DeserializeOwned;

/// Deserializes and validates request bodies.
pub struct ValidationPipe;

impl ValidationPipe {
    /// Parse the JSON body of `req` and validate it.
    ///
    /// Malformed JSON yields a 400 response; a validation failure yields the
    /// localized 422 response built by `handler`.
    pub fn parse<T>(req: &HttpRequest, handler: &ValidationExceptionHandler) -> Result<T, HttpResponse>
    where
        T: DeserializeOwned + Validate,
    {
        let parsed: T = req.json().map_err(|e| e.into_response())?;

        parsed
            .validate()
            .map_err(|failure| handler.respond(&failure, req))?;

        Ok(parsed)
    }
}

/// Validate a DTO in a handler returning `Result<_, HttpResponse>`.
///
/// ```
/// use arbiter_http::{HttpRequest, HttpResponse, ValidationExceptionHandler, validate_or_respond};
/// use arbiter_validation::prelude::*;
///
/// struct Login {
///     user: String,
/// }
///
/// impl Validate for Login {
///     fn rules(v: &mut Validator<'_, '_, Self>) {
///         v.property("user", |l| &l.user).is_not_blank();
///     }
/// }
///
/// fn login(req: &HttpRequest, handler: &ValidationExceptionHandler) -> Result<HttpResponse, HttpResponse> {
///     let dto = Login { user: String::new() };
///     validate_or_respond!(dto, handler, req);
///     Ok(HttpResponse::ok())
/// }
///
/// let handler = ValidationExceptionHandler::default();
/// let err = login(&HttpRequest::new("POST", "/login"), &handler).unwrap_err();
/// assert_eq!(err.status, 422);
/// ```
#[macro_export]
macro_rules! validate_or_respond {
    ($dto:expr, $handler:expr, $req:expr) => {{
        use $crate::__validation::Validate as _;
        $dto.validate()
            .map_err(|failure| $handler.respond(&failure, $req))?
    }};
}
