//! Declarative object validation for Arbiter
//!
//! Describe constraints on the properties of an object graph, collect every
//! violation in one pass and render them as localized messages.
//!
//! # Examples
//!
//! ## Basic Validation
//!
//! ```
//! use arbiter_validation::prelude::*;
//!
//! struct UserInput {
//!     name: String,
//!     email: String,
//!     age: u32,
//! }
//!
//! impl Validate for UserInput {
//!     fn rules(v: &mut Validator<'_, '_, Self>) {
//!         v.property("name", |u| &u.name).is_not_blank().has_size(Some(3), None);
//!         v.property("email", |u| &u.email).is_email();
//!         v.property("age", |u| &u.age).is_between(18, 130);
//!     }
//! }
//!
//! let input = UserInput {
//!     name: "John".to_string(),
//!     email: "john@example.com".to_string(),
//!     age: 30,
//! };
//! assert!(input.validate().is_ok());
//! ```
//!
//! ## Nested Objects and Collections
//!
//! ```
//! use arbiter_validation::prelude::*;
//!
//! struct Dependent {
//!     name: String,
//! }
//!
//! struct Employee {
//!     roles: Vec<String>,
//!     dependents: Vec<Dependent>,
//! }
//!
//! let employee = Employee {
//!     roles: vec!["admin".into()],
//!     dependents: vec![Dependent { name: "Ana".into() }, Dependent { name: "".into() }],
//! };
//!
//! let failure = validate(&employee, |v| {
//!     v.property("roles", |e| &e.roles).is_not_empty().contains("admin");
//!     v.each("dependents", |e| &e.dependents, |v| {
//!         v.property("name", |d| &d.name).is_not_blank();
//!     });
//! })
//! .unwrap_err();
//!
//! assert_eq!(failure.properties(), vec!["dependents[1].name"]);
//! ```
//!
//! ## Localized Messages
//!
//! ```
//! use arbiter_validation::prelude::*;
//! use arbiter_i18n::Locale;
//!
//! let email = "not-an-email".to_string();
//! let failure = validate(&email, |v| {
//!     v.property("email", |e| e).is_email();
//! })
//! .unwrap_err();
//!
//! let messages = failure.messages(I18nContext::builtin(), DEFAULT_BASE_NAME, &Locale::pt_br())?;
//! assert_eq!(messages[0].message, "Deve ser um e-mail válido");
//! # Ok::<(), arbiter_i18n::I18nError>(())
//! ```

mod constraint;
mod errors;
pub mod i18n;
mod validator;
pub mod validators;
mod value;

pub use constraint::{BUILTIN_MESSAGE_PREFIX, Constraint, builtin_message_key, constraints};
pub use errors::*;
pub use i18n::{
    DEFAULT_BASE_NAME, Formatter, Formatters, I18nContext, LocalizedViolation, builtin_resources,
    from_fn, map_to_message,
};
pub use validator::{Property, Validate, Validator, validate};
pub use validators::{
    BooleanConstraints, Collection, CollectionConstraints, DateLike, Numeric, NumericConstraints,
    StringConstraints, TemporalConstraints,
};
pub use value::{CustomValue, EnumValue, Number, Temporal, ToValue, Value, ValueKind};

/// Prelude for common imports
pub mod prelude {
    pub use crate::validators::{
        BooleanConstraints, CollectionConstraints, NumericConstraints, StringConstraints,
        TemporalConstraints,
    };
    pub use crate::{
        Constraint, ConstraintViolation, DEFAULT_BASE_NAME, I18nContext, LocalizedViolation,
        Property, ToValue, Validate, ValidationFailure, Validator, Value, validate,
    };
}
