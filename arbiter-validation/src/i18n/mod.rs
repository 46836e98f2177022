//! Localized violation messages
//!
//! A violation is rendered by resolving its constraint's message key in a
//! [`MessageBundle`], formatting each message parameter with the
//! [`Formatters`] registry and interpolating the result:
//!
//! ```
//! use arbiter_validation::prelude::*;
//! use arbiter_validation::i18n::{I18nContext, DEFAULT_BASE_NAME};
//! use arbiter_i18n::Locale;
//!
//! let age = 15u32;
//! let failure = validate(&age, |v| {
//!     v.property("age", |a| a).is_greater_than(17);
//! })
//! .unwrap_err();
//!
//! let messages = failure.messages(I18nContext::builtin(), DEFAULT_BASE_NAME, &Locale::pt_br())?;
//! assert_eq!(messages[0].message, "Deve ser maior que 17");
//! # Ok::<(), arbiter_i18n::I18nError>(())
//! ```

mod formatters;

pub use formatters::*;

use crate::{Constraint, ConstraintViolation, ValidationFailure, Value};
use arbiter_i18n::{I18nError, Locale, MessageBundle, Resources, interpolate};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Base name of the built-in message resources.
pub const DEFAULT_BASE_NAME: &str = "arbiter/messages";

static BUILTIN_RESOURCES: Lazy<Resources> = Lazy::new(|| {
    let bundles = [
        (Locale::root(), include_str!("../../resources/messages.json")),
        (Locale::en(), include_str!("../../resources/messages_en.json")),
        (Locale::pt_br(), include_str!("../../resources/messages_pt_BR.json")),
    ];

    let mut resources = Resources::new();
    for (locale, json) in bundles {
        resources
            .add_json(DEFAULT_BASE_NAME, &locale, json)
            .expect("built-in message resources are valid");
    }
    resources
});

static BUILTIN_CONTEXT: Lazy<I18nContext> =
    Lazy::new(|| I18nContext::new(builtin_resources().clone(), Formatters::new()));

/// Messages of the built-in constraints in the default, `en` and `pt_BR`
/// bundles of [`DEFAULT_BASE_NAME`].
pub fn builtin_resources() -> &'static Resources {
    &BUILTIN_RESOURCES
}

/// Resources and formatters used to render messages.
///
/// Built once and shared read-only.
#[derive(Debug, Clone)]
pub struct I18nContext {
    resources: Resources,
    formatters: Formatters,
}

impl I18nContext {
    pub fn new(resources: Resources, formatters: Formatters) -> Self {
        Self {
            resources,
            formatters,
        }
    }

    /// The built-in resources with the built-in formatters.
    pub fn builtin() -> &'static I18nContext {
        &BUILTIN_CONTEXT
    }

    /// The built-in resources extended with `resources`.
    pub fn with_resources(resources: &Resources) -> Self {
        let mut all = builtin_resources().clone();
        all.extend(resources);
        Self::new(all, Formatters::new())
    }

    /// Replace the formatter registry.
    pub fn with_formatters(mut self, formatters: Formatters) -> Self {
        self.formatters = formatters;
        self
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn formatters(&self) -> &Formatters {
        &self.formatters
    }

    /// Bundle for `base_name` and `locale`, falling back to the built-in
    /// messages.
    pub fn bundle(&self, base_name: &str, locale: &Locale) -> MessageBundle<'_> {
        MessageBundle::new(&self.resources, base_name, locale.clone()).with_fallback(DEFAULT_BASE_NAME)
    }

    /// Format a single value the way message parameters are formatted.
    pub fn format_value(&self, value: &Value, base_name: &str, locale: &Locale) -> String {
        self.formatters.format(value, &self.bundle(base_name, locale))
    }
}

/// A violation with its rendered message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedViolation {
    pub property: String,
    pub value: Value,
    pub message: String,
    pub constraint: Constraint,
}

/// Render one violation with `bundle`.
pub fn localize(
    violation: &ConstraintViolation,
    bundle: &MessageBundle<'_>,
    formatters: &Formatters,
) -> arbiter_i18n::Result<LocalizedViolation> {
    let template = bundle.get_message(violation.constraint.message_key())?;
    let params: HashMap<String, String> = violation
        .constraint
        .message_params()
        .iter()
        .map(|(name, value)| (name.clone(), formatters.format(value, bundle)))
        .collect();

    Ok(LocalizedViolation {
        property: violation.property.clone(),
        value: violation.value.clone(),
        message: interpolate(&template, &params),
        constraint: violation.constraint.clone(),
    })
}

/// Render `violations` in order.
///
/// Lazy: each violation is rendered when the iterator reaches it. A missing
/// template yields [`I18nError::MessageNotFound`] for that violation only.
pub fn map_to_message<'a, I>(
    violations: I,
    context: &'a I18nContext,
    base_name: &str,
    locale: &Locale,
) -> impl Iterator<Item = arbiter_i18n::Result<LocalizedViolation>> + use<'a, I>
where
    I: IntoIterator<Item = &'a ConstraintViolation>,
    I::IntoIter: 'a,
{
    let bundle = context.bundle(base_name, locale);
    let formatters = context.formatters();
    violations
        .into_iter()
        .map(move |violation| localize(violation, &bundle, formatters))
}

impl ConstraintViolation {
    /// Rendered message of this violation.
    pub fn message(
        &self,
        context: &I18nContext,
        base_name: &str,
        locale: &Locale,
    ) -> Result<String, I18nError> {
        localize(self, &context.bundle(base_name, locale), context.formatters()).map(|v| v.message)
    }
}

impl ValidationFailure {
    /// Render every violation, failing on the first missing template.
    pub fn messages(
        &self,
        context: &I18nContext,
        base_name: &str,
        locale: &Locale,
    ) -> Result<Vec<LocalizedViolation>, I18nError> {
        let messages = map_to_message(self, context, base_name, locale).collect::<Result<Vec<_>, _>>()?;
        arbiter_log::debug!(
            target: "arbiter::validation",
            "Rendered {} message(s) for locale {}",
            messages.len(),
            locale
        );
        Ok(messages)
    }
}
