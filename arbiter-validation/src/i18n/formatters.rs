//! Formatter registry
//!
//! Message parameters are rendered by the formatter registered for their
//! [`ValueKind`]. The built-in registry covers every kind; custom kinds fall
//! back to the plain text of the value unless a formatter is registered.

use crate::{Number, Temporal, Value, ValueKind};
use arbiter_i18n::{MessageBundle, format_integer, format_number};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::Arc;

/// Bundle key of the separator between formatted collection elements.
pub const SEPARATOR_KEY: &str = "arbiter.formatters.ArrayFormatter.separator";
/// Bundle key of the chrono pattern for dates.
pub const DATE_PATTERN_KEY: &str = "arbiter.formatters.DateFormatter.pattern";
/// Bundle key of the chrono pattern for times.
pub const TIME_PATTERN_KEY: &str = "arbiter.formatters.TimeFormatter.pattern";
/// Bundle key of the chrono pattern for date-times.
pub const DATE_TIME_PATTERN_KEY: &str = "arbiter.formatters.DateTimeFormatter.pattern";
/// Bundle key of the chrono pattern for date-times with an offset.
pub const OFFSET_DATE_TIME_PATTERN_KEY: &str = "arbiter.formatters.OffsetDateTimeFormatter.pattern";

/// Renders a value as message text.
pub trait Formatter: Send + Sync {
    /// Format `value` for the locale of `bundle`. `formatters` renders
    /// nested values.
    fn format(&self, value: &Value, bundle: &MessageBundle<'_>, formatters: &Formatters) -> String;
}

/// A formatter backed by a closure, see [`from_fn`].
#[derive(Clone)]
pub struct FnFormatter<F>(F);

/// Wrap a closure as a [`Formatter`].
pub fn from_fn<F>(f: F) -> FnFormatter<F>
where
    F: Fn(&Value, &MessageBundle<'_>, &Formatters) -> String + Send + Sync,
{
    FnFormatter(f)
}

impl<F> Formatter for FnFormatter<F>
where
    F: Fn(&Value, &MessageBundle<'_>, &Formatters) -> String + Send + Sync,
{
    fn format(&self, value: &Value, bundle: &MessageBundle<'_>, formatters: &Formatters) -> String {
        (self.0)(value, bundle, formatters)
    }
}

/// Plain text of the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayFormatter;

impl Formatter for DisplayFormatter {
    fn format(&self, value: &Value, _bundle: &MessageBundle<'_>, _formatters: &Formatters) -> String {
        value.to_string()
    }
}

/// Numbers with the decimal and grouping separators of the bundle locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberFormatter;

impl Formatter for NumberFormatter {
    fn format(&self, value: &Value, bundle: &MessageBundle<'_>, _formatters: &Formatters) -> String {
        let locale = bundle.locale();
        match value {
            Value::Number(Number::Integer(n)) => format_integer(i128::from(*n), locale),
            Value::Number(Number::Unsigned(n)) => format_integer(i128::from(*n), locale),
            Value::Number(Number::Float(n)) => format_number(*n, locale),
            other => other.to_string(),
        }
    }
}

/// Dates and times using the chrono pattern of the bundle.
///
/// Falls back to ISO-8601 when the bundle has no pattern or the pattern is
/// invalid.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalFormatter;

fn write_pattern(item: impl fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", item).ok()?;
    Some(out)
}

impl Formatter for TemporalFormatter {
    fn format(&self, value: &Value, bundle: &MessageBundle<'_>, _formatters: &Formatters) -> String {
        let Value::Temporal(temporal) = value else {
            return value.to_string();
        };

        let rendered = match temporal {
            Temporal::Date(d) => bundle
                .find(DATE_PATTERN_KEY)
                .and_then(|p| write_pattern(d.format(p))),
            Temporal::Time(t) => bundle
                .find(TIME_PATTERN_KEY)
                .and_then(|p| write_pattern(t.format(p))),
            Temporal::DateTime(dt) => bundle
                .find(DATE_TIME_PATTERN_KEY)
                .and_then(|p| write_pattern(dt.format(p))),
            Temporal::Zoned(dt) => bundle
                .find(OFFSET_DATE_TIME_PATTERN_KEY)
                .and_then(|p| write_pattern(dt.format(p))),
        };

        rendered.unwrap_or_else(|| temporal.to_string())
    }
}

/// Elements formatted by their own formatters, joined with the localized
/// separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionFormatter;

impl Formatter for CollectionFormatter {
    fn format(&self, value: &Value, bundle: &MessageBundle<'_>, formatters: &Formatters) -> String {
        let Value::Collection(items) = value else {
            return value.to_string();
        };

        let separator = bundle.get_message_or(SEPARATOR_KEY, ", ");
        items
            .iter()
            .map(|item| formatters.format(item, bundle))
            .collect::<Vec<_>>()
            .join(&separator)
    }
}

/// Enum variants through the bundle key `<type_name>.<variant>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumFormatter;

impl Formatter for EnumFormatter {
    fn format(&self, value: &Value, bundle: &MessageBundle<'_>, _formatters: &Formatters) -> String {
        match value {
            Value::Enum(e) => {
                bundle.get_message_or(&format!("{}.{}", e.type_name, e.variant), &e.variant)
            }
            other => other.to_string(),
        }
    }
}

static BUILTIN: Lazy<Formatters> = Lazy::new(Formatters::new);

/// Formatters keyed by [`ValueKind`].
///
/// Build a registry once, then share it read-only:
///
/// ```
/// use arbiter_validation::{from_fn, Formatters, Value, ValueKind};
/// use arbiter_i18n::{Locale, MessageBundle, Resources};
///
/// let formatters = Formatters::new().register(
///     ValueKind::Custom("money".into()),
///     from_fn(|value, _, _| format!("$ {}", value)),
/// );
///
/// let resources = Resources::new();
/// let bundle = MessageBundle::new(&resources, "messages", Locale::en());
/// assert_eq!(formatters.format(&Value::custom("money", "10"), &bundle), "$ 10");
/// ```
#[derive(Clone)]
pub struct Formatters {
    table: HashMap<ValueKind, Arc<dyn Formatter>>,
    other: Arc<dyn Formatter>,
}

impl Formatters {
    /// A registry with the built-in formatters.
    pub fn new() -> Self {
        let mut table: HashMap<ValueKind, Arc<dyn Formatter>> = HashMap::new();
        table.insert(ValueKind::Null, Arc::new(DisplayFormatter));
        table.insert(ValueKind::Bool, Arc::new(DisplayFormatter));
        table.insert(ValueKind::String, Arc::new(DisplayFormatter));
        table.insert(ValueKind::Number, Arc::new(NumberFormatter));
        table.insert(ValueKind::Temporal, Arc::new(TemporalFormatter));
        table.insert(ValueKind::Collection, Arc::new(CollectionFormatter));
        table.insert(ValueKind::Enum, Arc::new(EnumFormatter));

        Self {
            table,
            other: Arc::new(DisplayFormatter),
        }
    }

    /// The process-wide built-in registry.
    pub fn builtin() -> &'static Formatters {
        &BUILTIN
    }

    /// Register `formatter` for `kind`, replacing any previous one.
    pub fn register(mut self, kind: ValueKind, formatter: impl Formatter + 'static) -> Self {
        self.table.insert(kind, Arc::new(formatter));
        self
    }

    /// Replace the formatter used for kinds without a registration.
    pub fn with_fallback(mut self, formatter: impl Formatter + 'static) -> Self {
        self.other = Arc::new(formatter);
        self
    }

    /// Formatter for `kind`, or the fallback formatter.
    pub fn resolve(&self, kind: &ValueKind) -> &dyn Formatter {
        &**self.table.get(kind).unwrap_or(&self.other)
    }

    /// Format `value` with the formatter of its kind.
    pub fn format(&self, value: &Value, bundle: &MessageBundle<'_>) -> String {
        self.resolve(&value.kind()).format(value, bundle, self)
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Formatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formatters")
            .field("kinds", &self.table.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToValue;
    use arbiter_i18n::{Catalog, Locale, Resources};
    use chrono::NaiveDate;

    fn resources() -> Resources {
        Resources::new()
            .with(
                "fmt",
                &Locale::root(),
                Catalog::new()
                    .with(SEPARATOR_KEY, ", ")
                    .with(DATE_PATTERN_KEY, "%Y-%m-%d")
                    .with("Color.Red", "red"),
            )
            .with(
                "fmt",
                &Locale::pt_br(),
                Catalog::new()
                    .with(SEPARATOR_KEY, " e ")
                    .with(DATE_PATTERN_KEY, "%d/%m/%Y")
                    .with("Color.Red", "vermelho"),
            )
    }

    #[test]
    fn test_collection_separator_is_localized() {
        let resources = resources();
        let value = vec![1, 2, 3].to_value();
        let formatters = Formatters::builtin();

        let root = MessageBundle::new(&resources, "fmt", Locale::root());
        let pt = MessageBundle::new(&resources, "fmt", Locale::pt_br());
        assert_eq!(formatters.format(&value, &root), "1, 2, 3");
        assert_eq!(formatters.format(&value, &pt), "1 e 2 e 3");
    }

    #[test]
    fn test_numbers_use_locale_separators() {
        let resources = resources();
        let pt = MessageBundle::new(&resources, "fmt", Locale::pt_br());
        let en = MessageBundle::new(&resources, "fmt", Locale::en());

        assert_eq!(Formatters::builtin().format(&1234.5.to_value(), &pt), "1.234,5");
        assert_eq!(Formatters::builtin().format(&1234.5.to_value(), &en), "1,234.5");
        assert_eq!(Formatters::builtin().format(&10_000u32.to_value(), &pt), "10.000");
    }

    #[test]
    fn test_nested_collections() {
        let resources = resources();
        let pt = MessageBundle::new(&resources, "fmt", Locale::pt_br());
        let value = Value::Collection(vec![vec![1.5].to_value(), "x".to_value()]);
        assert_eq!(Formatters::builtin().format(&value, &pt), "1,5 e x");
    }

    #[test]
    fn test_dates_use_bundle_pattern() {
        let resources = resources();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().to_value();

        let pt = MessageBundle::new(&resources, "fmt", Locale::pt_br());
        let root = MessageBundle::new(&resources, "fmt", Locale::root());
        assert_eq!(Formatters::builtin().format(&date, &pt), "09/03/2024");
        assert_eq!(Formatters::builtin().format(&date, &root), "2024-03-09");
    }

    #[test]
    fn test_missing_pattern_uses_iso() {
        let resources = Resources::new();
        let bundle = MessageBundle::new(&resources, "fmt", Locale::en());
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().to_value();
        assert_eq!(Formatters::builtin().format(&date, &bundle), "2024-03-09");
    }

    #[test]
    fn test_enum_labels() {
        let resources = resources();
        let pt = MessageBundle::new(&resources, "fmt", Locale::pt_br());
        let red = Value::enumeration("Color", "Red");
        let blue = Value::enumeration("Color", "Blue");
        assert_eq!(Formatters::builtin().format(&red, &pt), "vermelho");
        assert_eq!(Formatters::builtin().format(&blue, &pt), "Blue");
    }

    #[test]
    fn test_unregistered_custom_kind_uses_fallback() {
        let resources = Resources::new();
        let bundle = MessageBundle::new(&resources, "fmt", Locale::en());
        let value = Value::custom("money", "USD 10");

        assert_eq!(Formatters::builtin().format(&value, &bundle), "USD 10");

        let formatters = Formatters::new().with_fallback(from_fn(|_, _, _| "?".to_string()));
        assert_eq!(formatters.format(&value, &bundle), "?");
    }

    #[test]
    fn test_register_overrides_builtin() {
        let resources = Resources::new();
        let bundle = MessageBundle::new(&resources, "fmt", Locale::en());
        let formatters = Formatters::new().register(
            ValueKind::Bool,
            from_fn(|value, _, _| match value {
                Value::Bool(true) => "yes".to_string(),
                _ => "no".to_string(),
            }),
        );

        assert_eq!(formatters.format(&true.to_value(), &bundle), "yes");
        assert_eq!(Formatters::builtin().format(&true.to_value(), &bundle), "true");
    }
}
