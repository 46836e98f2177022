//! Constraints
//!
//! A [`Constraint`] names a rule and carries the parameters its message
//! template refers to. The built-in catalog lives in [`constraints`].

use crate::{ToValue, Value};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Prefix of the message keys of built-in constraints.
pub const BUILTIN_MESSAGE_PREFIX: &str = "arbiter.constraints";

/// A named validation rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    name: String,
    #[serde(skip)]
    message_key: String,
    #[serde(rename = "params")]
    message_params: BTreeMap<String, Value>,
}

impl Constraint {
    /// Custom constraint with the message key `<name>.message`.
    ///
    /// ```
    /// use arbiter_validation::Constraint;
    ///
    /// let constraint = Constraint::new("Adult").with_param("age", 18);
    /// assert_eq!(constraint.message_key(), "Adult.message");
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message_key: format!("{}.message", name),
            name,
            message_params: BTreeMap::new(),
        }
    }

    /// Built-in constraint with the key `arbiter.constraints.<name>.message`.
    pub(crate) fn builtin(name: &str) -> Self {
        Self {
            name: name.to_string(),
            message_key: builtin_message_key(name),
            message_params: BTreeMap::new(),
        }
    }

    /// Use a different message key.
    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = key.into();
        self
    }

    /// Add a message parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl ToValue) -> Self {
        self.message_params.insert(name.into(), value.to_value());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    pub fn message_params(&self) -> &BTreeMap<String, Value> {
        &self.message_params
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.message_params.get(name)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.message_params.is_empty() {
            f.write_str("(")?;
            for (i, (name, value)) in self.message_params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}={}", name, value)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Message key of a built-in constraint.
pub fn builtin_message_key(name: &str) -> String {
    format!("{}.{}.message", BUILTIN_MESSAGE_PREFIX, name)
}

/// Built-in constraints.
///
/// Each function builds the constraint recorded by the matching
/// [`Property`](crate::Property) method. They are public so custom
/// predicates can report a built-in constraint through
/// [`Property::validate`](crate::Property::validate).
pub mod constraints {
    use super::Constraint;
    use crate::{ToValue, Value};

    /// Names of every built-in constraint.
    pub const NAMES: &[&str] = &[
        "Null",
        "NotNull",
        "Equals",
        "NotEquals",
        "In",
        "NotIn",
        "Valid",
        "Empty",
        "NotEmpty",
        "Blank",
        "NotBlank",
        "Letters",
        "NotLetters",
        "Digits",
        "NotDigits",
        "LetterOrDigits",
        "NotLetterOrDigits",
        "UpperCase",
        "NotUpperCase",
        "LowerCase",
        "NotLowerCase",
        "Size",
        "Contains",
        "NotContain",
        "ContainsAll",
        "NotContainAll",
        "ContainsAny",
        "NotContainAny",
        "Matches",
        "NotMatch",
        "ContainsRegex",
        "NotContainRegex",
        "StartsWith",
        "NotStartWith",
        "EndsWith",
        "NotEndWith",
        "Email",
        "Website",
        "Zero",
        "NotZero",
        "One",
        "NotOne",
        "Positive",
        "Negative",
        "PositiveOrZero",
        "NegativeOrZero",
        "Less",
        "LessOrEqual",
        "Greater",
        "GreaterOrEqual",
        "Between",
        "NotBetween",
        "IntegerDigits",
        "DecimalDigits",
        "True",
        "False",
        "Today",
        "NotToday",
    ];

    macro_rules! simple {
        ($($fn_name:ident => $name:literal),* $(,)?) => {
            $(
                #[doc = concat!("`", $name, "`")]
                pub fn $fn_name() -> Constraint {
                    Constraint::builtin($name)
                }
            )*
        };
    }

    simple! {
        null => "Null",
        not_null => "NotNull",
        valid => "Valid",
        empty => "Empty",
        not_empty => "NotEmpty",
        blank => "Blank",
        not_blank => "NotBlank",
        letters => "Letters",
        not_letters => "NotLetters",
        digits => "Digits",
        not_digits => "NotDigits",
        letter_or_digits => "LetterOrDigits",
        not_letter_or_digits => "NotLetterOrDigits",
        upper_case => "UpperCase",
        not_upper_case => "NotUpperCase",
        lower_case => "LowerCase",
        not_lower_case => "NotLowerCase",
        email => "Email",
        website => "Website",
        zero => "Zero",
        not_zero => "NotZero",
        one => "One",
        not_one => "NotOne",
        positive => "Positive",
        negative => "Negative",
        positive_or_zero => "PositiveOrZero",
        negative_or_zero => "NegativeOrZero",
        is_true => "True",
        is_false => "False",
        today => "Today",
        not_today => "NotToday",
    }

    macro_rules! with_param {
        ($($fn_name:ident => $name:literal($param:ident)),* $(,)?) => {
            $(
                #[doc = concat!("`", $name, "{", stringify!($param), "}`")]
                pub fn $fn_name(value: impl ToValue) -> Constraint {
                    Constraint::builtin($name).with_param(stringify!($param), value)
                }
            )*
        };
    }

    with_param! {
        equals => "Equals"(value),
        not_equals => "NotEquals"(value),
        one_of => "In"(values),
        not_one_of => "NotIn"(values),
        contains => "Contains"(value),
        not_contain => "NotContain"(value),
        contains_all => "ContainsAll"(values),
        not_contain_all => "NotContainAll"(values),
        contains_any => "ContainsAny"(values),
        not_contain_any => "NotContainAny"(values),
        matches => "Matches"(regex),
        not_match => "NotMatch"(regex),
        contains_regex => "ContainsRegex"(regex),
        not_contain_regex => "NotContainRegex"(regex),
        starts_with => "StartsWith"(prefix),
        not_start_with => "NotStartWith"(prefix),
        ends_with => "EndsWith"(suffix),
        not_end_with => "NotEndWith"(suffix),
        less => "Less"(value),
        less_or_equal => "LessOrEqual"(value),
        greater => "Greater"(value),
        greater_or_equal => "GreaterOrEqual"(value),
    }

    /// Constraints whose bounds are optional.
    pub const BOUNDED: &[&str] = &["Size", "IntegerDigits", "DecimalDigits"];

    /// A half-open range uses `<Name>.min.message` or `<Name>.max.message`
    /// so its template only names the bound that is present.
    fn bounded(name: &str, min: Option<usize>, max: Option<usize>) -> Constraint {
        let mut constraint = match (min, max) {
            (Some(_), None) => {
                Constraint::builtin(name).with_message_key(bound_message_key(name, "min"))
            }
            (None, Some(_)) => {
                Constraint::builtin(name).with_message_key(bound_message_key(name, "max"))
            }
            _ => Constraint::builtin(name),
        };
        if let Some(min) = min {
            constraint = constraint.with_param("min", min);
        }
        if let Some(max) = max {
            constraint = constraint.with_param("max", max);
        }
        constraint
    }

    /// Message key of a bounded constraint with only its `bound` set.
    pub fn bound_message_key(name: &str, bound: &str) -> String {
        format!("{}.{}.{}.message", super::BUILTIN_MESSAGE_PREFIX, name, bound)
    }

    /// `Size{min,max}`, absent bounds omitted.
    pub fn size(min: Option<usize>, max: Option<usize>) -> Constraint {
        bounded("Size", min, max)
    }

    /// `IntegerDigits{min,max}`, absent bounds omitted.
    pub fn integer_digits(min: Option<usize>, max: Option<usize>) -> Constraint {
        bounded("IntegerDigits", min, max)
    }

    /// `DecimalDigits{min,max}`, absent bounds omitted.
    pub fn decimal_digits(min: Option<usize>, max: Option<usize>) -> Constraint {
        bounded("DecimalDigits", min, max)
    }

    pub fn between(start: impl ToValue, end: impl ToValue) -> Constraint {
        Constraint::builtin("Between")
            .with_param("start", start)
            .with_param("end", end)
    }

    pub fn not_between(start: impl ToValue, end: impl ToValue) -> Constraint {
        Constraint::builtin("NotBetween")
            .with_param("start", start)
            .with_param("end", end)
    }

    /// Collect parameter values into a [`Value::Collection`].
    pub(crate) fn collect<I>(values: I) -> Value
    where
        I: IntoIterator,
        I::Item: ToValue,
    {
        Value::Collection(values.into_iter().map(|v| v.to_value()).collect())
    }
}
