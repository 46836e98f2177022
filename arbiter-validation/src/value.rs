//! Property values
//!
//! Violations carry the offending value and constraints carry their
//! parameters as [`Value`], a closed set of categories that formatters know
//! how to render.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;

/// A validated value or a constraint parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    String(String),
    Number(Number),
    Temporal(Temporal),
    Collection(Vec<Value>),
    Enum(EnumValue),
    Custom(CustomValue),
}

/// Numeric values, kept in their widest lossless representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

/// Dates and times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

/// A variant of a user enum.
///
/// Formatted through the bundle key `<type_name>.<variant>`, falling back to
/// the variant name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub type_name: String,
    pub variant: String,
}

/// A value of a user-defined category, dispatched to the formatter
/// registered for `tag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomValue {
    pub tag: String,
    pub text: String,
}

/// Category of a [`Value`], the key of the formatter registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    String,
    Number,
    Temporal,
    Collection,
    Enum,
    Custom(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::Number(_) => ValueKind::Number,
            Value::Temporal(_) => ValueKind::Temporal,
            Value::Collection(_) => ValueKind::Collection,
            Value::Enum(_) => ValueKind::Enum,
            Value::Custom(custom) => ValueKind::Custom(custom.tag.clone()),
        }
    }

    /// Enum variant value.
    pub fn enumeration(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Value::Enum(EnumValue {
            type_name: type_name.into(),
            variant: variant.into(),
        })
    }

    /// Value of a custom category.
    pub fn custom(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Value::Custom(CustomValue {
            tag: tag.into(),
            text: text.into(),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Unsigned(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

impl fmt::Display for Temporal {
    /// ISO-8601
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Temporal::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Temporal::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Temporal::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

/// Plain text of a value, without any locale-specific formatting.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Temporal(t) => write!(f, "{}", t),
            Value::Collection(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Enum(e) => f.write_str(&e.variant),
            Value::Custom(c) => f.write_str(&c.text),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(Number::Integer(n)) => serializer.serialize_i64(*n),
            Value::Number(Number::Unsigned(n)) => serializer.serialize_u64(*n),
            Value::Number(Number::Float(n)) => serializer.serialize_f64(*n),
            Value::Temporal(t) => serializer.collect_str(t),
            Value::Collection(items) => serializer.collect_seq(items),
            Value::Enum(e) => serializer.serialize_str(&e.variant),
            Value::Custom(c) => serializer.serialize_str(&c.text),
        }
    }
}

/// Conversion into a [`Value`].
///
/// Implemented for strings, primitive numbers, `bool`, chrono types,
/// `Option`, slices, arrays, `Vec`, `VecDeque` and sets. Use
/// [`enum_value!`](crate::enum_value) for fieldless enums.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_to_value_number {
    ($variant:ident($repr:ty): $($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Number(Number::$variant(*self as $repr))
                }
            }
        )*
    };
}

impl_to_value_number!(Integer(i64): i8, i16, i32, i64, isize);
impl_to_value_number!(Unsigned(u64): u8, u16, u32, u64, usize);
impl_to_value_number!(Float(f64): f32, f64);

impl ToValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::Temporal(Temporal::Date(*self))
    }
}

impl ToValue for NaiveTime {
    fn to_value(&self) -> Value {
        Value::Temporal(Temporal::Time(*self))
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::Temporal(Temporal::DateTime(*self))
    }
}

impl<Tz: TimeZone> ToValue for DateTime<Tz> {
    fn to_value(&self) -> Value {
        Value::Temporal(Temporal::Zoned(self.fixed_offset()))
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Collection(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::Collection(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::Collection(self.iter().map(ToValue::to_value).collect())
    }
}

/// Elements appear in the set's iteration order.
impl<T: ToValue, S> ToValue for HashSet<T, S> {
    fn to_value(&self) -> Value {
        Value::Collection(self.iter().map(ToValue::to_value).collect())
    }
}

/// Implement [`ToValue`] for a fieldless enum.
///
/// Each listed variant of the fieldless enum becomes a [`Value::Enum`]
/// tagged with the type name.
///
/// ```
/// use arbiter_validation::{enum_value, ToValue, Value};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Status { Active, Inactive }
///
/// enum_value!(Status { Active, Inactive });
///
/// assert_eq!(Status::Active.to_value(), Value::enumeration("Status", "Active"));
/// ```
#[macro_export]
macro_rules! enum_value {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::ToValue for $ty {
            fn to_value(&self) -> $crate::Value {
                let variant = match self {
                    $($ty::$variant => stringify!($variant),)+
                };
                $crate::Value::enumeration(stringify!($ty), variant)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_conversions() {
        assert_eq!(42i32.to_value(), Value::Number(Number::Integer(42)));
        assert_eq!(42u8.to_value(), Value::Number(Number::Unsigned(42)));
        assert_eq!(1.5f32.to_value(), Value::Number(Number::Float(1.5)));
        assert_eq!("abc".to_value(), Value::String("abc".to_string()));
        assert_eq!(true.to_value(), Value::Bool(true));
        assert_eq!(None::<i32>.to_value(), Value::Null);
        assert_eq!(Some(3i64).to_value(), Value::Number(Number::Integer(3)));
    }

    #[test]
    fn test_collection_conversion() {
        let value = vec![1, 2, 3].to_value();
        assert_eq!(value.kind(), ValueKind::Collection);
        assert_eq!(value.to_string(), "[1, 2, 3]");
    }

    #[test]
    fn test_kind_of_custom_value() {
        let value = Value::custom("money", "USD 10");
        assert_eq!(value.kind(), ValueKind::Custom("money".to_string()));
    }

    #[test]
    fn test_temporal_display_is_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(date.to_value().to_string(), "2024-01-15");

        let dt = date.and_hms_opt(10, 30, 0).unwrap();
        assert_eq!(dt.to_value().to_string(), "2024-01-15T10:30:00");
    }

    #[test]
    fn test_serialize_to_json() {
        let value = Value::Collection(vec![
            Value::Null,
            Value::Bool(false),
            1u32.to_value(),
            "x".to_value(),
            Value::enumeration("Color", "Red"),
        ]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!([null, false, 1, "x", "Red"]));
    }

    #[derive(Clone, Copy)]
    enum Color {
        Red,
        Green,
    }

    crate::enum_value!(Color { Red, Green });

    #[test]
    fn test_enum_value_macro() {
        assert_eq!(Color::Red.to_value(), Value::enumeration("Color", "Red"));
        assert_eq!(Color::Green.to_value().kind(), ValueKind::Enum);
    }
}
