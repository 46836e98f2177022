// Built-in validators

use crate::{Property, ToValue, constraints};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet, VecDeque};

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static WEBSITE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}(?::\d{1,5})?(?:[/?#]\S*)?$").unwrap()
});

/// `regex` anchored at both ends, or `None` when the anchored pattern
/// cannot be built.
fn anchored(regex: &Regex) -> Option<Regex> {
    match Regex::new(&format!("^(?:{})$", regex.as_str())) {
        Ok(anchored) => Some(anchored),
        Err(e) => {
            arbiter_log::warn!(
                target: "arbiter::validation",
                "Cannot anchor pattern {}: {}; matching on the leftmost match instead",
                regex.as_str(),
                e
            );
            None
        }
    }
}

/// Whether `regex` matches the whole of `text`.
fn full_match(regex: &Regex, anchored: Option<&Regex>, text: &str) -> bool {
    match anchored {
        Some(anchored) => anchored.is_match(text),
        None => regex
            .find(text)
            .is_some_and(|m| m.start() == 0 && m.end() == text.len()),
    }
}

fn in_bounds(n: usize, min: Option<usize>, max: Option<usize>) -> bool {
    min.is_none_or(|min| n >= min) && max.is_none_or(|max| n <= max)
}

// String validators

/// Constraints on string properties.
pub trait StringConstraints: Sized {
    fn is_empty(self) -> Self;
    fn is_not_empty(self) -> Self;
    /// Only whitespace, or empty.
    fn is_blank(self) -> Self;
    fn is_not_blank(self) -> Self;
    fn is_letter(self) -> Self;
    fn is_not_letter(self) -> Self;
    fn is_digit(self) -> Self;
    fn is_not_digit(self) -> Self;
    fn is_letter_or_digit(self) -> Self;
    fn is_not_letter_or_digit(self) -> Self;
    fn is_upper_case(self) -> Self;
    fn is_not_upper_case(self) -> Self;
    fn is_lower_case(self) -> Self;
    fn is_not_lower_case(self) -> Self;
    /// Length in characters within the inclusive bounds.
    fn has_size(self, min: Option<usize>, max: Option<usize>) -> Self;
    fn is_equal_to_ignoring_case(self, expected: &str) -> Self;
    fn is_not_equal_to_ignoring_case(self, expected: &str) -> Self;
    fn contains(self, value: &str) -> Self;
    fn contains_ignoring_case(self, value: &str) -> Self;
    fn not_contain(self, value: &str) -> Self;
    fn contains_all<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + ToValue;
    fn contains_any<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + ToValue;
    fn not_contain_all<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + ToValue;
    fn not_contain_any<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + ToValue;
    /// The whole value matches `regex`.
    fn matches(self, regex: &Regex) -> Self;
    fn not_match(self, regex: &Regex) -> Self;
    /// Some part of the value matches `regex`.
    fn contains_regex(self, regex: &Regex) -> Self;
    fn not_contain_regex(self, regex: &Regex) -> Self;
    fn starts_with(self, prefix: &str) -> Self;
    fn not_start_with(self, prefix: &str) -> Self;
    fn ends_with(self, suffix: &str) -> Self;
    fn not_end_with(self, suffix: &str) -> Self;
    fn is_email(self) -> Self;
    fn is_website(self) -> Self;
}

impl<'v, 'a, P> StringConstraints for Property<'v, 'a, P>
where
    P: AsRef<str> + ToValue + ?Sized,
{
    fn is_empty(self) -> Self {
        self.check(constraints::empty(), |v| v.as_ref().is_empty())
    }

    fn is_not_empty(self) -> Self {
        self.check(constraints::not_empty(), |v| !v.as_ref().is_empty())
    }

    fn is_blank(self) -> Self {
        self.check(constraints::blank(), |v| v.as_ref().trim().is_empty())
    }

    fn is_not_blank(self) -> Self {
        self.check(constraints::not_blank(), |v| !v.as_ref().trim().is_empty())
    }

    fn is_letter(self) -> Self {
        self.check(constraints::letters(), |v| {
            v.as_ref().chars().all(char::is_alphabetic)
        })
    }

    fn is_not_letter(self) -> Self {
        self.check(constraints::not_letters(), |v| {
            !v.as_ref().chars().all(char::is_alphabetic)
        })
    }

    fn is_digit(self) -> Self {
        self.check(constraints::digits(), |v| v.as_ref().chars().all(char::is_numeric))
    }

    fn is_not_digit(self) -> Self {
        self.check(constraints::not_digits(), |v| {
            !v.as_ref().chars().all(char::is_numeric)
        })
    }

    fn is_letter_or_digit(self) -> Self {
        self.check(constraints::letter_or_digits(), |v| {
            v.as_ref().chars().all(char::is_alphanumeric)
        })
    }

    fn is_not_letter_or_digit(self) -> Self {
        self.check(constraints::not_letter_or_digits(), |v| {
            !v.as_ref().chars().all(char::is_alphanumeric)
        })
    }

    fn is_upper_case(self) -> Self {
        self.check(constraints::upper_case(), |v| {
            let s = v.as_ref();
            s == s.to_uppercase()
        })
    }

    fn is_not_upper_case(self) -> Self {
        self.check(constraints::not_upper_case(), |v| {
            let s = v.as_ref();
            s != s.to_uppercase()
        })
    }

    fn is_lower_case(self) -> Self {
        self.check(constraints::lower_case(), |v| {
            let s = v.as_ref();
            s == s.to_lowercase()
        })
    }

    fn is_not_lower_case(self) -> Self {
        self.check(constraints::not_lower_case(), |v| {
            let s = v.as_ref();
            s != s.to_lowercase()
        })
    }

    fn has_size(self, min: Option<usize>, max: Option<usize>) -> Self {
        self.check(constraints::size(min, max), |v| {
            in_bounds(v.as_ref().chars().count(), min, max)
        })
    }

    fn is_equal_to_ignoring_case(self, expected: &str) -> Self {
        self.check(constraints::equals(expected), |v| {
            v.as_ref().to_lowercase() == expected.to_lowercase()
        })
    }

    fn is_not_equal_to_ignoring_case(self, expected: &str) -> Self {
        self.check(constraints::not_equals(expected), |v| {
            v.as_ref().to_lowercase() != expected.to_lowercase()
        })
    }

    fn contains(self, value: &str) -> Self {
        self.check(constraints::contains(value), |v| v.as_ref().contains(value))
    }

    fn contains_ignoring_case(self, value: &str) -> Self {
        self.check(constraints::contains(value), |v| {
            v.as_ref().to_lowercase().contains(&value.to_lowercase())
        })
    }

    fn not_contain(self, value: &str) -> Self {
        self.check(constraints::not_contain(value), |v| !v.as_ref().contains(value))
    }

    fn contains_all<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + ToValue,
    {
        let values: Vec<S> = values.into_iter().collect();
        let constraint = constraints::contains_all(constraints::collect(&values));
        self.check(constraint, |v| {
            values.iter().all(|s| v.as_ref().contains(s.as_ref()))
        })
    }

    fn contains_any<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + ToValue,
    {
        let values: Vec<S> = values.into_iter().collect();
        let constraint = constraints::contains_any(constraints::collect(&values));
        self.check(constraint, |v| {
            values.iter().any(|s| v.as_ref().contains(s.as_ref()))
        })
    }

    fn not_contain_all<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + ToValue,
    {
        let values: Vec<S> = values.into_iter().collect();
        let constraint = constraints::not_contain_all(constraints::collect(&values));
        self.check(constraint, |v| {
            !values.iter().all(|s| v.as_ref().contains(s.as_ref()))
        })
    }

    fn not_contain_any<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + ToValue,
    {
        let values: Vec<S> = values.into_iter().collect();
        let constraint = constraints::not_contain_any(constraints::collect(&values));
        self.check(constraint, |v| {
            !values.iter().any(|s| v.as_ref().contains(s.as_ref()))
        })
    }

    fn matches(self, regex: &Regex) -> Self {
        let anchored = anchored(regex);
        self.check(constraints::matches(regex.as_str()), |v| {
            full_match(regex, anchored.as_ref(), v.as_ref())
        })
    }

    fn not_match(self, regex: &Regex) -> Self {
        let anchored = anchored(regex);
        self.check(constraints::not_match(regex.as_str()), |v| {
            !full_match(regex, anchored.as_ref(), v.as_ref())
        })
    }

    fn contains_regex(self, regex: &Regex) -> Self {
        self.check(constraints::contains_regex(regex.as_str()), |v| {
            regex.is_match(v.as_ref())
        })
    }

    fn not_contain_regex(self, regex: &Regex) -> Self {
        self.check(constraints::not_contain_regex(regex.as_str()), |v| {
            !regex.is_match(v.as_ref())
        })
    }

    fn starts_with(self, prefix: &str) -> Self {
        self.check(constraints::starts_with(prefix), |v| v.as_ref().starts_with(prefix))
    }

    fn not_start_with(self, prefix: &str) -> Self {
        self.check(constraints::not_start_with(prefix), |v| {
            !v.as_ref().starts_with(prefix)
        })
    }

    fn ends_with(self, suffix: &str) -> Self {
        self.check(constraints::ends_with(suffix), |v| v.as_ref().ends_with(suffix))
    }

    fn not_end_with(self, suffix: &str) -> Self {
        self.check(constraints::not_end_with(suffix), |v| !v.as_ref().ends_with(suffix))
    }

    fn is_email(self) -> Self {
        self.check(constraints::email(), |v| EMAIL_REGEX.is_match(v.as_ref()))
    }

    fn is_website(self) -> Self {
        self.check(constraints::website(), |v| WEBSITE_REGEX.is_match(v.as_ref()))
    }
}

// Number validators

/// Primitive numbers.
pub trait Numeric: Copy + PartialOrd + ToValue {
    const ZERO: Self;
    const ONE: Self;

    /// Digits before the decimal point; zero has one.
    fn integer_digits(self) -> usize;

    /// Digits after the decimal point in the shortest exact representation.
    fn decimal_digits(self) -> usize;
}

macro_rules! impl_numeric_integer {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;

                fn integer_digits(self) -> usize {
                    (self as i128).unsigned_abs().to_string().len()
                }

                fn decimal_digits(self) -> usize {
                    0
                }
            }
        )*
    };
}

impl_numeric_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_numeric_float {
    ($($ty:ty),*) => {
        $(
            impl Numeric for $ty {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;

                fn integer_digits(self) -> usize {
                    if !self.is_finite() {
                        return 0;
                    }
                    let text = self.abs().to_string();
                    text.split('.').next().map_or(0, str::len)
                }

                fn decimal_digits(self) -> usize {
                    if !self.is_finite() {
                        return 0;
                    }
                    let text = self.abs().to_string();
                    text.split_once('.').map_or(0, |(_, fraction)| fraction.len())
                }
            }
        )*
    };
}

impl_numeric_float!(f32, f64);

/// Constraints on numeric properties.
pub trait NumericConstraints: Sized {
    fn is_zero(self) -> Self;
    fn is_not_zero(self) -> Self;
    fn is_one(self) -> Self;
    fn is_not_one(self) -> Self;
    fn is_positive(self) -> Self;
    fn is_negative(self) -> Self;
    fn is_positive_or_zero(self) -> Self;
    fn is_negative_or_zero(self) -> Self;
    fn has_integer_digits(self, min: Option<usize>, max: Option<usize>) -> Self;
    fn has_decimal_digits(self, min: Option<usize>, max: Option<usize>) -> Self;
}

impl<'v, 'a, P: Numeric> NumericConstraints for Property<'v, 'a, P> {
    fn is_zero(self) -> Self {
        self.check(constraints::zero(), |v| *v == P::ZERO)
    }

    fn is_not_zero(self) -> Self {
        self.check(constraints::not_zero(), |v| *v != P::ZERO)
    }

    fn is_one(self) -> Self {
        self.check(constraints::one(), |v| *v == P::ONE)
    }

    fn is_not_one(self) -> Self {
        self.check(constraints::not_one(), |v| *v != P::ONE)
    }

    fn is_positive(self) -> Self {
        self.check(constraints::positive(), |v| *v > P::ZERO)
    }

    fn is_negative(self) -> Self {
        self.check(constraints::negative(), |v| *v < P::ZERO)
    }

    fn is_positive_or_zero(self) -> Self {
        self.check(constraints::positive_or_zero(), |v| *v >= P::ZERO)
    }

    fn is_negative_or_zero(self) -> Self {
        self.check(constraints::negative_or_zero(), |v| *v <= P::ZERO)
    }

    fn has_integer_digits(self, min: Option<usize>, max: Option<usize>) -> Self {
        self.check(constraints::integer_digits(min, max), |v| {
            in_bounds(v.integer_digits(), min, max)
        })
    }

    fn has_decimal_digits(self, min: Option<usize>, max: Option<usize>) -> Self {
        self.check(constraints::decimal_digits(min, max), |v| {
            in_bounds(v.decimal_digits(), min, max)
        })
    }
}

// Boolean validators

/// Constraints on `bool` properties.
pub trait BooleanConstraints: Sized {
    fn is_true(self) -> Self;
    fn is_false(self) -> Self;
}

impl<'v, 'a> BooleanConstraints for Property<'v, 'a, bool> {
    fn is_true(self) -> Self {
        self.check(constraints::is_true(), |v| *v)
    }

    fn is_false(self) -> Self {
        self.check(constraints::is_false(), |v| !*v)
    }
}

// Temporal validators

/// Values with a calendar date in the local time zone.
pub trait DateLike {
    fn local_date(&self) -> NaiveDate;
}

impl DateLike for NaiveDate {
    fn local_date(&self) -> NaiveDate {
        *self
    }
}

impl DateLike for NaiveDateTime {
    fn local_date(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> DateLike for DateTime<Tz> {
    fn local_date(&self) -> NaiveDate {
        self.with_timezone(&Local).date_naive()
    }
}

/// Constraints on dates.
pub trait TemporalConstraints: Sized {
    /// The date is the current local date.
    fn is_today(self) -> Self;
    fn is_not_today(self) -> Self;
}

impl<'v, 'a, P> TemporalConstraints for Property<'v, 'a, P>
where
    P: DateLike + ToValue,
{
    fn is_today(self) -> Self {
        let today = Local::now().date_naive();
        self.check(constraints::today(), |v| v.local_date() == today)
    }

    fn is_not_today(self) -> Self {
        let today = Local::now().date_naive();
        self.check(constraints::not_today(), |v| v.local_date() != today)
    }
}

// Collection validators

/// Sized, iterable containers.
pub trait Collection {
    type Item;

    fn size(&self) -> usize;

    fn items(&self) -> impl Iterator<Item = &Self::Item>;
}

impl<T> Collection for [T] {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T, const N: usize> Collection for [T; N] {
    type Item = T;

    fn size(&self) -> usize {
        N
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> Collection for Vec<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> Collection for VecDeque<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> Collection for BTreeSet<T> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T, S> Collection for HashSet<T, S> {
    type Item = T;

    fn size(&self) -> usize {
        self.len()
    }

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

/// Constraints on collection properties.
pub trait CollectionConstraints<T>: Sized {
    fn is_empty(self) -> Self;
    fn is_not_empty(self) -> Self;
    /// Number of elements within the inclusive bounds.
    fn has_size(self, min: Option<usize>, max: Option<usize>) -> Self;
    fn contains<E>(self, value: E) -> Self
    where
        T: PartialEq<E>,
        E: ToValue;
    fn not_contain<E>(self, value: E) -> Self
    where
        T: PartialEq<E>,
        E: ToValue;
    fn contains_all<E, I>(self, values: I) -> Self
    where
        T: PartialEq<E>,
        E: ToValue,
        I: IntoIterator<Item = E>;
    fn contains_any<E, I>(self, values: I) -> Self
    where
        T: PartialEq<E>,
        E: ToValue,
        I: IntoIterator<Item = E>;
    fn not_contain_all<E, I>(self, values: I) -> Self
    where
        T: PartialEq<E>,
        E: ToValue,
        I: IntoIterator<Item = E>;
    fn not_contain_any<E, I>(self, values: I) -> Self
    where
        T: PartialEq<E>,
        E: ToValue,
        I: IntoIterator<Item = E>;
}

fn has_item<C, E>(collection: &C, value: &E) -> bool
where
    C: Collection + ?Sized,
    C::Item: PartialEq<E>,
{
    collection.items().any(|item| *item == *value)
}

impl<'v, 'a, P> CollectionConstraints<P::Item> for Property<'v, 'a, P>
where
    P: Collection + ToValue + ?Sized,
{
    fn is_empty(self) -> Self {
        self.check(constraints::empty(), |v| v.size() == 0)
    }

    fn is_not_empty(self) -> Self {
        self.check(constraints::not_empty(), |v| v.size() > 0)
    }

    fn has_size(self, min: Option<usize>, max: Option<usize>) -> Self {
        self.check(constraints::size(min, max), |v| in_bounds(v.size(), min, max))
    }

    fn contains<E>(self, value: E) -> Self
    where
        P::Item: PartialEq<E>,
        E: ToValue,
    {
        let constraint = constraints::contains(&value);
        self.check(constraint, |v| has_item(v, &value))
    }

    fn not_contain<E>(self, value: E) -> Self
    where
        P::Item: PartialEq<E>,
        E: ToValue,
    {
        let constraint = constraints::not_contain(&value);
        self.check(constraint, |v| !has_item(v, &value))
    }

    fn contains_all<E, I>(self, values: I) -> Self
    where
        P::Item: PartialEq<E>,
        E: ToValue,
        I: IntoIterator<Item = E>,
    {
        let values: Vec<E> = values.into_iter().collect();
        let constraint = constraints::contains_all(constraints::collect(&values));
        self.check(constraint, |v| values.iter().all(|e| has_item(v, e)))
    }

    fn contains_any<E, I>(self, values: I) -> Self
    where
        P::Item: PartialEq<E>,
        E: ToValue,
        I: IntoIterator<Item = E>,
    {
        let values: Vec<E> = values.into_iter().collect();
        let constraint = constraints::contains_any(constraints::collect(&values));
        self.check(constraint, |v| values.iter().any(|e| has_item(v, e)))
    }

    fn not_contain_all<E, I>(self, values: I) -> Self
    where
        P::Item: PartialEq<E>,
        E: ToValue,
        I: IntoIterator<Item = E>,
    {
        let values: Vec<E> = values.into_iter().collect();
        let constraint = constraints::not_contain_all(constraints::collect(&values));
        self.check(constraint, |v| !values.iter().all(|e| has_item(v, e)))
    }

    fn not_contain_any<E, I>(self, values: I) -> Self
    where
        P::Item: PartialEq<E>,
        E: ToValue,
        I: IntoIterator<Item = E>,
    {
        let values: Vec<E> = values.into_iter().collect();
        let constraint = constraints::not_contain_any(constraints::collect(&values));
        self.check(constraint, |v| !values.iter().any(|e| has_item(v, e)))
    }
}
