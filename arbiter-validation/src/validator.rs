//! Validation DSL
//!
//! [`validate`] walks the rules described for an object and collects every
//! violation before returning. Rules select properties through accessor
//! closures and chain constraint methods on the returned [`Property`]:
//!
//! ```
//! use arbiter_validation::prelude::*;
//!
//! struct Employee {
//!     name: String,
//!     email: Option<String>,
//!     age: u32,
//! }
//!
//! let employee = Employee { name: " ".into(), email: Some("not-an-email".into()), age: 15 };
//!
//! let failure = validate(&employee, |v| {
//!     v.property("name", |e| &e.name).is_not_blank().has_size(Some(1), Some(100));
//!     v.optional("email", |e| e.email.as_ref()).is_email();
//!     v.property("age", |e| &e.age).is_greater_than_or_equal_to(18);
//! })
//! .unwrap_err();
//!
//! assert_eq!(failure.properties(), vec!["name", "email", "age"]);
//! ```

use crate::{Constraint, ConstraintViolation, ToValue, ValidationFailure, Value, constraints};

/// Describes the validation rules of a type.
///
/// ```
/// use arbiter_validation::prelude::*;
///
/// struct Address {
///     city: String,
/// }
///
/// impl Validate for Address {
///     fn rules(v: &mut Validator<'_, '_, Self>) {
///         v.property("city", |a| &a.city).is_not_blank();
///     }
/// }
///
/// let failure = Address { city: String::new() }.validate().unwrap_err();
/// assert_eq!(failure.constraint_violations()[0].constraint.name(), "NotBlank");
/// ```
pub trait Validate {
    /// Describe the rules on `v`.
    fn rules(v: &mut Validator<'_, '_, Self>);

    /// Validate this value against [`Validate::rules`].
    fn validate(&self) -> Result<(), ValidationFailure> {
        validate(self, Self::rules)
    }
}

/// Validate `object` against the rules described by `rules`.
///
/// Every rule is evaluated. Returns a single [`ValidationFailure`] holding
/// all violations, or `Ok(())` when there are none.
pub fn validate<'a, T, F>(object: &'a T, rules: F) -> Result<(), ValidationFailure>
where
    T: ?Sized,
    F: FnOnce(&mut Validator<'_, 'a, T>),
{
    let mut violations = Vec::new();
    rules(&mut Validator::new(object, &mut violations));

    match ValidationFailure::new(violations) {
        Some(failure) => {
            arbiter_log::debug!(
                target: "arbiter::validation",
                "Validation of {} failed with {} violation(s)",
                std::any::type_name::<T>(),
                failure.len()
            );
            Err(failure)
        }
        None => {
            arbiter_log::trace!(
                target: "arbiter::validation",
                "Validation of {} passed",
                std::any::type_name::<T>()
            );
            Ok(())
        }
    }
}

/// Rule context for one object.
///
/// `'v` is the borrow of the violation sink, `'a` the borrow of the object
/// under validation.
pub struct Validator<'v, 'a, T: ?Sized> {
    object: &'a T,
    prefix: String,
    violations: &'v mut Vec<ConstraintViolation>,
}

impl<'v, 'a, T: ?Sized> Validator<'v, 'a, T> {
    fn new(object: &'a T, violations: &'v mut Vec<ConstraintViolation>) -> Self {
        Self {
            object,
            prefix: String::new(),
            violations,
        }
    }

    /// The object under validation.
    pub fn object(&self) -> &'a T {
        self.object
    }

    /// Number of violations recorded so far in this pass.
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    fn path(&self, name: &str) -> String {
        if name.is_empty() {
            self.prefix.trim_end_matches('.').to_string()
        } else {
            format!("{}{}", self.prefix, name)
        }
    }

    fn child<'c, C: ?Sized>(&'c mut self, object: &'a C, path: String) -> Validator<'c, 'a, C> {
        Validator {
            object,
            prefix: if path.is_empty() { path } else { path + "." },
            violations: &mut *self.violations,
        }
    }

    /// Select a property that is always present.
    pub fn property<P, F>(&mut self, name: &str, accessor: F) -> Property<'_, 'a, P>
    where
        P: ToValue + ?Sized,
        F: FnOnce(&'a T) -> &'a P,
    {
        let value = accessor(self.object);
        Property {
            path: self.path(name),
            value: Some(value),
            violations: &mut *self.violations,
        }
    }

    /// Select a property that may be absent.
    ///
    /// An absent value satisfies every constraint except
    /// [`Property::is_not_null`].
    pub fn optional<P, F>(&mut self, name: &str, accessor: F) -> Property<'_, 'a, P>
    where
        P: ToValue + ?Sized,
        F: FnOnce(&'a T) -> Option<&'a P>,
    {
        let value = accessor(self.object);
        Property {
            path: self.path(name),
            value,
            violations: &mut *self.violations,
        }
    }

    /// Describe the rules of a nested object; its paths are prefixed with
    /// `name.`.
    pub fn nested<C, A, R>(&mut self, name: &str, accessor: A, rules: R)
    where
        C: ?Sized + 'a,
        A: FnOnce(&'a T) -> &'a C,
        R: FnOnce(&mut Validator<'_, 'a, C>),
    {
        let child = accessor(self.object);
        let path = self.path(name);
        rules(&mut self.child(child, path));
    }

    /// [`Validator::nested`] for an optional child, skipped when absent.
    pub fn nested_optional<C, A, R>(&mut self, name: &str, accessor: A, rules: R)
    where
        C: ?Sized + 'a,
        A: FnOnce(&'a T) -> Option<&'a C>,
        R: FnOnce(&mut Validator<'_, 'a, C>),
    {
        if let Some(child) = accessor(self.object) {
            let path = self.path(name);
            rules(&mut self.child(child, path));
        }
    }

    /// Describe the rules of every element of a collection; element paths
    /// are `name[index].`.
    pub fn each<C, I, A, R>(&mut self, name: &str, accessor: A, mut rules: R)
    where
        C: 'a,
        I: IntoIterator<Item = &'a C>,
        A: FnOnce(&'a T) -> I,
        R: FnMut(&mut Validator<'_, 'a, C>),
    {
        let base = self.path(name);
        for (index, element) in accessor(self.object).into_iter().enumerate() {
            let path = format!("{}[{}]", base, index);
            rules(&mut self.child(element, path));
        }
    }

    /// Validate a nested object with its own [`Validate`] rules.
    pub fn valid<C, A>(&mut self, name: &str, accessor: A)
    where
        C: Validate + ?Sized + 'a,
        A: FnOnce(&'a T) -> &'a C,
    {
        self.nested(name, accessor, C::rules);
    }

    /// [`Validator::valid`] for an optional child, skipped when absent.
    pub fn valid_optional<C, A>(&mut self, name: &str, accessor: A)
    where
        C: Validate + ?Sized + 'a,
        A: FnOnce(&'a T) -> Option<&'a C>,
    {
        self.nested_optional(name, accessor, C::rules);
    }

    /// Validate every element of a collection with its own rules.
    pub fn valid_each<C, I, A>(&mut self, name: &str, accessor: A)
    where
        C: Validate + 'a,
        I: IntoIterator<Item = &'a C>,
        A: FnOnce(&'a T) -> I,
    {
        self.each(name, accessor, C::rules);
    }
}

/// A selected property.
///
/// Constraint methods consume and return the property so they chain. Every
/// constraint in a chain is evaluated. String, numeric, temporal and
/// collection constraints come from the extension traits in
/// [`crate::validators`].
pub struct Property<'v, 'a, P: ?Sized> {
    path: String,
    value: Option<&'a P>,
    violations: &'v mut Vec<ConstraintViolation>,
}

impl<'v, 'a, P: ToValue + ?Sized> Property<'v, 'a, P> {
    /// Full path of the property.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The property value, `None` when absent.
    pub fn value(&self) -> Option<&'a P> {
        self.value
    }

    /// Record a violation of `constraint` unless `predicate` holds.
    ///
    /// The predicate sees the raw value, absent values included; this is
    /// the hook for custom constraints that care about absence.
    pub fn validate<F>(self, constraint: Constraint, predicate: F) -> Self
    where
        F: FnOnce(Option<&'a P>) -> bool,
    {
        if !predicate(self.value) {
            let value = self.value.map_or(Value::Null, ToValue::to_value);
            self.violations
                .push(ConstraintViolation::new(self.path.clone(), value, constraint));
        }
        self
    }

    /// Record a violation of `constraint` unless the value is absent or
    /// satisfies `predicate`.
    pub fn check<F>(self, constraint: Constraint, predicate: F) -> Self
    where
        F: FnOnce(&'a P) -> bool,
    {
        self.validate(constraint, |value| value.is_none_or(predicate))
    }

    /// Fails when a value is present.
    pub fn is_null(self) -> Self {
        self.validate(constraints::null(), |value| value.is_none())
    }

    /// Fails when the value is absent.
    pub fn is_not_null(self) -> Self {
        self.validate(constraints::not_null(), |value| value.is_some())
    }

    pub fn is_equal_to<E>(self, expected: E) -> Self
    where
        P: PartialEq<E>,
        E: ToValue,
    {
        let constraint = constraints::equals(&expected);
        self.check(constraint, |value| *value == expected)
    }

    pub fn is_not_equal_to<E>(self, expected: E) -> Self
    where
        P: PartialEq<E>,
        E: ToValue,
    {
        let constraint = constraints::not_equals(&expected);
        self.check(constraint, |value| *value != expected)
    }

    /// Fails unless the value equals one of `values`.
    pub fn is_in<E, I>(self, values: I) -> Self
    where
        P: PartialEq<E>,
        E: ToValue,
        I: IntoIterator<Item = E>,
    {
        let values: Vec<E> = values.into_iter().collect();
        let constraint = constraints::one_of(constraints::collect(&values));
        self.check(constraint, |value| values.iter().any(|v| *value == *v))
    }

    /// Fails when the value equals one of `values`.
    pub fn is_not_in<E, I>(self, values: I) -> Self
    where
        P: PartialEq<E>,
        E: ToValue,
        I: IntoIterator<Item = E>,
    {
        let values: Vec<E> = values.into_iter().collect();
        let constraint = constraints::not_one_of(constraints::collect(&values));
        self.check(constraint, |value| values.iter().all(|v| *value != *v))
    }

    /// Fails unless `predicate` holds, reporting `Valid`.
    pub fn is_valid<F>(self, predicate: F) -> Self
    where
        F: FnOnce(&'a P) -> bool,
    {
        self.check(constraints::valid(), predicate)
    }

    pub fn is_less_than<E>(self, limit: E) -> Self
    where
        P: PartialOrd<E>,
        E: ToValue,
    {
        let constraint = constraints::less(&limit);
        self.check(constraint, |value| *value < limit)
    }

    pub fn is_less_than_or_equal_to<E>(self, limit: E) -> Self
    where
        P: PartialOrd<E>,
        E: ToValue,
    {
        let constraint = constraints::less_or_equal(&limit);
        self.check(constraint, |value| *value <= limit)
    }

    pub fn is_greater_than<E>(self, limit: E) -> Self
    where
        P: PartialOrd<E>,
        E: ToValue,
    {
        let constraint = constraints::greater(&limit);
        self.check(constraint, |value| *value > limit)
    }

    pub fn is_greater_than_or_equal_to<E>(self, limit: E) -> Self
    where
        P: PartialOrd<E>,
        E: ToValue,
    {
        let constraint = constraints::greater_or_equal(&limit);
        self.check(constraint, |value| *value >= limit)
    }

    /// Fails unless `start <= value <= end`.
    pub fn is_between<E>(self, start: E, end: E) -> Self
    where
        P: PartialOrd<E>,
        E: ToValue,
    {
        let constraint = constraints::between(&start, &end);
        self.check(constraint, |value| *value >= start && *value <= end)
    }

    /// Fails when `start <= value <= end`.
    pub fn is_not_between<E>(self, start: E, end: E) -> Self
    where
        P: PartialOrd<E>,
        E: ToValue,
    {
        let constraint = constraints::not_between(&start, &end);
        self.check(constraint, |value| !(*value >= start && *value <= end))
    }
}
