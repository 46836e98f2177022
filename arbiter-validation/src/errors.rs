// Validation errors

use crate::{Constraint, Value};
use serde::Serialize;
use std::fmt;

/// A property that failed a constraint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintViolation {
    /// Property path, e.g. `address.city` or `dependents[1].name`
    pub property: String,

    /// Value that failed validation
    pub value: Value,

    /// Constraint that failed
    pub constraint: Constraint,
}

impl ConstraintViolation {
    /// Create a new violation
    pub fn new(property: impl Into<String>, value: impl Into<Value>, constraint: Constraint) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            constraint,
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (value: {})", self.property, self.constraint, self.value)
    }
}

/// Every violation found by one validation pass
///
/// Insertion ordered, with identical violations collapsed. Never empty:
/// [`ValidationFailure::new`] returns `None` for an empty set.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    constraint_violations: Vec<ConstraintViolation>,
}

impl ValidationFailure {
    /// Build the failure of a validation pass, or `None` when nothing failed
    pub fn new(violations: impl IntoIterator<Item = ConstraintViolation>) -> Option<Self> {
        let mut constraint_violations: Vec<ConstraintViolation> = Vec::new();
        for violation in violations {
            if !constraint_violations.contains(&violation) {
                constraint_violations.push(violation);
            }
        }

        if constraint_violations.is_empty() {
            None
        } else {
            Some(Self {
                constraint_violations,
            })
        }
    }

    /// All violations, in the order they were found
    pub fn constraint_violations(&self) -> &[ConstraintViolation] {
        &self.constraint_violations
    }

    /// Get the number of violations
    pub fn len(&self) -> usize {
        self.constraint_violations.len()
    }

    /// Always false for a constructed failure
    pub fn is_empty(&self) -> bool {
        self.constraint_violations.is_empty()
    }

    /// Get violations for a specific property path
    pub fn get_property_violations(&self, property: &str) -> Vec<&ConstraintViolation> {
        self.constraint_violations
            .iter()
            .filter(|v| v.property == property)
            .collect()
    }

    /// Paths of the failed properties, without repeats
    pub fn properties(&self) -> Vec<&str> {
        let mut properties: Vec<&str> = Vec::new();
        for violation in &self.constraint_violations {
            if !properties.contains(&violation.property.as_str()) {
                properties.push(&violation.property);
            }
        }
        properties
    }

    /// Convert to JSON representation, without messages
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "violations": self.constraint_violations.iter().map(|v| {
                serde_json::json!({
                    "property": v.property,
                    "value": v.value,
                    "constraint": v.constraint,
                })
            }).collect::<Vec<_>>()
        })
    }

    pub fn into_violations(self) -> Vec<ConstraintViolation> {
        self.constraint_violations
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed with {} violation(s)", self.len())?;
        for violation in &self.constraint_violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

impl<'a> IntoIterator for &'a ValidationFailure {
    type Item = &'a ConstraintViolation;
    type IntoIter = std::slice::Iter<'a, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraint_violations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ToValue, constraints};

    fn violation(property: &str, constraint: Constraint) -> ConstraintViolation {
        ConstraintViolation::new(property, "x".to_value(), constraint)
    }

    #[test]
    fn test_empty_set_builds_no_failure() {
        assert!(ValidationFailure::new(Vec::new()).is_none());
    }

    #[test]
    fn test_failure_keeps_order() {
        let failure = ValidationFailure::new(vec![
            violation("b", constraints::not_blank()),
            violation("a", constraints::email()),
        ])
        .unwrap();

        let properties: Vec<_> = failure.into_iter().map(|v| v.property.as_str()).collect();
        assert_eq!(properties, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicates_collapsed() {
        let failure = ValidationFailure::new(vec![
            violation("name", constraints::not_blank()),
            violation("name", constraints::not_blank()),
            violation("name", constraints::letters()),
        ])
        .unwrap();

        assert_eq!(failure.len(), 2);
        assert_eq!(failure.get_property_violations("name").len(), 2);
        assert_eq!(failure.properties(), vec!["name"]);
    }

    #[test]
    fn test_to_json() {
        let failure = ValidationFailure::new(vec![ConstraintViolation::new(
            "age",
            15.to_value(),
            constraints::greater(17),
        )])
        .unwrap();

        let json = failure.to_json();
        assert_eq!(json["violations"][0]["property"], "age");
        assert_eq!(json["violations"][0]["value"], 15);
        assert_eq!(json["violations"][0]["constraint"]["name"], "Greater");
        assert_eq!(json["violations"][0]["constraint"]["params"]["value"], 17);
    }

    #[test]
    fn test_display() {
        let failure = ValidationFailure::new(vec![violation("name", constraints::not_blank())]).unwrap();
        let text = failure.to_string();
        assert!(text.starts_with("Validation failed with 1 violation(s)"));
        assert!(text.contains("name: NotBlank"));
    }
}
