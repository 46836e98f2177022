// 422 response payload

use arbiter_validation::{Constraint, LocalizedViolation, Value};
use serde::Serialize;

/// Body of a 422 response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnprocessableEntity {
    pub errors: Vec<ValidationError>,
}

/// One violation as sent to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub property: String,
    pub value: Value,
    pub message: String,
    pub constraint: ValidationConstraint,
}

/// The violated constraint with its raw parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationConstraint {
    pub name: String,
    pub params: Vec<ValidationParam>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationParam {
    pub name: String,
    pub value: Value,
}

impl From<&Constraint> for ValidationConstraint {
    fn from(constraint: &Constraint) -> Self {
        Self {
            name: constraint.name().to_string(),
            params: constraint
                .message_params()
                .iter()
                .map(|(name, value)| ValidationParam {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
        }
    }
}

impl From<LocalizedViolation> for ValidationError {
    fn from(violation: LocalizedViolation) -> Self {
        Self {
            constraint: ValidationConstraint::from(&violation.constraint),
            property: violation.property,
            value: violation.value,
            message: violation.message,
        }
    }
}

impl FromIterator<LocalizedViolation> for UnprocessableEntity {
    fn from_iter<I: IntoIterator<Item = LocalizedViolation>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().map(ValidationError::from).collect(),
        }
    }
}
