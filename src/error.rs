//! Error Taxonomy
//!
//! Every error in the engine is recoverable: it is attached to a single field
//! or to the category selection and only blocks the submit transition.

use serde::Serialize;
use thiserror::Error;

/// Problems with a single raw reading
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("a value is required")]
    MissingValue,

    #[error("not a number")]
    NotANumber,

    #[error("value must be between {min} and {max}")]
    OutOfAbsoluteRange { min: f64, max: f64 },
}

/// Catalog construction and lookup failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("unknown water category '{0}'")]
    UnknownCategory(String),

    #[error("category '{0}' has no parameters")]
    EmptyCategory(String),

    #[error("category '{0}' is defined more than once")]
    DuplicateCategory(String),

    #[error("category '{category}' lists parameter '{parameter}' more than once")]
    DuplicateParameter { category: String, parameter: String },

    #[error("parameter '{parameter}' in '{category}' has inconsistent ranges: {reason}")]
    InvalidRange {
        category: String,
        parameter: String,
        reason: String,
    },
}

/// Inline error for one parameter field, reported on a rejected submit
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{parameter_name}: {error}")]
pub struct FieldError {
    pub parameter_name: String,
    pub error: ValidationError,
}

/// Ratio tier boundaries that cannot order the tiers
#[derive(Debug, Clone, PartialEq, Error)]
#[error("ratio boundaries must satisfy 0 <= good <= fair <= 1 (got good = {good}, fair = {fair})")]
pub struct TierPolicyError {
    pub good: f64,
    pub fair: f64,
}

/// Errors surfaced by an assessment session
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    #[error("unknown water category '{0}'")]
    UnknownCategory(String),

    #[error("no water category selected")]
    NoCategorySelected,

    #[error("category '{category}' has no parameter '{parameter}'")]
    UnknownParameter { category: String, parameter: String },

    #[error("{} field(s) need attention", .0.len())]
    ValidationErrors(Vec<FieldError>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ValidationError::OutOfAbsoluteRange { min: 0.0, max: 14.0 };
        assert_eq!(err.to_string(), "value must be between 0 and 14");

        let err = AssessmentError::ValidationErrors(vec![
            FieldError { parameter_name: "pH".into(), error: ValidationError::MissingValue },
            FieldError { parameter_name: "Turbidity".into(), error: ValidationError::NotANumber },
        ]);
        assert_eq!(err.to_string(), "2 field(s) need attention");
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError {
            parameter_name: "Chlorine".into(),
            error: ValidationError::OutOfAbsoluteRange { min: 0.0, max: 10.0 },
        };
        assert_eq!(err.to_string(), "Chlorine: value must be between 0 and 10");
    }
}
