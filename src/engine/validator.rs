//! Range Validator
//!
//! Turns raw field text into a number, rejecting empty, non-numeric and
//! physically implausible input before anything is scored.

use crate::catalog::Parameter;
use crate::error::ValidationError;

/// Validate a raw reading against a parameter's absolute range
///
/// # Returns
/// The parsed value, or the first problem found:
/// `MissingValue` for blank input, `NotANumber` for text that does not parse
/// to a finite number, `OutOfAbsoluteRange` when outside the inclusive bounds.
pub fn validate(raw_input: &str, parameter: &Parameter) -> Result<f64, ValidationError> {
    let text = raw_input.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingValue);
    }

    let value: f64 = text.parse().map_err(|_| ValidationError::NotANumber)?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber);
    }

    let bounds = parameter.absolute_range;
    if !bounds.contains(value) {
        return Err(ValidationError::OutOfAbsoluteRange {
            min: bounds.min,
            max: bounds.max,
        });
    }

    Ok(value)
}
