use thiserror::Error;

/// Rejection of caller-supplied parameters. The numerical core never fails;
/// everything here is raised before a calculator runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} {reason}")]
    OutOfRange { field: &'static str, reason: String },

    #[error("{field} must be greater than {other}")]
    Ordering {
        field: &'static str,
        other: &'static str,
    },

    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if finite(field, value)? < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: "must be >= 0".to_string(),
        });
    }
    Ok(value)
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if finite(field, value)? <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: "must be > 0".to_string(),
        });
    }
    Ok(value)
}

pub(crate) fn within<T>(field: &'static str, value: T, min: T, max: T) -> Result<T, ValidationError>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            reason: format!("must be between {min} and {max}"),
        });
    }
    Ok(value)
}
