//! Field validation primitives shared by the directory entities.
//!
//! Every rejected mutation produces a [`ValidationError`] naming the
//! attribute and the reason; the prior value of the field is untouched.

use serde::Serialize;
use thiserror::Error;

use crate::config::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

/// A rejected field mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{reason}")]
pub struct ValidationError {
    /// Attribute name, in the public (lowercase) attribute namespace.
    pub field: &'static str,
    /// Human-readable rejection reason.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a latitude in decimal degrees.
pub(crate) fn check_latitude(value: f64) -> Result<f64, ValidationError> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&value) {
        return Err(ValidationError::new(
            "latitude",
            "Latitude must be between -90 and 90",
        ));
    }
    Ok(value)
}

/// Validate a longitude in decimal degrees.
pub(crate) fn check_longitude(value: f64) -> Result<f64, ValidationError> {
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&value) {
        return Err(ValidationError::new(
            "longitude",
            "Longitude must be between -180 and 180",
        ));
    }
    Ok(value)
}

/// Parse an integer attribute from its raw textual form.
pub(crate) fn parse_i32(
    field: &'static str,
    label: &str,
    raw: &str,
) -> Result<i32, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::new(field, format!("{label} must be a valid integer")))
}

/// Parse a floating-point attribute from its raw textual form.
pub(crate) fn parse_f64(
    field: &'static str,
    label: &str,
    raw: &str,
) -> Result<f64, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::new(field, format!("{label} must be a valid number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latitude_bounds_are_inclusive() {
        assert!(check_latitude(-90.0).is_ok());
        assert!(check_latitude(90.0).is_ok());
        assert!(check_latitude(0.0).is_ok());

        let err = check_latitude(90.0001).unwrap_err();
        assert_eq!(err.field, "latitude");
        assert_eq!(err.reason, "Latitude must be between -90 and 90");
        assert!(check_latitude(-90.0001).is_err());
    }

    #[test]
    fn longitude_bounds_are_inclusive() {
        assert!(check_longitude(-180.0).is_ok());
        assert!(check_longitude(180.0).is_ok());

        let err = check_longitude(180.5).unwrap_err();
        assert_eq!(err.reason, "Longitude must be between -180 and 180");
    }

    #[test]
    fn integer_parsing_trims_and_reports_the_label() {
        assert_eq!(parse_i32("age", "Age", " 45 ").unwrap(), 45);
        assert_eq!(parse_i32("age", "Age", "-1").unwrap(), -1);

        let err = parse_i32("age", "Age", "abc").unwrap_err();
        assert_eq!(err.field, "age");
        assert_eq!(err.reason, "Age must be a valid integer");
    }

    #[test]
    fn float_parsing_accepts_integer_forms() {
        assert_eq!(parse_f64("latitude", "Latitude", "40").unwrap(), 40.0);
        assert_eq!(parse_f64("latitude", "Latitude", "-74.006").unwrap(), -74.006);

        let err = parse_f64("longitude", "Longitude", "west").unwrap_err();
        assert_eq!(err.reason, "Longitude must be a valid number");
    }
}
