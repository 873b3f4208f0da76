//! Validation utilities for the AgriSmart client
//!
//! Everything here runs before a request leaves the device; a failure blocks
//! submission locally.

use validator::ValidationError;

use crate::models::SoilInputs;

// ============================================================================
// Location Validations
// ============================================================================

/// Validate a coordinate pair.
///
/// The (0, 0) pair is treated as "no fix" rather than a real position.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if latitude.is_nan() || longitude.is_nan() {
        return Err("Coordinates must be numbers");
    }
    if latitude == 0.0 && longitude == 0.0 {
        return Err("Coordinates (0, 0) indicate a missing fix");
    }
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

// ============================================================================
// Form Validations
// ============================================================================

/// Star rating attached to feedback
pub fn validate_rating(rating: u8) -> Result<(), &'static str> {
    if !(1..=5).contains(&rating) {
        return Err("Rating must be between 1 and 5 stars");
    }
    Ok(())
}

/// Parse a numeric form field the way a number input would
pub fn parse_measurement(raw: &str) -> Result<f64, &'static str> {
    let value: f64 = raw.trim().parse().map_err(|_| "Value must be a number")?;
    if !value.is_finite() {
        return Err("Value must be a finite number");
    }
    Ok(value)
}

// ============================================================================
// validator hooks
// ============================================================================

/// Air temperature bounds for the manual form (°C)
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = -10.0..=60.0;

/// Reject NaN/infinite readings, which slip through range checks, and
/// out-of-range temperatures
pub fn validate_soil_inputs(inputs: &SoilInputs) -> Result<(), ValidationError> {
    let all_finite = [
        inputs.nitrogen,
        inputs.phosphorus,
        inputs.potassium,
        inputs.temperature,
        inputs.humidity,
        inputs.ph,
        inputs.rainfall,
    ]
    .iter()
    .all(|v| v.is_finite());

    if !all_finite {
        return Err(ValidationError::new("non_finite_measurement"));
    }
    if !TEMPERATURE_RANGE.contains(&inputs.temperature) {
        return Err(ValidationError::new("temperature_out_of_range"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Location Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_coordinates_valid() {
        assert!(validate_coordinates(17.385, 78.4867).is_ok()); // Hyderabad
        assert!(validate_coordinates(-33.86, 151.21).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_validate_coordinates_sentinel() {
        assert!(validate_coordinates(0.0, 0.0).is_err());
        assert!(validate_coordinates(-0.0, 0.0).is_err());
    }

    #[test]
    fn test_validate_coordinates_single_zero_axis_allowed() {
        assert!(validate_coordinates(0.0, 32.5).is_ok());
        assert!(validate_coordinates(51.48, 0.0).is_ok());
    }

    #[test]
    fn test_validate_coordinates_out_of_range() {
        assert!(validate_coordinates(90.1, 10.0).is_err());
        assert!(validate_coordinates(10.0, -180.5).is_err());
        assert!(validate_coordinates(f64::NAN, 10.0).is_err());
        assert!(validate_coordinates(10.0, f64::INFINITY).is_err());
    }

    // ========================================================================
    // Form Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement(" 6.5 "), Ok(6.5));
        assert!(parse_measurement("abc").is_err());
        assert!(parse_measurement("NaN").is_err());
        assert!(parse_measurement("inf").is_err());
    }
}
