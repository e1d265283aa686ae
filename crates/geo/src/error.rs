//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Text does not look like a degrees/minutes/seconds angle
    #[error("Invalid DMS format (expected something like 51° 24' 32.123'' W): {0}")]
    InvalidFormat(String),

    /// Parsed angle components exceed their bounds
    #[error("Values out of range: {0}")]
    OutOfRange(String),

    /// No label is defined for the requested unit
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// An operation that needs at least one point got none
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

/// Error code for programmatic handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid DMS format
    InvalidFormat = 10001,
    /// DMS component out of range
    OutOfRange = 10002,
    /// Unknown unit
    UnknownUnit = 10003,
    /// Empty input
    EmptyInput = 10004,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidFormat(_) => GeoErrorCode::InvalidFormat,
            GeoError::OutOfRange(_) => GeoErrorCode::OutOfRange,
            GeoError::UnknownUnit(_) => GeoErrorCode::UnknownUnit,
            GeoError::EmptyInput(_) => GeoErrorCode::EmptyInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GeoError::InvalidFormat("x".into()).code() as u32, 10001);
        assert_eq!(GeoError::EmptyInput("points".into()).code(), GeoErrorCode::EmptyInput);
    }

    #[test]
    fn test_error_display() {
        let err = GeoError::UnknownUnit("parsec".into());
        assert_eq!(err.to_string(), "Unknown unit: parsec");
    }
}
