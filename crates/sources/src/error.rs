//! Error types for the sources crate.

use geoclass_geo::GeoError;
use thiserror::Error;

/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors that can occur while querying a location source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Coordinates in a row or document could not be interpreted
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// The query executor reported a failure
    #[error("Query failed: {0}")]
    Query(String),

    /// A row lacks a field the options map to
    #[error("Missing field in result row: {0}")]
    MissingField(String),

    /// A name pattern is not a valid regular expression
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Options are inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Options file is not valid TOML
    #[error("Invalid options file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A source was paired with a backend it cannot use
    #[error("Source {kind} cannot use a {backend} backend")]
    BackendMismatch { kind: String, backend: &'static str },

    /// Source identifier not recognised
    #[error("Unknown source type: {0}")]
    UnknownSource(String),

    /// The source has no way to answer this kind of search
    #[error("Unsupported search: {0}")]
    Unsupported(String),
}

/// Error code for programmatic handling.
/// Range: 11xxx for source errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorCode {
    /// Coordinate interpretation failed
    Geo = 11001,
    /// Executor failure
    Query = 11002,
    /// Row lacks a mapped field
    MissingField = 11003,
    /// Bad regular expression
    InvalidPattern = 11004,
    /// Inconsistent options
    Config = 11005,
    /// IO failure
    Io = 11006,
    /// Bad TOML
    Toml = 11007,
    /// Wrong backend for the source kind
    BackendMismatch = 11008,
    /// Unknown source identifier
    UnknownSource = 11009,
    /// Search not supported by this source
    Unsupported = 11010,
}

impl SourceError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SourceErrorCode {
        match self {
            SourceError::Geo(_) => SourceErrorCode::Geo,
            SourceError::Query(_) => SourceErrorCode::Query,
            SourceError::MissingField(_) => SourceErrorCode::MissingField,
            SourceError::InvalidPattern(_) => SourceErrorCode::InvalidPattern,
            SourceError::Config(_) => SourceErrorCode::Config,
            SourceError::Io(_) => SourceErrorCode::Io,
            SourceError::Toml(_) => SourceErrorCode::Toml,
            SourceError::BackendMismatch { .. } => SourceErrorCode::BackendMismatch,
            SourceError::UnknownSource(_) => SourceErrorCode::UnknownSource,
            SourceError::Unsupported(_) => SourceErrorCode::Unsupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SourceError::Query("x".into()).code() as u32, 11002);
        assert_eq!(SourceError::UnknownSource("SOAP".into()).code() as u32, 11009);
        assert_eq!(SourceError::Config("x".into()).code(), SourceErrorCode::Config);
        assert_eq!(
            SourceError::from(GeoError::InvalidFormat("x".into())).code(),
            SourceErrorCode::Geo
        );
    }

    #[test]
    fn test_geo_errors_display_transparently() {
        let err = SourceError::from(GeoError::UnknownUnit("99".into()));
        assert_eq!(err.to_string(), "Unknown unit: 99");
    }
}
