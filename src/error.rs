//! Error types for the laser power calculator.

use thiserror::Error;

/// Errors that can occur when configuring the calculator or evaluating targets.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value or brightness target is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value could not be parsed (target nits, aspect ratio, model name, ...)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Setup file could not be read or decoded
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Reject non-finite and non-positive values.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "{} must be a finite number, got {}",
            name, value
        )));
    }
    if value <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "{} must be greater than 0, got {}",
            name, value
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument("diagonal_inches must be greater than 0".to_string());
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.to_string().contains("diagonal_inches"));

        let err = Error::Parse("'abc' is not a number".to_string());
        assert!(err.to_string().contains("'abc'"));
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("gain", 1.3).unwrap(), 1.3);
        assert!(matches!(
            require_positive("gain", 0.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(require_positive("gain", -1.0).is_err());
        assert!(require_positive("gain", f64::NAN).is_err());
        assert!(require_positive("gain", f64::INFINITY).is_err());
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
