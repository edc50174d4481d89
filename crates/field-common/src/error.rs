//! Error types for field sampling, contour extraction and rendering.

use thiserror::Error;

/// Result type alias using FieldError.
pub type FieldResult<T> = Result<T, FieldError>;

/// Primary error type for the isoline crates.
#[derive(Debug, Error)]
pub enum FieldError {
    // === Configuration Errors ===
    #[error("Invalid configuration value for '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    // === Buffer Errors ===
    #[error("Buffer length mismatch: expected {expected} entries, got {actual}")]
    BufferMismatch { expected: usize, actual: usize },

    // === Output Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl FieldError {
    pub fn invalid_config(param: &str, message: impl Into<String>) -> Self {
        FieldError::InvalidConfig {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for FieldError {
    fn from(err: std::io::Error) -> Self {
        FieldError::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for FieldError {
    fn from(err: serde_yaml::Error) -> Self {
        FieldError::ConfigParse(format!("YAML error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = FieldError::invalid_config("grid_width", "must be >= 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'grid_width': must be >= 1"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FieldError = io.into();
        assert!(matches!(err, FieldError::Io(_)));
    }
}
