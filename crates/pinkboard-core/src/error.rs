//! Error types for Pinkboard

use thiserror::Error;

/// The main error type for Pinkboard operations
#[derive(Debug, Error)]
pub enum PinkboardError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Degenerate vector: cannot scale a zero-length vector")]
    DegenerateVector,

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Image error: {0}")]
    ImageError(String),
}

/// Result type alias for Pinkboard operations
pub type Result<T> = std::result::Result<T, PinkboardError>;

impl From<toml::de::Error> for PinkboardError {
    fn from(err: toml::de::Error) -> Self {
        PinkboardError::TomlParseError(err.to_string())
    }
}

impl From<image::ImageError> for PinkboardError {
    fn from(err: image::ImageError) -> Self {
        PinkboardError::ImageError(err.to_string())
    }
}
