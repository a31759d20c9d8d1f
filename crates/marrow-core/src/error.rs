//! Error types for Marrow

use thiserror::Error;

/// The main error type for Marrow operations
#[derive(Debug, Error)]
pub enum MarrowError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Duplicate node name: {0}")]
    DuplicateNodeName(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Rig file error: {0}")]
    RigFileError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Marrow operations
pub type Result<T> = std::result::Result<T, MarrowError>;

impl From<toml::de::Error> for MarrowError {
    fn from(err: toml::de::Error) -> Self {
        MarrowError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for MarrowError {
    fn from(err: toml::ser::Error) -> Self {
        MarrowError::TomlSerError(err.to_string())
    }
}
