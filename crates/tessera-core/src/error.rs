//! Error types for Tessera

use thiserror::Error;

/// The main error type for Tessera operations
#[derive(Debug, Error)]
pub enum TesseraError {
    /// A tree that cannot be turned into nodes. Fatal for that one object only.
    #[error("Malformed tree at '{node}': {reason}")]
    MalformedTree { node: String, reason: String },

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Record error: {0}")]
    RecordError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

impl TesseraError {
    /// Build a `MalformedTree` error for the given node id (or path)
    pub fn malformed(node: impl Into<String>, reason: impl Into<String>) -> Self {
        TesseraError::MalformedTree {
            node: node.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Tessera operations
pub type Result<T> = std::result::Result<T, TesseraError>;

impl From<serde_json::Error> for TesseraError {
    fn from(err: serde_json::Error) -> Self {
        TesseraError::JsonError(err.to_string())
    }
}

impl From<toml::de::Error> for TesseraError {
    fn from(err: toml::de::Error) -> Self {
        TesseraError::TomlParseError(err.to_string())
    }
}
