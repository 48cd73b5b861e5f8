//! Error types for commentgate

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for commentgate
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Not a commentgate directory: {0}")]
    NotInitialized(PathBuf),

    #[error("Invalid comment id: {0}")]
    InvalidId(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("A tag set must contain at least one role")]
    EmptyTagSet,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl GateError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            GateError::NotInitialized(_) => 2,
            GateError::InvalidId(_) | GateError::InvalidPayload(_) => 3,
            GateError::CommentNotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            GateError::NotInitialized(path) => {
                format!(
                    "Not a commentgate directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'commentgate init' in this directory to create a store\n\
                    • Navigate to an existing commentgate directory\n\
                    • Set COMMENTGATE_ROOT environment variable to your store path",
                    path.display()
                )
            }
            GateError::InvalidId(id) => {
                format!(
                    "Invalid comment id: '{}'\n\n\
                    Comment ids are 32 hexadecimal characters.\n\
                    Example: commentgate get 6f1c0b8a2d4e4b7c9a1f3e5d7c9b1a20",
                    id
                )
            }
            GateError::CommentNotFound(id) => {
                format!(
                    "Comment not found: '{}'\n\n\
                    Suggestions:\n\
                    • Check the id with 'commentgate get --roles sysadmin'\n\
                    • Comments are never deleted; the id may belong to another store",
                    id
                )
            }
            GateError::InvalidPayload(msg) => {
                format!(
                    "Invalid payload: {}\n\n\
                    Payloads are JSON objects with camelCase keys.\n\
                    Example: {{\"name\": \"Jane\", \"comment\": \"Looks good\"}}",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using GateError
pub type Result<T> = std::result::Result<T, GateError>;
