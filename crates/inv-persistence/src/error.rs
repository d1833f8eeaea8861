//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
///
/// Whatever the variant, the target inventory file is left exactly as it was
/// before the failed operation.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A character cannot be represented in the configured encoding.
    #[error("Character '{character}' cannot be written as {encoding}")]
    Unencodable {
        character: char,
        encoding: &'static str,
    },

    /// Serialization error.
    #[error("Failed to serialize inventory data")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PersistenceError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. The previous version is unchanged.",
                    target_path.display()
                )
            }
            Self::Unencodable {
                character,
                encoding,
            } => {
                format!("The character '{character}' cannot be stored in a {encoding} file.")
            }
            Self::Serialization { .. } => {
                "An error occurred while preparing the inventory data.".to_string()
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { .. } => {
                Some("Check that you have permission to write to this location.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or close programs that have the file open, then scan again.".into())
            }
            Self::Unencodable { .. } => {
                Some("Switch the file encoding to UTF-8 or remove the character from the list.".into())
            }
            Self::Serialization { .. } => None,
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
