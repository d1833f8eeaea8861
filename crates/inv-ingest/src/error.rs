//! Error types for inventory loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an inventory file.
///
/// None of these leave a partially loaded record set behind; the caller keeps
/// whatever it had before.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Inventory file not found.
    #[error("inventory file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// Bytes are not valid in the configured encoding.
    #[error("{path} is not valid {encoding}")]
    InvalidEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Structurally invalid quoting (strict quote mode only).
    #[error("malformed row in {path} at line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: u64,
        reason: &'static str,
    },

    /// The CSV reader rejected a row.
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Header only, or no rows at all.
    #[error("inventory file has no records: {path}")]
    EmptyInventory { path: PathBuf },
}

impl IngestError {
    /// Creates a read error, mapping `NotFound` to [`IngestError::FileNotFound`].
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }

    /// Returns `true` if the file was readable but its content was rejected.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEncoding { .. } | Self::Parse { .. } | Self::Csv { .. }
        )
    }

    /// Path of the file that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileNotFound { path }
            | Self::FileRead { path, .. }
            | Self::InvalidEncoding { path, .. }
            | Self::Parse { path, .. }
            | Self::Csv { path, .. }
            | Self::EmptyInventory { path } => path,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
