//! Session error types.

use std::path::PathBuf;

use inv_ingest::IngestError;
use inv_persistence::PersistenceError;
use thiserror::Error;

/// Errors surfaced to the operator by an [`crate::InventorySession`].
///
/// All of them are recoverable at the operation boundary. A failed load keeps
/// the previous inventory; a failed save keeps the previous file and leaves
/// the session dirty.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The inventory file could not be opened, decoded or parsed.
    #[error("Failed to load inventory")]
    Load(#[from] IngestError),

    /// The inventory could not be written back.
    #[error("Failed to save inventory")]
    Save(#[source] PersistenceError),

    /// The unscanned export could not be written.
    #[error("Failed to export unscanned items")]
    Export(#[source] PersistenceError),

    /// An operation needs a loaded inventory.
    #[error("No inventory is loaded")]
    NoInventory,

    /// The configuration file could not be read or parsed.
    #[error("Failed to read configuration: {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl InventoryError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Load(IngestError::EmptyInventory { path }) => {
                format!(
                    "{} contains no items. The file was not opened.",
                    path.display()
                )
            }
            Self::Load(error) => format!("Could not open the inventory: {error}"),
            Self::Save(error) => error.user_message(),
            Self::Export(error) => {
                format!("Could not export unscanned items. {}", error.user_message())
            }
            Self::NoInventory => "Open an inventory file first.".to_string(),
            Self::Config { path, source } => {
                format!("Could not read settings from {}: {source}", path.display())
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Save(error) | Self::Export(error) => error.suggestion(),
            Self::Load(error) if error.is_parse_error() => {
                Some("Check the file's encoding and delimiter settings.".into())
            }
            _ => None,
        }
    }
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, InventoryError>;
