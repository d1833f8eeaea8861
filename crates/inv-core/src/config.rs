//! Session configuration.
//!
//! Fixed per deployment: the file format and column layout are never
//! detected from the file itself.

use std::path::{Path, PathBuf};
use std::time::Duration;

use inv_model::{ColumnLayout, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};

/// Default time transient notices stay visible.
pub const DEFAULT_NOTICE_DURATION_MS: u64 = 2000;

/// Inventory session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Encoding, delimiter and found marker of the inventory file.
    pub format: FileFormat,

    /// Header labels and semantic column positions.
    pub layout: ColumnLayout,

    /// How long "already scanned" and "has expiry date" notices are shown.
    pub notice_duration_ms: u64,

    /// Where exports are written. The system temp directory when unset.
    pub export_dir: Option<PathBuf>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            format: FileFormat::default(),
            layout: ColumnLayout::default(),
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
            export_dir: None,
        }
    }
}

impl InventoryConfig {
    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let config_error = |source: Box<dyn std::error::Error + Send + Sync>| {
            InventoryError::Config {
                path: path.to_path_buf(),
                source,
            }
        };
        let contents = std::fs::read_to_string(path).map_err(|e| config_error(Box::new(e)))?;
        serde_json::from_str(&contents).map_err(|e| config_error(Box::new(e)))
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }

    /// Directory exports are written to.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
