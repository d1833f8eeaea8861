//! The interface a display collaborator drives.

use std::path::{Path, PathBuf};

use inv_model::{InventoryStats, ScannedRow};

use crate::config::InventoryConfig;
use crate::error::{InventoryError, Result};
use crate::notify::{Notification, NullSink, SessionSink};
use crate::scan::{self, ScanOutcome};
use crate::store::InventoryStore;

/// Result of a successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    pub path: PathBuf,
    pub records: usize,
    /// Records already found in the file, in file order.
    pub scanned: Vec<ScannedRow>,
    pub stats: InventoryStats,
}

/// Result of one barcode event.
#[derive(Debug)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    /// Set when the record was marked found but writing it through failed.
    /// The record stays found in memory and the session stays dirty.
    pub save_error: Option<InventoryError>,
}

impl ScanReport {
    pub fn is_saved(&self) -> bool {
        self.save_error.is_none()
    }
}

/// One open inventory, processed one barcode at a time.
///
/// Every scan that marks a record found is saved before `process_scan`
/// returns.
#[derive(Debug)]
pub struct InventorySession<S = NullSink> {
    config: InventoryConfig,
    store: InventoryStore,
    sink: S,
}

impl InventorySession<NullSink> {
    pub fn new(config: InventoryConfig) -> Self {
        Self::with_sink(config, NullSink)
    }
}

impl<S: SessionSink> InventorySession<S> {
    pub fn with_sink(config: InventoryConfig, sink: S) -> Self {
        let store = InventoryStore::new(config.format.clone(), config.layout.clone());
        Self {
            config,
            store,
            sink,
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    /// Open an inventory file, replacing the current one.
    ///
    /// On failure the current inventory stays loaded and unchanged.
    pub fn load(&mut self, path: &Path) -> Result<LoadSummary> {
        if let Err(error) = self.store.load(path) {
            tracing::warn!(path = %path.display(), %error, "Inventory load failed");
            return Err(error);
        }

        let scanned = self.store.scanned_view().to_vec();
        let stats = self.store.stats();
        self.sink.replace_scanned(&scanned);
        self.sink.stats_changed(stats);

        Ok(LoadSummary {
            path: path.to_path_buf(),
            records: self.store.records().len(),
            scanned,
            stats,
        })
    }

    /// Handle one barcode.
    ///
    /// Never fails outright. A save failure after a newly found record is
    /// reported in [`ScanReport::save_error`] and as a notification.
    pub fn process_scan(&mut self, barcode: &str) -> ScanReport {
        let step = scan::process_scan(&self.store, barcode, self.config.notice_duration());

        for notification in &step.notifications {
            self.sink.notify(notification.clone());
        }

        let mut save_error = None;
        if let Some(index) = step.mark {
            if let Some(row) = self.store.mark_found(index) {
                self.sink.append_scanned(row);
            }
            if let Err(error) = self.store.save() {
                self.sink.notify(Notification::save_failed(error.user_message()));
                save_error = Some(error);
            }
            self.sink.stats_changed(self.store.stats());
        }

        ScanReport {
            outcome: step.outcome,
            save_error,
        }
    }

    /// Write the inventory back explicitly, e.g. to retry a failed save.
    pub fn save(&mut self) -> Result<()> {
        self.store.save()
    }

    /// Write the records not yet found to a new file in the export directory.
    pub fn export_unscanned(&self) -> Result<PathBuf> {
        if !self.store.is_loaded() {
            return Err(InventoryError::NoInventory);
        }
        inv_persistence::export_unscanned(
            self.store.records(),
            self.store.layout(),
            self.store.format(),
            &self.config.export_dir(),
        )
        .map_err(InventoryError::Export)
    }

    pub fn stats(&self) -> InventoryStats {
        self.store.stats()
    }

    pub fn scanned_view(&self) -> &[ScannedRow] {
        self.store.scanned_view()
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    /// One-line status, e.g. `lista.csv: 3 items, 1 scanned`.
    pub fn summary(&self) -> Option<String> {
        let path = self.store.path()?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let stats = self.stats();
        Some(format!("{name}: {} items, {} scanned", stats.total, stats.found))
    }
}
