//! The authoritative in-memory inventory.

use std::path::Path;

use inv_ingest::read_inventory;
use inv_model::{ColumnLayout, FileFormat, InventoryStats, Record, ScannedRow};
use inv_persistence::{DirtyTracker, InventoryFile, RecordFilter, serialize_inventory};

use crate::error::{InventoryError, Result};

/// Records of the open inventory file, the scanned view derived from them,
/// and the handle on the file itself.
#[derive(Debug)]
pub struct InventoryStore {
    format: FileFormat,
    layout: ColumnLayout,
    records: Vec<Record>,
    /// Found records, in scan order since load.
    scanned: Vec<ScannedRow>,
    file: Option<InventoryFile>,
    tracker: DirtyTracker,
}

impl InventoryStore {
    /// Create an empty store. Nothing is loaded until [`Self::load`].
    pub fn new(format: FileFormat, layout: ColumnLayout) -> Self {
        Self {
            format,
            layout,
            records: Vec::new(),
            scanned: Vec::new(),
            file: None,
            tracker: DirtyTracker::new(),
        }
    }

    /// Replace the inventory with the content of `path`.
    ///
    /// Nothing changes unless the file parses completely and has at least one
    /// record. On success the scanned view is rebuilt from the found flags
    /// already in the file.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let loaded = read_inventory(path, &self.format, &self.layout)?;

        // Drop the previous handle before taking the new one
        self.file = None;
        self.file = Some(InventoryFile::new(path, loaded.file));
        self.records = loaded.table.records;
        self.tracker = DirtyTracker::new();
        self.rebuild_scanned_view();
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.file.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(InventoryFile::path)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn format(&self) -> &FileFormat {
        &self.format
    }

    /// Position of the first record whose barcode equals `barcode` exactly.
    pub fn find_index(&self, barcode: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.barcode(&self.layout) == barcode)
    }

    /// First record whose barcode equals `barcode` exactly.
    pub fn find_by_barcode(&self, barcode: &str) -> Option<&Record> {
        self.find_index(barcode).map(|index| &self.records[index])
    }

    /// Set the found flag of the record at `index`.
    ///
    /// Returns the row appended to the scanned view, or `None` if the record
    /// was already found (or `index` is out of range). Marks the store dirty
    /// only when the flag actually changed.
    pub fn mark_found(&mut self, index: usize) -> Option<&ScannedRow> {
        let record = self.records.get_mut(index)?;
        if !record.mark_found() {
            return None;
        }
        self.tracker.mark_dirty();
        self.scanned.push(record.scanned_row(&self.layout));
        self.scanned.last()
    }

    /// Rebuild the scanned view from the found flags, in file order.
    pub fn rebuild_scanned_view(&mut self) -> &[ScannedRow] {
        self.scanned = self
            .records
            .iter()
            .filter(|record| record.found)
            .map(|record| record.scanned_row(&self.layout))
            .collect();
        &self.scanned
    }

    pub fn scanned_view(&self) -> &[ScannedRow] {
        &self.scanned
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats::from_records(&self.records)
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Write every record back to the open file.
    ///
    /// On failure the file on disk is unchanged and the store stays dirty.
    pub fn save(&mut self) -> Result<()> {
        let file = self.file.as_ref().ok_or(InventoryError::NoInventory)?;

        self.tracker.start_save();
        let result = serialize_inventory(&self.records, &self.layout, &self.format, RecordFilter::All)
            .and_then(|contents| file.save(&contents));

        match result {
            Ok(()) => {
                self.tracker.save_complete();
                Ok(())
            }
            Err(error) => {
                self.tracker.save_failed();
                tracing::warn!(
                    path = %file.path().display(),
                    failed_saves = self.tracker.failed_saves(),
                    unsaved_for_ms = ?self.tracker.ms_since_first_unsaved(),
                    %error,
                    "Inventory save failed"
                );
                Err(InventoryError::Save(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn layout() -> ColumnLayout {
        ColumnLayout {
            header: ["Titel", "Etikett", "Hylla", "Datum", "Skannad"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            title: 0,
            barcode: 1,
            placement: 2,
            shelf: 2,
            date: 3,
            found: 4,
        }
    }

    fn store_with(contents: &str) -> (TempDir, InventoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lista.csv");
        fs::write(&path, contents).unwrap();
        let mut store = InventoryStore::new(FileFormat::default(), layout());
        store.load(&path).unwrap();
        (dir, store)
    }

    #[test]
    fn test_find_is_exact_and_first_match() {
        let (_dir, store) = store_with("h\nEtt;A1\nTvå;A1\nTre; A2\n");
        assert_eq!(store.find_index("A1"), Some(0));
        assert_eq!(store.find_by_barcode("A1").unwrap().title(store.layout()), "Ett");
        assert_eq!(store.find_index("A2"), None);
        assert_eq!(store.find_index("a1"), None);
        assert_eq!(store.find_index(" A2"), Some(2));
    }

    #[test]
    fn test_mark_found_is_idempotent() {
        let (_dir, mut store) = store_with("h\nEtt;A1\nTvå;A2\n");
        assert!(!store.is_dirty());

        let row = store.mark_found(1).cloned().unwrap();
        assert_eq!(row.barcode, "A2");
        assert_eq!(row.title, "Två");
        assert!(store.is_dirty());

        assert!(store.mark_found(1).is_none());
        assert!(store.mark_found(7).is_none());
        assert_eq!(store.scanned_view().len(), 1);
    }

    #[test]
    fn test_load_rebuilds_scanned_view_in_file_order() {
        let (_dir, store) = store_with("h\nEtt;A1;;;ja\nTvå;A2\nTre;A3;;;ja\n");
        let barcodes: Vec<_> = store.scanned_view().iter().map(|r| r.barcode.as_str()).collect();
        assert_eq!(barcodes, vec!["A1", "A3"]);
        assert_eq!(store.stats(), InventoryStats::new(3, 2));
    }

    #[test]
    fn test_failed_load_keeps_previous_inventory() {
        let (dir, mut store) = store_with("h\nEtt;A1\n");
        store.mark_found(0);

        let empty = dir.path().join("tom.csv");
        fs::write(&empty, "h\n").unwrap();
        let result = store.load(&empty);

        assert!(matches!(result, Err(InventoryError::Load(_))));
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.path(), Some(dir.path().join("lista.csv").as_path()));
        assert!(store.is_dirty());
    }

    #[test]
    fn test_save_clears_dirty() {
        let (dir, mut store) = store_with("h\nEtt;A1\n");
        store.mark_found(0);
        store.save().unwrap();

        assert!(!store.is_dirty());
        let text = fs::read_to_string(dir.path().join("lista.csv")).unwrap();
        assert!(text.ends_with("Ett;A1;;;ja\n"));
    }

    #[test]
    fn test_save_without_inventory() {
        let mut store = InventoryStore::new(FileFormat::default(), layout());
        assert!(matches!(store.save(), Err(InventoryError::NoInventory)));
        assert_eq!(store.stats(), InventoryStats::new(0, 0));
    }
}
