//! Dirty state tracking for the loaded inventory.

use std::time::Instant;

/// Tracks whether the in-memory inventory differs from the file on disk.
///
/// A scan that marks a record found makes the store dirty until the next
/// successful save. A failed save leaves it dirty.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty: bool,

    /// When the first unsaved change was made.
    /// Reset when saved.
    first_unsaved_change: Option<Instant>,

    saving: bool,

    /// Number of consecutive failed saves.
    failed_saves: u32,
}

impl DirtyTracker {
    /// Create a new tracker with no unsaved changes.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Mark the inventory as having unsaved changes.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        if self.first_unsaved_change.is_none() {
            self.first_unsaved_change = Some(Instant::now());
        }
    }

    /// Mark that a save has started.
    pub fn start_save(&mut self) {
        self.saving = true;
    }

    /// Mark that a save has completed successfully.
    pub fn save_complete(&mut self) {
        self.dirty = false;
        self.saving = false;
        self.first_unsaved_change = None;
        self.failed_saves = 0;
    }

    /// Mark that a save has failed.
    pub fn save_failed(&mut self) {
        self.saving = false;
        self.failed_saves += 1;
    }

    pub fn failed_saves(&self) -> u32 {
        self.failed_saves
    }

    /// Get milliseconds since the first unsaved change.
    pub fn ms_since_first_unsaved(&self) -> Option<u64> {
        self.first_unsaved_change
            .map(|t| t.elapsed().as_millis() as u64)
    }
}
