//! Inventory progress statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Point-in-time counts for the loaded inventory.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Number of records.
    pub total: usize,
    /// Number of records with the found flag set.
    pub found: usize,
    /// `found / total * 100`, rounded to two decimals. Zero for an empty set.
    pub percent_found: f64,
}

impl InventoryStats {
    /// Builds stats from raw counts.
    #[allow(clippy::cast_precision_loss)] // Acceptable for statistics display
    pub fn new(total: usize, found: usize) -> Self {
        let percent_found = if total == 0 {
            0.0
        } else {
            ((found as f64 / total as f64) * 10_000.0).round() / 100.0
        };
        Self {
            total,
            found,
            percent_found,
        }
    }

    /// Counts found records in `records`.
    pub fn from_records(records: &[Record]) -> Self {
        let found = records.iter().filter(|record| record.found).count();
        Self::new(records.len(), found)
    }

    /// Records not yet scanned.
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.found)
    }
}

impl fmt::Display for InventoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items, {} scanned ({:.2}%)",
            self.total, self.found, self.percent_found
        )
    }
}
