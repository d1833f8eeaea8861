//! The scan state machine.
//!
//! Each barcode event is classified in a fixed order:
//!
//! 1. empty input: ignored
//! 2. unknown barcode: not found
//! 3. known and already found: already seen
//! 4. known and not yet found: newly found
//!
//! [`process_scan`] only decides. Applying the decision (setting the flag,
//! saving, updating the display) is the session's job.

use std::time::Duration;

use inv_model::Record;

use crate::notify::Notification;
use crate::store::InventoryStore;

/// Result of one barcode event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Empty input. Nothing happened.
    Ignored,
    /// No record has this barcode.
    NotFound(String),
    /// The record was found by an earlier scan.
    AlreadySeen(Record),
    /// The record is now found. Carries its expiry date, if any.
    NewlyFound {
        record: Record,
        expiry: Option<String>,
    },
}

impl ScanOutcome {
    pub fn is_newly_found(&self) -> bool {
        matches!(self, Self::NewlyFound { .. })
    }
}

/// What a scan should do, computed without touching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStep {
    pub outcome: ScanOutcome,
    /// Notices to show, in order.
    pub notifications: Vec<Notification>,
    /// Record to mark found. Set only for [`ScanOutcome::NewlyFound`].
    pub mark: Option<usize>,
}

impl ScanStep {
    fn terminal(outcome: ScanOutcome, notifications: Vec<Notification>) -> Self {
        Self {
            outcome,
            notifications,
            mark: None,
        }
    }

    /// A newly found record must be written through to disk.
    pub fn requires_save(&self) -> bool {
        self.mark.is_some()
    }
}

/// Classify a barcode against the store.
///
/// The barcode is matched exactly; callers strip line terminators, nothing
/// else is trimmed or normalized.
pub fn process_scan(store: &InventoryStore, barcode: &str, notice_duration: Duration) -> ScanStep {
    if barcode.is_empty() {
        return ScanStep::terminal(ScanOutcome::Ignored, Vec::new());
    }

    let Some(index) = store.find_index(barcode) else {
        tracing::debug!(barcode, "Barcode not found");
        return ScanStep::terminal(
            ScanOutcome::NotFound(barcode.to_string()),
            vec![Notification::not_found(barcode)],
        );
    };

    let record = &store.records()[index];
    if record.found {
        tracing::debug!(barcode, "Barcode already scanned");
        return ScanStep::terminal(
            ScanOutcome::AlreadySeen(record.clone()),
            vec![Notification::already_seen(barcode, notice_duration)],
        );
    }

    let expiry = record.date(store.layout()).map(str::to_string);
    let notifications = expiry
        .iter()
        .map(|date| Notification::expiry_date(date, notice_duration))
        .collect();

    let mut record = record.clone();
    record.found = true;
    tracing::debug!(barcode, title = record.title(store.layout()), "Barcode scanned");

    ScanStep {
        outcome: ScanOutcome::NewlyFound { record, expiry },
        notifications,
        mark: Some(index),
    }
}
