//! Notifications and the display sink the session reports to.
//!
//! The core never owns timers or widgets. It tells the collaborator what to
//! show and for how long; dismissing is up to the collaborator.

use std::sync::mpsc::Sender;
use std::time::Duration;

use inv_model::{InventoryStats, ScannedRow};

/// Kind of notification, which determines how it is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Scanned barcode is not in the inventory. Shown until acknowledged.
    NotFound,
    /// Item was already scanned. Transient.
    AlreadySeen,
    /// Newly scanned item carries a due/expiry date. Transient.
    ExpiryDate,
    /// Write-through save failed. Shown until acknowledged.
    SaveFailed,
}

/// A message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Auto-dismiss delay. `None` means the notice stays until acknowledged.
    pub dismiss_after: Option<Duration>,
}

impl Notification {
    pub fn not_found(barcode: &str) -> Self {
        Self {
            kind: NotificationKind::NotFound,
            message: format!("{barcode} not found"),
            dismiss_after: None,
        }
    }

    pub fn already_seen(barcode: &str, duration: Duration) -> Self {
        Self {
            kind: NotificationKind::AlreadySeen,
            message: format!("{barcode} has already been scanned"),
            dismiss_after: Some(duration),
        }
    }

    pub fn expiry_date(date: &str, duration: Duration) -> Self {
        Self {
            kind: NotificationKind::ExpiryDate,
            message: format!("Item has an expiry date: {date}"),
            dismiss_after: Some(duration),
        }
    }

    pub fn save_failed(message: String) -> Self {
        Self {
            kind: NotificationKind::SaveFailed,
            message,
            dismiss_after: None,
        }
    }

    /// Whether the collaborator should clear this on its own.
    pub fn is_transient(&self) -> bool {
        self.dismiss_after.is_some()
    }
}

/// Receives everything the session wants displayed.
///
/// All methods default to doing nothing, so a sink only implements what it
/// shows.
pub trait SessionSink {
    fn notify(&mut self, _notification: Notification) {}

    /// A newly scanned row, in scan order.
    fn append_scanned(&mut self, _row: &ScannedRow) {}

    /// The scanned view was rebuilt from scratch, e.g. after a load.
    fn replace_scanned(&mut self, _rows: &[ScannedRow]) {}

    fn stats_changed(&mut self, _stats: InventoryStats) {}
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SessionSink for NullSink {}

/// Owned form of every [`SessionSink`] call, for channel-based collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Notify(Notification),
    AppendScanned(ScannedRow),
    ReplaceScanned(Vec<ScannedRow>),
    StatsChanged(InventoryStats),
}

impl SessionSink for Sender<SessionEvent> {
    // A dropped receiver means nobody is displaying anything any more.
    fn notify(&mut self, notification: Notification) {
        let _ = self.send(SessionEvent::Notify(notification));
    }

    fn append_scanned(&mut self, row: &ScannedRow) {
        let _ = self.send(SessionEvent::AppendScanned(row.clone()));
    }

    fn replace_scanned(&mut self, rows: &[ScannedRow]) {
        let _ = self.send(SessionEvent::ReplaceScanned(rows.to_vec()));
    }

    fn stats_changed(&mut self, stats: InventoryStats) {
        let _ = self.send(SessionEvent::StatsChanged(stats));
    }
}
