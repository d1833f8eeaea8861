//! Terminal front end: a display sink and the stdin scan loop.

use std::io::{self, BufRead, Write};

use inv_core::{
    InventorySession, Notification, NotificationKind, ScanOutcome, SessionSink,
};
use inv_model::{InventoryStats, ScannedRow};

/// Writes notifications, newly scanned rows and stats as plain lines.
///
/// The first write error is kept and reported by [`ConsoleSink::take_error`];
/// later output is dropped.
pub struct ConsoleSink<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn line(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = writeln!(self.out, "{text}") {
            self.error = Some(error);
        }
    }
}

fn kind_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::NotFound => "NOT FOUND",
        NotificationKind::AlreadySeen => "ALREADY SCANNED",
        NotificationKind::ExpiryDate => "EXPIRY DATE",
        NotificationKind::SaveFailed => "SAVE FAILED",
    }
}

impl<W: Write> SessionSink for ConsoleSink<W> {
    fn notify(&mut self, notification: Notification) {
        self.line(&format!(
            "{}: {}",
            kind_label(notification.kind),
            notification.message
        ));
    }

    fn append_scanned(&mut self, row: &ScannedRow) {
        self.line(&format!("+ {}", row.values().join("\t")));
    }

    fn stats_changed(&mut self, stats: InventoryStats) {
        self.line(&stats.to_string());
    }
}

/// Counts of scan outcomes over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanTally {
    pub newly_found: usize,
    pub already_seen: usize,
    pub not_found: usize,
    pub ignored: usize,
    pub failed_saves: usize,
}

/// Feeds every line of `input` to the session as one barcode.
///
/// Only the line terminator is removed; surrounding spaces are part of the
/// barcode. Stops at end of input.
pub fn run_scan_loop<R, S>(session: &mut InventorySession<S>, input: R) -> io::Result<ScanTally>
where
    R: BufRead,
    S: SessionSink,
{
    let mut tally = ScanTally::default();
    for line in input.lines() {
        let barcode = line?;
        let report = session.process_scan(&barcode);
        match report.outcome {
            ScanOutcome::Ignored => tally.ignored += 1,
            ScanOutcome::NotFound(_) => tally.not_found += 1,
            ScanOutcome::AlreadySeen(_) => tally.already_seen += 1,
            ScanOutcome::NewlyFound { .. } => tally.newly_found += 1,
        }
        if let Some(error) = report.save_error {
            tally.failed_saves += 1;
            if let Some(hint) = error.suggestion() {
                tracing::warn!(%hint, "Scan saved in memory only");
            }
        }
    }
    Ok(tally)
}
