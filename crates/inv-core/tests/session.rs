use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use inv_core::{
    InventoryConfig, InventoryError, InventorySession, NotificationKind, ScanOutcome,
    SessionEvent,
};
use inv_model::{ColumnLayout, DEFAULT_HEADER, InventoryStats};
use inv_persistence::PersistenceError;
use tempfile::TempDir;

fn row(barcode: &str, title: &str, date: &str, found: &str) -> String {
    let layout = ColumnLayout::default();
    let mut fields = vec![""; DEFAULT_HEADER.len()];
    fields[0] = "1";
    fields[layout.title] = title;
    fields[layout.barcode] = barcode;
    fields[layout.shelf] = "Hc";
    fields[layout.date] = date;
    fields[layout.found] = found;
    fields[30] = "Storgatan 1";
    fields.join(";")
}

fn write_inventory(dir: &Path, rows: &[String]) -> PathBuf {
    let mut text = String::from("\u{feff}");
    text.push_str(&DEFAULT_HEADER.join(";"));
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    let path = dir.join("lista.csv");
    fs::write(&path, text).expect("write inventory");
    path
}

fn three_items(dir: &Path) -> PathBuf {
    write_inventory(
        dir,
        &[
            row("A1", "Mio, min Mio", "", ""),
            row("A2", "Ronja rövardotter", "", ""),
            row("A3", "Emil i Lönneberga", "", ""),
        ],
    )
}

fn session_in(dir: &TempDir) -> InventorySession {
    let config = InventoryConfig {
        export_dir: Some(dir.path().join("exports")),
        ..InventoryConfig::default()
    };
    fs::create_dir_all(dir.path().join("exports")).expect("create export dir");
    InventorySession::new(config)
}

#[test]
fn scan_export_walkthrough() {
    let dir = tempfile::tempdir().unwrap();
    let path = three_items(dir.path());
    let mut session = session_in(&dir);

    let summary = session.load(&path).expect("load");
    assert_eq!(summary.records, 3);
    assert!(summary.scanned.is_empty());

    let report = session.process_scan("A2");
    assert!(report.outcome.is_newly_found());
    assert!(report.is_saved());
    let stats = session.stats();
    assert_eq!(stats, InventoryStats::new(3, 1));
    assert!((stats.percent_found - 33.33).abs() < 1e-9);

    let report = session.process_scan("A2");
    assert!(matches!(report.outcome, ScanOutcome::AlreadySeen(_)));
    assert_eq!(session.stats(), stats);

    let report = session.process_scan("Z9");
    assert_eq!(report.outcome, ScanOutcome::NotFound("Z9".to_string()));
    assert_eq!(session.stats(), stats);

    let export = session.export_unscanned().expect("export");
    let text = fs::read_to_string(&export).unwrap();
    let barcodes: Vec<&str> = text
        .lines()
        .skip(1)
        .map(|line| line.split(';').nth(2).unwrap())
        .collect();
    assert_eq!(barcodes, vec!["A1", "A3"]);

    assert_eq!(session.summary().as_deref(), Some("lista.csv: 3 items, 1 scanned"));
}

#[test]
fn newly_found_is_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = three_items(dir.path());
    let mut session = session_in(&dir);
    session.load(&path).unwrap();

    session.process_scan("A3");
    assert!(!session.is_dirty());

    let text = fs::read_to_string(&path).unwrap();
    let a3 = text.lines().find(|line| line.contains(";A3;")).unwrap();
    assert!(a3.ends_with(";Storgatan 1;ja"));
    // Untouched rows keep their opaque columns
    let a1 = text.lines().find(|line| line.contains(";A1;")).unwrap();
    assert!(a1.ends_with(";Storgatan 1;"));
}

#[test]
fn rescanning_adds_one_scanned_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = three_items(dir.path());
    let mut session = session_in(&dir);
    session.load(&path).unwrap();

    for barcode in ["A1", "A1", "A1"] {
        session.process_scan(barcode);
    }
    assert_eq!(session.scanned_view().len(), 1);
    assert_eq!(session.scanned_view()[0].title, "Mio, min Mio");
}

#[test]
fn unknown_and_empty_barcodes_change_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = three_items(dir.path());
    let before = fs::read(&path).unwrap();

    let (tx, rx) = mpsc::channel();
    let mut session = InventorySession::with_sink(InventoryConfig::default(), tx);
    session.load(&path).unwrap();
    rx.try_iter().for_each(drop);

    assert_eq!(session.process_scan("").outcome, ScanOutcome::Ignored);
    assert_eq!(rx.try_iter().count(), 0);

    session.process_scan("Z9");
    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], SessionEvent::Notify(n) if n.kind == NotificationKind::NotFound && n.message.contains("Z9")));

    assert!(session.scanned_view().is_empty());
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn expiry_date_raises_transient_notice() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_inventory(dir.path(), &[row("B7", "Pippi", "2025-01-31", "")]);

    let (tx, rx) = mpsc::channel();
    let mut session = InventorySession::with_sink(InventoryConfig::default(), tx);
    session.load(&path).unwrap();
    rx.try_iter().for_each(drop);

    let report = session.process_scan("B7");
    assert!(matches!(
        report.outcome,
        ScanOutcome::NewlyFound { expiry: Some(ref date), .. } if date == "2025-01-31"
    ));

    let notice = rx
        .try_iter()
        .find_map(|event| match event {
            SessionEvent::Notify(n) => Some(n),
            _ => None,
        })
        .expect("expiry notice");
    assert_eq!(notice.kind, NotificationKind::ExpiryDate);
    assert!(notice.is_transient());
}

#[test]
fn reopening_rebuilds_scanned_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = three_items(dir.path());

    let mut first = session_in(&dir);
    first.load(&path).unwrap();
    first.process_scan("A3");
    first.process_scan("A1");
    let order: Vec<_> = first.scanned_view().iter().map(|r| r.barcode.clone()).collect();
    assert_eq!(order, vec!["A3", "A1"]);
    drop(first);

    let mut second = session_in(&dir);
    let summary = second.load(&path).unwrap();
    let order: Vec<_> = summary.scanned.iter().map(|r| r.barcode.as_str()).collect();
    assert_eq!(order, vec!["A1", "A3"]);
    assert_eq!(summary.stats, InventoryStats::new(3, 2));
    assert!(matches!(second.process_scan("A1").outcome, ScanOutcome::AlreadySeen(_)));
}

#[test]
fn failed_load_keeps_current_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let path = three_items(dir.path());
    let mut session = session_in(&dir);
    session.load(&path).unwrap();
    session.process_scan("A1");

    let broken = dir.path().join("tom.csv");
    fs::write(&broken, DEFAULT_HEADER.join(";")).unwrap();
    let err = session.load(&broken).unwrap_err();
    assert!(matches!(err, InventoryError::Load(_)));

    let missing = session.load(&dir.path().join("saknas.csv")).unwrap_err();
    assert!(matches!(missing, InventoryError::Load(_)));

    assert_eq!(session.stats(), InventoryStats::new(3, 1));
    assert_eq!(session.store().path(), Some(path.as_path()));
}

#[test]
fn failed_save_keeps_flag_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = three_items(dir.path());

    let (tx, rx) = mpsc::channel();
    let mut session = InventorySession::with_sink(InventoryConfig::default(), tx);
    session.load(&path).unwrap();

    // A non-empty directory at the target path makes the rename fail
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();
    fs::write(path.join("lock"), b"").unwrap();

    let report = session.process_scan("A2");
    assert!(report.outcome.is_newly_found());
    assert!(matches!(
        report.save_error,
        Some(InventoryError::Save(PersistenceError::AtomicWriteFailed { .. }))
    ));
    assert!(session.is_dirty());
    assert_eq!(session.stats().found, 1);
    assert!(rx.try_iter().any(|event| matches!(
        event,
        SessionEvent::Notify(n) if n.kind == NotificationKind::SaveFailed
    )));
    // Only the blocking directory; no temp files left behind
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

    fs::remove_dir_all(&path).unwrap();
    session.save().expect("retry save");
    assert!(!session.is_dirty());
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.lines().any(|line| line.contains(";A2;") && line.ends_with(";ja")));
}

#[test]
fn windows_1252_inventory_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lista.csv");
    let mut bytes = b"Nr;Huvuduppslag;Etikettnr.\n".to_vec();
    bytes.extend_from_slice(b"1;Br\xF6derna Lejonhj\xE4rta;C3\n");
    fs::write(&path, &bytes).unwrap();

    let mut config = InventoryConfig::default();
    config.format.encoding = inv_model::TextEncoding::Windows1252;
    let mut session = InventorySession::new(config);
    session.load(&path).unwrap();
    session.process_scan("C3");

    let saved = fs::read(&path).unwrap();
    assert!(!saved.starts_with(inv_model::UTF8_BOM));
    assert!(saved.windows(20).any(|w| w == b"Br\xF6derna Lejonhj\xE4rta"));
    assert!(saved.ends_with(b";ja\n"));
}
