use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use inv_cli::console::{ConsoleSink, ScanTally, run_scan_loop};
use inv_core::{InventoryConfig, InventorySession};
use inv_model::{ColumnLayout, DEFAULT_HEADER};

fn write_inventory(dir: &Path) -> PathBuf {
    let layout = ColumnLayout::default();
    let mut text = DEFAULT_HEADER.join(";");
    text.push('\n');
    for (barcode, title, date) in [
        ("A1", "Mio, min Mio", ""),
        ("A2", "Ronja", "2025-01-31"),
        ("A3", "Emil", ""),
    ] {
        let mut fields = vec![""; DEFAULT_HEADER.len()];
        fields[layout.barcode] = barcode;
        fields[layout.title] = title;
        fields[layout.shelf] = "Hc";
        fields[layout.placement] = "Barn";
        fields[layout.date] = date;
        text.push_str(&fields.join(";"));
        text.push('\n');
    }
    let path = dir.join("lista.csv");
    fs::write(&path, text).unwrap();
    path
}

fn session(path: &Path) -> InventorySession<ConsoleSink<Vec<u8>>> {
    let mut session =
        InventorySession::with_sink(InventoryConfig::default(), ConsoleSink::new(Vec::new()));
    session.load(path).unwrap();
    session
}

fn output(session: &InventorySession<ConsoleSink<Vec<u8>>>) -> String {
    String::from_utf8(session.sink().output().clone()).unwrap()
}

#[test]
fn scan_loop_reports_each_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_inventory(dir.path());
    let mut session = session(&path);

    let input = Cursor::new("A2\nA2\n\nZ9\nA1 \n");
    let tally = run_scan_loop(&mut session, input).unwrap();

    assert_eq!(
        tally,
        ScanTally {
            newly_found: 1,
            already_seen: 1,
            not_found: 2,
            ignored: 1,
            failed_saves: 0,
        }
    );
    let expected = [
        "3 items, 0 scanned (0.00%)",
        "EXPIRY DATE: Item has an expiry date: 2025-01-31",
        "+ A2\tRonja\tHc\tBarn\t2025-01-31",
        "3 items, 1 scanned (33.33%)",
        "ALREADY SCANNED: A2 has already been scanned",
        "NOT FOUND: Z9 not found",
        "NOT FOUND: A1  not found",
    ];
    assert_eq!(output(&session).lines().collect::<Vec<_>>(), expected);
    assert!(!session.is_dirty());
}

#[test]
fn crlf_line_endings_are_stripped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_inventory(dir.path());
    let mut session = session(&path);

    let tally = run_scan_loop(&mut session, Cursor::new("A3\r\nA1")).unwrap();
    assert_eq!(tally.newly_found, 2);

    let saved = fs::read_to_string(&path).unwrap();
    assert_eq!(saved.lines().filter(|line| line.ends_with(";ja")).count(), 2);
}
