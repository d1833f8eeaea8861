//! Table rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use inv_model::{InventoryStats, ScannedRow};

use crate::console::ScanTally;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn stats_table(stats: &InventoryStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Items"),
        header_cell("Scanned"),
        header_cell("Remaining"),
        header_cell("Scanned %"),
    ]);
    apply_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(stats.total),
        count_cell(stats.found, Color::Green),
        count_cell(stats.remaining(), Color::Yellow),
        Cell::new(format!("{:.2}", stats.percent_found)).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn scanned_table(rows: &[ScannedRow]) -> Table {
    let mut table = Table::new();
    table.set_header(ScannedRow::LABELS.iter().map(|label| header_cell(label)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for row in rows {
        let [barcode, rest @ ..] = row.values();
        let mut cells = vec![Cell::new(barcode).fg(Color::Blue).add_attribute(Attribute::Bold)];
        cells.extend(rest.iter().map(|value| text_cell(value)));
        table.add_row(cells);
    }
    table
}

pub fn tally_table(tally: &ScanTally) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Outcome"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Newly scanned", tally.newly_found, Color::Green),
        ("Already scanned", tally.already_seen, Color::Yellow),
        ("Not found", tally.not_found, Color::Red),
        ("Failed saves", tally.failed_saves, Color::Red),
    ];
    for (label, count, color) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count, color)]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
