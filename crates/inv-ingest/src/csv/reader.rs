//! Inventory file reading.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use inv_model::{ColumnLayout, FileFormat, Record};

use crate::error::{IngestError, Result};

use super::decode::decode_text;
use super::quotes::validate_quotes;

/// Header row and records of an inventory file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryTable {
    /// The file's own header row. Not validated; saves re-emit the canonical one.
    pub header: Vec<String>,
    /// Data rows, each padded to the layout's minimum column count.
    pub records: Vec<Record>,
}

/// An inventory table together with the handle it was read from.
#[derive(Debug)]
pub struct LoadedInventory {
    pub table: InventoryTable,
    pub file: File,
}

/// Opens and parses an inventory file.
///
/// The returned handle stays open so the caller can keep ownership of the
/// file for the lifetime of the loaded inventory.
pub fn read_inventory(path: &Path, format: &FileFormat, layout: &ColumnLayout) -> Result<LoadedInventory> {
    let mut file = File::open(path).map_err(|e| IngestError::read(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| IngestError::read(path, e))?;

    let table = parse_inventory(&bytes, path, format, layout)?;
    tracing::info!(
        path = %path.display(),
        records = table.records.len(),
        encoding = format.encoding.label(),
        "Loaded inventory"
    );
    Ok(LoadedInventory { table, file })
}

/// Parses inventory bytes.
///
/// The first row is the header and is discarded from the records. Rows
/// shorter than [`ColumnLayout::min_columns`] are padded with empty fields;
/// longer rows are kept as-is. A file without any data rows is an error.
pub fn parse_inventory(
    bytes: &[u8],
    path: &Path,
    format: &FileFormat,
    layout: &ColumnLayout,
) -> Result<InventoryTable> {
    let text = decode_text(bytes, format.encoding, path)?;

    if !format.lazy_quotes {
        validate_quotes(&text, format.delimiter).map_err(|violation| IngestError::Parse {
            path: path.to_path_buf(),
            line: violation.line,
            reason: violation.reason,
        })?;
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter_byte())
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rows = reader.records();
    let header: Vec<String> = match rows.next() {
        Some(row) => row.map_err(csv_error)?.iter().map(str::to_string).collect(),
        None => {
            return Err(IngestError::EmptyInventory {
                path: path.to_path_buf(),
            });
        }
    };

    let min_columns = layout.min_columns();
    let mut records = Vec::new();
    let mut padded = 0usize;
    for row in rows {
        let row = row.map_err(csv_error)?;
        if row.len() < min_columns {
            padded += 1;
        }
        let found = row.get(layout.found) == Some(format.found_marker.as_str());
        let fields = row.iter().map(str::to_string).collect();
        records.push(Record::from_fields(fields, min_columns, found));
    }

    if records.is_empty() {
        return Err(IngestError::EmptyInventory {
            path: path.to_path_buf(),
        });
    }

    if padded > 0 {
        tracing::debug!(path = %path.display(), rows = padded, "Padded short rows");
    }
    let duplicates = count_duplicate_barcodes(&records, layout);
    if duplicates > 0 {
        tracing::debug!(
            path = %path.display(),
            duplicates,
            "Duplicate barcodes; only the first occurrence is scannable"
        );
    }

    Ok(InventoryTable { header, records })
}

fn count_duplicate_barcodes(records: &[Record], layout: &ColumnLayout) -> usize {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .map(|record| record.barcode(layout))
        .filter(|barcode| !barcode.is_empty() && !seen.insert(*barcode))
        .count()
}
