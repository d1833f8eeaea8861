//! Export of unscanned items.

use std::io::Write;
use std::path::{Path, PathBuf};

use inv_model::{ColumnLayout, FileFormat, Record};

use super::serialize::{RecordFilter, serialize_inventory};
use crate::error::{PersistenceError, Result};

/// Writes every record that has not been found to a new file in `dir`.
///
/// The file is named `export-YYYY-MM-DD.<random>.csv` and is never
/// overwritten by a later export. Its layout and encoding match a full save.
/// On error no file is left behind.
pub fn export_unscanned(
    records: &[Record],
    layout: &ColumnLayout,
    format: &FileFormat,
    dir: &Path,
) -> Result<PathBuf> {
    let contents = serialize_inventory(records, layout, format, RecordFilter::Unscanned)?;

    let prefix = format!("export-{}.", chrono::Local::now().format("%Y-%m-%d"));
    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".csv")
        .tempfile_in(dir)
        .map_err(|e| PersistenceError::io("create export", dir, e))?;

    temp.write_all(&contents)
        .map_err(|e| PersistenceError::io("write", temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| PersistenceError::io("sync", temp.path(), e))?;

    let (_, path) = temp.keep().map_err(|e| PersistenceError::io("keep", dir, e.error))?;

    let exported = records.iter().filter(|record| !record.found).count();
    tracing::info!(path = %path.display(), records = exported, "Exported unscanned items");
    Ok(path)
}
