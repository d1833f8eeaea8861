//! Inventory file loading.
//!
//! Turns an externally authored, semicolon-delimited inventory file into an
//! ordered list of [`inv_model::Record`]s.
//!
//! # Features
//!
//! - **BOM handling**: a leading UTF-8 byte-order mark is always stripped
//! - **Legacy encodings**: Windows-1252 files are transcoded before splitting
//! - **Lazy quotes**: recoverable quoting mistakes are accepted by default;
//!   strict mode reports them with a line number
//! - **Short rows**: padded to the layout's minimum column count, never dropped
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use inv_ingest::read_inventory;
//! use inv_model::{ColumnLayout, FileFormat};
//!
//! let loaded = read_inventory(Path::new("lista.csv"), &FileFormat::default(), &ColumnLayout::default())?;
//! println!("{} records", loaded.table.records.len());
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use crate::csv::{
    InventoryTable, LoadedInventory, QuoteViolation, decode_text, parse_inventory,
    read_inventory, strip_bom, validate_quotes,
};
