//! Shared types for barcode inventory files.
//!
//! An inventory file is a delimited text file with one header row followed by
//! one row per catalogued item. This crate describes those rows without doing
//! any I/O:
//!
//! - [`Record`] - one item row, with the found flag decoded to a `bool`
//! - [`ColumnLayout`] - canonical header and the positions of the columns the
//!   scanner interprets
//! - [`FileFormat`] - text encoding, delimiter, found marker and quote mode
//! - [`ScannedRow`] - display projection of a found record
//! - [`InventoryStats`] - totals shown to the operator

pub mod format;
pub mod layout;
pub mod record;
pub mod stats;

pub use format::{FileFormat, TextEncoding, UTF8_BOM};
pub use layout::{ColumnLayout, DEFAULT_HEADER};
pub use record::{Record, ScannedRow};
pub use stats::InventoryStats;
