//! Crash-safe storage for barcode inventory files.
//!
//! # Features
//!
//! - **Atomic writes** (temp file + rename) so the inventory file is never
//!   left half-written
//! - **Serialized saves** through one lock per open inventory
//! - **Exports** of unscanned items to fresh, dated files
//! - **Dirty tracking** for the "unsaved changes" indicator
//!
//! # File Format
//!
//! Inventory files are delimiter-separated text in the configured encoding.
//! Saves always emit the canonical header row, then one row per record in
//! load order. A found record's found column holds the found marker.
//!
//! ```text
//! <BOM>Nr;Huvuduppslag;Etikettnr.;...;Skannad
//! 1;Mio, min Mio;A1;...;
//! 2;Ronja rövardotter;A2;...;ja
//! ```
//!
//! # Architecture
//!
//! - `io/` - Serialization, atomic save and export
//! - `tracker.rs` - Dirty state tracking
//! - `error.rs` - Error types with user-friendly messages

mod error;
mod io;
mod tracker;

pub use error::{PersistenceError, Result};
pub use io::{InventoryFile, RecordFilter, export_unscanned, serialize_inventory};
pub use tracker::DirtyTracker;
