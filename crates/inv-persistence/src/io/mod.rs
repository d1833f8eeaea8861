//! File I/O operations for inventories.

mod export;
mod save;
mod serialize;

pub use export::export_unscanned;
pub use save::InventoryFile;
pub use serialize::{RecordFilter, serialize_inventory};
