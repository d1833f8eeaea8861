//! Delimited text reading.

mod decode;
mod quotes;
mod reader;

pub use decode::{decode_text, strip_bom};
pub use quotes::{QuoteViolation, validate_quotes};
pub use reader::{InventoryTable, LoadedInventory, parse_inventory, read_inventory};
