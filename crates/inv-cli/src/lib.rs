//! CLI library components for the inventory scanner.

pub mod console;
pub mod logging;
pub mod tables;
