//! Barcode inventory session.
//!
//! Ties loading, scanning and saving together behind [`InventorySession`]:
//!
//! ```ignore
//! use inv_core::{InventoryConfig, InventorySession, ScanOutcome};
//!
//! let mut session = InventorySession::new(InventoryConfig::default());
//! session.load(Path::new("lista.csv"))?;
//! match session.process_scan("A2").outcome {
//!     ScanOutcome::NewlyFound { .. } => println!("{}", session.stats()),
//!     other => println!("{other:?}"),
//! }
//! ```
//!
//! Every scan that marks an item found is written through to disk before
//! the call returns, using write-then-rename so the file is never left
//! half-written.

pub mod config;
pub mod error;
pub mod notify;
pub mod scan;
pub mod session;
pub mod store;

pub use config::{DEFAULT_NOTICE_DURATION_MS, InventoryConfig};
pub use error::{InventoryError, Result};
pub use notify::{Notification, NotificationKind, NullSink, SessionEvent, SessionSink};
pub use scan::{ScanOutcome, ScanStep, process_scan};
pub use session::{InventorySession, LoadSummary, ScanReport};
pub use store::InventoryStore;
