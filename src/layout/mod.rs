//! Output layout module for plansplit.
//!
//! This module owns everything written to disk:
//! - Preparing the `before` and `after` directories
//! - Turning resource addresses into file paths
//! - Emitting each resource change as a pair of JSON files
//! - Re-indenting document text without re-encoding it

mod address;
mod dirs;
mod emitter;
mod indent;

pub use address::AddressMode;
pub use dirs::{AFTER_DIR, BEFORE_DIR, OutputLayout};
pub use emitter::{EmitReport, EmittedRecord, RecordEmitter, write_document};
