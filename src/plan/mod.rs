//! Plan module for plansplit.
//!
//! This module handles everything about the input document:
//! - Reading the whole plan from a byte stream
//! - Keeping resource change entries undecoded until they are emitted
//! - Decoding one entry into its address and before/after documents

mod reader;
mod types;

pub use reader::PlanReader;
pub use types::{Change, ChangeKind, Plan, ResourceChange};
