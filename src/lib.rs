// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # plansplit
//!
//! Splits a JSON change plan into one `before` and one `after` JSON file per
//! resource change.
//!
//! ## Overview
//!
//! The input is a plan document such as the output of
//! `terraform show -json plan.out`:
//!
//! ```json
//! { "resource_changes": [
//!     { "address": "aws_instance.web",
//!       "change": { "before": null, "after": { "id": "i-123" } } } ] }
//! ```
//!
//! For every entry, `<dir>/before/<address>.json` and
//! `<dir>/after/<address>.json` are written as indented JSON, so that the two
//! trees can be compared with any directory diff tool.
//!
//! ## Modules
//!
//! - [`plan`]: Reading the plan and decoding resource change entries
//! - [`layout`]: Output directories, address resolution, re-indentation and file emission
//! - [`pipeline`]: The read, prepare, emit pipeline
//! - [`cli`]: Command-line interface
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```no_run
//! use plansplit::{Pipeline, SplitConfig};
//!
//! let report = Pipeline::new(&SplitConfig::default()).run(std::io::stdin().lock())?;
//! eprintln!("wrote {} files", report.files_written);
//! # Ok::<(), plansplit::PlanSplitError>(())
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod plan;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, OutputFormat, OutputFormatter};
pub use error::{DecodeError, FilesystemError, FsOperation, InputError, PlanSplitError, Result};
pub use layout::{AddressMode, EmitReport, EmittedRecord, OutputLayout, RecordEmitter};
pub use pipeline::{Pipeline, SplitConfig};
pub use plan::{Change, ChangeKind, Plan, PlanReader, ResourceChange};
