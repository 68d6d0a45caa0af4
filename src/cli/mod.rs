//! CLI module for plansplit.
//!
//! This module provides the command-line interface: argument parsing and
//! rendering of the run summary.

mod commands;
mod output;

pub use commands::{Cli, OutputFormat};
pub use output::OutputFormatter;
