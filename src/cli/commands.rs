//! CLI argument definitions.
//!
//! plansplit has no subcommands; it reads a plan on stdin and writes files.

use clap::Parser;
use std::path::PathBuf;

use crate::layout::AddressMode;
use crate::pipeline::{DEFAULT_OUTPUT_DIR, SplitConfig};

/// plansplit - Split a JSON change plan into per-resource before/after files.
///
/// Reads the plan from standard input. `<dir>/before` and `<dir>/after` are
/// deleted and recreated on every run.
#[derive(Parser, Debug)]
#[command(name = "plansplit")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Directory to write the output to.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub dir: PathBuf,

    /// How resource addresses are turned into file names.
    #[arg(long, value_enum, default_value_t = AddressMode::Sanitize)]
    pub address_mode: AddressMode,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not print the summary.
    #[arg(short, long)]
    pub quiet: bool,

    /// Summary format (text, json).
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Builds the pipeline configuration from the arguments.
    #[must_use]
    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            output_dir: self.dir.clone(),
            address_mode: self.address_mode,
        }
    }
}
